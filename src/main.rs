use std::path::PathBuf;
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::config::Config;
use crate::controller::parse_and_run_command;
use crate::editor::FintrackHelper;
use crate::ledger::Ledger;
use crate::store::CsvStore;

mod budget;
mod command;
mod config;
mod controller;
mod editor;
mod export;
mod filter;
mod input;
mod ledger;
mod record;
mod store;
mod summary;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Ledger csv file, overrides the one named in config
    file: Option<PathBuf>,

    /// Config file path, defaults to fintrack/config.toml under the user config dir
    #[clap(long)]
    config: Option<PathBuf>,
}

static COMMAND_HISTORY_FILE: &str = ".fintrack_history";
static PROMPT: &str = "# ";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let config = match cli.config.or_else(Config::default_path) {
        Some(path) => Config::load_from_file(&path)?,
        None => Config::default(),
    };
    let ledger_file = cli.file.unwrap_or_else(|| config.ledger.clone());
    let store = CsvStore::open(&ledger_file)?;
    info!("Using ledger {}", store.path().display());
    let mut ledger = Ledger::new(store);

    let mut rl = Editor::<FintrackHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(FintrackHelper::new(&config.categories, PROMPT)));
    if rl.load_history(COMMAND_HISTORY_FILE).is_err() {
        println!("No previous history.");
    }

    let mut buffer: Vec<String> = vec![];
    loop {
        let readline = rl.readline(PROMPT);
        match readline {
            Ok(line) => {
                let line = line.trim();
                let is_last = line.ends_with(';');
                if !line.is_empty() {
                    buffer.push(line.to_string());
                }
                if is_last {
                    let statement = buffer.join("\n");
                    rl.add_history_entry(statement.trim())?;

                    let today = chrono::Local::now().date_naive();
                    if let Err(err) = parse_and_run_command(&mut ledger, &config, today, &statement) {
                        error!("{:#}", err);
                    }

                    buffer.clear();
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break
            }
        }
    }
    rl.save_history(COMMAND_HISTORY_FILE)?;

    Ok(())
}
