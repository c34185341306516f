use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::Deserialize;

const DEFAULT_LEDGER_FILE: &str = "transactions.csv";
const DEFAULT_CURRENCY: &str = "₹";
const DEFAULT_CATEGORIES: [&str; 8] = [
    "Salary", "Food", "Transport", "Electricity Bills", "Telephone/Mobile Bills", "Water Bill", "Entertainment", "Other"
];

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Ledger csv file
    pub(crate) ledger: PathBuf,
    /// Symbol printed in front of amounts
    pub(crate) currency: String,
    /// Categories suggested when adding a transaction
    pub(crate) categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ledger: PathBuf::from(DEFAULT_LEDGER_FILE),
            currency: DEFAULT_CURRENCY.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load config from a toml file. A missing file gives the defaults, a malformed one is an error.
    pub(crate) fn load_from_file(path: &Path) -> anyhow::Result<Config> {
        if path.exists() && path.is_file() {
            let content = fs::read_to_string(path).with_context(|| format!("Unable to read config {}", path.display()))?;
            toml::from_str::<Config>(&content).with_context(|| format!("Invalid config {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// `$CONFIG_DIR/fintrack/config.toml`
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fintrack").join("config.toml"))
    }

    pub(crate) fn format_amount(&self, amount: f64) -> String {
        format!("{}{amount:.2}", self.currency)
    }
}
