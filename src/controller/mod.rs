use std::path::Path;
use anyhow::Context;
use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment, Color, Table, TableComponent};
use log::{info, warn};

use crate::command::{self, AddArgs, Filters, MonthFilter, Statement, HELP};
use crate::config::Config;
use crate::filter::Criteria;
use crate::input::{self, NewEntry};
use crate::ledger::Ledger;
use crate::record::Record;
use crate::store::RecordStore;
use crate::summary::{Distribution, MonthlySummary};

/// Parse one statement and run it against the ledger. `today` fills in omitted dates and months.
pub(crate) fn parse_and_run_command<S: RecordStore>(ledger: &mut Ledger<S>, config: &Config, today: NaiveDate, command: &str) -> anyhow::Result<()> {
    let statement = command::parse(command)?;

    match statement {
        Statement::Add(args) => run_add(ledger, config, today, args)?,
        Statement::Budget(month, limit) => run_budget(ledger, config, today, month, limit)?,
        Statement::Summary(month) => {
            let month = month_or_current(month, today)?;
            print_summary(config, &month, &ledger.summarize(&month));
        }
        Statement::List(filters) => {
            let view = ledger.filter(&criteria(filters, today));
            print_records(config, &view.records);
            info!("{} transactions. Income: {} Expense: {}", view.records.len(),
                config.format_amount(view.totals.income), config.format_amount(view.totals.expense));
        }
        Statement::Export(filters, file_path) => {
            let view = ledger.filter(&criteria(filters, today));
            if view.records.is_empty() {
                info!("No transactions to export");
            } else {
                let count = ledger.export(&view.records, Path::new(&file_path))
                    .with_context(|| format!("Failed to export to {file_path}"))?;
                info!("Exported {count} rows to {file_path}");
            }
        }
        Statement::Breakdown(month) => {
            let month = month_or_current(month, today)?;
            let breakdown = ledger.breakdown(&month);
            if breakdown.is_empty() {
                info!("No income or expense data for {month}");
            } else {
                print_distribution(config, &format!("Expense Distribution ({month})"), &breakdown.expense);
                print_distribution(config, &format!("Income Distribution ({month})"), &breakdown.income);
            }
        }
        Statement::Categories => {
            for category in &config.categories {
                println!("{category}");
            }
        }
        Statement::Help => println!("{HELP}"),
    }

    Ok(())
}

fn run_add<S: RecordStore>(ledger: &mut Ledger<S>, config: &Config, today: NaiveDate, args: AddArgs) -> anyhow::Result<()> {
    let amount = input::parse_amount(&args.amount)?;
    let date = match &args.date {
        Some(date) => input::parse_date(date)?,
        None => today,
    };
    let record = input::new_entry(&NewEntry {
        kind: args.kind,
        amount,
        date,
        category: args.category.unwrap_or_default(),
        note: args.note.unwrap_or_default(),
    })?;
    if !config.categories.contains(&record.category) {
        info!("'{}' is not one of the suggested categories", record.category);
    }

    let summary = ledger.add_transaction(&record).context("Failed to save transaction")?;
    let month = record.month_key().unwrap_or_default();
    if summary.is_over_budget() {
        warn!("You exceeded budget for {month}! Spent: {} Budget: {}",
            config.format_amount(summary.expense), config.format_amount(summary.budget));
    } else {
        info!("{} saved", record.kind);
    }
    Ok(())
}

fn run_budget<S: RecordStore>(ledger: &mut Ledger<S>, config: &Config, today: NaiveDate, month: Option<String>, limit: Option<String>) -> anyhow::Result<()> {
    let month = month_or_current(month, today)?;

    match limit {
        None => info!("Budget for {month}: {}", config.format_amount(ledger.resolve_budget(&month))),
        Some(limit) => {
            let limit = input::parse_budget(&limit)?;
            ledger.set_budget(&month, limit).context("Failed to save budget, the ledger file may be incomplete")?;
            info!("Budget {} set for {month}", config.format_amount(limit));

            let summary = ledger.summarize(&month);
            if summary.exceeds(limit) {
                warn!("Already spent {} which exceeds the new budget {}",
                    config.format_amount(summary.expense), config.format_amount(limit));
            }
        }
    }
    Ok(())
}

fn current_month(today: NaiveDate) -> String {
    today.format("%Y-%m").to_string()
}

fn month_or_current(month: Option<String>, today: NaiveDate) -> anyhow::Result<String> {
    match month {
        Some(month) => Ok(input::parse_month(&month)?),
        None => Ok(current_month(today)),
    }
}

fn criteria(filters: Filters, today: NaiveDate) -> Criteria {
    let month = match filters.month {
        MonthFilter::Current => Some(current_month(today)),
        MonthFilter::All => None,
        MonthFilter::Prefix(prefix) => Some(prefix),
    };
    Criteria { month, category: filters.category, kind: filters.kind }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

fn print_records(config: &Config, records: &[Record]) {
    let mut table = new_table();
    table.set_header(vec!["Date", "Type", "Category", "Amount", "Note"]);
    for r in records {
        // Malformed amounts are shown as stored
        let amount = match r.amount.trim().parse::<f64>() {
            Ok(amount) => config.format_amount(amount),
            Err(_) => r.amount.clone(),
        };
        table.add_row(vec![
            Cell::new(r.date.as_str()),
            Cell::new(r.kind.to_string()),
            Cell::new(r.category.as_str()),
            Cell::new(amount).set_alignment(CellAlignment::Right),
            Cell::new(r.note.as_str()),
        ]);
    }
    println!("{table}");
}

fn print_summary(config: &Config, month: &str, summary: &MonthlySummary) {
    let mut table = new_table();
    table.set_header(vec![month, "Amount"]);

    let rows = [
        ("Income", summary.income),
        ("Expense", summary.expense),
        ("Budget", summary.budget),
        ("Remaining", summary.remaining),
        ("Savings", summary.savings),
    ];
    for (label, amount) in rows {
        let mut cell = Cell::new(config.format_amount(amount)).set_alignment(CellAlignment::Right);
        if amount < 0.0 {
            cell = cell.fg(Color::Red);
        }
        table.add_row(vec![Cell::new(label), cell]);
    }
    if summary.budget > 0.0 {
        table.add_row(vec![
            Cell::new("Budget used"),
            Cell::new(format!("{:.1}%", summary.expense * 100.0 / summary.budget)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");

    if summary.is_over_budget() {
        warn!("You have exceeded your budget for {month}!");
    }
}

fn print_distribution(config: &Config, title: &str, distribution: &Distribution) {
    if distribution.is_empty() {
        info!("{title}: no data");
        return;
    }

    let mut table = new_table();
    table.set_header(vec![title, "Amount", "Share"]);
    for (category, amount, share) in distribution.shares() {
        table.add_row(vec![
            Cell::new(category),
            Cell::new(config.format_amount(amount)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{share:.1}%")).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}
