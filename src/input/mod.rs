use std::fmt;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::record::{Kind, Record, DEFAULT_CATEGORY};

lazy_static! {
    static ref YYYY_MM: Regex = Regex::new(r"^\d{4}-\d{2}$").unwrap();
    static ref YYYY_MM_DD: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// User input rejected before it reaches the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    AmountRequired,
    InvalidAmount(String),
    NonPositiveAmount,
    BudgetRequired,
    NegativeBudget,
    InvalidMonth(String),
    InvalidDate(String),
    InvalidKind(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::AmountRequired => write!(f, "Amount required"),
            InputError::InvalidAmount(s) => write!(f, "'{s}' is not a valid amount"),
            InputError::NonPositiveAmount => write!(f, "Amount must be positive"),
            InputError::BudgetRequired => write!(f, "Enter budget"),
            InputError::NegativeBudget => write!(f, "Budget must be >= 0"),
            InputError::InvalidMonth(s) => write!(f, "'{s}' is not a month, expected YYYY-MM"),
            InputError::InvalidDate(s) => write!(f, "'{s}' is not a date, expected YYYY-MM-DD"),
            InputError::InvalidKind(s) => write!(f, "'{s}' is not a transaction type, expected Income or Expense"),
        }
    }
}

impl std::error::Error for InputError {}

fn parse_number(text: &str, required: InputError) -> Result<f64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(required);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(InputError::InvalidAmount(text.to_string())),
    }
}

/// Transaction amount: a finite number greater than zero
pub(crate) fn parse_amount(text: &str) -> Result<f64, InputError> {
    let amount = parse_number(text, InputError::AmountRequired)?;
    if amount <= 0.0 {
        return Err(InputError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Monthly limit: a finite number, zero allowed
pub(crate) fn parse_budget(text: &str) -> Result<f64, InputError> {
    let limit = parse_number(text, InputError::BudgetRequired)?;
    if limit < 0.0 {
        return Err(InputError::NegativeBudget);
    }
    Ok(limit)
}

/// `YYYY-MM` with a real month
pub(crate) fn parse_month(text: &str) -> Result<String, InputError> {
    let text = text.trim();
    if YYYY_MM.is_match(text) && NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").is_ok() {
        Ok(text.to_string())
    } else {
        Err(InputError::InvalidMonth(text.to_string()))
    }
}

pub(crate) fn parse_date(text: &str) -> Result<NaiveDate, InputError> {
    let text = text.trim();
    if !YYYY_MM_DD.is_match(text) {
        return Err(InputError::InvalidDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| InputError::InvalidDate(text.to_string()))
}

/// A transaction as entered by the user, before validation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewEntry {
    pub(crate) kind: Kind,
    pub(crate) amount: f64,
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    pub(crate) note: String,
}

/// Validate a new transaction and build its ledger row.
/// The category falls back to `Other` and the note is trimmed.
pub(crate) fn new_entry(entry: &NewEntry) -> Result<Record, InputError> {
    if !matches!(entry.kind, Kind::Income | Kind::Expense) {
        return Err(InputError::InvalidKind(entry.kind.to_string()));
    }
    if !entry.amount.is_finite() {
        return Err(InputError::InvalidAmount(entry.amount.to_string()));
    }
    if entry.amount <= 0.0 {
        return Err(InputError::NonPositiveAmount);
    }

    let category = entry.category.trim();
    let category = if category.is_empty() { DEFAULT_CATEGORY } else { category };
    Ok(Record::new(entry.amount, category, entry.note.trim(), &entry.date.format("%Y-%m-%d").to_string(), entry.kind.clone()))
}
