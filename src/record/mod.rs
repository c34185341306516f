use std::fmt;
use log::warn;
use serde::Serialize;

/// Category label carried by every budget record
pub(crate) const BUDGET_CATEGORY: &str = "Budget";

/// Category used when a transaction is entered without one
pub(crate) const DEFAULT_CATEGORY: &str = "Other";

/// Discriminator persisted under the `type` column.
/// Anything other than the three known labels is kept verbatim so a rewrite never loses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub(crate) enum Kind {
    Income,
    Expense,
    Budget,
    Other(String),
}

impl Default for Kind {
    fn default() -> Self {
        Kind::Other(String::new())
    }
}

impl From<String> for Kind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Income" => Kind::Income,
            "Expense" => Kind::Expense,
            "Budget" => Kind::Budget,
            _ => Kind::Other(value),
        }
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Income => write!(f, "Income"),
            Kind::Expense => write!(f, "Expense"),
            Kind::Budget => write!(f, "Budget"),
            Kind::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One row of the ledger file.
///
/// `amount` and `date` are kept as the persisted text. A row with a malformed amount is still a
/// valid record: it is listed as-is and counts as zero in every total.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub(crate) struct Record {
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) note: String,
    pub(crate) date: String,
    #[serde(rename = "type")]
    pub(crate) kind: Kind,
}

impl Record {
    pub(crate) fn new(amount: f64, category: &str, note: &str, date: &str, kind: Kind) -> Record {
        Record {
            amount: format_amount(amount),
            category: category.to_string(),
            note: note.to_string(),
            date: date.to_string(),
            kind,
        }
    }

    /// Synthetic row declaring the spending limit of `month`
    pub(crate) fn budget(month: &str, limit: f64) -> Record {
        Record::new(limit, BUDGET_CATEGORY, "", &format!("{month}-01"), Kind::Budget)
    }

    /// `YYYY-MM` prefix of the date. None when the date is too short to carry one.
    pub(crate) fn month_key(&self) -> Option<&str> {
        self.date.get(..7)
    }

    pub(crate) fn in_month(&self, month: &str) -> bool {
        self.month_key() == Some(month)
    }

    pub(crate) fn is_budget(&self) -> bool {
        self.kind == Kind::Budget
    }

    /// Numeric value of `amount`. Empty or unparseable text counts as 0.
    pub(crate) fn amount_value(&self) -> f64 {
        let s = self.amount.trim();
        if s.is_empty() {
            return 0.0;
        }
        match s.parse::<f64>() {
            Ok(amount) => amount,
            Err(_) => {
                warn!("Malformed amount '{}' on {} {} record, counting it as 0", self.amount, self.date, self.kind);
                0.0
            }
        }
    }
}

/// Amounts are always persisted with two fractional digits
pub(crate) fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Income and expense totals accumulated over a set of records. Budget and unknown kinds are ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct Totals {
    pub(crate) income: f64,
    pub(crate) expense: f64,
}

impl Totals {
    pub(crate) fn add(&mut self, record: &Record) {
        match record.kind {
            Kind::Income => self.income += record.amount_value(),
            Kind::Expense => self.expense += record.amount_value(),
            _ => {}
        }
    }
}
