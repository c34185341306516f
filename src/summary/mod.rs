use crate::budget;
use crate::record::{Kind, Record, Totals, DEFAULT_CATEGORY};

/// Aggregates of one month. Derived on demand, never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct MonthlySummary {
    pub(crate) income: f64,
    pub(crate) expense: f64,
    pub(crate) budget: f64,
    /// `budget - expense`, negative when overspent
    pub(crate) remaining: f64,
    /// `income - expense`
    pub(crate) savings: f64,
}

impl MonthlySummary {
    /// A budget is set and spending went past it.
    ///
    /// This is stricter than `remaining < 0`: a month without a budget has a negative `remaining`
    /// as soon as anything is spent, yet it never counts as overspent.
    pub(crate) fn is_over_budget(&self) -> bool {
        self.budget > 0.0 && self.expense > self.budget
    }

    /// Spending is already above `limit`
    pub(crate) fn exceeds(&self, limit: f64) -> bool {
        self.expense > limit
    }
}

pub(crate) fn summarize(records: &[Record], month: &str) -> MonthlySummary {
    let mut totals = Totals::default();
    for r in records.iter().filter(|r| !r.is_budget() && r.in_month(month)) {
        totals.add(r);
    }

    let budget = budget::resolve(records, month);
    MonthlySummary {
        income: totals.income,
        expense: totals.expense,
        budget,
        remaining: budget - totals.expense,
        savings: totals.income - totals.expense,
    }
}

/// Category label used for uncategorised income in a breakdown
const DEFAULT_INCOME_CATEGORY: &str = "Income";

/// Amount per category, in first-seen order
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Distribution {
    pub(crate) groups: Vec<(String, f64)>,
}

impl Distribution {
    fn add(&mut self, category: &str, amount: f64) {
        match self.groups.iter_mut().find(|(c, _)| c.as_str() == category) {
            Some((_, total)) => *total += amount,
            None => self.groups.push((category.to_string(), amount)),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn total(&self) -> f64 {
        self.groups.iter().map(|(_, amount)| amount).sum()
    }

    /// Percentage share of each group. Zero everywhere when the total is zero.
    pub(crate) fn shares(&self) -> Vec<(&str, f64, f64)> {
        let total = self.total();
        self.groups.iter().map(|(category, amount)| {
            let share = if total == 0.0 { 0.0 } else { amount * 100.0 / total };
            (category.as_str(), *amount, share)
        }).collect()
    }
}

/// Per-category income and expense of a month
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct CategoryBreakdown {
    pub(crate) income: Distribution,
    pub(crate) expense: Distribution,
}

impl CategoryBreakdown {
    pub(crate) fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }
}

/// Group the month's transactions by category. `month` is matched as a date prefix.
pub(crate) fn breakdown(records: &[Record], month: &str) -> CategoryBreakdown {
    let mut result = CategoryBreakdown::default();
    for r in records.iter().filter(|r| r.date.starts_with(month)) {
        match r.kind {
            Kind::Expense => result.expense.add(non_empty_or(&r.category, DEFAULT_CATEGORY), r.amount_value()),
            Kind::Income => result.income.add(non_empty_or(&r.category, DEFAULT_INCOME_CATEGORY), r.amount_value()),
            _ => {}
        }
    }
    result
}

fn non_empty_or<'a>(s: &'a str, default: &'a str) -> &'a str {
    if s.is_empty() { default } else { s }
}
