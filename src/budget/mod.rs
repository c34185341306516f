use log::debug;
use crate::record::{format_amount, Record, BUDGET_CATEGORY};

/// Spending limit in effect for `month`.
///
/// Budget rows are not compacted, so several may exist for one month. The last one in ledger order
/// wins. Returns 0 when the month has no budget row.
pub(crate) fn resolve(records: &[Record], month: &str) -> f64 {
    let mut limit = 0.0;
    for r in records {
        if r.is_budget() && r.in_month(month) {
            limit = r.amount_value();
        }
    }
    limit
}

/// Set the limit of `month` and return the new ledger image.
///
/// Every budget row of the month is rewritten, not just the effective one, so afterwards all of
/// them agree. A new row dated on the 1st is appended when the month has none. The result must be
/// persisted with a full rewrite. `limit` is expected to be validated as non-negative by the caller.
pub(crate) fn set(mut records: Vec<Record>, month: &str, limit: f64) -> Vec<Record> {
    let amount = format_amount(limit);
    let mut found = 0usize;
    for r in records.iter_mut().filter(|r| r.is_budget() && r.in_month(month)) {
        r.amount = amount.clone();
        r.category = BUDGET_CATEGORY.to_string();
        r.note.clear();
        found += 1;
    }

    if found == 0 {
        records.push(Record::budget(month, limit));
    } else {
        debug!("Updated {found} budget rows for {month}");
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Kind;

    fn budget_row(amount: &str, date: &str, note: &str) -> Record {
        Record {
            amount: amount.to_string(),
            category: "Budget".to_string(),
            note: note.to_string(),
            date: date.to_string(),
            kind: Kind::Budget,
        }
    }

    #[test]
    fn test_resolve_last_row_wins() {
        let records = vec![
            budget_row("450.00", "2025-08-01", ""),
            Record::new(300.0, "Food", "", "2025-08-10", Kind::Expense),
            budget_row("500.00", "2025-08-01", ""),
            budget_row("900.00", "2025-09-01", ""),
        ];
        assert_eq!(resolve(&records, "2025-08"), 500.0);
        assert_eq!(resolve(&records, "2025-09"), 900.0);
        assert_eq!(resolve(&records, "2025-10"), 0.0);
        assert_eq!(resolve(&[], "2025-08"), 0.0);
    }

    #[test]
    fn test_resolve_ignores_non_budget_rows() {
        // An expense filed under the "Budget" category is still an expense
        let records = vec![Record::new(70.0, "Budget", "", "2025-08-03", Kind::Expense)];
        assert_eq!(resolve(&records, "2025-08"), 0.0);
    }

    #[test]
    fn test_resolve_malformed_amount() {
        let records = vec![budget_row("500.00", "2025-08-01", ""), budget_row("lots", "2025-08-01", "")];
        assert_eq!(resolve(&records, "2025-08"), 0.0);
    }

    #[test]
    fn test_set_inserts_when_absent() {
        let records = vec![Record::new(300.0, "Food", "", "2025-08-10", Kind::Expense)];
        let records = set(records, "2025-08", 500.0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], Record::budget("2025-08", 500.0));
        assert_eq!(resolve(&records, "2025-08"), 500.0);
    }

    #[test]
    fn test_set_updates_every_matching_row() {
        let records = vec![
            budget_row("450.00", "2025-08-01", "first"),
            budget_row("500.00", "2025-08-15", "second"),
            budget_row("900.00", "2025-09-01", ""),
        ];
        let records = set(records, "2025-08", 250.5);
        assert_eq!(records.len(), 3);
        for r in &records[..2] {
            assert_eq!(r.amount, "250.50");
            assert_eq!(r.category, "Budget");
            assert_eq!(r.note, "");
        }
        // Dates are left alone and other months untouched
        assert_eq!(records[1].date, "2025-08-15");
        assert_eq!(records[2].amount, "900.00");
    }

    #[test]
    fn test_set_twice_does_not_grow() {
        let records = set(vec![], "2025-08", 100.0);
        let records = set(records, "2025-08", 200.0);
        assert_eq!(records.iter().filter(|r| r.is_budget()).count(), 1);
        assert_eq!(resolve(&records, "2025-08"), 200.0);
    }
}
