use std::path::Path;
use log::debug;

use crate::budget;
use crate::export::export_records;
use crate::filter::{self, Criteria};
use crate::record::{Record, Totals};
use crate::store::{RecordStore, StoreError};
use crate::summary::{self, CategoryBreakdown, MonthlySummary};

/// Owned result of a filter over a freshly loaded ledger
#[derive(Debug, Default)]
pub(crate) struct FilterView {
    pub(crate) records: Vec<Record>,
    pub(crate) totals: Totals,
}

/// Entry point used by the front end. Every read loads the ledger again from the store so no view
/// is ever built from stale records.
pub(crate) struct Ledger<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Ledger<S> {
    pub(crate) fn new(store: S) -> Ledger<S> {
        Ledger { store }
    }

    pub(crate) fn load_all(&self) -> Vec<Record> {
        self.store.load()
    }

    pub(crate) fn append(&mut self, record: &Record) -> Result<(), StoreError> {
        self.store.append(record)
    }

    pub(crate) fn overwrite_all(&mut self, records: &[Record]) -> Result<(), StoreError> {
        self.store.write_all(records)
    }

    pub(crate) fn resolve_budget(&self, month: &str) -> f64 {
        budget::resolve(&self.load_all(), month)
    }

    /// Read, update every budget row of the month (or add one), then rewrite the whole ledger
    pub(crate) fn set_budget(&mut self, month: &str, limit: f64) -> Result<(), StoreError> {
        let records = budget::set(self.load_all(), month, limit);
        self.overwrite_all(&records)?;
        debug!("Budget {limit:.2} set for {month}");
        Ok(())
    }

    pub(crate) fn summarize(&self, month: &str) -> MonthlySummary {
        summary::summarize(&self.load_all(), month)
    }

    pub(crate) fn filter(&self, criteria: &Criteria) -> FilterView {
        let records = self.load_all();
        let filtered = filter::filter(&records, criteria);
        debug!("{} of {} records match {:?}", filtered.records.len(), records.len(), criteria);
        FilterView {
            records: filtered.records.into_iter().cloned().collect(),
            totals: filtered.totals,
        }
    }

    pub(crate) fn breakdown(&self, month: &str) -> CategoryBreakdown {
        summary::breakdown(&self.load_all(), month)
    }

    /// Append a validated transaction and return the summary of its month,
    /// so the caller can tell whether the budget is now exceeded
    pub(crate) fn add_transaction(&mut self, record: &Record) -> Result<MonthlySummary, StoreError> {
        self.append(record)?;
        Ok(self.summarize(record.month_key().unwrap_or_default()))
    }

    pub(crate) fn export(&self, records: &[Record], file_path: &Path) -> Result<usize, StoreError> {
        export_records(records, file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Kind;
    use crate::store::{CsvStore, MemoryStore};

    fn scenario_b<S: RecordStore>(ledger: &mut Ledger<S>) {
        ledger.add_transaction(&Record::new(1000.0, "Salary", "", "2025-08-05", Kind::Income)).unwrap();
        ledger.add_transaction(&Record::new(300.0, "Food", "", "2025-08-10", Kind::Expense)).unwrap();
    }

    #[test]
    fn test_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(CsvStore::open(dir.path().join("transactions.csv")).unwrap());
        assert!(ledger.load_all().is_empty());
        assert_eq!(ledger.summarize("2025-08"), MonthlySummary::default());
    }

    #[test]
    fn test_budget_scenarios_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::new(CsvStore::open(dir.path().join("transactions.csv")).unwrap());

        scenario_b(&mut ledger);
        let s = ledger.summarize("2025-08");
        assert_eq!((s.income, s.expense, s.budget, s.savings), (1000.0, 300.0, 0.0, 700.0));

        ledger.set_budget("2025-08", 500.0).unwrap();
        assert_eq!(ledger.summarize("2025-08").remaining, 200.0);

        ledger.set_budget("2025-08", 200.0).unwrap();
        let s = ledger.summarize("2025-08");
        assert_eq!(s.remaining, -100.0);
        assert!(s.is_over_budget());

        // Both set calls share one budget row
        let records = ledger.load_all();
        assert_eq!(records.iter().filter(|r| r.is_budget()).count(), 1);
        assert_eq!(ledger.resolve_budget("2025-08"), 200.0);
    }

    #[test]
    fn test_set_budget_keeps_other_records() {
        let mut ledger = Ledger::new(MemoryStore::default());
        scenario_b(&mut ledger);
        let before = ledger.load_all();

        ledger.set_budget("2025-08", 100.0).unwrap();
        ledger.set_budget("2025-08", 400.0).unwrap();

        let after = ledger.load_all();
        assert_eq!(&after[..2], &before[..]);
        assert_eq!(after.len(), 3);
        assert_eq!(ledger.resolve_budget("2025-08"), 400.0);
    }

    #[test]
    fn test_add_transaction_reports_overspend() {
        let mut ledger = Ledger::new(MemoryStore::default());
        ledger.set_budget("2025-08", 250.0).unwrap();
        let s = ledger.add_transaction(&Record::new(200.0, "Food", "", "2025-08-10", Kind::Expense)).unwrap();
        assert!(!s.is_over_budget());
        let s = ledger.add_transaction(&Record::new(100.0, "Food", "", "2025-08-11", Kind::Expense)).unwrap();
        assert!(s.is_over_budget());
        assert_eq!(s.remaining, -50.0);
    }

    #[test]
    fn test_duplicate_budget_rows() {
        let mut ledger = Ledger::new(MemoryStore::with_records(vec![
            Record::budget("2025-08", 450.0),
            Record::new(300.0, "Food", "", "2025-08-10", Kind::Expense),
            Record::budget("2025-08", 500.0),
        ]));
        assert_eq!(ledger.resolve_budget("2025-08"), 500.0);

        ledger.set_budget("2025-08", 250.0).unwrap();
        let records = ledger.load_all();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].amount, "250.00");
        assert_eq!(records[2].amount, "250.00");
        assert!(ledger.summarize("2025-08").is_over_budget());
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let mut ledger = Ledger::new(MemoryStore::read_only(vec![Record::new(5.0, "Food", "", "2025-08-01", Kind::Expense)]));
        assert!(ledger.set_budget("2025-08", 100.0).is_err());
        assert!(ledger.add_transaction(&Record::new(1.0, "Food", "", "2025-08-02", Kind::Expense)).is_err());
        assert_eq!(ledger.load_all().len(), 1);
    }

    #[test]
    fn test_filter_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::new(MemoryStore::default());
        scenario_b(&mut ledger);
        ledger.set_budget("2025-08", 500.0).unwrap();
        ledger.append(&Record { amount: "abc".to_string(), category: "Food".to_string(), note: String::new(), date: "2025-08-12".to_string(), kind: Kind::Expense }).unwrap();

        let view = ledger.filter(&Criteria { month: Some("2025-08".to_string()), category: Some("Food".to_string()), kind: None });
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.records[1].amount, "abc");
        assert_eq!(view.totals.expense, 300.0);
        assert_eq!(view.totals.income, 0.0);

        let path = dir.path().join("food.csv");
        assert_eq!(ledger.export(&view.records, &path).unwrap(), 2);
    }
}
