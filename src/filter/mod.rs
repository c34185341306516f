use crate::record::{Kind, Record, Totals};

/// Optional narrowing criteria. An absent or empty criterion matches everything.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Criteria {
    /// Prefix of the date, e.g. `2025-08` or `2025`
    pub(crate) month: Option<String>,
    /// Exact, case-sensitive category
    pub(crate) category: Option<String>,
    pub(crate) kind: Option<Kind>,
}

impl Criteria {
    pub(crate) fn matches(&self, r: &Record) -> bool {
        if let Some(month) = non_empty(&self.month) {
            if !r.date.starts_with(month) {
                return false;
            }
        }

        if let Some(category) = non_empty(&self.category) {
            if r.category != category {
                return false;
            }
        }

        match &self.kind {
            Some(kind) if *kind != Kind::default() => *kind == r.kind,
            _ => true,
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Matching records, borrowed from the ledger in ledger order, with their totals
#[derive(Debug, Default)]
pub(crate) struct Filtered<'a> {
    pub(crate) records: Vec<&'a Record>,
    pub(crate) totals: Totals,
}

/// Select the non-budget records matching every criterion. Order is never changed.
pub(crate) fn filter<'a>(records: &'a [Record], criteria: &Criteria) -> Filtered<'a> {
    let mut result = Filtered::default();
    for r in records.iter().filter(|r| !r.is_budget()) {
        if criteria.matches(r) {
            result.totals.add(r);
            result.records.push(r);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Vec<Record> {
        vec![
            Record::new(1000.0, "Salary", "", "2025-08-05", Kind::Income),
            Record::new(300.0, "Food", "", "2025-08-10", Kind::Expense),
            Record::budget("2025-08", 500.0),
            Record { amount: "abc".to_string(), category: "Transport".to_string(), note: "bus".to_string(), date: "2025-08-12".to_string(), kind: Kind::Expense },
            Record::new(75.5, "food", "", "2025-09-02", Kind::Expense),
            Record::new(20.0, "Food", "", "2024-08-02", Kind::Expense),
        ]
    }

    #[test]
    fn test_no_criteria_excludes_budget_only() {
        let records = ledger();
        let result = filter(&records, &Criteria::default());
        assert_eq!(result.records.len(), 5);
        assert!(result.records.iter().all(|r| !r.is_budget()));
        assert_eq!(result.totals.income, 1000.0);
        assert_eq!(result.totals.expense, 395.5);
    }

    #[test]
    fn test_month_prefix() {
        let records = ledger();
        let result = filter(&records, &Criteria { month: Some("2025-08".to_string()), ..Default::default() });
        let dates: Vec<&str> = result.records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-08-05", "2025-08-10", "2025-08-12"]);

        let result = filter(&records, &Criteria { month: Some("2025".to_string()), ..Default::default() });
        assert_eq!(result.records.len(), 4);
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let records = ledger();
        let result = filter(&records, &Criteria { category: Some("Food".to_string()), ..Default::default() });
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.totals.expense, 320.0);
    }

    #[test]
    fn test_kind_and_empty_criteria() {
        let records = ledger();
        let criteria = Criteria {
            month: Some(String::new()),
            category: Some(String::new()),
            kind: Some(Kind::Income),
        };
        let result = filter(&records, &criteria);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.totals.income, 1000.0);
        assert_eq!(result.totals.expense, 0.0);

        // A budget kind filter never yields anything
        let result = filter(&records, &Criteria { kind: Some(Kind::Budget), ..Default::default() });
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_malformed_amount_listed_but_not_counted() {
        let records = ledger();
        let result = filter(&records, &Criteria { category: Some("Transport".to_string()), ..Default::default() });
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].amount, "abc");
        assert_eq!(result.totals, Totals::default());
    }

    #[test]
    fn test_result_is_a_narrowing_subset() {
        let records = ledger();
        let broad = filter(&records, &Criteria { month: Some("2025".to_string()), ..Default::default() });
        let narrow = filter(&records, &Criteria { month: Some("2025".to_string()), category: Some("Food".to_string()), ..Default::default() });
        assert!(narrow.records.len() <= broad.records.len());
        for r in &narrow.records {
            assert!(records.iter().any(|original| std::ptr::eq(original, *r)));
        }
    }
}
