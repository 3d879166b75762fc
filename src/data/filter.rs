use std::collections::BTreeSet;

use super::model::{ChurnTable, CustomerRecord};

// ---------------------------------------------------------------------------
// Filter criteria: what the sidebar controls have selected
// ---------------------------------------------------------------------------

/// The user's current filter selections.
///
/// A row passes when its value for each categorical column is in the
/// corresponding selection set AND both numeric attributes lie inside their
/// inclusive ranges. An empty selection set matches NO rows: clearing every
/// checkbox hides everything instead of silently falling back to "show all".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub contracts: BTreeSet<String>,
    pub services: BTreeSet<String>,
    pub payments: BTreeSet<String>,
    /// Inclusive on both ends, in months.
    pub tenure_range: (u32, u32),
    /// Inclusive on both ends.
    pub charge_range: (f64, f64),
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            contracts: BTreeSet::new(),
            services: BTreeSet::new(),
            payments: BTreeSet::new(),
            tenure_range: (0, 0),
            charge_range: (0.0, 0.0),
        }
    }
}

impl FilterCriteria {
    /// Criteria that pass every row of `table`: all observed category values
    /// selected and both ranges spanning the observed extents.
    pub fn allow_all(table: &ChurnTable) -> Self {
        FilterCriteria {
            contracts: table.contract_values.clone(),
            services: table.service_values.clone(),
            payments: table.payment_values.clone(),
            tenure_range: table.tenure_extent(),
            charge_range: table.charge_extent(),
        }
    }

    fn matches(&self, rec: &CustomerRecord) -> bool {
        self.contracts.contains(&rec.contract)
            && self.services.contains(&rec.internet_service)
            && self.payments.contains(&rec.payment_method)
            && rec.tenure >= self.tenure_range.0
            && rec.tenure <= self.tenure_range.1
            && rec.monthly_charges >= self.charge_range.0
            && rec.monthly_charges <= self.charge_range.1
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the subset of `table` passing `criteria`, in the original row
/// order. Never mutates the input; an empty result is valid.
pub fn apply(table: &ChurnTable, criteria: &FilterCriteria) -> ChurnTable {
    let records: Vec<CustomerRecord> = table
        .records
        .iter()
        .filter(|rec| criteria.matches(rec))
        .cloned()
        .collect();
    ChurnTable::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Churn;

    fn rec(
        id: &str,
        contract: &str,
        service: &str,
        payment: &str,
        churn: Churn,
        tenure: u32,
        charges: f64,
    ) -> CustomerRecord {
        CustomerRecord {
            customer_id: id.to_string(),
            contract: contract.to_string(),
            internet_service: service.to_string(),
            payment_method: payment.to_string(),
            churn,
            tenure,
            monthly_charges: charges,
            total_charges: Some(tenure as f64 * charges),
        }
    }

    fn sample_table() -> ChurnTable {
        ChurnTable::from_records(vec![
            rec(
                "A",
                "Month-to-month",
                "Fiber optic",
                "Electronic check",
                Churn::Yes,
                5,
                70.0,
            ),
            rec(
                "B",
                "Two year",
                "DSL",
                "Mailed check",
                Churn::No,
                40,
                90.0,
            ),
            rec(
                "C",
                "Month-to-month",
                "Fiber optic",
                "Electronic check",
                Churn::Yes,
                2,
                95.0,
            ),
        ])
    }

    #[test]
    fn allow_all_is_a_no_op() {
        let table = sample_table();
        let filtered = apply(&table, &FilterCriteria::allow_all(&table));

        assert_eq!(filtered.len(), table.len());
        let ids: Vec<&str> = filtered
            .records
            .iter()
            .map(|r| r.customer_id.as_str())
            .collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[test]
    fn tenure_range_narrows() {
        let table = sample_table();
        let mut criteria = FilterCriteria::allow_all(&table);
        criteria.tenure_range = (0, 10);

        let filtered = apply(&table, &criteria);
        let ids: Vec<&str> = filtered
            .records
            .iter()
            .map(|r| r.customer_id.as_str())
            .collect();
        assert_eq!(ids, ["A", "C"]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let table = sample_table();
        let mut criteria = FilterCriteria::allow_all(&table);
        criteria.tenure_range = (2, 5);

        let filtered = apply(&table, &criteria);
        let ids: Vec<&str> = filtered
            .records
            .iter()
            .map(|r| r.customer_id.as_str())
            .collect();
        assert_eq!(ids, ["A", "C"]);

        criteria.charge_range = (70.0, 95.0);
        assert_eq!(apply(&table, &criteria).len(), 2);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let table = sample_table();
        let mut criteria = FilterCriteria::allow_all(&table);
        criteria.contracts.clear();

        assert!(apply(&table, &criteria).is_empty());
    }

    #[test]
    fn inverted_range_yields_empty_table() {
        let table = sample_table();
        let mut criteria = FilterCriteria::allow_all(&table);
        criteria.charge_range = (1000.0, 0.0);

        let filtered = apply(&table, &criteria);
        assert!(filtered.is_empty());
    }

    #[test]
    fn categorical_narrowing() {
        let table = sample_table();
        let mut criteria = FilterCriteria::allow_all(&table);
        criteria.services.remove("Fiber optic");

        let filtered = apply(&table, &criteria);
        let ids: Vec<&str> = filtered
            .records
            .iter()
            .map(|r| r.customer_id.as_str())
            .collect();
        assert_eq!(ids, ["B"]);
    }

    #[test]
    fn input_table_is_untouched() {
        let table = sample_table();
        let mut criteria = FilterCriteria::allow_all(&table);
        criteria.tenure_range = (0, 0);

        let _ = apply(&table, &criteria);
        assert_eq!(table.len(), 3);
    }
}
