use super::model::ChurnTable;

/// How many accounts the at-risk table shows.
pub const TOP_RISK_ROWS: usize = 30;

// ---------------------------------------------------------------------------
// Tenure buckets
// ---------------------------------------------------------------------------

/// Coarse tenure ranges used to group at-risk accounts. The bins are
/// half-open and cover every possible tenure, so every churned row gets one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TenureBucket {
    /// [0, 6) months
    UnderSixMonths,
    /// [6, 12) months
    SixToTwelveMonths,
    /// [12, 24) months
    OneToTwoYears,
    /// [24, 48) months
    TwoToFourYears,
    /// [48, ∞) months
    FourYearsPlus,
}

impl TenureBucket {
    pub fn for_tenure(months: u32) -> Self {
        match months {
            0..=5 => TenureBucket::UnderSixMonths,
            6..=11 => TenureBucket::SixToTwelveMonths,
            12..=23 => TenureBucket::OneToTwoYears,
            24..=47 => TenureBucket::TwoToFourYears,
            _ => TenureBucket::FourYearsPlus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TenureBucket::UnderSixMonths => "0-6 mo",
            TenureBucket::SixToTwelveMonths => "6-12 mo",
            TenureBucket::OneToTwoYears => "1-2 yr",
            TenureBucket::TwoToFourYears => "2-4 yr",
            TenureBucket::FourYearsPlus => "4+ yr",
        }
    }
}

// ---------------------------------------------------------------------------
// At-risk ranking
// ---------------------------------------------------------------------------

/// One churned account in the at-risk table (fixed column projection).
#[derive(Debug, Clone)]
pub struct RiskRow {
    pub customer_id: String,
    pub tenure: u32,
    pub bucket: TenureBucket,
    pub contract: String,
    pub internet_service: String,
    pub payment_method: String,
    pub monthly_charges: f64,
    pub total_charges: Option<f64>,
}

/// The churned accounts billing the most, annotated with a tenure bucket.
/// Sorted by monthly charges descending, ties broken by tenure ascending,
/// truncated to `n` rows.
pub fn top_at_risk(table: &ChurnTable, n: usize) -> Vec<RiskRow> {
    let mut rows: Vec<RiskRow> = table
        .records
        .iter()
        .filter(|r| r.churn.is_churned())
        .map(|r| RiskRow {
            customer_id: r.customer_id.clone(),
            tenure: r.tenure,
            bucket: TenureBucket::for_tenure(r.tenure),
            contract: r.contract.clone(),
            internet_service: r.internet_service.clone(),
            payment_method: r.payment_method.clone(),
            monthly_charges: r.monthly_charges,
            total_charges: r.total_charges,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.monthly_charges
            .total_cmp(&a.monthly_charges)
            .then_with(|| a.tenure.cmp(&b.tenure))
    });
    rows.truncate(n);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Churn, CustomerRecord};

    fn rec(id: &str, churn: Churn, tenure: u32, charges: f64) -> CustomerRecord {
        CustomerRecord {
            customer_id: id.to_string(),
            contract: "Month-to-month".to_string(),
            internet_service: "Fiber optic".to_string(),
            payment_method: "Electronic check".to_string(),
            churn,
            tenure,
            monthly_charges: charges,
            total_charges: Some(tenure as f64 * charges),
        }
    }

    fn sample_table() -> ChurnTable {
        ChurnTable::from_records(vec![
            rec("A", Churn::Yes, 5, 70.0),
            rec("B", Churn::No, 40, 90.0),
            rec("C", Churn::Yes, 2, 95.0),
        ])
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(TenureBucket::for_tenure(0), TenureBucket::UnderSixMonths);
        assert_eq!(TenureBucket::for_tenure(5), TenureBucket::UnderSixMonths);
        assert_eq!(TenureBucket::for_tenure(6), TenureBucket::SixToTwelveMonths);
        assert_eq!(TenureBucket::for_tenure(11), TenureBucket::SixToTwelveMonths);
        assert_eq!(TenureBucket::for_tenure(12), TenureBucket::OneToTwoYears);
        assert_eq!(TenureBucket::for_tenure(23), TenureBucket::OneToTwoYears);
        assert_eq!(TenureBucket::for_tenure(24), TenureBucket::TwoToFourYears);
        assert_eq!(TenureBucket::for_tenure(47), TenureBucket::TwoToFourYears);
        assert_eq!(TenureBucket::for_tenure(48), TenureBucket::FourYearsPlus);
        assert_eq!(TenureBucket::for_tenure(500), TenureBucket::FourYearsPlus);
    }

    #[test]
    fn only_churned_rows_appear() {
        let rows = top_at_risk(&sample_table(), TOP_RISK_ROWS);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.customer_id != "B"));
    }

    #[test]
    fn highest_charges_first() {
        let rows = top_at_risk(&sample_table(), 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer_id, "C");
    }

    #[test]
    fn ties_break_by_lower_tenure() {
        let table = ChurnTable::from_records(vec![
            rec("X", Churn::Yes, 10, 80.0),
            rec("Y", Churn::Yes, 3, 80.0),
        ]);
        let rows = top_at_risk(&table, TOP_RISK_ROWS);
        assert_eq!(rows[0].customer_id, "Y");
        assert_eq!(rows[1].customer_id, "X");
    }

    #[test]
    fn order_is_monotone() {
        let table = ChurnTable::from_records(vec![
            rec("A", Churn::Yes, 5, 70.0),
            rec("B", Churn::Yes, 1, 95.0),
            rec("C", Churn::Yes, 9, 95.0),
            rec("D", Churn::Yes, 2, 50.0),
        ]);
        let rows = top_at_risk(&table, TOP_RISK_ROWS);
        for pair in rows.windows(2) {
            let ahead = (pair[0].monthly_charges, pair[1].tenure);
            let behind = (pair[1].monthly_charges, pair[0].tenure);
            assert!(
                pair[0].monthly_charges > pair[1].monthly_charges
                    || (pair[0].monthly_charges == pair[1].monthly_charges
                        && pair[0].tenure <= pair[1].tenure),
                "rows out of order: {ahead:?} vs {behind:?}"
            );
        }
    }

    #[test]
    fn truncates_to_n() {
        let records: Vec<CustomerRecord> = (0..50)
            .map(|i| rec(&format!("R{i}"), Churn::Yes, i, 100.0 - i as f64))
            .collect();
        let table = ChurnTable::from_records(records);
        assert_eq!(top_at_risk(&table, TOP_RISK_ROWS).len(), TOP_RISK_ROWS);
        assert_eq!(top_at_risk(&table, 0).len(), 0);
    }

    #[test]
    fn buckets_are_annotated() {
        let rows = top_at_risk(&sample_table(), TOP_RISK_ROWS);
        assert!(rows
            .iter()
            .all(|r| r.bucket == TenureBucket::UnderSixMonths));
    }

    #[test]
    fn empty_table_is_fine() {
        assert!(top_at_risk(&ChurnTable::default(), TOP_RISK_ROWS).is_empty());
    }
}
