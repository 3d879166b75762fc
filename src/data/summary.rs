use std::collections::BTreeMap;

use super::model::{Churn, ChurnTable, CustomerRecord};

/// Bin count for the tenure histogram.
pub const TENURE_HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// Headline KPIs
// ---------------------------------------------------------------------------

/// Headline numbers for the current filtered view. Computed fresh from a
/// table; all fields are zero (never NaN) for an empty input.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    pub total: usize,
    pub churned: usize,
    /// Percentage, 0.0 when the table is empty.
    pub churn_rate: f64,
    pub avg_tenure: f64,
    pub monthly_revenue: f64,
    /// Monthly charges summed over churned customers only.
    pub revenue_at_risk: f64,
}

pub fn kpi_summary(table: &ChurnTable) -> KpiSummary {
    let total = table.len();
    let churned = table
        .records
        .iter()
        .filter(|r| r.churn.is_churned())
        .count();
    let churn_rate = if total == 0 {
        0.0
    } else {
        churned as f64 / total as f64 * 100.0
    };
    let avg_tenure = if total == 0 {
        0.0
    } else {
        table.records.iter().map(|r| r.tenure as f64).sum::<f64>() / total as f64
    };
    let monthly_revenue = table.records.iter().map(|r| r.monthly_charges).sum();
    let revenue_at_risk = table
        .records
        .iter()
        .filter(|r| r.churn.is_churned())
        .map(|r| r.monthly_charges)
        .sum();

    KpiSummary {
        total,
        churned,
        churn_rate,
        avg_tenure,
        monthly_revenue,
        revenue_at_risk,
    }
}

// ---------------------------------------------------------------------------
// Category breakdown (grouped bar charts)
// ---------------------------------------------------------------------------

/// Which categorical column a breakdown groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    Contract,
    InternetService,
    PaymentMethod,
}

impl CategoryColumn {
    pub fn label(self) -> &'static str {
        match self {
            CategoryColumn::Contract => "contract",
            CategoryColumn::InternetService => "internet service",
            CategoryColumn::PaymentMethod => "payment method",
        }
    }

    pub fn value(self, record: &CustomerRecord) -> &str {
        match self {
            CategoryColumn::Contract => &record.contract,
            CategoryColumn::InternetService => &record.internet_service,
            CategoryColumn::PaymentMethod => &record.payment_method,
        }
    }
}

/// One (category value, outcome) group.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    pub category: String,
    pub churn: Churn,
    pub count: usize,
}

/// Counts per (category value, outcome), largest groups first. An empty
/// `entries` list is the "no data" signal the chart layer checks for.
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    pub column: CategoryColumn,
    pub entries: Vec<BreakdownEntry>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

pub fn category_breakdown(table: &ChurnTable, column: CategoryColumn) -> CategoryBreakdown {
    let mut counts: BTreeMap<(String, Churn), usize> = BTreeMap::new();
    for rec in &table.records {
        *counts
            .entry((column.value(rec).to_string(), rec.churn))
            .or_default() += 1;
    }

    let mut entries: Vec<BreakdownEntry> = counts
        .into_iter()
        .map(|((category, churn), count)| BreakdownEntry {
            category,
            churn,
            count,
        })
        .collect();
    // Largest groups first; ties broken by name for a stable chart order.
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.churn.cmp(&b.churn))
    });

    CategoryBreakdown { column, entries }
}

// ---------------------------------------------------------------------------
// Tenure histogram
// ---------------------------------------------------------------------------

/// One histogram bin with per-outcome counts.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub width: f64,
    pub churned: usize,
    pub retained: usize,
}

/// Bin tenure over the observed extent. Empty table or zero bins yields no
/// bins; every row lands in exactly one bin.
pub fn tenure_histogram(table: &ChurnTable, bins: usize) -> Vec<HistogramBin> {
    if table.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (lo, hi) = table.tenure_extent();
    let span = ((hi - lo) as f64).max(1.0);
    let width = span / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: lo as f64 + i as f64 * width,
            width,
            churned: 0,
            retained: 0,
        })
        .collect();

    for rec in &table.records {
        let idx = (((rec.tenure - lo) as f64) / width) as usize;
        let idx = idx.min(bins - 1);
        match rec.churn {
            Churn::Yes => out[idx].churned += 1,
            Churn::No => out[idx].retained += 1,
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Monthly-charge spread (box plot)
// ---------------------------------------------------------------------------

/// Five-number summary of monthly charges for one outcome group.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSpread {
    pub churn: Churn,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// One spread per outcome present in the table (retained first).
pub fn charge_spread(table: &ChurnTable) -> Vec<ChargeSpread> {
    [Churn::No, Churn::Yes]
        .into_iter()
        .filter_map(|outcome| {
            let mut charges: Vec<f64> = table
                .records
                .iter()
                .filter(|r| r.churn == outcome)
                .map(|r| r.monthly_charges)
                .collect();
            if charges.is_empty() {
                return None;
            }
            charges.sort_by(|a, b| a.total_cmp(b));
            Some(ChargeSpread {
                churn: outcome,
                min: charges[0],
                q1: percentile(&charges, 0.25),
                median: percentile(&charges, 0.5),
                q3: percentile(&charges, 0.75),
                max: charges[charges.len() - 1],
            })
        })
        .collect()
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty
/// and ascending.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CustomerRecord;

    fn rec(id: &str, contract: &str, churn: Churn, tenure: u32, charges: f64) -> CustomerRecord {
        CustomerRecord {
            customer_id: id.to_string(),
            contract: contract.to_string(),
            internet_service: "DSL".to_string(),
            payment_method: "Mailed check".to_string(),
            churn,
            tenure,
            monthly_charges: charges,
            total_charges: None,
        }
    }

    fn filtered_pair() -> ChurnTable {
        // The {A, C} subset after a tenure <= 10 filter.
        ChurnTable::from_records(vec![
            rec("A", "Month-to-month", Churn::Yes, 5, 70.0),
            rec("C", "Month-to-month", Churn::Yes, 2, 95.0),
        ])
    }

    #[test]
    fn kpis_over_known_rows() {
        let kpis = kpi_summary(&filtered_pair());
        assert_eq!(kpis.total, 2);
        assert_eq!(kpis.churned, 2);
        assert_eq!(kpis.churn_rate, 100.0);
        assert_eq!(kpis.avg_tenure, 3.5);
        assert_eq!(kpis.monthly_revenue, 165.0);
        assert_eq!(kpis.revenue_at_risk, 165.0);
    }

    #[test]
    fn kpis_on_empty_table_are_zero() {
        let kpis = kpi_summary(&ChurnTable::default());
        assert_eq!(kpis.total, 0);
        assert_eq!(kpis.churned, 0);
        assert_eq!(kpis.churn_rate, 0.0);
        assert_eq!(kpis.avg_tenure, 0.0);
        assert_eq!(kpis.monthly_revenue, 0.0);
        assert_eq!(kpis.revenue_at_risk, 0.0);
    }

    #[test]
    fn churned_never_exceeds_total() {
        let table = ChurnTable::from_records(vec![
            rec("A", "One year", Churn::Yes, 5, 70.0),
            rec("B", "One year", Churn::No, 6, 71.0),
        ]);
        let kpis = kpi_summary(&table);
        assert!(kpis.churned <= kpis.total);
    }

    #[test]
    fn breakdown_counts_sum_to_row_count() {
        let table = ChurnTable::from_records(vec![
            rec("A", "Month-to-month", Churn::Yes, 5, 70.0),
            rec("B", "Two year", Churn::No, 40, 90.0),
            rec("C", "Month-to-month", Churn::No, 2, 95.0),
            rec("D", "Month-to-month", Churn::Yes, 9, 80.0),
        ]);
        let breakdown = category_breakdown(&table, CategoryColumn::Contract);
        assert_eq!(breakdown.total(), table.len());
    }

    #[test]
    fn breakdown_is_sorted_descending() {
        let table = ChurnTable::from_records(vec![
            rec("A", "Month-to-month", Churn::Yes, 5, 70.0),
            rec("B", "Two year", Churn::No, 40, 90.0),
            rec("C", "Month-to-month", Churn::Yes, 2, 95.0),
        ]);
        let breakdown = category_breakdown(&table, CategoryColumn::Contract);
        for pair in breakdown.entries.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        assert_eq!(breakdown.entries[0].category, "Month-to-month");
        assert_eq!(breakdown.entries[0].count, 2);
    }

    #[test]
    fn breakdown_on_empty_table_signals_no_data() {
        let breakdown = category_breakdown(&ChurnTable::default(), CategoryColumn::PaymentMethod);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn histogram_counts_sum_to_row_count() {
        let table = ChurnTable::from_records(vec![
            rec("A", "One year", Churn::Yes, 0, 70.0),
            rec("B", "One year", Churn::No, 36, 90.0),
            rec("C", "One year", Churn::No, 72, 95.0),
            rec("D", "One year", Churn::Yes, 72, 95.0),
        ]);
        let bins = tenure_histogram(&table, 30);
        assert_eq!(bins.len(), 30);
        let counted: usize = bins.iter().map(|b| b.churned + b.retained).sum();
        assert_eq!(counted, table.len());
        // Max tenure lands in the last bin, not past it.
        assert_eq!(bins[29].churned + bins[29].retained, 2);
    }

    #[test]
    fn histogram_on_empty_table_is_empty() {
        assert!(tenure_histogram(&ChurnTable::default(), 30).is_empty());
    }

    #[test]
    fn histogram_with_single_tenure_value() {
        let table = ChurnTable::from_records(vec![
            rec("A", "One year", Churn::No, 12, 50.0),
            rec("B", "One year", Churn::No, 12, 55.0),
        ]);
        let bins = tenure_histogram(&table, 10);
        let counted: usize = bins.iter().map(|b| b.churned + b.retained).sum();
        assert_eq!(counted, 2);
    }

    #[test]
    fn charge_spread_quartiles() {
        let table = ChurnTable::from_records(vec![
            rec("A", "One year", Churn::No, 1, 10.0),
            rec("B", "One year", Churn::No, 2, 20.0),
            rec("C", "One year", Churn::No, 3, 30.0),
            rec("D", "One year", Churn::No, 4, 40.0),
            rec("E", "One year", Churn::No, 5, 50.0),
        ]);
        let spreads = charge_spread(&table);
        assert_eq!(spreads.len(), 1);
        let s = &spreads[0];
        assert_eq!(s.churn, Churn::No);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.q1, 20.0);
        assert_eq!(s.median, 30.0);
        assert_eq!(s.q3, 40.0);
        assert_eq!(s.max, 50.0);
    }

    #[test]
    fn charge_spread_one_entry_per_present_outcome() {
        let spreads = charge_spread(&filtered_pair());
        assert_eq!(spreads.len(), 1);
        assert_eq!(spreads[0].churn, Churn::Yes);
        assert!(charge_spread(&ChurnTable::default()).is_empty());
    }
}
