use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Churn – the per-customer outcome
// ---------------------------------------------------------------------------

/// Whether a customer has discontinued service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Churn {
    Yes,
    No,
}

impl Churn {
    /// The source export records the outcome as literal `"Yes"` / `"No"`
    /// strings; anything else counts as retained.
    pub fn from_label(label: &str) -> Self {
        if label.trim() == "Yes" {
            Churn::Yes
        } else {
            Churn::No
        }
    }

    pub fn is_churned(self) -> bool {
        matches!(self, Churn::Yes)
    }
}

impl fmt::Display for Churn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Churn::Yes => write!(f, "Yes"),
            Churn::No => write!(f, "No"),
        }
    }
}

// ---------------------------------------------------------------------------
// CustomerRecord – one row of the loaded table
// ---------------------------------------------------------------------------

/// A single customer account (one CSV row after cleaning).
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub contract: String,
    pub internet_service: String,
    pub payment_method: String,
    pub churn: Churn,
    /// Months the customer has held service.
    pub tenure: u32,
    pub monthly_charges: f64,
    /// Blank or unparseable cells in the export become `None`.
    pub total_charges: Option<f64>,
}

// ---------------------------------------------------------------------------
// ChurnTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full cleaned table with pre-computed unique values for the
/// categorical columns the filter panel offers.
#[derive(Debug, Clone, Default)]
pub struct ChurnTable {
    /// All customer rows in file order.
    pub records: Vec<CustomerRecord>,
    /// Observed contract types, sorted.
    pub contract_values: BTreeSet<String>,
    /// Observed internet-service types, sorted.
    pub service_values: BTreeSet<String>,
    /// Observed payment methods, sorted.
    pub payment_values: BTreeSet<String>,
}

impl ChurnTable {
    /// Build the category indices from the loaded rows.
    pub fn from_records(records: Vec<CustomerRecord>) -> Self {
        let mut contract_values = BTreeSet::new();
        let mut service_values = BTreeSet::new();
        let mut payment_values = BTreeSet::new();

        for rec in &records {
            contract_values.insert(rec.contract.clone());
            service_values.insert(rec.internet_service.clone());
            payment_values.insert(rec.payment_method.clone());
        }

        ChurnTable {
            records,
            contract_values,
            service_values,
            payment_values,
        }
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest tenure in the table, `(0, 0)` when empty.
    pub fn tenure_extent(&self) -> (u32, u32) {
        let mut it = self.records.iter().map(|r| r.tenure);
        let Some(first) = it.next() else {
            return (0, 0);
        };
        it.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)))
    }

    /// Smallest and largest monthly charge, `(0.0, 0.0)` when empty.
    pub fn charge_extent(&self) -> (f64, f64) {
        let mut it = self.records.iter().map(|r| r.monthly_charges);
        let Some(first) = it.next() else {
            return (0.0, 0.0);
        };
        it.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c)))
    }
}
