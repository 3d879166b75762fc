use std::path::PathBuf;

use crate::data::filter::{self, FilterCriteria};
use crate::data::loader::LoadCache;
use crate::data::model::ChurnTable;
use crate::data::risk::{self, RiskRow};
use crate::data::summary::{
    self, CategoryBreakdown, CategoryColumn, ChargeSpread, HistogramBin, KpiSummary,
    TENURE_HISTOGRAM_BINS,
};

/// Where the dashboard looks for the churn export when neither a CLI
/// argument nor `CHURNSCOPE_DATA` overrides it.
pub const DEFAULT_DATA_PATH: &str = "data/telco_customer_churn.csv";

// ---------------------------------------------------------------------------
// Derived dashboard data
// ---------------------------------------------------------------------------

/// Everything the central panel renders, rebuilt from (table, criteria) on
/// each filter change. Nothing in here survives a recompute.
pub struct DashboardView {
    pub filtered: ChurnTable,
    pub kpis: KpiSummary,
    pub contract_breakdown: CategoryBreakdown,
    pub service_breakdown: CategoryBreakdown,
    pub tenure_histogram: Vec<HistogramBin>,
    pub charge_spread: Vec<ChargeSpread>,
    pub at_risk: Vec<RiskRow>,
}

impl DashboardView {
    pub fn build(table: &ChurnTable, criteria: &FilterCriteria) -> Self {
        let filtered = filter::apply(table, criteria);
        DashboardView {
            kpis: summary::kpi_summary(&filtered),
            contract_breakdown: summary::category_breakdown(&filtered, CategoryColumn::Contract),
            service_breakdown: summary::category_breakdown(
                &filtered,
                CategoryColumn::InternetService,
            ),
            tenure_histogram: summary::tenure_histogram(&filtered, TENURE_HISTOGRAM_BINS),
            charge_spread: summary::charge_spread(&filtered),
            at_risk: risk::top_at_risk(&filtered, risk::TOP_RISK_ROWS),
            filtered,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Path field contents in the side panel.
    pub data_path: String,

    /// Memoized loader, keyed by path + modification time.
    pub cache: LoadCache,

    /// Loaded dataset (None until a load succeeds).
    pub table: Option<ChurnTable>,

    /// Current sidebar filter selections.
    pub criteria: FilterCriteria,

    /// Derived views for the current (table, criteria).
    pub view: Option<DashboardView>,

    /// Error message shown in the UI when loading fails.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_path: String) -> Self {
        AppState {
            data_path,
            cache: LoadCache::default(),
            table: None,
            criteria: FilterCriteria::default(),
            view: None,
            status_message: None,
        }
    }

    /// Load (or re-load) the file named by the path field. On failure the
    /// table and every derived view are dropped so no partial dashboard is
    /// shown, and the error becomes the status message.
    pub fn reload(&mut self) {
        let path = PathBuf::from(self.data_path.trim());
        match self.cache.load(&path) {
            Ok(table) => {
                log::info!("loaded {} customers from {}", table.len(), path.display());
                self.criteria = FilterCriteria::allow_all(&table);
                self.table = Some(table);
                self.status_message = None;
                self.refresh();
            }
            Err(err) => {
                log::error!("load failed: {err}");
                self.table = None;
                self.view = None;
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Recompute the derived views after a filter change.
    pub fn refresh(&mut self) {
        self.view = self
            .table
            .as_ref()
            .map(|table| DashboardView::build(table, &self.criteria));
    }
}
