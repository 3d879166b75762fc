use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::risk::{RiskRow, TOP_RISK_ROWS};
use crate::data::summary::KpiSummary;
use crate::state::AppState;
use crate::ui::charts;

/// Pre-rendered charts from the earlier offline analysis, shown when the
/// files sit next to the working directory.
const PRIOR_VISUALS: [(&str, &str); 3] = [
    ("Confusion matrix", "ConfusionMatrix.png"),
    ("Top 10 feature importance", "top10MostImportantFeatures.png"),
    ("Churn by contract type", "ChurnBYContract_type.png"),
];

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the dashboard, or a full-screen message when there is nothing to
/// show (load failure or no file yet). A failed load never renders a
/// partial dashboard.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => {
                ui.heading(RichText::new(msg).color(Color32::RED));
            }
            None => {
                ui.heading("Point the data source at a churn export to begin.");
            }
        });
        return;
    };

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!(
                "Filtered view: {} customers",
                thousands(view.kpis.total)
            ))
            .weak(),
        );
        kpi_row(ui, &view.kpis);
        ui.add_space(8.0);
        ui.separator();

        ui.columns(2, |cols: &mut [Ui]| {
            charts::breakdown_chart(&mut cols[0], &view.contract_breakdown, "Churn by contract");
            charts::tenure_histogram_chart(&mut cols[1], &view.tenure_histogram);
        });
        ui.add_space(8.0);
        ui.columns(2, |cols: &mut [Ui]| {
            charts::breakdown_chart(
                &mut cols[0],
                &view.service_breakdown,
                "Churn by internet service",
            );
            charts::charge_spread_chart(&mut cols[1], &view.charge_spread);
        });

        ui.add_space(8.0);
        ui.separator();
        risk_table(ui, &view.at_risk);

        ui.add_space(8.0);
        prior_visuals(ui);
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, kpis: &KpiSummary) {
    ui.columns(5, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Customers", thousands(kpis.total), None);
        metric(
            &mut cols[1],
            "Churned",
            thousands(kpis.churned),
            Some(format!("{:.1}%", kpis.churn_rate)),
        );
        metric(
            &mut cols[2],
            "Avg tenure (mo)",
            format!("{:.1}", kpis.avg_tenure),
            None,
        );
        metric(&mut cols[3], "Monthly revenue", money(kpis.monthly_revenue), None);
        metric(&mut cols[4], "Revenue at risk", money(kpis.revenue_at_risk), None);
    });
}

fn metric(ui: &mut Ui, label: &str, value: String, delta: Option<String>) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small().weak());
        ui.heading(value);
        if let Some(delta) = delta {
            ui.label(RichText::new(delta).small().color(charts::CHURNED_COLOR));
        }
    });
}

// ---------------------------------------------------------------------------
// At-risk table
// ---------------------------------------------------------------------------

fn risk_table(ui: &mut Ui, rows: &[RiskRow]) {
    ui.strong(format!(
        "Accounts most at risk (top {TOP_RISK_ROWS} by monthly charges)"
    ));
    if rows.is_empty() {
        ui.label("No churned accounts in the current view.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(55.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in [
                "Customer",
                "Tenure",
                "Bucket",
                "Contract",
                "Internet",
                "Payment method",
                "Monthly",
                "Total",
            ] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&r.customer_id);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.tenure.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.bucket.label());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.contract);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.internet_service);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.payment_method);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("${:.2}", r.monthly_charges));
                });
                row.col(|ui: &mut Ui| {
                    let text = r
                        .total_charges
                        .map(|v| format!("${v:.2}"))
                        .unwrap_or_else(|| "-".to_string());
                    ui.label(text);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Pre-rendered visuals
// ---------------------------------------------------------------------------

fn prior_visuals(ui: &mut Ui) {
    egui::CollapsingHeader::new(RichText::new("Existing visuals from previous analysis").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.columns(3, |cols: &mut [Ui]| {
                for (col, (title, file)) in cols.iter_mut().zip(PRIOR_VISUALS) {
                    if Path::new(file).exists() {
                        col.add(
                            egui::Image::new(format!("file://{file}"))
                                .max_width(col.available_width())
                                .rounding(4.0),
                        );
                        col.label(RichText::new(title).small());
                    } else {
                        col.label(RichText::new(format!("{title} (missing: {file})")).weak());
                    }
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn money(value: f64) -> String {
    format!("${}", thousands(value.round() as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(7043), "7,043");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn money_rounds_to_whole_dollars() {
        assert_eq!(money(0.4), "$0");
        assert_eq!(money(456117.6), "$456,118");
    }
}
