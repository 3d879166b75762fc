use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot};

use crate::data::model::Churn;
use crate::data::summary::{CategoryBreakdown, ChargeSpread, HistogramBin};

/// Bar/box colour for churned customers.
pub const CHURNED_COLOR: Color32 = Color32::from_rgb(0xe4, 0x57, 0x56);
/// Bar/box colour for retained customers.
pub const RETAINED_COLOR: Color32 = Color32::from_rgb(0x4c, 0x78, 0xa8);

const CHART_HEIGHT: f32 = 230.0;

fn outcome_color(churn: Churn) -> Color32 {
    match churn {
        Churn::Yes => CHURNED_COLOR,
        Churn::No => RETAINED_COLOR,
    }
}

fn outcome_name(churn: Churn) -> &'static str {
    match churn {
        Churn::Yes => "Churned",
        Churn::No => "Retained",
    }
}

// ---------------------------------------------------------------------------
// Churn-by-category grouped bars
// ---------------------------------------------------------------------------

/// Grouped bars: one category per x position, churned and retained side by
/// side. Renders an info label instead when the breakdown is empty.
pub fn breakdown_chart(ui: &mut Ui, breakdown: &CategoryBreakdown, title: &str) {
    ui.strong(title);
    if breakdown.is_empty() {
        ui.label(format!("No data for {}.", breakdown.column.label()));
        return;
    }

    // Category positions follow the breakdown order (largest groups first).
    let mut categories: Vec<String> = Vec::new();
    for entry in &breakdown.entries {
        if !categories.contains(&entry.category) {
            categories.push(entry.category.clone());
        }
    }

    let mut churned_bars = Vec::new();
    let mut retained_bars = Vec::new();
    for entry in &breakdown.entries {
        let pos = categories
            .iter()
            .position(|c| *c == entry.category)
            .unwrap_or(0) as f64;
        let (bars, offset) = match entry.churn {
            Churn::Yes => (&mut churned_bars, 0.2),
            Churn::No => (&mut retained_bars, -0.2),
        };
        bars.push(
            Bar::new(pos + offset, entry.count as f64)
                .width(0.35)
                .name(&entry.category),
        );
    }

    let labels = categories.clone();
    Plot::new(format!("breakdown_{}", breakdown.column.label()))
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("Customers")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 0.05 && idx >= 0.0 && (idx as usize) < labels.len() {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(retained_bars)
                    .name(outcome_name(Churn::No))
                    .color(RETAINED_COLOR),
            );
            plot_ui.bar_chart(
                BarChart::new(churned_bars)
                    .name(outcome_name(Churn::Yes))
                    .color(CHURNED_COLOR),
            );
        });
}

// ---------------------------------------------------------------------------
// Tenure histogram
// ---------------------------------------------------------------------------

/// Stacked per-bin counts over the tenure axis.
pub fn tenure_histogram_chart(ui: &mut Ui, bins: &[HistogramBin]) {
    ui.strong("Tenure distribution");
    if bins.is_empty() {
        ui.label("No data for tenure distribution.");
        return;
    }

    let retained: Vec<Bar> = bins
        .iter()
        .map(|b| Bar::new(b.start + b.width / 2.0, b.retained as f64).width(b.width * 0.95))
        .collect();
    let churned: Vec<Bar> = bins
        .iter()
        .map(|b| Bar::new(b.start + b.width / 2.0, b.churned as f64).width(b.width * 0.95))
        .collect();

    let retained_chart = BarChart::new(retained)
        .name(outcome_name(Churn::No))
        .color(RETAINED_COLOR);
    let churned_chart = BarChart::new(churned)
        .name(outcome_name(Churn::Yes))
        .color(CHURNED_COLOR)
        .stack_on(&[&retained_chart]);

    Plot::new("tenure_histogram")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Tenure (months)")
        .y_axis_label("Customers")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(retained_chart);
            plot_ui.bar_chart(churned_chart);
        });
}

// ---------------------------------------------------------------------------
// Monthly charges vs churn box plot
// ---------------------------------------------------------------------------

/// One box per outcome group, quartiles from the summary layer.
pub fn charge_spread_chart(ui: &mut Ui, spreads: &[ChargeSpread]) {
    ui.strong("Monthly charges vs churn");
    if spreads.is_empty() {
        ui.label("No data for monthly charges.");
        return;
    }

    let labels: Vec<&'static str> = spreads.iter().map(|s| outcome_name(s.churn)).collect();
    Plot::new("charge_spread")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("Monthly charges")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 0.05 && idx >= 0.0 && (idx as usize) < labels.len() {
                labels[idx as usize].to_string()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, spread) in spreads.iter().enumerate() {
                let color = outcome_color(spread.churn);
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(
                        spread.min,
                        spread.q1,
                        spread.median,
                        spread.q3,
                        spread.max,
                    ),
                )
                .box_width(0.5)
                .fill(color.gamma_multiply(0.4))
                .stroke(Stroke::new(1.5, color));

                plot_ui.box_plot(
                    BoxPlot::new(vec![elem]).name(outcome_name(spread.churn)),
                );
            }
        });
}
