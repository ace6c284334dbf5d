use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Spectra line chart
// ---------------------------------------------------------------------------

/// Render the loaded spectra across wavenumber.
///
/// The axis runs from `wavenumber_range[0]` to `[1]`; a descending range (the
/// usual 4000 → 400 cm⁻¹) is drawn by plotting negated x and relabelling.
pub fn spectra_plot(ui: &mut Ui, state: &AppState) {
    if state.samples.is_empty() {
        ui.label("No spectra loaded. Pick files under \"Spectra\" in the side panel.");
        return;
    }

    let [left, right] = state.features.wavenumber_range;
    let sign = if left > right { -1.0 } else { 1.0 };
    let y_label = if state.plot_normalized {
        "Normalized Intensity"
    } else {
        "Intensity (a.u.)"
    };

    Plot::new("spectra_plot")
        .legend(Legend::default())
        .height(420.0)
        .x_axis_label("Wavenumber (cm⁻¹)")
        .y_axis_label(y_label)
        .include_x(sign * left)
        .include_x(sign * right)
        .x_axis_formatter(move |mark, _range| format!("{:.0}", sign * mark.value))
        .label_formatter(move |name, value| {
            format!("{name}\n{:.1} cm⁻¹\n{:.4}", sign * value.x, value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, table) in &state.samples {
                let points: PlotPoints = table
                    .points(state.plot_normalized)
                    .into_iter()
                    .map(|[x, y]| [sign * x, y])
                    .collect();

                let line = Line::new(points)
                    .name(legend_name(name))
                    .color(state.color_map.color_for(name))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

/// File name without its extension, for the legend.
fn legend_name(file: &str) -> &str {
    file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file)
}

// ---------------------------------------------------------------------------
// Parameter bar chart
// ---------------------------------------------------------------------------

/// One bar per selected sample for the chosen parameter. Non-numeric cells
/// are skipped.
pub fn parameter_chart(ui: &mut Ui, state: &AppState) {
    let Some(parameter) = state.parameter.clone() else {
        return;
    };
    let series = state.parameter_bars();
    let codes: Vec<String> = series.iter().map(|(c, _)| c.clone()).collect();

    let bars: Vec<Bar> = series
        .iter()
        .enumerate()
        .filter_map(|(i, (code, v))| {
            v.map(|v| Bar::new(i as f64, v).name(code).width(0.6))
        })
        .collect();

    Plot::new("parameter_chart")
        .height(300.0)
        .x_axis_label("Sample")
        .y_axis_label(parameter.clone())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            codes.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(format!("Sample by {parameter}"))
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

// ---------------------------------------------------------------------------
// Synthetic scatter
// ---------------------------------------------------------------------------

/// Random `[x, y, z]` points drawn as x/y with colour encoding z.
pub fn synthetic_scatter(ui: &mut Ui, state: &AppState) {
    let zs: Vec<f64> = state.synthetic.iter().map(|p| p[2]).collect();
    let (lo, hi) = bcviz::data::normalize::min_max(&zs).unwrap_or((0.0, 1.0));
    let span = if hi > lo { hi - lo } else { 1.0 };

    Plot::new("synthetic_scatter")
        .height(300.0)
        .data_aspect(1.0)
        .x_axis_label("x")
        .y_axis_label("y")
        .show(ui, |plot_ui| {
            for p in &state.synthetic {
                let c = color::ramp((p[2] - lo) / span);
                plot_ui.points(Points::new(vec![[p[0], p[1]]]).radius(3.0).color(c));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_strips_extension() {
        assert_eq!(legend_name("BC01.dpt"), "BC01");
        assert_eq!(legend_name("BC.01.dpt"), "BC.01");
        assert_eq!(legend_name("noext"), "noext");
    }
}
