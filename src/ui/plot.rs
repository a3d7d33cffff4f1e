use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

use cereal_dash::dashboard::PanelKind;
use cereal_dash::data::chart::Series;
use cereal_dash::data::model::Column;
use cereal_dash::i18n::Locale;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Measure-over-time line chart
// ---------------------------------------------------------------------------

const LINE_STYLES: [LineStyle; 3] = [
    LineStyle::Solid,
    LineStyle::Dashed { length: 10.0 },
    LineStyle::Dotted { spacing: 6.0 },
];

const MARKERS: [MarkerShape; 4] = [
    MarkerShape::Circle,
    MarkerShape::Square,
    MarkerShape::Diamond,
    MarkerShape::Up,
];

/// Render one panel's series: colour from the hue value, line style and
/// marker from the style value.
pub fn measure_chart(
    ui: &mut Ui,
    kind: PanelKind,
    measure: Column,
    series: &[Series],
    colors: &ColorMap,
    locale: Locale,
) {
    // Style values in order of first appearance.
    let mut styles: Vec<&str> = Vec::new();
    for s in series {
        if let Some(style) = s.style.as_deref() {
            if !styles.contains(&style) {
                styles.push(style);
            }
        }
    }

    Plot::new(format!("chart_{kind:?}"))
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label(locale.column_label(Column::Year))
        .y_axis_label(locale.column_label(measure))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                let color = colors.color_for(s.hue());
                let name = s.label();
                let points = s.mean_by_x();
                let style_idx = s
                    .style
                    .as_deref()
                    .and_then(|v| styles.iter().position(|x| *x == v));

                let mut line = Line::new(PlotPoints::from(points.clone()))
                    .name(&name)
                    .color(color)
                    .width(1.5);
                if let Some(i) = style_idx {
                    line = line.style(LINE_STYLES[i % LINE_STYLES.len()]);
                }
                plot_ui.line(line);

                let shape = style_idx.map_or(MarkerShape::Circle, |i| MARKERS[i % MARKERS.len()]);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&name)
                        .color(color)
                        .shape(shape)
                        .radius(3.0),
                );
            }
        });
}
