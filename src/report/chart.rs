//! Line chart of sequence length by accession.
//!
//! The chart is laid out as SVG and rasterized to PNG with resvg.

use crate::core::FilteredRecord;
use crate::error::{OutputError, Result};
use crate::report::ensure_parent_dir;
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Line, Polyline, Rectangle, Text};
use tracing::info;

/// File name used when no path is given.
pub const DEFAULT_PLOT_PATH: &str = "length_plot.png";

/// Chart title.
pub const CHART_TITLE: &str = "Sequence Lengths Sorted (Longest to Shortest)";
/// X-axis label.
pub const X_AXIS_LABEL: &str = "Accession Number";
/// Y-axis label.
pub const Y_AXIS_LABEL: &str = "Sequence Length";

const W: f32 = 1000.0;
const H: f32 = 600.0;
const MARGIN_LEFT: f32 = 90.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARGIN_TOP: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 170.0;
const Y_TICKS: usize = 5;
const LINE_COLOR: &str = "#1f77b4";

/// Records in plotting order: longest first.
///
/// The sort is stable, so records of equal length keep their relative
/// order.
#[must_use]
pub fn chart_order(records: &[FilteredRecord]) -> Vec<&FilteredRecord> {
    let mut ordered: Vec<&FilteredRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.length.cmp(&a.length));
    ordered
}

/// Lays out the chart as an SVG document.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn render_chart_svg(records: &[FilteredRecord]) -> String {
    let ordered = chart_order(records);
    let plot_left = MARGIN_LEFT;
    let plot_right = W - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = H - MARGIN_BOTTOM;

    let y_max = axis_max(ordered.first().map_or(0, |r| r.length));
    let y_to_px =
        |length: f32| plot_bottom - (length / y_max) * (plot_bottom - plot_top);
    let slot = (plot_right - plot_left) / ordered.len().max(1) as f32;
    let x_to_px = |index: usize| plot_left + (index as f32 + 0.5) * slot;

    let mut doc = Document::new()
        .set("viewBox", (0, 0, W, H))
        .set("width", W)
        .set("height", H)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", W)
                .set("height", H)
                .set("fill", "#ffffff"),
        );

    doc = doc.add(
        Text::new(CHART_TITLE)
            .set("x", (plot_left + plot_right) / 2.0)
            .set("y", MARGIN_TOP / 2.0 + 6.0)
            .set("text-anchor", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", 16)
            .set("fill", "#111111"),
    );

    // Axes
    for (x1, y1, x2, y2) in [
        (plot_left, plot_bottom, plot_right, plot_bottom),
        (plot_left, plot_top, plot_left, plot_bottom),
    ] {
        doc = doc.add(
            Line::new()
                .set("x1", x1)
                .set("y1", y1)
                .set("x2", x2)
                .set("y2", y2)
                .set("stroke", "#000000")
                .set("stroke-width", 1),
        );
    }

    for tick in 0..=Y_TICKS {
        let value = y_max * tick as f32 / Y_TICKS as f32;
        let y = y_to_px(value);
        doc = doc
            .add(
                Line::new()
                    .set("x1", plot_left - 5.0)
                    .set("y1", y)
                    .set("x2", plot_left)
                    .set("y2", y)
                    .set("stroke", "#000000")
                    .set("stroke-width", 1),
            )
            .add(
                Text::new(format!("{value:.0}"))
                    .set("x", plot_left - 8.0)
                    .set("y", y + 4.0)
                    .set("text-anchor", "end")
                    .set("font-family", "sans-serif")
                    .set("font-size", 10)
                    .set("fill", "#111111"),
            );
    }

    let points: Vec<String> = ordered
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{:.2},{:.2}", x_to_px(i), y_to_px(r.length as f32)))
        .collect();
    doc = doc.add(
        Polyline::new()
            .set("points", points.join(" "))
            .set("fill", "none")
            .set("stroke", LINE_COLOR)
            .set("stroke-width", 1.5),
    );

    for (i, record) in ordered.iter().enumerate() {
        let x = x_to_px(i);
        let y = y_to_px(record.length as f32);
        let label_y = plot_bottom + 8.0;
        doc = doc
            .add(
                Circle::new()
                    .set("cx", x)
                    .set("cy", y)
                    .set("r", 3.5)
                    .set("fill", LINE_COLOR),
            )
            .add(
                Text::new(record.accession.clone())
                    .set("x", x)
                    .set("y", label_y)
                    .set("transform", format!("rotate(-90 {x:.2} {label_y:.2})"))
                    .set("text-anchor", "end")
                    .set("dominant-baseline", "middle")
                    .set("font-family", "sans-serif")
                    .set("font-size", 8)
                    .set("fill", "#111111"),
            );
    }

    let y_label_x = 20.0;
    let y_label_y = (plot_top + plot_bottom) / 2.0;
    doc = doc
        .add(
            Text::new(X_AXIS_LABEL)
                .set("x", (plot_left + plot_right) / 2.0)
                .set("y", H - 12.0)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", 12)
                .set("fill", "#111111"),
        )
        .add(
            Text::new(Y_AXIS_LABEL)
                .set("x", y_label_x)
                .set("y", y_label_y)
                .set("transform", format!("rotate(-90 {y_label_x} {y_label_y})"))
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", 12)
                .set("fill", "#111111"),
        );

    doc.to_string()
}

/// Renders the chart and writes it to `path` as PNG.
///
/// An existing file is overwritten.
///
/// # Errors
///
/// Returns `OutputError::Render` if rasterization fails and
/// `OutputError::WriteFailed` if the file cannot be written.
pub fn generate_plot<P: AsRef<Path>>(records: &[FilteredRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();

    let svg = render_chart_svg(records);
    let png = rasterize(&svg).map_err(|reason| OutputError::Render {
        path: path_str.clone(),
        reason,
    })?;

    ensure_parent_dir(path)?;
    std::fs::write(path, png).map_err(|e| OutputError::WriteFailed {
        path: path_str,
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), points = records.len(), "saved plot");
    Ok(())
}

fn rasterize(svg: &str) -> std::result::Result<Vec<u8>, String> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(svg, &options).map_err(|e| e.to_string())?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| "chart has zero size".to_string())?;
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|e| e.to_string())
}

/// Upper bound of the y-axis: the longest length rounded up to a tick step.
#[allow(clippy::cast_precision_loss)]
fn axis_max(longest: usize) -> f32 {
    if longest == 0 {
        return 1.0;
    }
    let raw_step = longest as f32 / Y_TICKS as f32;
    let magnitude = 10f32.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw_step)
        .unwrap_or(10.0 * magnitude);
    step * Y_TICKS as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_chart_order_descending_stable() {
        let records = vec![
            FilteredRecord::new("A", 100, ""),
            FilteredRecord::new("B", 300, ""),
            FilteredRecord::new("C", 100, ""),
            FilteredRecord::new("D", 300, ""),
            FilteredRecord::new("E", 200, ""),
        ];
        let ids: Vec<_> = chart_order(&records)
            .iter()
            .map(|r| r.accession.as_str())
            .collect();
        assert_eq!(ids, vec!["B", "D", "E", "A", "C"]);
    }

    #[test]
    fn test_axis_max() {
        assert!((axis_max(0) - 1.0).abs() < f32::EPSILON);
        assert!((axis_max(1000) - 1000.0).abs() < 0.01);
        assert!((axis_max(1234) - 1250.0).abs() < 0.01);
        assert!((axis_max(29903) - 50000.0).abs() < 0.5);
        assert!(axis_max(7) >= 7.0);
    }

    #[test]
    fn test_svg_contains_labels_in_order() {
        let records = vec![
            FilteredRecord::new("SHORT.1", 100, ""),
            FilteredRecord::new("LONG.1", 900, ""),
        ];
        let svg = render_chart_svg(&records);
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains(X_AXIS_LABEL));
        assert!(svg.contains(Y_AXIS_LABEL));
        let long = svg.find("LONG.1").unwrap();
        let short = svg.find("SHORT.1").unwrap();
        assert!(long < short);
    }

    #[test]
    fn test_svg_single_point() {
        let svg = render_chart_svg(&[FilteredRecord::new("B", 1000, "")]);
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_generate_plot_writes_png() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plot.png");
        std::fs::write(&path, b"old").unwrap();

        let records = vec![
            FilteredRecord::new("A", 1500, ""),
            FilteredRecord::new("B", 700, ""),
        ];
        generate_plot(&records, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
