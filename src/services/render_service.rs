use std::path::Path;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::RGBAColor;
use tracing::{debug, info};

use crate::models::{ChartDescription, DatasetStyle, GradientExtent, GradientSurface};
use crate::utils::{render_error, ChartError};

const FONT_FAMILY: &str = "sans-serif";
const LINE_WIDTH: u32 = 2;

/// Draws chart descriptions into PNG files
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl PngRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render the line chart to `path`
    pub fn render_to_file(&self, chart: &ChartDescription, path: &Path) -> Result<(), ChartError> {
        if chart.datasets.is_empty() {
            return Err(ChartError::Render("no datasets to draw".to_string()));
        }

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(render_error("Failed to fill canvas"))?;

        let (y_min, y_max) = value_range(&chart.datasets);
        let points_len = chart
            .labels
            .len()
            .max(chart.datasets.iter().map(|d| d.data.len()).max().unwrap_or(0));
        let x_max = points_len.saturating_sub(1).max(1) as f64;

        let options = &chart.options;
        let axis_font = (FONT_FAMILY, f64::from(options.x_axis.font_size)).into_font();

        let mut ctx = ChartBuilder::on(&root)
            .margin(15)
            .margin_right(40)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)
            .map_err(render_error("Failed to build chart"))?;

        let labels = &chart.labels;
        let label_formatter = |x: &f64| label_at(labels, *x);

        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(options.x_axis.label)
            .y_desc(options.y_axis.label)
            .axis_desc_style(axis_font)
            .x_labels(labels.len().clamp(2, 12))
            .x_label_formatter(&label_formatter);
        if !options.y_axis.grid_lines {
            mesh.disable_y_mesh();
        }
        mesh.draw().map_err(render_error("Failed to draw mesh"))?;

        for dataset in &chart.datasets {
            let [r, g, b] = dataset.border_color.rgb();
            let base = RGBColor(r, g, b);
            let points: Vec<(f64, f64)> = dataset
                .data
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect();

            if dataset.fill {
                // one gradient sample per canvas row, painted column by column under the line
                let extent = dataset.background_color.extent;
                let rows = dataset
                    .background_color
                    .sample((0..self.height).map(|row| gradient_offset(row as i32, extent)));
                let pixels: Vec<(i32, i32)> = points.iter().map(|p| ctx.backend_coord(p)).collect();
                let (_, baseline) = ctx.backend_coord(&(0.0, y_min));

                for (x, top) in fill_columns(&pixels) {
                    for y in top.max(0)..baseline {
                        let Some(color) = rows.get(y as usize) else {
                            break;
                        };
                        root.draw_pixel((x, y), &RGBAColor(color.r, color.g, color.b, color.a))
                            .map_err(render_error("Failed to draw fill"))?;
                    }
                }
            }

            if dataset.show_line {
                ctx.draw_series(LineSeries::new(points.clone(), base.stroke_width(LINE_WIDTH)))
                    .map_err(render_error("Failed to draw line"))?
                    .label(dataset.label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], base.stroke_width(LINE_WIDTH))
                    });
            }

            draw_points(&mut ctx, dataset, &points, base)?;
            debug!("Drew dataset '{}' with {} points", dataset.label, points.len());
        }

        ctx.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_error("Failed to draw legend"))?;

        root.present()
            .map_err(render_error("Failed to write image"))?;

        info!("✓ Chart written to {}", path.display());
        Ok(())
    }
}

impl GradientSurface for PngRenderer {
    fn allocate_gradient(&self, height: u32) -> GradientExtent {
        GradientExtent::vertical(height)
    }
}

fn draw_points<DB: DrawingBackend>(
    ctx: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    dataset: &DatasetStyle,
    points: &[(f64, f64)],
    base: RGBColor,
) -> Result<(), ChartError> {
    let radius = dataset.point_radius as i32;
    let border = dataset.point_border_width;

    ctx.draw_series(points.iter().map(|&p| Circle::new(p, radius, base.filled())))
        .map_err(render_error("Failed to draw points"))?;
    ctx.draw_series(points.iter().map(|&p| Circle::new(p, radius, WHITE.stroke_width(border))))
        .map_err(render_error("Failed to draw point borders"))?;
    Ok(())
}

/// Lowest and highest sample with 10% padding, never below zero.
/// A flat series is padded by a tenth of its value, at least 1.
fn value_range(datasets: &[DatasetStyle]) -> (f64, f64) {
    let values = || datasets.iter().flat_map(|d| d.data.iter().copied());
    let min = values().fold(f64::INFINITY, f64::min);
    let max = values().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let range = max - min;
    let padding = if range > 0.0 {
        range * 0.1
    } else {
        (max.abs() * 0.1).max(1.0)
    };
    ((min - padding).max(0.0), max + padding)
}

/// Date label for an x tick; ticks between samples get none
fn label_at(labels: &[String], x: f64) -> String {
    if x < 0.0 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}

/// Where a pixel row falls along a vertical gradient
fn gradient_offset(pixel_y: i32, extent: GradientExtent) -> f64 {
    let height = extent.height().max(1);
    (f64::from(pixel_y) - f64::from(extent.y0)) / f64::from(height)
}

/// Top fill pixel for each column the line spans, never above the line itself
fn fill_columns(pixels: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut columns = Vec::new();
    for pair in pixels.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x1 <= x0 {
            continue;
        }
        for x in x0..x1 {
            let y = f64::from(y0) + f64::from((y1 - y0) * (x - x0)) / f64::from(x1 - x0);
            columns.push((x, y.ceil() as i32));
        }
    }
    if let Some(&last) = pixels.last() {
        columns.push(last);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorHex, SeriesRecord};
    use crate::services::chart_service::{assemble_datasets, build_chart, BuildSettings};

    #[test]
    fn range_pads_and_clamps_at_zero() {
        let renderer = PngRenderer::new(800, 600);
        let series = vec![SeriesRecord {
            name: "Bitcoin".to_string(),
            color: ColorHex::parse("#f7931a").unwrap(),
            samples: vec![100.0, 200.0],
        }];
        let (datasets, _) = assemble_datasets(&series, &renderer, BuildSettings::default());

        let (lo, hi) = value_range(&datasets);
        assert!((lo - 90.0).abs() < 1e-9);
        assert!((hi - 210.0).abs() < 1e-9);
        assert_eq!(value_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn labels_only_on_whole_ticks() {
        let labels = vec!["Jan 04".to_string(), "Jan 05".to_string()];
        assert_eq!(label_at(&labels, 1.0), "Jan 05");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, -1.0), "");
        assert_eq!(label_at(&labels, 7.0), "");
    }

    #[test]
    fn flat_series_gets_a_real_range() {
        let renderer = PngRenderer::new(800, 600);
        let flat = |samples: Vec<f64>| {
            let series = vec![SeriesRecord {
                name: "Tether".to_string(),
                color: ColorHex::parse("#26a17b").unwrap(),
                samples,
            }];
            assemble_datasets(&series, &renderer, BuildSettings::default()).0
        };

        assert_eq!(value_range(&flat(vec![1.0, 1.0, 1.0])), (0.0, 2.0));
        assert_eq!(value_range(&flat(vec![5.0])), (4.0, 6.0));
        let (lo, hi) = value_range(&flat(vec![50_000.0, 50_000.0]));
        assert!((lo - 45_000.0).abs() < 1e-6);
        assert!((hi - 55_000.0).abs() < 1e-6);
    }

    #[test]
    fn fill_follows_a_zigzag_line() {
        // pixel rows grow downward, so "above the line" means a smaller y
        let pixels = [(0, 0), (10, 100), (20, 5), (30, 80), (33, 80)];
        let columns = fill_columns(&pixels);

        assert_eq!(columns.len(), 34);
        for (i, &(x, top)) in columns.iter().enumerate() {
            assert_eq!(x, i as i32);
            let seg = pixels.windows(2).find(|w| w[0].0 <= x && x <= w[1].0).unwrap();
            let ((x0, y0), (x1, y1)) = (seg[0], seg[1]);
            let line_y = f64::from(y0) + f64::from((y1 - y0) * (x - x0)) / f64::from(x1 - x0);
            assert!(f64::from(top) >= line_y - 1e-9, "column {} fill starts above the line", x);
            assert!(f64::from(top) - line_y < 1.0, "column {} fill starts too low", x);
        }
        assert_eq!(columns[10], (10, 100));
        assert_eq!(columns[20], (20, 5));
        assert_eq!(columns[33], (33, 80));
    }

    #[test]
    fn fill_columns_edge_cases() {
        assert!(fill_columns(&[]).is_empty());
        assert_eq!(fill_columns(&[(7, 3)]), vec![(7, 3)]);
    }

    #[test]
    fn renders_a_png_file() {
        let renderer = PngRenderer::new(320, 240);
        let series = vec![
            SeriesRecord {
                name: "Bitcoin".to_string(),
                color: ColorHex::parse("#f7931a").unwrap(),
                samples: vec![100.0, 140.0, 90.0, 160.0],
            },
            SeriesRecord {
                name: "Tether".to_string(),
                color: ColorHex::parse("#26a17b").unwrap(),
                samples: vec![1.0, 1.0, 1.0, 1.0],
            },
        ];
        let settings = BuildSettings {
            fill_height: 240,
            ..BuildSettings::default()
        };
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let chart = build_chart(&series, &renderer, settings, today).unwrap();

        let path = std::env::temp_dir().join(format!("coin_chart_render_{}.png", std::process::id()));
        renderer.render_to_file(&chart, &path).unwrap();

        let written = std::fs::metadata(&path).unwrap().len();
        std::fs::remove_file(&path).unwrap();
        assert!(written > 0);
    }

    #[test]
    fn empty_chart_is_not_rendered() {
        let renderer = PngRenderer::new(320, 240);
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let mut chart = build_chart(
            &[SeriesRecord {
                name: "Bitcoin".to_string(),
                color: ColorHex::parse("#f7931a").unwrap(),
                samples: vec![1.0],
            }],
            &renderer,
            BuildSettings::default(),
            today,
        )
        .unwrap();
        chart.datasets.clear();

        let path = std::env::temp_dir().join(format!("coin_chart_empty_{}.png", std::process::id()));
        assert!(matches!(renderer.render_to_file(&chart, &path), Err(ChartError::Render(_))));
        assert!(!path.exists());
    }

    #[test]
    fn offsets_follow_the_extent() {
        let extent = GradientExtent::vertical(650);
        assert_eq!(gradient_offset(0, extent), 0.0);
        assert_eq!(gradient_offset(325, extent), 0.5);
        assert_eq!(gradient_offset(650, extent), 1.0);
    }

    #[test]
    fn renderer_allocates_vertical_extents() {
        let extent = PngRenderer::new(1024, 768).allocate_gradient(650);
        assert_eq!(extent, GradientExtent::vertical(650));
    }
}
