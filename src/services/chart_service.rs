use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{
    ChartDescription, DatasetStyle, FadePolicy, GradientSurface, SeriesRecord, TooltipColorTable,
};
use crate::services::gradient_service::gradient_for;
use crate::services::options_service::build_options;
use crate::services::timeline_service::build_timeline;
use crate::utils::ChartError;

const POINT_BORDER: &str = "white";

/// Knobs for one chart build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildSettings {
    pub fade: FadePolicy,
    /// Height of the region each dataset gradient spans
    pub fill_height: u32,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            fade: FadePolicy::default(),
            fill_height: 650,
        }
    }
}

/// Style every series in provider order and collect their tooltip colors
pub fn assemble_datasets<S: GradientSurface>(
    series: &[SeriesRecord],
    surface: &S,
    settings: BuildSettings,
) -> (Vec<DatasetStyle>, TooltipColorTable) {
    let mut datasets = Vec::with_capacity(series.len());
    let mut tooltip_colors = TooltipColorTable::with_capacity(series.len());

    for record in series {
        let extent = surface.allocate_gradient(settings.fill_height);
        datasets.push(DatasetStyle {
            label: record.name.clone(),
            fill: true,
            line_tension: 0.0,
            background_color: gradient_for(&record.color, extent, settings.fade),
            border_color: record.color.clone(),
            point_border_color: POINT_BORDER,
            point_border_width: 1,
            point_hover_radius: 8,
            point_hover_background_color: record.color.clone(),
            point_hover_border_color: POINT_BORDER,
            point_hover_border_width: 2,
            point_radius: 6,
            point_hit_radius: 10,
            show_line: true,
            data: record.samples.clone(),
        });
        tooltip_colors.push(record.color.clone());
    }

    (datasets, tooltip_colors)
}

/// Run the full pipeline: labels, dataset styles and options
///
/// One label per sample, with the last label on `today`. When series
/// differ in length the longest one decides.
pub fn build_chart<S: GradientSurface>(
    series: &[SeriesRecord],
    surface: &S,
    settings: BuildSettings,
    today: NaiveDate,
) -> Result<ChartDescription, ChartError> {
    let longest = series.iter().map(|s| s.samples.len()).max().unwrap_or(0);
    if series.iter().any(|s| s.samples.len() != longest) {
        warn!(
            "Series lengths differ ({:?}), labelling {} samples",
            series.iter().map(|s| s.samples.len()).collect::<Vec<_>>(),
            longest
        );
    }

    let labels = match longest.checked_sub(1) {
        Some(days_back) => {
            let days_back = i64::try_from(days_back)
                .map_err(|_| ChartError::InvalidArgument(format!("{} samples is too many", longest)))?;
            build_timeline(days_back, today)?
        }
        None => Vec::new(),
    };

    let (datasets, tooltip_colors) = assemble_datasets(series, surface, settings);
    let options = build_options(&tooltip_colors);

    debug!(
        "Built chart with {} labels and {} datasets",
        labels.len(),
        datasets.len()
    );

    Ok(ChartDescription {
        labels,
        datasets,
        options,
    })
}
