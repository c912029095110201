use crate::models::{
    Align, AxisOptions, ChartOptions, Cursor, HoverMode, HoverOptions, ScaleKind,
    TooltipColorTable, TooltipOptions,
};

const AXIS_FONT_SIZE: u32 = 20;
const TOOLTIP_Y_OFFSET: f64 = -15.0;

/// Static chart options; tooltip backgrounds come from `tooltip_colors`
pub fn build_options(tooltip_colors: &TooltipColorTable) -> ChartOptions {
    ChartOptions {
        y_axis: AxisOptions {
            kind: ScaleKind::Linear,
            grid_lines: false,
            label: "Currency $",
            font_size: AXIS_FONT_SIZE,
        },
        x_axis: AxisOptions {
            kind: ScaleKind::Category,
            grid_lines: true,
            label: "Date",
            font_size: AXIS_FONT_SIZE,
        },
        tooltip: TooltipOptions {
            x_align: Align::Center,
            y_align: Align::Bottom,
            y_offset: TOOLTIP_Y_OFFSET,
            x_padding: 5,
            y_padding: 15,
            title_font_size: 21,
            display_colors: false,
            background_colors: tooltip_colors.clone(),
        },
        hover: HoverOptions {
            mode: HoverMode::Nearest,
            cursor_on_point: Cursor::Pointer,
            cursor_elsewhere: Cursor::Default,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorHex, HoveredPoint};

    fn table() -> TooltipColorTable {
        vec![
            ColorHex::parse("#f7931a").unwrap(),
            ColorHex::parse("#627eea").unwrap(),
        ]
    }

    fn hovered(dataset_index: usize) -> HoveredPoint {
        HoveredPoint {
            dataset_index,
            x: 40.0,
            y: 100.0,
            value: 105.5,
        }
    }

    #[test]
    fn axes() {
        let options = build_options(&table());
        assert_eq!(options.y_axis.kind, ScaleKind::Linear);
        assert!(!options.y_axis.grid_lines);
        assert_eq!(options.y_axis.label, "Currency $");
        assert_eq!(options.x_axis.label, "Date");
    }

    #[test]
    fn pure() {
        let colors = table();
        assert_eq!(build_options(&colors), build_options(&colors));
        assert_eq!(colors, table());
    }

    #[test]
    fn tooltip_uses_dataset_color() {
        let options = build_options(&table());
        let tooltip = &options.tooltip;

        assert_eq!(tooltip.background_for(Some(&hovered(1))).map(|c| c.as_str()), Some("#627eea"));
        assert_eq!(tooltip.background_for(Some(&hovered(5))), None);
        assert_eq!(tooltip.background_for(None), None);
        assert_eq!(tooltip.label_for(hovered(0).value), "105.5");
        assert_eq!(tooltip.title(), "");
        assert_eq!(tooltip.position(&hovered(0)), (40.0, 85.0));
        assert!(!tooltip.display_colors);
    }

    #[test]
    fn hover_picks_nearest_point_and_cursor() {
        let hover = build_options(&table()).hover;
        let points = [(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)];

        assert_eq!(hover.nearest(&points, 9.0, 1.0, 10.0), Some(1));
        assert_eq!(hover.nearest(&points, 100.0, 100.0, 10.0), None);
        assert_eq!(hover.cursor(true), Cursor::Pointer);
        assert_eq!(hover.cursor(false), Cursor::Default);
    }

    #[test]
    fn serializes_for_browser_renderers() {
        let json = serde_json::to_value(build_options(&table())).unwrap();
        assert_eq!(json["tooltip"]["background_colors"][0], "#f7931a");
        assert_eq!(json["hover"]["mode"], "nearest");
        assert_eq!(json["tooltip"]["y_align"], "bottom");
    }
}
