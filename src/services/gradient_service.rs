use crate::models::{ColorHex, FadePolicy, Gradient, GradientExtent, GradientStop};
use crate::utils::ChartError;

const FIRST_OFFSET: f64 = 1.0;
const OFFSET_STEP: f64 = 0.5;
const STOP_COUNT: usize = 2;

/// Build the vertical fill gradient for a dataset from its base color
///
/// Stops are registered from offset 1.0 down to 0.5; the opacity of each
/// stop comes from `fade`.
pub fn build_gradient(
    base: &str,
    extent: GradientExtent,
    fade: FadePolicy,
) -> Result<Gradient, ChartError> {
    let color = ColorHex::parse(base)?;
    Ok(gradient_for(&color, extent, fade))
}

/// Same as [`build_gradient`] for an already validated color
pub fn gradient_for(color: &ColorHex, extent: GradientExtent, fade: FadePolicy) -> Gradient {
    let mut stops = Vec::with_capacity(STOP_COUNT);
    let mut offset = FIRST_OFFSET;

    while offset >= 0.0 && stops.len() < STOP_COUNT {
        stops.push(GradientStop {
            offset,
            color: color.with_alpha(fade.alpha_at(offset)),
        });
        offset -= OFFSET_STEP;
    }

    Gradient { extent, stops }
}
