//! Linear maps between model space and a fixed-size pixel canvas.

use crate::geometry::{ArchProfile, Vec2};

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 1920;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1000;

/// Screen-space distance within which a click counts as hitting a joint.
pub const PICK_TOLERANCE: f64 = 5.0;

/// Independent per-axis linear maps from model space onto a pixel canvas.
///
/// The model bounds are the bridge's extent expanded by 10% on each side, and
/// the vertical axis is flipped so deck height grows upward on screen.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    /// Canvas width in pixels.
    width: f64,
    /// Canvas height in pixels.
    height: f64,
    /// Lower model-x bound (left edge of the canvas).
    lower_x: f64,
    /// Upper model-x bound (right edge of the canvas).
    upper_x: f64,
    /// Lower bound of the flipped vertical coordinate.
    lower_y: f64,
    /// Upper bound of the flipped vertical coordinate.
    upper_y: f64,
    /// Peak deck height, the reference for the vertical flip.
    peak: f64,
}

impl Viewport {
    /// Build a viewport for a bridge profile on a canvas of the given size.
    #[must_use]
    pub fn new(profile: &ArchProfile, width: u32, height: u32) -> Self {
        let span = profile.span();
        let peak = profile.peak_height();
        Self {
            width: f64::from(width),
            height: f64::from(height),
            lower_x: -0.1 * span,
            upper_x: 1.1 * span,
            lower_y: -0.1 * peak,
            upper_y: 1.1 * peak,
            peak,
        }
    }

    /// Build a viewport on the default 1920x1000 canvas.
    #[must_use]
    pub fn with_default_canvas(profile: &ArchProfile) -> Self {
        Self::new(profile, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Map one axis value onto a pixel coordinate, truncating.
    #[allow(clippy::cast_possible_truncation)]
    fn axis(lower: f64, value: f64, upper: f64, extent: f64) -> i32 {
        ((value - lower) / (upper - lower) * extent) as i32
    }

    /// Map a model-space point onto pixel coordinates.
    #[must_use]
    pub fn to_screen(&self, point: Vec2) -> (i32, i32) {
        (
            Self::axis(self.lower_x, point.x, self.upper_x, self.width),
            Self::axis(self.lower_y, self.peak - point.y, self.upper_y, self.height),
        )
    }

    /// Map a pixel x coordinate back to a model-space x position.
    #[must_use]
    pub fn x_to_model(&self, pixel_x: i32) -> f64 {
        self.lower_x + f64::from(pixel_x) / self.width * (self.upper_x - self.lower_x)
    }

    /// Convert a horizontal pixel delta into a model-space delta.
    #[must_use]
    pub fn scale_dx(&self, pixel_dx: i32) -> f64 {
        (self.upper_x - self.lower_x) / self.width * f64::from(pixel_dx)
    }

    /// Screen-space distance between a model point and a pixel position.
    #[must_use]
    pub fn screen_distance(&self, point: Vec2, pixel: (i32, i32)) -> f64 {
        let (sx, sy) = self.to_screen(point);
        let projected = Vec2::new(f64::from(sx), f64::from(sy));
        let pointer = Vec2::new(f64::from(pixel.0), f64::from(pixel.1));
        (projected - pointer).magnitude()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::vec2;

    fn viewport() -> Viewport {
        Viewport::with_default_canvas(&ArchProfile::new(1.0, 1000.0))
    }

    #[test]
    fn origin_lands_inside_the_margin() {
        let (sx, sy) = viewport().to_screen(vec2(0.0, 0.0));
        // x: (0 + 100) / 1200 * 1920.
        assert_eq!(sx, 160);
        // y: (1.0e6 + 1.0e5) / 1.2e6 * 1000, truncated.
        assert_eq!(sy, 916);
    }

    #[test]
    fn the_peak_maps_near_the_top_right() {
        let (sx, sy) = viewport().to_screen(vec2(1000.0, 1_000_000.0));
        assert_eq!(sx, 1760);
        assert_eq!(sy, 83);
    }

    #[test]
    fn x_to_model_inverts_the_horizontal_map() {
        let viewport = viewport();
        for x in [0.0, 250.0, 500.0, 999.0] {
            let (sx, _) = viewport.to_screen(vec2(x, 0.0));
            // A pixel covers 0.625 model units, so stay within one pixel.
            assert_relative_eq!(viewport.x_to_model(sx), x, epsilon = 0.7);
        }
    }

    #[test]
    fn drag_deltas_scale_with_the_span() {
        // 1.2 * 1000 / 1920 model units per pixel.
        assert_relative_eq!(viewport().scale_dx(16), 10.0);
        assert_relative_eq!(viewport().scale_dx(-16), -10.0);
    }
}
