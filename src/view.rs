//! Pan/zoom transform between the canvas and world coordinates.
//!
//! Three spaces are involved:
//! - client: pointer coordinates as the browser reports them
//! - canvas: the fixed logical canvas (e.g. 2400x1000), independent of how
//!   large the element happens to be on screen
//! - world: model coordinates, where `canvas = world * zoom + pan`

use crate::layout::{CanvasSize, LayoutConfig, Point};

/// On-screen rectangle of the canvas element, in client pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport drawn at exactly the logical canvas size, at the client origin.
    pub fn identity(canvas: CanvasSize) -> Self {
        Self { left: 0.0, top: 0.0, width: canvas.width, height: canvas.height }
    }

    /// Map client pixels into logical canvas units.
    ///
    /// A collapsed element (zero width or height) maps 1:1 on that axis.
    pub fn client_to_canvas(&self, client: Point, canvas: CanvasSize) -> Point {
        let sx = if self.width > 0.0 { canvas.width / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { canvas.height / self.height } else { 1.0 };
        Point {
            x: (client.x - self.left) * sx,
            y: (client.y - self.top) * sy,
        }
    }
}

/// Exponential wheel response: equal wheel travel gives equal zoom ratios.
pub fn wheel_factor(delta_y: f64, base: f64) -> f64 {
    base.powf(-delta_y)
}

// An inverted range pins to `min`.
fn clamp_zoom(zoom: f64, min: f64, max: f64) -> f64 {
    zoom.min(max).max(min)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    pan: Point,
    min_zoom: f64,
    max_zoom: f64,
}

impl ViewTransform {
    pub fn new(cfg: &LayoutConfig) -> Self {
        Self {
            zoom: clamp_zoom(1.0, cfg.min_zoom, cfg.max_zoom),
            pan: Point::ORIGIN,
            min_zoom: cfg.min_zoom,
            max_zoom: cfg.max_zoom,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Pan is unconstrained.
    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    /// Out-of-range requests are clamped, never rejected.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = clamp_zoom(zoom, self.min_zoom, self.max_zoom);
    }

    pub fn screen_to_world(&self, canvas: Point) -> Point {
        Point {
            x: (canvas.x - self.pan.x) / self.zoom,
            y: (canvas.y - self.pan.y) / self.zoom,
        }
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan.x,
            y: world.y * self.zoom + self.pan.y,
        }
    }

    /// Scale by `factor` while keeping the world point under `canvas` fixed.
    pub fn zoom_at_point(&mut self, canvas: Point, factor: f64) {
        let anchor = self.screen_to_world(canvas);
        self.set_zoom(self.zoom * factor);
        self.pan = Point {
            x: canvas.x - anchor.x * self.zoom,
            y: canvas.y - anchor.y * self.zoom,
        };
    }

    pub fn reset(&mut self) {
        self.zoom = clamp_zoom(1.0, self.min_zoom, self.max_zoom);
        self.pan = Point::ORIGIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn view() -> ViewTransform {
        ViewTransform::new(&LayoutConfig::default())
    }

    #[test]
    fn test_client_mapping_scales_to_logical_canvas() {
        let canvas = CanvasSize { width: 2400.0, height: 1000.0 };
        let vp = Viewport { left: 24.0, top: 100.0, width: 1200.0, height: 500.0 };
        let p = vp.client_to_canvas(Point::new(624.0, 350.0), canvas);
        assert_eq!(p, Point::new(1200.0, 500.0));
    }

    #[test]
    fn test_collapsed_viewport_maps_one_to_one() {
        let canvas = CanvasSize { width: 2400.0, height: 1000.0 };
        let vp = Viewport { left: 10.0, top: 10.0, width: 0.0, height: 0.0 };
        assert_eq!(vp.client_to_canvas(Point::new(15.0, 30.0), canvas), Point::new(5.0, 20.0));
    }

    #[test]
    fn test_world_screen_inverse() {
        let mut v = view();
        v.set_zoom(2.0);
        v.set_pan(Point::new(-300.0, 40.0));
        let w = Point::new(123.0, 456.0);
        let back = v.screen_to_world(v.world_to_screen(w));
        assert!((back.x - w.x).abs() < 1e-9 && (back.y - w.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut v = view();
        v.zoom_at_point(Point::new(100.0, 100.0), 100.0);
        assert_eq!(v.zoom(), 3.0);
        v.zoom_at_point(Point::new(100.0, 100.0), 0.0001);
        assert_eq!(v.zoom(), 0.6);
        v.set_zoom(f64::NAN);
        assert_eq!(v.zoom(), 0.6);
    }

    #[test]
    fn test_zoom_at_point_keeps_anchor_at_clamp_limits() {
        let mut v = view();
        v.set_pan(Point::new(37.0, -22.0));
        let pointer = Point::new(211.0, 189.0);
        let anchor = v.screen_to_world(pointer);

        v.zoom_at_point(pointer, 100.0);
        let s = v.world_to_screen(anchor);
        assert!((s.x - pointer.x).abs() < 1e-9 && (s.y - pointer.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_direction() {
        let base = LayoutConfig::default().wheel_base;
        assert!(wheel_factor(-100.0, base) > 1.0);
        assert!(wheel_factor(100.0, base) < 1.0);
        assert_eq!(wheel_factor(0.0, base), 1.0);
        let up = wheel_factor(-50.0, base) * wheel_factor(-50.0, base);
        assert!((up - wheel_factor(-100.0, base)).abs() < 1e-12);
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut v = view();
        v.zoom_at_point(Point::new(400.0, 300.0), 1.7);
        v.reset();
        assert_eq!(v.zoom(), 1.0);
        assert_eq!(v.pan(), Point::ORIGIN);
    }

    proptest! {
        #[test]
        fn zoom_at_point_keeps_world_point_under_cursor(
            px in 0.0f64..2400.0,
            py in 0.0f64..1000.0,
            factor in 0.1f64..10.0,
        ) {
            let mut v = view();
            let p = Point::new(px, py);
            let before = v.screen_to_world(p);
            v.zoom_at_point(p, factor);
            let after = v.screen_to_world(p);
            prop_assert!((before.x - after.x).abs() < 1e-6);
            prop_assert!((before.y - after.y).abs() < 1e-6);
        }

        #[test]
        fn wheel_is_monotonic(delta in 1.0f64..500.0, start in 0.6f64..3.0) {
            let base = LayoutConfig::default().wheel_base;
            let center = Point::new(1200.0, 500.0);

            let mut v = view();
            v.set_zoom(start);
            v.zoom_at_point(center, wheel_factor(-delta, base));
            prop_assert!(v.zoom() >= start);
            prop_assert!(v.zoom() > start || v.zoom() == 3.0);

            let mut v = view();
            v.set_zoom(start);
            v.zoom_at_point(center, wheel_factor(delta, base));
            prop_assert!(v.zoom() <= start);
            prop_assert!(v.zoom() < start || v.zoom() == 0.6);
        }
    }
}
