// Geometric layout for cause maps.
//
// Goals:
// - Deterministic: the same hierarchy and config always seed the same positions
// - Radial: causes sit on an arc around their root, subs on a narrow window
//   around their cause's outgoing angle
// - Bounded: every node stays inside the canvas minus its radius and margin
// - Only positions mutate; topology is built once and never touched again
//
// Submodules:
// - spokes: polar placement of children around a parent
// - collision: iterative circle separation with pinned anchors
// - state: the position table (rigid subtree moves, leaf moves, relaxation)

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::hierarchy::Level;

pub mod collision;
pub mod spokes;
pub mod state;

pub use collision::{resolve_collisions, Circle, CollisionSettings, RelaxStats};
pub use spokes::{place_child_spokes, place_root_spokes, polar, Spoke};
pub use state::LayoutState;

/// A point in world (logical canvas) coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Fixed logical size of the canvas. Bounds clamping and client mapping both use it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a circle center so the whole circle plus `margin` stays on the canvas.
    /// A circle too large for the canvas pins to the low edge.
    pub fn clamp_circle(&self, center: Point, radius: f64, margin: f64) -> Point {
        let inset = radius + margin;
        Point {
            x: center.x.min(self.width - inset).max(inset),
            y: center.y.min(self.height - inset).max(inset),
        }
    }

    pub fn contains_circle(&self, center: Point, radius: f64, margin: f64) -> bool {
        let inset = radius + margin;
        center.x >= inset
            && center.x <= self.width - inset
            && center.y >= inset
            && center.y <= self.height - inset
    }
}

/// Angular arc (degrees) along which a root's causes are spread.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub start: f64,
    pub end: f64,
}

impl Arc {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Logical canvas the map is laid out on.
    pub canvas: CanvasSize,
    pub root_radius: f64,
    pub cause_radius: f64,
    pub sub_radius: f64,
    /// Distance from a root center to each of its causes.
    pub root_cause_distance: f64,
    /// Distance from a cause center to each of its subs.
    pub cause_sub_distance: f64,
    /// Total angular window (degrees) for a cause's subs, centered on the cause angle.
    pub sub_spread: f64,
    /// Arc used for trees that don't specify their own.
    pub default_arc: Arc,
    /// Extra gap the collision solver keeps between circles.
    pub collision_padding: f64,
    pub collision_iterations: usize,
    /// Gap kept between any circle and the canvas edge.
    pub margin: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Wheel zoom factor is `wheel_base ^ -delta_y`.
    pub wheel_base: f64,
    /// Factor applied by the zoom in / zoom out buttons.
    pub zoom_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize { width: 2400.0, height: 1000.0 },
            root_radius: 110.0,
            cause_radius: 62.0,
            sub_radius: 46.0,
            root_cause_distance: 220.0,
            cause_sub_distance: 165.0,
            sub_spread: 80.0,
            default_arc: Arc::new(-160.0, 160.0),
            collision_padding: 10.0,
            collision_iterations: 280,
            margin: 2.0,
            min_zoom: 0.6,
            max_zoom: 3.0,
            wheel_base: 1.0015,
            zoom_step: 1.2,
        }
    }
}

impl LayoutConfig {
    /// Parse a partial config; missing fields keep their defaults.
    pub fn from_json(input: &str) -> Result<Self> {
        let cfg: LayoutConfig = serde_json::from_str(input)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn radius(&self, level: Level) -> f64 {
        match level {
            Level::Root => self.root_radius,
            Level::Cause => self.cause_radius,
            Level::Sub => self.sub_radius,
        }
    }

    pub fn clamp(&self, center: Point, level: Level) -> Point {
        self.canvas.clamp_circle(center, self.radius(level), self.margin)
    }

    pub fn collision_settings(&self) -> CollisionSettings {
        CollisionSettings {
            iterations: self.collision_iterations,
            padding: self.collision_padding,
            margin: self.margin,
            canvas: self.canvas,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(MapError::InvalidConfig(msg.to_string()));
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0)
            || !self.canvas.width.is_finite()
            || !self.canvas.height.is_finite()
        {
            return invalid("canvas dimensions must be positive and finite");
        }
        if !(self.sub_radius > 0.0) {
            return invalid("radii must be positive");
        }
        if !(self.root_radius > self.cause_radius && self.cause_radius > self.sub_radius) {
            return invalid("radii must satisfy root > cause > sub");
        }
        if !(self.min_zoom > 0.0) || self.min_zoom > self.max_zoom {
            return invalid("zoom range must satisfy 0 < min_zoom <= max_zoom");
        }
        if !(self.wheel_base > 0.0) || !(self.zoom_step > 0.0) {
            return invalid("wheel_base and zoom_step must be positive");
        }
        if !(self.collision_padding >= 0.0 && self.collision_padding.is_finite())
            || !(self.margin >= 0.0 && self.margin.is_finite())
        {
            return invalid("padding and margin must be finite and not negative");
        }
        // The largest circle must fit between opposite edges.
        let span = 2.0 * (self.root_radius + self.margin);
        if self.canvas.width < span || self.canvas.height < span {
            return invalid("canvas too small for a root circle plus margin");
        }
        Ok(())
    }
}
