// Polar spoke placement.
//
// Children are spread evenly along an angular window at a fixed distance from
// their parent. Angles are in degrees, measured clockwise from +x because the
// canvas y axis points down.
//
// These are pure functions: they are run once when a layout is seeded (or
// reset). Dragging a parent never re-runs them; children follow rigidly.

use super::{Arc, Point};

/// A placed child: its center and the angle it was placed at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spoke {
    pub center: Point,
    pub angle: f64,
}

pub fn polar(center: Point, distance: f64, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point {
        x: center.x + distance * rad.cos(),
        y: center.y + distance * rad.sin(),
    }
}

fn spread(center: Point, count: usize, distance: f64, start: f64, end: f64) -> Vec<Spoke> {
    let step = (end - start) / count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| {
            let angle = start + i as f64 * step;
            Spoke { center: polar(center, distance, angle), angle }
        })
        .collect()
}

/// Place a root's causes along `arc`, first cause at `arc.start`, last at `arc.end`.
pub fn place_root_spokes(center: Point, count: usize, distance: f64, arc: Arc) -> Vec<Spoke> {
    spread(center, count, distance, arc.start, arc.end)
}

/// Place a cause's subs across a `spread_deg` window centered on `base_angle`.
///
/// A lone child sits at the start of the window, not on `base_angle`.
pub fn place_child_spokes(
    parent: Point,
    base_angle: f64,
    count: usize,
    distance: f64,
    spread_deg: f64,
) -> Vec<Spoke> {
    let start = base_angle - spread_deg / 2.0;
    spread(parent, count, distance, start, start + spread_deg)
}
