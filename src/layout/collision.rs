// Iterative circle separation.
//
// Each pass visits every unordered pair once. Overlapping pairs are pushed
// apart along the line between their centers: an anchor never moves, so a
// movable circle touching an anchor absorbs the whole overlap, and two
// movable circles split it evenly. After the pairwise sweep every movable
// circle is clamped back onto the canvas. A pass that moves nothing ends the
// run early.
//
// Cost is O(passes * n^2). Inputs are a few dozen circles at most.

use super::{CanvasSize, Point};

/// Distance floor used when two centers coincide.
const MIN_DISTANCE: f64 = 0.01;
/// Overlaps smaller than this count as touching.
const CONTACT_EPSILON: f64 = 1e-9;

/// A collision participant, built fresh for each run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Circle {
    Anchor { center: Point, radius: f64 },
    Movable { center: Point, radius: f64 },
}

impl Circle {
    pub fn center(&self) -> Point {
        match *self {
            Circle::Anchor { center, .. } | Circle::Movable { center, .. } => center,
        }
    }

    pub fn radius(&self) -> f64 {
        match *self {
            Circle::Anchor { radius, .. } | Circle::Movable { radius, .. } => radius,
        }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, Circle::Anchor { .. })
    }

    fn nudge(&mut self, dx: f64, dy: f64) {
        if let Circle::Movable { center, .. } = self {
            center.x += dx;
            center.y += dy;
        }
    }

    fn clamp_to(&mut self, canvas: &CanvasSize, margin: f64) {
        if let Circle::Movable { center, radius } = self {
            *center = canvas.clamp_circle(*center, *radius, margin);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CollisionSettings {
    /// Upper bound on relaxation passes.
    pub iterations: usize,
    pub padding: f64,
    pub margin: f64,
    pub canvas: CanvasSize,
}

/// What a run did.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RelaxStats {
    /// Passes actually executed, including the final still one.
    pub passes: usize,
    /// True when a pass finished without moving anything.
    pub converged: bool,
}

/// Push one pair apart. Returns true if anything moved.
fn separate(a: &mut Circle, b: &mut Circle, padding: f64) -> bool {
    if a.is_anchor() && b.is_anchor() {
        return false;
    }
    let (ca, cb) = (a.center(), b.center());
    let min_dist = a.radius() + b.radius() + padding;
    let (mut dx, mut dy) = (ca.x - cb.x, ca.y - cb.y);
    let mut d = dx.hypot(dy);
    if d < MIN_DISTANCE {
        // Coincident (or nearly): split along +x so the pair can actually leave.
        d = MIN_DISTANCE;
        dx = d;
        dy = 0.0;
    }
    let overlap = min_dist - d;
    if overlap <= CONTACT_EPSILON {
        return false;
    }
    let (nx, ny) = (dx / d, dy / d);
    let push_a = if b.is_anchor() { overlap } else { overlap / 2.0 };
    let push_b = if a.is_anchor() { overlap } else { overlap / 2.0 };
    a.nudge(nx * push_a, ny * push_a);
    b.nudge(-nx * push_b, -ny * push_b);
    true
}

/// Relax `circles` in place until no pair overlaps by more than `padding`
/// or the pass budget runs out.
pub fn resolve_collisions(circles: &mut [Circle], settings: &CollisionSettings) -> RelaxStats {
    let mut stats = RelaxStats::default();
    if circles.len() < 2 {
        stats.converged = true;
        return stats;
    }

    for _ in 0..settings.iterations {
        stats.passes += 1;
        let mut moved = false;
        for i in 0..circles.len() {
            let (head, tail) = circles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                moved |= separate(a, b, settings.padding);
            }
        }
        for c in circles.iter_mut() {
            c.clamp_to(&settings.canvas, settings.margin);
        }
        if !moved {
            stats.converged = true;
            break;
        }
    }

    tracing::trace!(passes = stats.passes, converged = stats.converged, n = circles.len(), "collision relaxation");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings() -> CollisionSettings {
        CollisionSettings {
            iterations: 280,
            padding: 10.0,
            margin: 2.0,
            canvas: CanvasSize { width: 2400.0, height: 1000.0 },
        }
    }

    fn movable(x: f64, y: f64, r: f64) -> Circle {
        Circle::Movable { center: Point::new(x, y), radius: r }
    }

    fn anchor(x: f64, y: f64, r: f64) -> Circle {
        Circle::Anchor { center: Point::new(x, y), radius: r }
    }

    fn assert_separated(circles: &[Circle], padding: f64, tol: f64) {
        for i in 0..circles.len() {
            for j in (i + 1)..circles.len() {
                let (a, b) = (circles[i], circles[j]);
                if a.is_anchor() && b.is_anchor() {
                    continue;
                }
                let d = a.center().distance(b.center());
                let min = a.radius() + b.radius() + padding;
                assert!(d >= min - tol, "pair ({i},{j}) at {d}, want >= {min}");
            }
        }
    }

    #[test]
    fn test_empty_and_single_terminate_immediately() {
        let mut none: Vec<Circle> = vec![];
        assert_eq!(resolve_collisions(&mut none, &settings()), RelaxStats { passes: 0, converged: true });

        let mut one = vec![movable(100.0, 100.0, 46.0)];
        let stats = resolve_collisions(&mut one, &settings());
        assert_eq!(stats.passes, 0);
        assert_eq!(one[0].center(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_five_overlapping_subs_separate() {
        let mut circles = vec![
            movable(600.0, 500.0, 46.0),
            movable(620.0, 510.0, 46.0),
            movable(590.0, 530.0, 46.0),
            movable(640.0, 480.0, 46.0),
            movable(610.0, 470.0, 46.0),
        ];
        let stats = resolve_collisions(&mut circles, &settings());
        assert!(stats.passes <= 280);
        assert_separated(&circles, 10.0, 0.5);
    }

    #[test]
    fn test_anchor_never_moves_and_movable_absorbs_overlap() {
        let mut circles = vec![anchor(500.0, 500.0, 62.0), movable(540.0, 500.0, 46.0)];
        let stats = resolve_collisions(&mut circles, &settings());
        assert!(stats.converged);
        assert_eq!(circles[0].center(), Point::new(500.0, 500.0));
        let c = circles[1].center();
        assert!((c.x - (500.0 + 62.0 + 46.0 + 10.0)).abs() < 1e-6);
        assert!((c.y - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_movables_split_overlap_evenly() {
        let mut circles = vec![movable(500.0, 500.0, 46.0), movable(520.0, 500.0, 46.0)];
        resolve_collisions(&mut circles, &settings());
        // Overlap is 102 - 20 = 82, 41 each way.
        assert!((circles[0].center().x - 459.0).abs() < 1e-6);
        assert!((circles[1].center().x - 561.0).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_centers_separate() {
        let mut circles = vec![movable(800.0, 400.0, 46.0), movable(800.0, 400.0, 46.0)];
        let stats = resolve_collisions(&mut circles, &settings());
        assert!(stats.converged);
        assert_separated(&circles, 10.0, 1e-6);
    }

    #[test]
    fn test_already_separated_stops_after_one_pass() {
        let mut circles = vec![movable(100.0, 100.0, 46.0), movable(400.0, 100.0, 46.0)];
        let stats = resolve_collisions(&mut circles, &settings());
        assert_eq!(stats, RelaxStats { passes: 1, converged: true });
    }

    #[test]
    fn test_movables_are_clamped_to_canvas() {
        let mut circles = vec![anchor(60.0, 500.0, 50.0), movable(70.0, 500.0, 46.0)];
        resolve_collisions(&mut circles, &settings());
        let c = circles[1].center();
        assert!(settings().canvas.contains_circle(c, 46.0, 2.0));
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let mut s = settings();
        s.iterations = 3;
        let mut circles: Vec<Circle> = (0..12).map(|i| movable(500.0 + i as f64, 500.0, 46.0)).collect();
        let stats = resolve_collisions(&mut circles, &s);
        assert!(stats.passes <= 3);
    }

    fn circle_strategy(lo: f64, hi: f64) -> impl Strategy<Value = (f64, f64, f64, bool)> {
        (lo..hi, lo..hi, 10.0f64..30.0, any::<bool>())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn any_circle_set_terminates_on_the_canvas(
            raw in prop::collection::vec((0.0f64..2400.0, 0.0f64..1000.0, 5.0f64..120.0, any::<bool>()), 2..16),
            iterations in 1usize..300,
        ) {
            let s = CollisionSettings { iterations, ..settings() };
            let mut circles: Vec<Circle> = raw
                .iter()
                .map(|&(x, y, r, pinned)| if pinned { anchor(x, y, r) } else { movable(x, y, r) })
                .collect();
            let stats = resolve_collisions(&mut circles, &s);
            prop_assert!(stats.passes <= iterations);
            for c in circles.iter().filter(|c| !c.is_anchor()) {
                prop_assert!(s.canvas.contains_circle(c.center(), c.radius(), s.margin));
            }
        }

        // A handful of small circles in the middle of a large canvas never
        // reach a wall, and at most one anchor leaves nothing to wedge between.
        #[test]
        fn roomy_sets_converge_and_separate(
            raw in prop::collection::vec(circle_strategy(1900.0, 2100.0), 2..7),
        ) {
            let s = CollisionSettings {
                iterations: 2000,
                padding: 10.0,
                margin: 2.0,
                canvas: CanvasSize { width: 4000.0, height: 4000.0 },
            };
            let mut circles: Vec<Circle> = raw
                .iter()
                .enumerate()
                .map(|(i, &(x, y, r, pinned))| if i == 0 && pinned { anchor(x, y, r) } else { movable(x, y, r) })
                .collect();
            let pinned = circles[0];
            let stats = resolve_collisions(&mut circles, &s);
            prop_assert!(stats.converged, "no fixed point after {} passes", stats.passes);
            prop_assert!(stats.passes <= s.iterations);
            if pinned.is_anchor() {
                prop_assert_eq!(circles[0].center(), pinned.center());
            }
            for i in 0..circles.len() {
                for j in (i + 1)..circles.len() {
                    let (a, b) = (circles[i], circles[j]);
                    let d = a.center().distance(b.center());
                    prop_assert!(d >= a.radius() + b.radius() + s.padding - 1e-3, "pair ({}, {}) at {}", i, j, d);
                }
            }
        }
    }
}
