//! Non-overlapping placement of focused group members.
//!
//! Given a member count, a target rectangle and a minimum center distance,
//! each [`LayoutKind`] produces one slot per member:
//!
//! - [`LayoutKind::Grid`] – a jittered rectangle of cells at least
//!   `spacing` wide, jitter bounded so neighbours never come closer
//! - [`LayoutKind::Spiral`] – a golden-angle (Vogel) spiral around the
//!   rectangle's center, grown until neighbours are far enough apart
//! - [`LayoutKind::Scatter`] – rejection sampling of random points
//!
//! Spiral and scatter fall back to the grid when they cannot satisfy both
//! the spacing and the rectangle. The grid always satisfies the spacing; if
//! the members do not fit, extra rows continue below the rectangle and the
//! result is flagged as overflowed.

use glam::Vec2;
use log::{debug, warn};
use std::fmt;
use std::str::FromStr;

const SPIRAL_ATTEMPTS: usize = 80;
const SPIRAL_GROWTH: f32 = 1.05;
const SCATTER_POINT_ATTEMPTS: usize = 64;
const SCATTER_ROUNDS: usize = 8;
const CONTAINMENT_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    #[default]
    Grid,
    Spiral,
    Scatter,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Grid => "grid",
            LayoutKind::Spiral => "spiral",
            LayoutKind::Scatter => "scatter",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(LayoutKind::Grid),
            "spiral" => Ok(LayoutKind::Spiral),
            "scatter" => Ok(LayoutKind::Scatter),
            other => Err(format!("unknown layout '{}'", other)),
        }
    }
}

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink by `amount` on every side; collapses to the center if too small.
    pub fn inset(&self, amount: f32) -> Rect {
        let c = self.center();
        let half = (self.size() * 0.5 - Vec2::splat(amount)).max(Vec2::ZERO);
        Rect {
            min: c - half,
            max: c + half,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x - CONTAINMENT_TOLERANCE
            && p.x <= self.max.x + CONTAINMENT_TOLERANCE
            && p.y >= self.min.y - CONTAINMENT_TOLERANCE
            && p.y <= self.max.y + CONTAINMENT_TOLERANCE
    }
}

/// Slots produced by [`compute_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub slots: Vec<Vec2>,
    /// Kind that actually produced the slots after any fallback.
    pub kind: LayoutKind,
    /// Some slots lie outside the requested rectangle.
    pub overflowed: bool,
}

/// Place `count` members inside `region` with centers at least `spacing` apart.
pub fn compute_layout(
    kind: LayoutKind,
    count: usize,
    region: Rect,
    spacing: f32,
    rng: &mut fastrand::Rng,
) -> Layout {
    let spacing = spacing.max(0.0);
    let attempt = match kind {
        LayoutKind::Grid => None,
        LayoutKind::Spiral => spiral_layout(count, region, spacing),
        LayoutKind::Scatter => scatter_layout(count, region, spacing, rng),
    };
    match attempt {
        Some(slots) => Layout {
            slots,
            kind,
            overflowed: false,
        },
        None => {
            if kind != LayoutKind::Grid {
                debug!(
                    "{} layout cannot fit {} members at spacing {}, using grid",
                    kind, count, spacing
                );
            }
            let (slots, overflowed) = grid_layout(count, region, spacing, rng);
            if overflowed {
                warn!(
                    "{} members do not fit the focus area at spacing {}; extending below it",
                    count, spacing
                );
            }
            Layout {
                slots,
                kind: LayoutKind::Grid,
                overflowed,
            }
        }
    }
}

/// Jittered grid. Always honours `spacing`; returns `true` when rows overflow.
fn grid_layout(
    count: usize,
    region: Rect,
    spacing: f32,
    rng: &mut fastrand::Rng,
) -> (Vec<Vec2>, bool) {
    if count == 0 {
        return (Vec::new(), false);
    }
    let size = region.size();

    // Widest square-ish cells among the column counts that fit.
    let mut best: Option<(usize, Vec2)> = None;
    for cols in 1..=count {
        let rows = count.div_ceil(cols);
        let cell = Vec2::new(size.x / cols as f32, size.y / rows as f32);
        if cell.x + CONTAINMENT_TOLERANCE >= spacing && cell.y + CONTAINMENT_TOLERANCE >= spacing {
            let better = match best {
                Some((_, b)) => cell.min_element() > b.min_element(),
                None => true,
            };
            if better {
                best = Some((cols, cell));
            }
        }
    }

    let (cols, cell, overflowed) = match best {
        Some((cols, cell)) => (cols, cell.max(Vec2::splat(spacing)), false),
        None => {
            let cols = ((size.x / spacing.max(f32::EPSILON)).floor() as usize).clamp(1, count);
            (cols, Vec2::splat(spacing), true)
        }
    };

    let rows = count.div_ceil(cols);
    // Center the used block inside the region.
    let block = Vec2::new(cols as f32, rows as f32) * cell;
    let origin = if overflowed {
        Vec2::new(region.center().x - block.x * 0.5, region.min.y)
    } else {
        region.center() - block * 0.5
    };
    let jitter = ((cell - Vec2::splat(spacing)) * 0.5).max(Vec2::ZERO);

    let slots = (0..count)
        .map(|i| {
            let col = (i % cols) as f32;
            let row = (i / cols) as f32;
            let center = origin + Vec2::new(col + 0.5, row + 0.5) * cell;
            let offset = Vec2::new(
                (rng.f32() * 2.0 - 1.0) * jitter.x,
                (rng.f32() * 2.0 - 1.0) * jitter.y,
            );
            center + offset
        })
        .collect();
    (slots, overflowed)
}

/// Golden-angle spiral around the region's center.
fn spiral_layout(count: usize, region: Rect, spacing: f32) -> Option<Vec<Vec2>> {
    if count == 0 {
        return Some(Vec::new());
    }
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    let center = region.center();
    let mut step = spacing * 0.5;

    for _ in 0..SPIRAL_ATTEMPTS {
        let slots: Vec<Vec2> = (0..count)
            .map(|i| {
                let r = step * (i as f32 + 0.5).sqrt();
                let theta = i as f32 * golden_angle;
                center + Vec2::new(theta.cos(), theta.sin()) * r
            })
            .collect();
        if !slots.iter().all(|p| region.contains(*p)) {
            return None;
        }
        if count == 1 || min_pairwise_distance(&slots) >= spacing {
            return Some(slots);
        }
        step *= SPIRAL_GROWTH;
    }
    None
}

/// Rejection-sampled points with a minimum distance.
fn scatter_layout(
    count: usize,
    region: Rect,
    spacing: f32,
    rng: &mut fastrand::Rng,
) -> Option<Vec<Vec2>> {
    let size = region.size();
    'rounds: for _ in 0..SCATTER_ROUNDS {
        let mut slots: Vec<Vec2> = Vec::with_capacity(count);
        for _ in 0..count {
            let found = (0..SCATTER_POINT_ATTEMPTS).find_map(|_| {
                let p = region.min + Vec2::new(rng.f32() * size.x, rng.f32() * size.y);
                slots
                    .iter()
                    .all(|q| q.distance(p) >= spacing)
                    .then_some(p)
            });
            match found {
                Some(p) => slots.push(p),
                None => continue 'rounds,
            }
        }
        return Some(slots);
    }
    None
}

/// Smallest distance between any two points, `f32::INFINITY` for fewer than two.
pub fn min_pairwise_distance(points: &[Vec2]) -> f32 {
    let mut min = f32::INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            min = min.min(a.distance(*b));
        }
    }
    min
}
