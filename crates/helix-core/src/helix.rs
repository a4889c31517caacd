//! Parametric double-helix geometry.
//!
//! The helix is a single ordered list of [`HelixPoint`]s sampled along one
//! strand. The mirrored strand and the connecting rungs are never stored;
//! [`DoubleHelix`] derives them on demand by scaling and sign-flipping the
//! sampled `(x, z)` coordinates.

use crate::constants::STRAND_SCALE;
use glam::Vec3;
use std::f64::consts::TAU;
use std::fmt;

/// Nucleotide pair tag, assigned cyclically along the strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasePair {
    AT,
    TA,
    GC,
    CG,
}

impl BasePair {
    pub const TABLE: [BasePair; 4] = [BasePair::AT, BasePair::TA, BasePair::GC, BasePair::CG];

    #[inline]
    pub fn for_index(index: usize) -> Self {
        Self::TABLE[index % Self::TABLE.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            BasePair::AT => "A-T",
            BasePair::TA => "T-A",
            BasePair::GC => "G-C",
            BasePair::CG => "C-G",
        }
    }
}

impl fmt::Display for BasePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One sample along the helix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelixPoint {
    pub index: usize,
    pub base_pair: BasePair,
    pub position: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HelixParams {
    pub turns: u32,
    pub points_per_turn: u32,
    pub radius: f32,
    pub height: f32,
}

impl Default for HelixParams {
    fn default() -> Self {
        Self {
            turns: 10,
            points_per_turn: 8,
            radius: 2.5,
            height: 15.0,
        }
    }
}

impl HelixParams {
    #[inline]
    pub fn total_points(&self) -> usize {
        self.turns.saturating_mul(self.points_per_turn) as usize
    }
}

/// Sample `turns * points_per_turn` points along a helix centred on the
/// origin, spanning `[-height/2, height/2)` vertically.
///
/// Returns an empty list when either count is zero.
pub fn generate(turns: u32, points_per_turn: u32, radius: f32, height: f32) -> Vec<HelixPoint> {
    let total = turns.saturating_mul(points_per_turn) as usize;
    let mut points = Vec::with_capacity(total);
    for i in 0..total {
        points.push(HelixPoint {
            index: i,
            base_pair: BasePair::for_index(i),
            position: sample_position(i, total, turns, radius, height),
        });
    }
    points
}

/// Position of sample `index` out of `total`, evaluated in f64 and narrowed
/// at the end. The result always stays below `height / 2`.
pub fn sample_position(index: usize, total: usize, turns: u32, radius: f32, height: f32) -> Vec3 {
    let t = index as f64 / total as f64;
    let angle = (t * turns as f64).fract() * TAU;
    let (sin, cos) = angle.sin_cos();
    let mut y = ((t - 0.5) * height as f64) as f32;
    let top = height * 0.5;
    // narrowing can round the topmost sample onto the open bound
    if top > 0.0 && y >= top {
        y = f32::from_bits(top.to_bits() - 1);
    }
    Vec3::new((cos * radius as f64) as f32, y, (sin * radius as f64) as f32)
}

#[inline]
pub fn generate_helix(params: &HelixParams) -> Vec<HelixPoint> {
    generate(
        params.turns,
        params.points_per_turn,
        params.radius,
        params.height,
    )
}

/// A connecting segment between the two strands at one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rung {
    pub index: usize,
    pub base_pair: BasePair,
    pub start: Vec3,
    pub end: Vec3,
}

/// Immutable sampled helix plus the derived strand views.
#[derive(Clone, Debug)]
pub struct DoubleHelix {
    points: Vec<HelixPoint>,
    strand_scale: f32,
}

impl DoubleHelix {
    pub fn new(points: Vec<HelixPoint>) -> Self {
        Self::with_strand_scale(points, STRAND_SCALE)
    }

    pub fn with_strand_scale(points: Vec<HelixPoint>, strand_scale: f32) -> Self {
        Self {
            points,
            strand_scale,
        }
    }

    pub fn from_params(params: &HelixParams) -> Self {
        Self::new(generate_helix(params))
    }

    #[inline]
    pub fn points(&self) -> &[HelixPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn strand_scale(&self) -> f32 {
        self.strand_scale
    }

    #[inline]
    fn scaled(&self, p: Vec3, sign: f32) -> Vec3 {
        let s = self.strand_scale * sign;
        Vec3::new(p.x * s, p.y, p.z * s)
    }

    pub fn left_strand(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().map(|p| self.scaled(p.position, 1.0))
    }

    pub fn right_strand(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().map(|p| self.scaled(p.position, -1.0))
    }

    pub fn rungs(&self) -> impl Iterator<Item = Rung> + '_ {
        self.points.iter().map(|p| Rung {
            index: p.index,
            base_pair: p.base_pair,
            start: self.scaled(p.position, 1.0),
            end: self.scaled(p.position, -1.0),
        })
    }
}
