//! Turtle state and per-symbol operations for tree interpretation.

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The pose of the drawing turtle at one moment of the walk.
///
/// Orientation is kept as per-axis Euler angles in degrees rather than a
/// quaternion: the grammar only ever adjusts single axes, and branch
/// rotations are handed to engines as Euler-derived transforms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,

    /// Per-axis orientation angles in degrees.
    pub angles: Vec3,

    /// Length of the next segment to be drawn. Decays along any single
    /// unbranched path and is floored strictly above zero.
    pub branch_length: f32,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            angles: Vec3::ZERO,
            branch_length: 1.0,
        }
    }
}

/// Rotates `point` around `pivot` by `euler_degrees` (per-axis degrees).
///
/// The walk uses this to swing a freshly advanced endpoint around the
/// previous position, one axis at a time.
pub fn pivot(point: Vec3, pivot: Vec3, euler_degrees: Vec3) -> Vec3 {
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        euler_degrees.x.to_radians(),
        euler_degrees.y.to_radians(),
        euler_degrees.z.to_radians(),
    );
    rotation * (point - pivot) + pivot
}

/// Operations the tree turtle understands, one per grammar symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurtleOp {
    /// Draw a segment forward (`F`).
    Draw,
    /// Add the turn angle to the X orientation (`+`).
    TurnPositive,
    /// Subtract the turn angle from the X orientation (`-`).
    TurnNegative,
    /// Save the current state onto the stack (`[`).
    Push,
    /// Restore the most recently saved state (`]`).
    Pop,
    /// No-op — symbol has no drawing meaning.
    Ignore,
}

impl TurtleOp {
    /// Maps a grammar symbol to its operation. Unknown symbols are
    /// [`TurtleOp::Ignore`], so the alphabet can grow without breaking
    /// existing walks.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'F' => Self::Draw,
            '+' => Self::TurnPositive,
            '-' => Self::TurnNegative,
            '[' => Self::Push,
            ']' => Self::Pop,
            _ => Self::Ignore,
        }
    }
}

/// Source of the per-draw heading perturbation.
///
/// Injected into the interpreter so hosts drive it from a seeded
/// [`rand::Rng`] while tests substitute a fixed sequence.
pub trait JitterSource {
    /// Returns a uniform integer in `[-max_abs, max_abs]` inclusive.
    fn next_jitter(&mut self, max_abs: i32) -> i32;
}

impl<R: Rng> JitterSource for R {
    fn next_jitter(&mut self, max_abs: i32) -> i32 {
        self.gen_range(-max_abs..=max_abs)
    }
}
