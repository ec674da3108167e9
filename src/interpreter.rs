//! Interpreter that walks an expanded L-System string into an ordered list
//! of [`PointRecord`]s.
//!
//! The entry point is [`TreeInterpreter`]. Configure it with an
//! [`InterpreterConfig`] (or use the defaults), then call
//! [`TreeInterpreter::interpret`] with the expanded symbol string and a
//! [`JitterSource`].

use crate::error::TreeError;
use crate::turtle::{JitterSource, TurtleOp, TurtleState, pivot};
use glam::Vec3;

/// A [`TurtleState`] snapshot recorded at the moment a draw command runs.
///
/// Each `F` emits two records — the pose before the move and the pose after
/// — so even/odd index pairs describe one segment's endpoints.
pub type PointRecord = TurtleState;

/// Configuration for the turtle walk.
#[derive(Clone, Debug)]
pub struct InterpreterConfig {
    /// Segment length the walk starts with.
    pub initial_length: f32,
    /// Degrees added or subtracted from the X orientation by `+` / `-`.
    pub turn_angle: f32,
    /// Amount the segment length shrinks after every draw.
    pub length_decay: f32,
    /// Strictly positive floor applied when decay would make the length
    /// non-positive.
    pub min_length: f32,
    /// Inclusive bound of the per-draw Y-heading perturbation, in degrees.
    pub max_jitter: i32,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            initial_length: 1.0,
            turn_angle: 30.0,
            length_decay: 0.02,
            min_length: 0.001,
            max_jitter: 30,
        }
    }
}

/// Interprets L-System output as turtle-graphics drawing commands.
#[derive(Clone, Debug, Default)]
pub struct TreeInterpreter {
    config: InterpreterConfig,
}

impl TreeInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Walks `symbols` and returns the recorded points in emission order.
    ///
    /// The turtle starts at the origin with zero orientation and the
    /// configured initial length; that state is pushed once onto the stack
    /// as the sentinel root before the walk begins.
    ///
    /// # Per-symbol behavior
    ///
    /// - `F` records the current pose, advances by the current length along
    ///   the local up axis (pivoting around the prior position by the
    ///   X-angle about X, then by the freshly jittered Y-angle about Y),
    ///   decays the length, and records the new pose.
    /// - `+` / `-` turn the X orientation by the configured angle.
    /// - `[` pushes a value copy of the current state; `]` pops and
    ///   replaces it, discarding everything since the matching push.
    /// - Unregistered symbols are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnbalancedBracket`] when a `]` arrives with
    /// only the sentinel left on the stack.
    pub fn interpret<J: JitterSource>(
        &self,
        symbols: &str,
        jitter: &mut J,
    ) -> Result<Vec<PointRecord>, TreeError> {
        let mut points = Vec::new();
        let mut current = TurtleState {
            branch_length: self.config.initial_length,
            ..TurtleState::default()
        };
        // Sentinel root. Never popped in well-formed input.
        let mut stack = vec![current];

        for (index, symbol) in symbols.chars().enumerate() {
            match TurtleOp::from_symbol(symbol) {
                TurtleOp::Draw => {
                    points.push(current);

                    let mut next = TurtleState {
                        position: current.position
                            + Vec3::new(0.0, current.branch_length, 0.0),
                        angles: current.angles,
                        branch_length: current.branch_length - self.config.length_decay,
                    };
                    if next.branch_length <= 0.0 {
                        next.branch_length = self.config.min_length;
                    }
                    next.angles.y = current.angles.y
                        + jitter.next_jitter(self.config.max_jitter) as f32;

                    next.position = pivot(
                        next.position,
                        current.position,
                        Vec3::new(next.angles.x, 0.0, 0.0),
                    );
                    next.position = pivot(
                        next.position,
                        current.position,
                        Vec3::new(0.0, next.angles.y, 0.0),
                    );

                    points.push(next);
                    current = next;
                }
                TurtleOp::TurnPositive => current.angles.x += self.config.turn_angle,
                TurtleOp::TurnNegative => current.angles.x -= self.config.turn_angle,
                TurtleOp::Push => stack.push(current),
                TurtleOp::Pop => match stack.pop() {
                    // The sentinel must survive every pop.
                    Some(saved) if !stack.is_empty() => current = saved,
                    _ => return Err(TreeError::UnbalancedBracket { index }),
                },
                TurtleOp::Ignore => {}
            }
        }

        Ok(points)
    }
}
