use glam::Vec3;
use lsystem_tree::{JitterSource, TreeError, TreeInterpreter};

/// Deterministic jitter source emitting one constant value.
struct FixedJitter(i32);

impl JitterSource for FixedJitter {
    fn next_jitter(&mut self, max_abs: i32) -> i32 {
        assert!(self.0.abs() <= max_abs);
        self.0
    }
}

#[test]
fn no_draw_symbols_produce_no_points() {
    let interpreter = TreeInterpreter::default();
    let points = interpreter.interpret("[-+]", &mut FixedJitter(0)).unwrap();
    assert!(points.is_empty());
}

#[test]
fn single_draw_emits_two_points_one_unit_apart() {
    let interpreter = TreeInterpreter::default();
    let points = interpreter.interpret("F", &mut FixedJitter(17)).unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].position, Vec3::ZERO);
    // The pivot rotations preserve distance from the prior position, so the
    // segment magnitude is the full initial length regardless of jitter.
    let offset = points[1].position - points[0].position;
    assert!((offset.length() - 1.0).abs() < 1e-6);
}

#[test]
fn decay_applies_to_the_next_draw_not_the_current_one() {
    let interpreter = TreeInterpreter::default();
    let points = interpreter.interpret("FF", &mut FixedJitter(0)).unwrap();

    assert_eq!(points.len(), 4);
    // First segment drawn at the initial length, second at the decayed one.
    let first = points[0].position.distance(points[1].position);
    let second = points[2].position.distance(points[3].position);
    assert!((first - 1.0).abs() < 1e-6);
    assert!((second - 0.98).abs() < 1e-6);
    assert!((points[1].branch_length - 0.98).abs() < 1e-6);
}

#[test]
fn turn_then_draw_tilts_the_segment() {
    let interpreter = TreeInterpreter::default();
    let points = interpreter.interpret("+F", &mut FixedJitter(0)).unwrap();

    // X angle of 30 degrees swings the unit up-vector toward +Z.
    let expected = Vec3::new(0.0, 30f32.to_radians().cos(), 30f32.to_radians().sin());
    assert!((points[1].position - expected).length() < 1e-5);
    assert!((points[1].angles.x - 30.0).abs() < 1e-6);
}

#[test]
fn pop_restores_the_fork_pose_for_siblings() {
    let interpreter = TreeInterpreter::default();
    let points = interpreter.interpret("[+F]F", &mut FixedJitter(0)).unwrap();

    assert_eq!(points.len(), 4);
    // The second F starts from the pre-branch pose: origin, zero angles.
    assert_eq!(points[2].position, Vec3::ZERO);
    assert_eq!(points[2].angles.x, 0.0);
    // With the turn discarded by the pop, it draws straight up.
    assert!((points[3].position - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
}

#[test]
fn nested_branches_restore_in_lifo_order() {
    let interpreter = TreeInterpreter::default();
    let points = interpreter.interpret("F[+F[+F]F]F", &mut FixedJitter(0)).unwrap();

    assert_eq!(points.len(), 10);
    // Outermost continuation resumes from the first segment's endpoint
    // with the root orientation.
    assert!((points[8].position - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    assert_eq!(points[8].angles.x, 0.0);
}

#[test]
fn branch_length_is_floored_strictly_above_zero() {
    let interpreter = TreeInterpreter::default();
    let chain = "F".repeat(60);
    let points = interpreter.interpret(&chain, &mut FixedJitter(0)).unwrap();

    let last = points.last().unwrap();
    assert!((last.branch_length - 0.001).abs() < 1e-9);
    for point in &points {
        assert!(point.branch_length > 0.0);
    }
}

#[test]
fn unbalanced_pop_is_an_error() {
    let interpreter = TreeInterpreter::default();
    let err = interpreter
        .interpret("F]", &mut FixedJitter(0))
        .unwrap_err();
    assert!(matches!(err, TreeError::UnbalancedBracket { index: 1 }));
}

#[test]
fn pop_past_a_consumed_push_is_an_error() {
    let interpreter = TreeInterpreter::default();
    let err = interpreter
        .interpret("[F]]", &mut FixedJitter(0))
        .unwrap_err();
    assert!(matches!(err, TreeError::UnbalancedBracket { index: 3 }));
}

#[test]
fn unknown_symbols_are_ignored() {
    let interpreter = TreeInterpreter::default();
    let with_noise = interpreter.interpret("FXG?F", &mut FixedJitter(5)).unwrap();
    let without = interpreter.interpret("FF", &mut FixedJitter(5)).unwrap();
    assert_eq!(with_noise, without);
}
