use crate::fakes::{Call, Harness, FAST_FEEDRATE};
use approx::assert_relative_eq;
use fiveaxis_calibration::CalibrationStep;
use fiveaxis_core::{
    AngleUnit, CalibrationEvent, CalibrationParameters, EventDispatcher, MessageLevel, Point3,
};

fn configured_harness(params: CalibrationParameters) -> Harness {
    let mut harness = Harness::new(params);
    harness.calibration.load_points_from_config([
        "0 0 50",
        "10 10 50",
        "20 0 40",
        "20 0 60",
    ]);
    harness
}

fn target_of(call: &Call) -> Point3 {
    match call {
        Call::Move { target, .. } => *target,
        other => panic!("expected a move, got {:?}", other),
    }
}

#[test]
fn test_step_zero_homes_then_moves_to_first_point() {
    let mut harness = configured_harness(CalibrationParameters::default());

    harness.calibration.run_step_number(0).unwrap();

    assert_eq!(
        harness.machine_calls(),
        vec![
            Call::WaitForIdle,
            Call::SetCompensation(false),
            Call::Home,
            Call::Move {
                target: Point3::new(0.0, 0.0, 50.0),
                feedrate: FAST_FEEDRATE,
                relative: false,
            },
        ]
    );
    assert_eq!(
        harness.calibration.next_step(),
        Some(CalibrationStep::AfterPoint1)
    );
}

#[test]
fn test_step_zero_skips_homing_when_disabled() {
    let params = CalibrationParameters {
        home_first: false,
        ..Default::default()
    };
    let mut harness = configured_harness(params);

    harness.calibration.run_step_number(0).unwrap();

    let calls = harness.machine_calls();
    assert!(!calls.contains(&Call::Home));
    assert_eq!(calls.len(), 3);
}

#[test]
fn test_step_one_records_position_and_moves_to_second_point() {
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.queue_position(0.5, -0.25, 49.0);

    harness.calibration.run_step_number(1).unwrap();

    assert_eq!(
        harness.calibration.actual_points()[0],
        Point3::new(0.5, -0.25, 49.0)
    );
    assert_eq!(
        harness.machine_calls(),
        vec![Call::Move {
            target: Point3::new(10.0, 10.0, 50.0),
            feedrate: FAST_FEEDRATE,
            relative: false,
        }]
    );
    assert!(harness
        .reports(MessageLevel::Info)
        .contains(&"Probe point 1 at: x0.500 y-0.250 z49.000".to_string()));
}

#[test]
fn test_unset_probe_point_moves_nowhere() {
    let mut harness = Harness::new(CalibrationParameters::default());

    harness.calibration.run_step_number(0).unwrap();

    let calls = harness.machine_calls();
    assert!(target_of(calls.last().unwrap()).is_unset());
}

#[test]
fn test_full_run_emits_corrections() {
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.queue_position(0.0, 0.0, 0.0);
    harness.queue_position(10.0, 10.0, 40.0);
    harness.queue_position(0.0, 0.0, 0.0);
    harness.queue_position(0.0, 0.0, 10.0);

    for _ in 0..6 {
        assert!(harness.calibration.advance().unwrap().is_some());
    }

    assert_eq!(
        harness.emitted(),
        vec!["M206 A1.571", "G0 A0", "G0 C0.785", "M206 B0.524"]
    );

    let report = harness.calibration.report();
    assert_relative_eq!(report.a_offset.unwrap(), std::f64::consts::FRAC_PI_2);
    assert_relative_eq!(report.c_offset.unwrap(), std::f64::consts::FRAC_PI_4);
    assert_relative_eq!(report.b_correction.unwrap(), std::f64::consts::FRAC_PI_6);

    let center = report.rotation_center.unwrap();
    let third = harness.calibration.actual_points()[2];
    let fourth = harness.calibration.actual_points()[3];
    assert_relative_eq!(center.distance_to(&third), 20.0, epsilon = 1e-9);
    assert_relative_eq!(center.distance_to(&fourth), 20.0, epsilon = 1e-9);

    assert_eq!(harness.calibration.next_step(), None);
}

#[test]
fn test_step_two_lifts_relative_before_returning_a() {
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.queue_position(0.0, 0.0, 0.0);
    harness.queue_position(10.0, 0.0, 20.0);
    harness.calibration.run_step_number(1).unwrap();
    harness.clear();

    harness.calibration.run_step_number(2).unwrap();

    let calls = harness.machine_calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], Call::Emit("M206 A0.524".to_string()));
    match &calls[1] {
        Call::Move {
            target, relative, ..
        } => {
            assert!(*relative);
            assert!(target.x.is_nan() && target.y.is_nan());
            assert_eq!(target.z, 20.0);
        }
        other => panic!("expected the lift move, got {:?}", other),
    }
    assert_eq!(calls[2], Call::Emit("G0 A0".to_string()));
}

#[test]
fn test_out_of_range_a_offset_is_skipped() {
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.queue_position(0.0, 0.0, 0.0);
    harness.queue_position(0.0, 0.0, 80.0);
    harness.calibration.run_step_number(1).unwrap();
    harness.clear();

    harness.calibration.run_step_number(2).unwrap();

    assert_eq!(harness.emitted(), vec!["G0 A0"]);
    assert_eq!(harness.calibration.report().a_offset, None);
    assert_eq!(harness.reports(MessageLevel::Warning).len(), 1);
    assert_eq!(
        harness.calibration.next_step(),
        Some(CalibrationStep::AfterCAxis)
    );
}

#[test]
fn test_coincident_points_skip_c_offset() {
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.queue_position(1.0, 1.0, 0.0);
    harness.queue_position(1.0, 1.0, 0.0);
    harness.calibration.run_step_number(1).unwrap();
    harness.calibration.run_step_number(2).unwrap();
    harness.clear();

    harness.calibration.run_step_number(3).unwrap();

    assert!(harness.emitted().is_empty());
    let calls = harness.machine_calls();
    assert_eq!(target_of(&calls[0]), Point3::new(20.0, 0.0, 40.0));
}

#[test]
fn test_degrees_unit_in_emitted_commands() {
    let params = CalibrationParameters {
        angle_unit: AngleUnit::Degrees,
        ..Default::default()
    };
    let mut harness = configured_harness(params);
    harness.queue_position(0.0, 0.0, 0.0);
    harness.queue_position(1.0, 1.0, 0.0);
    harness.calibration.run_step_number(1).unwrap();
    harness.calibration.run_step_number(2).unwrap();
    harness.clear();

    harness.calibration.run_step_number(3).unwrap();

    assert_eq!(harness.emitted(), vec!["G0 C45.000"]);
}

#[test]
fn test_unknown_step_is_a_no_op() {
    let mut harness = configured_harness(CalibrationParameters::default());

    harness.calibration.run_step_number(9).unwrap();

    assert!(harness.machine_calls().is_empty());
    assert_eq!(harness.calibration.next_step(), Some(CalibrationStep::Start));
}

#[test]
fn test_position_failure_propagates_and_keeps_cursor() {
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.calibration.advance().unwrap();

    let result = harness.calibration.advance();

    assert!(result.unwrap_err().is_motion_error());
    assert_eq!(
        harness.calibration.next_step(),
        Some(CalibrationStep::AfterPoint1)
    );
}

#[test]
fn test_advance_after_completion_reports() {
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.queue_position(0.0, 0.0, 0.0);
    harness.queue_position(0.0, 0.0, 0.0);
    harness
        .calibration
        .run_step(CalibrationStep::AfterPreLinear)
        .unwrap();
    harness
        .calibration
        .run_step(CalibrationStep::BAxisCorrection)
        .unwrap();
    harness.clear();

    assert_eq!(harness.calibration.advance().unwrap(), None);
    assert!(harness.machine_calls().is_empty());
    assert_eq!(harness.reports(MessageLevel::Info).len(), 1);
}

#[test]
fn test_step_zero_resets_previous_run() {
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.queue_position(3.0, 4.0, 5.0);
    harness.calibration.run_step_number(1).unwrap();

    harness.calibration.run_step_number(0).unwrap();

    assert_eq!(harness.calibration.actual_points()[0], Point3::ZERO);
    assert_eq!(harness.calibration.report().a_offset, None);
}

#[test]
fn test_events_follow_the_run() {
    let dispatcher = EventDispatcher::default();
    let mut receiver = dispatcher.subscribe();
    let mut harness = configured_harness(CalibrationParameters::default());
    harness.calibration = harness.calibration.with_events(dispatcher);
    harness.queue_position(2.0, 0.0, 50.0);

    harness.calibration.run_step_number(1).unwrap();

    assert_eq!(receiver.try_recv().unwrap(), CalibrationEvent::StepStarted(1));
    assert_eq!(
        receiver.try_recv().unwrap(),
        CalibrationEvent::PointRecorded {
            index: 0,
            position: Point3::new(2.0, 0.0, 50.0),
        }
    );
    assert!(matches!(
        receiver.try_recv().unwrap(),
        CalibrationEvent::MoveCommanded {
            relative: false,
            ..
        }
    ));
}
