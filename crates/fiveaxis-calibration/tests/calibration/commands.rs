use crate::fakes::Harness;
use fiveaxis_calibration::CalibrationStep;
use fiveaxis_core::{CalibrationParameters, MessageLevel, Point3};

#[test]
fn test_set_probe_point_round_trip() {
    let mut harness = Harness::new(CalibrationParameters::default());

    for index in 0..10 {
        let line = format!("M557 P{} X{} Y{} Z{}", index, index, index * 2, index * 3);
        assert!(harness.calibration.handle_line(&line).unwrap());
    }

    for index in 0..10 {
        let v = index as f64;
        assert_eq!(
            harness.calibration.probe_points().point(index),
            Some(Point3::new(v, v * 2.0, v * 3.0))
        );
    }
}

#[test]
fn test_set_probe_point_omitted_components_are_unset() {
    let mut harness = Harness::new(CalibrationParameters::default());

    harness
        .calibration
        .handle_line("SET_PROBE_POINT INDEX=2 X=5")
        .unwrap();

    let point = harness.calibration.probe_points().point(2).unwrap();
    assert_eq!(point.x, 5.0);
    assert!(point.y.is_nan());
    assert!(point.z.is_nan());
}

#[test]
fn test_out_of_range_index_reports_and_keeps_points() {
    let mut harness = Harness::new(CalibrationParameters::default());
    harness.calibration.handle_line("M557 P9 X1 Y1 Z1").unwrap();

    assert!(harness.calibration.handle_line("M557 P10 X5").unwrap());
    assert!(harness.calibration.handle_line("M557 P-1 X5").unwrap());

    let points = harness.calibration.probe_points();
    assert_eq!(points.point(9), Some(Point3::new(1.0, 1.0, 1.0)));
    assert!(points.iter().take(9).all(|p| p.is_unset()));
    let errors = harness.reports(MessageLevel::Error);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("only 9 probe points allowed P0-P9"));
}

#[test]
fn test_m1005_runs_numbered_step() {
    let mut harness = Harness::new(CalibrationParameters::default());

    assert!(harness.calibration.handle_line("M1005").unwrap());

    assert_eq!(
        harness.calibration.next_step(),
        Some(CalibrationStep::AfterPoint1)
    );
}

#[test]
fn test_unknown_step_number_is_ignored() {
    let mut harness = Harness::new(CalibrationParameters::default());

    assert!(harness.calibration.handle_line("M1005 S300").unwrap());
    assert!(harness.calibration.handle_line("M1005 S7").unwrap());

    assert!(harness.machine_calls().is_empty());
}

#[test]
fn test_named_step_without_number_advances() {
    let mut harness = Harness::new(CalibrationParameters::default());
    harness.queue_position(0.0, 0.0, 0.0);

    harness.calibration.handle_line("RUN_CALIBRATION_STEP").unwrap();
    harness.calibration.handle_line("RUN_CALIBRATION_STEP").unwrap();

    assert_eq!(
        harness.calibration.next_step(),
        Some(CalibrationStep::AfterAAxis)
    );
}

#[test]
fn test_other_lines_are_not_handled() {
    let mut harness = Harness::new(CalibrationParameters::default());

    assert!(!harness.calibration.handle_line("G28").unwrap());
    assert!(!harness.calibration.handle_line("M5570 P1").unwrap());
    assert!(harness.machine_calls().is_empty());
}
