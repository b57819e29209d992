use fiveaxis_calibration::{parse_xyz, CalibrationCommand};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_xyz_never_panics(text in "\\PC*") {
        let _ = parse_xyz(&text);
    }

    #[test]
    fn parse_xyz_reads_space_separated_triples(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        z in -1000.0f64..1000.0,
    ) {
        let point = parse_xyz(&format!("{} {} {}", x, y, z));
        prop_assert_eq!(point.x, x);
        prop_assert_eq!(point.y, y);
        prop_assert_eq!(point.z, z);
    }

    #[test]
    fn command_parse_never_panics(line in "\\PC*") {
        let _ = CalibrationCommand::parse(&line);
    }

    #[test]
    fn m557_index_is_preserved(index in -20i64..20) {
        let parsed = CalibrationCommand::parse(&format!("M557 P{}", index));
        prop_assert_eq!(
            parsed,
            Some(CalibrationCommand::SetProbePoint { index, x: None, y: None, z: None })
        );
    }
}
