use vdotrs::{paces, splits, time_codec, vdot, zones};

/// Integration tests that exercise the engine the way its consumers do

#[cfg(test)]
mod integration_tests {
    use super::*;
    use vdotrs::export::csv::write_split_matrix;
    use vdotrs::grouping::{group_athletes, Athlete};
    use vdotrs::splits::{IntervalSpec, Workout};
    use vdotrs::units::Unit;
    use zones::Zone;

    fn create_test_workout() -> Workout {
        Workout {
            title: "Threshold + Speed".to_string(),
            description: "Cruise miles then 200s".to_string(),
            items: vec![
                IntervalSpec::new(1.0, Unit::Miles, Zone::Threshold, 3).with_recovery("90s jog"),
                IntervalSpec::new(200.0, Unit::Meters, Zone::Race800, 6),
            ],
        }
    }

    fn create_test_roster() -> Vec<Athlete> {
        ["17:45", "19:10", "21:30", "20:05", "24:40", "not yet", "18:20"]
            .iter()
            .enumerate()
            .map(|(i, time)| {
                let report = paces::derive_paces(time);
                let vdot = (report.vdot > 0.0).then_some(report.vdot);
                Athlete::new(format!("athlete_{}", i), format!("Runner {}", i), vdot)
            })
            .collect()
    }

    /// Registration flow: seed VDOT from a 5K time, then show paces
    #[test]
    fn test_registration_to_pace_card_workflow() {
        let seconds = time_codec::parse_duration("20:00");
        let fitness = vdot::estimate_vdot(5000.0, seconds);
        let report = paces::derive_paces("20:00");

        assert_eq!(report.vdot, fitness);
        assert_eq!(report.race_5k, "6:26");

        // Projected 5K time reproduces the race the VDOT came from
        let projected = vdot::project_time(fitness, 5000.0);
        assert_eq!(time_codec::format_duration(projected, false), "20:00");
    }

    /// Roster editor: a new PR time must raise VDOT and speed up every pace
    #[test]
    fn test_personal_record_update() {
        let before = paces::derive_paces("21:00");
        let after = paces::derive_paces("20:15");
        assert!(after.vdot > before.vdot);

        for zone in Zone::ALL {
            assert!(
                paces::pace_per_mile(zone, after.vdot) < paces::pace_per_mile(zone, before.vdot),
                "{}",
                zone
            );
        }
    }

    /// Workout viewer: splits for each interval plus total volume
    #[test]
    fn test_workout_viewer_workflow() {
        let workout = create_test_workout();
        let fitness = paces::derive_paces("20:00").vdot;
        let rendered = workout.splits(fitness);

        assert_eq!(rendered[0].label, "3 x 1mi");
        assert_eq!(rendered[0].split, "6:57");
        assert_eq!(rendered[1].label, "6 x 200m");
        assert!(rendered[1].split.contains('.'));

        let volume = workout.total_volume_miles();
        assert!((volume - (3.0 + 1200.0 / 1609.34)).abs() < 1e-9);
    }

    /// Smart grouping: per-athlete splits for one interval across the roster
    #[test]
    fn test_smart_grouping_workflow() {
        let roster = create_test_roster();
        let groups = group_athletes(&roster, 3, &["Lions".to_string()]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Lions");
        assert_eq!(groups[1].name, "Group 2");
        assert_eq!(groups[0].athletes[0].name, "Runner 0");

        let interval = &create_test_workout().items[0];
        let mut previous = 0.0;
        for group in &groups {
            for athlete in &group.athletes {
                let seconds = interval.split_seconds(athlete.vdot.unwrap());
                assert!(seconds > previous, "splits should slow down through the groups");
                previous = seconds;
            }
            assert_eq!(group.splits_for(interval).len(), group.athletes.len());
        }
    }

    /// Pace card: the split matrix agrees with individual split calls
    #[test]
    fn test_split_matrix_matches_single_splits() {
        let fitness = 47.5;
        let matrix = splits::default_split_matrix(fitness);

        for row in &matrix.rows {
            for (column, split) in matrix.columns.iter().zip(&row.splits) {
                assert_eq!(
                    split,
                    &splits::calculate_split(column.meters, Unit::Meters, row.zone, fitness)
                );
            }
        }

        let mut buffer = Vec::new();
        write_split_matrix(&matrix, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 9);
    }

    /// Malformed input degrades instead of failing anywhere in the pipeline
    #[test]
    fn test_degenerate_inputs() {
        let report = paces::derive_paces("garbage");
        assert_eq!(report.vdot, 0.0);

        let split = splits::calculate_split_by_name(400.0, Unit::Meters, "???", report.vdot);
        assert!(!split.is_empty());

        assert_eq!(time_codec::format_duration(f64::NAN, true), "N/A");
        assert_eq!(
            splits::calculate_split(f64::NAN, Unit::Meters, Zone::Cv, 50.0),
            "N/A"
        );
    }
}
