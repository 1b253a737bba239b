//! End-to-end layout scenarios through the public solve API.

use gf_catalog::{Catalog, Part};
use gf_geometry::{CENTER, GridPoint, LEFT, RIGHT};
use gf_liquids::{COLD_WATER, HOT_WATER, WORT};
use gf_solver::{Solution, SolverConfig, solve, solve_with};

fn builtin_solve(parts: &[Part]) -> Solution {
    solve(parts, &Catalog::builtin())
}

#[test]
fn pass_through_parts_conserve_flow() {
    let parts = vec![
        Part::new("SystemInput", 0, 0),
        Part::new("StraightTube", 1, 0),
        Part::new("Valve", 2, 0),
        Part::new("StraightTube", 3, 0),
        Part::new("SystemOutput", 4, 0),
    ];
    let solution = builtin_solve(&parts);
    assert!(solution.stable);

    // What enters a pass-through part at one point leaves at the other.
    for snapshot in &solution.parts[1..4] {
        let net: f64 = snapshot.flow_points().map(|(_, f)| f).sum();
        assert!(net.abs() < 1e-6, "imbalance in {}", snapshot.part.type_id);
        assert!((snapshot.flow_at(LEFT) - 10.0).abs() < 1e-6);
    }
}

#[test]
fn solving_twice_gives_identical_flows() {
    let parts = vec![
        Part::new("SystemInput", 0, 0),
        Part::new("TeeTube", 1, 0).with_rotation(180),
        Part::new("StraightTube", 2, 0),
        Part::new("SystemOutput", 3, 0),
        Part::new("StraightTube", 1, 1).with_rotation(90),
        Part::new("SystemOutput", 1, 2).with_rotation(90),
    ];
    let catalog = Catalog::builtin();

    let first = solve(&parts, &catalog);
    let second = solve(&parts, &catalog);

    assert_eq!(first.rounds, second.rounds);
    for (a, b) in first.parts.iter().zip(&second.parts) {
        let lhs: Vec<(GridPoint, f64)> = a.flow_points().collect();
        let rhs: Vec<(GridPoint, f64)> = b.flow_points().collect();
        assert_eq!(lhs, rhs);
    }
}

#[test]
fn pump_boosts_a_co_moving_source() {
    // Input rate 10 feeds a pump rated 30; the pump accelerates the
    // co-moving flow by half its value, saturated at its own rating.
    let parts = vec![
        Part::new("SystemInput", 0, 0),
        Part::new("Pump", 1, 0).with_flipped(),
        Part::new("SystemOutput", 2, 0),
    ];
    let solution = builtin_solve(&parts);
    assert!(solution.stable);

    let expected = 30.0 + 10.0 + 0.5 * 10.0;
    let pump = &solution.parts[1];
    assert!((pump.flow_at(RIGHT) - expected).abs() < 1e-6);
    assert!((pump.flow_at(LEFT) + expected).abs() < 1e-6);

    let output = &solution.parts[2];
    assert!((output.flow_at(LEFT) - expected).abs() < 1e-6);
}

#[test]
fn pump_moves_liquid_between_kettles() {
    let mut kettle_a = Part::new("Kettle", 0, 0)
        .with_setting("sizeX", 2.0)
        .with_setting("sizeY", 2.0);
    kettle_a.liquid_source = Some(WORT);
    let kettle_b = Part::new("Kettle", 3, 0)
        .with_setting("sizeX", 2.0)
        .with_setting("sizeY", 2.0);

    let parts = vec![
        kettle_a,
        Part::new("DipTube", 1, 0).with_flipped(),
        Part::new("Pump", 2, 0).with_flipped(),
        Part::new("DipTube", 3, 0),
        kettle_b,
    ];
    let solution = builtin_solve(&parts);
    assert!(solution.stable);

    // The pump pulls its rated 30 out of kettle A and into kettle B.
    let pump = &solution.parts[2];
    assert!((pump.flow_at(RIGHT) - 30.0).abs() < 1e-6);

    let feed = &solution.parts[1];
    assert!((feed.flow_at(CENTER) - 30.0).abs() < 1e-6);

    let discharge = &solution.parts[3];
    assert!((discharge.flow_at(LEFT) - 30.0).abs() < 1e-6);

    // Kettle B receives kettle A's wort at the discharged cell.
    let receiving_cell = GridPoint::from_tenths(5, 5);
    let kettle_b = &solution.parts[4];
    let mix = kettle_b
        .liquid_at(receiving_cell)
        .expect("wort should arrive in kettle B");
    assert_eq!(mix.as_pure(), Some(WORT));
}

#[test]
fn junction_blends_sixty_forty() {
    let mut cold_in = Part::new("SystemInput", 0, 0).with_setting("pressure", 6.0);
    cold_in.liquid_source = Some(COLD_WATER);
    let mut hot_in =
        Part::new("SystemInput", 2, -2).with_rotation(90).with_setting("pressure", 4.0);
    hot_in.liquid_source = Some(HOT_WATER);

    let parts = vec![
        cold_in,
        Part::new("CheckValve", 1, 0),
        Part::new("TeeTube", 2, 0),
        Part::new("CheckValve", 2, -1).with_rotation(90),
        hot_in,
        Part::new("SystemOutput", 3, 0),
    ];
    let solution = builtin_solve(&parts);
    assert!(solution.stable);

    let output = &solution.parts[5];
    assert!((output.flow_at(LEFT) - 10.0).abs() < 1e-6);

    let mix = output.liquid_at(LEFT).expect("blend should reach the output");
    assert!((mix.fraction(COLD_WATER) - 0.6).abs() < 1e-6);
    assert!((mix.fraction(HOT_WATER) - 0.4).abs() < 1e-6);
}

#[test]
fn actuator_valve_gates_on_its_state() {
    let base = vec![
        Part::new("SystemInput", 0, 0),
        Part::new("ActuatorValve", 1, 0),
        Part::new("SystemOutput", 2, 0),
    ];

    // No state setting: the valve defaults to shut.
    let shut = builtin_solve(&base);
    assert!(shut.stable);
    assert_eq!(shut.parts[1].flow_at(LEFT), 0.0);
    assert_eq!(shut.parts[2].flow_at(LEFT), 0.0);

    let mut open_parts = base;
    open_parts[1] = Part::new("ActuatorValve", 1, 0).with_setting("state", true);
    let open = builtin_solve(&open_parts);
    assert!(open.stable);
    assert!((open.parts[1].flow_at(LEFT) - 10.0).abs() < 1e-6);
    assert!((open.parts[2].flow_at(LEFT) - 10.0).abs() < 1e-6);
}

#[test]
fn check_valve_blocks_a_reverse_pump() {
    // A pump pushing against a check valve's closed direction moves
    // nothing through it.
    let parts = vec![
        Part::new("SystemOutput", 0, 0).with_flipped(),
        Part::new("Pump", 1, 0),
        Part::new("CheckValve", 2, 0),
        Part::new("SystemInput", 3, 0).with_flipped(),
    ];
    let solution = builtin_solve(&parts);
    assert!(solution.stable);

    let check = &solution.parts[2];
    assert_eq!(check.flow_at(LEFT), 0.0);
    assert_eq!(check.flow_at(RIGHT), 0.0);

    // With its suction starved, the pump delivers nothing either.
    let pump = &solution.parts[1];
    assert_eq!(pump.flow_at(LEFT), 0.0);
    assert_eq!(pump.flow_at(RIGHT), 0.0);
}

#[test]
fn exhausted_round_budget_reports_unstable() {
    let parts = vec![
        Part::new("SystemInput", 0, 0),
        Part::new("StraightTube", 1, 0),
        Part::new("SystemOutput", 2, 0),
    ];
    let config = SolverConfig {
        max_rounds: 1,
        ..SolverConfig::default()
    };
    let solution = solve_with(&parts, &Catalog::builtin(), &config);
    assert!(!solution.stable);
    assert_eq!(solution.rounds, 1);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pumped_chain_conserves_for_any_rating(pressure in 1.0_f64..100.0) {
            let parts = vec![
                Part::new("SystemInput", 0, 0),
                Part::new("Pump", 1, 0).with_flipped().with_setting("pressure", pressure),
                Part::new("SystemOutput", 2, 0),
            ];
            let solution = builtin_solve(&parts);
            prop_assert!(solution.stable);

            let pump_out = -solution.parts[1].flow_at(LEFT);
            let delivered = solution.parts[2].flow_at(LEFT);
            prop_assert!((pump_out - delivered).abs() < 1e-6);
            prop_assert!(delivered > pressure);
        }
    }
}
