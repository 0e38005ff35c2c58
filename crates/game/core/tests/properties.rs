mod common;

use combat_core::ecm::{FieldMode, Observer, Polarity, ecm_balance, field_count, is_affected_by_ecm};
use combat_core::env::{BuildingId, TeamId};
use combat_core::range::effective_distance;
use combat_core::{
    Arc, ClusterOptions, Emitter, Facing, Hex, RangeTable, UnitId, cluster_hits,
    cluster_hits_for_roll, is_in_arc, range_bracket,
};
use proptest::prelude::*;

use common::{BLUE, RED, TestBoard};

fn range_table() -> impl Strategy<Value = RangeTable> {
    (0u32..6, 1u32..8, 1u32..8, 1u32..8).prop_map(|(minimum, short, step_m, step_l)| {
        RangeTable::new(minimum, short, short + step_m, short + step_m + step_l)
    })
}

fn facing() -> impl Strategy<Value = Facing> {
    (0i32..6).prop_map(Facing::from_index)
}

fn emitter() -> impl Strategy<Value = Emitter> {
    (0u32..1000, any::<bool>(), -8i32..8, -8i32..8, 0u32..7, any::<bool>()).prop_map(
        |(owner, blue, q, r, range, angel)| {
            let team = if blue { BLUE } else { RED };
            let emitter = Emitter::new(UnitId(owner), team, Hex::new(q, r), range, FieldMode::Ecm);
            if angel { emitter.angel() } else { emitter }
        },
    )
}

proptest! {
    #[test]
    fn bracket_never_decreases_with_distance(
        table in range_table(),
        near in 0u32..40,
        extra in 0u32..40,
        extreme in any::<bool>(),
    ) {
        let a = range_bracket(near, &table, extreme, 2);
        let b = range_bracket(near + extra, &table, extreme, 2);
        prop_assert!(a <= b, "{near}: {a:?} then {}: {b:?}", near + extra);
    }

    #[test]
    fn cluster_hits_are_capped_and_pure(
        size in 0u32..=20,
        roll in 2u32..=12,
        modifier in -6i32..=6,
        floor in 1u32..=2,
    ) {
        let first = cluster_hits_for_roll(size, roll, modifier, floor).unwrap();
        let second = cluster_hits_for_roll(size, roll, modifier, floor).unwrap();
        prop_assert!(first <= size);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rolled_cluster_hits_match_the_table(
        size in 1u32..=20,
        faces in prop::array::uniform2(1u32..=6),
        modifier in -4i32..=4,
    ) {
        let mut dice = combat_core::ScriptedDice::new(faces.to_vec());
        let rolled = cluster_hits(size, modifier, ClusterOptions::default(), &mut dice).unwrap();
        let looked_up = cluster_hits_for_roll(size, faces[0] + faces[1], modifier, 2).unwrap();
        prop_assert_eq!(rolled.hits, looked_up);
    }

    #[test]
    fn side_arcs_partition_the_circle(q in -10i32..10, r in -10i32..10, facing in facing()) {
        let target = Hex::new(q, r);
        prop_assume!(target != Hex::ORIGIN);
        let inside = [Arc::Forward, Arc::RightSide, Arc::Rear, Arc::LeftSide]
            .into_iter()
            .filter(|&arc| is_in_arc(Hex::ORIGIN, facing, target, arc))
            .count();
        prop_assert_eq!(inside, 1);
    }

    #[test]
    fn field_count_flips_sign_with_polarity(
        emitters in prop::collection::vec(emitter(), 0..6),
        bq in -8i32..8,
        br in -8i32..8,
    ) {
        let a = Some(Hex::ORIGIN);
        let b = Some(Hex::new(bq, br));
        let blue = Observer::new(UnitId(5000), BLUE);
        let red = Observer::new(UnitId(5001), RED);

        let friendly = field_count(&blue, a, b, &emitters, Polarity::Friendly, FieldMode::Ecm);
        let hostile = field_count(&red, a, b, &emitters, Polarity::Hostile, FieldMode::Ecm);
        prop_assert_eq!(friendly, -hostile);
    }

    #[test]
    fn short_circuit_agrees_with_full_balance(
        jammers in prop::collection::vec(emitter(), 0..6),
        bq in -8i32..8,
        br in -8i32..8,
    ) {
        // re-tag odd owners as counter-jammers so both modes are present
        let emitters: Vec<Emitter> = jammers
            .into_iter()
            .map(|mut e| {
                if e.owner.0 % 2 == 1 {
                    e.mode = FieldMode::Eccm;
                }
                e
            })
            .collect();
        let observer = Observer::new(UnitId(5000), BLUE);
        let a = Some(Hex::ORIGIN);
        let b = Some(Hex::new(bq, br));
        prop_assert_eq!(
            is_affected_by_ecm(&observer, a, b, &emitters),
            ecm_balance(&observer, a, b, &emitters) < 0
        );
    }
}

#[test]
fn two_counter_jammers_outweigh_one_jammer() {
    let attacker = Hex::ORIGIN;
    let target = Hex::new(0, -6);
    let emitters = vec![
        Emitter::new(UnitId(10), BLUE, Hex::new(3, -3), 6, FieldMode::Eccm),
        Emitter::new(UnitId(11), BLUE, Hex::new(-3, 0), 6, FieldMode::Eccm),
        Emitter::new(UnitId(20), RED, Hex::new(4, -6), 6, FieldMode::Ecm),
    ];
    let observer = Observer::new(UnitId(1), BLUE);

    assert_eq!(ecm_balance(&observer, Some(attacker), Some(target), &emitters), 1);
    assert!(!is_affected_by_ecm(&observer, Some(attacker), Some(target), &emitters));
}

#[test]
fn same_building_adds_elevation_difference() {
    let lobby = Hex::new(0, 0);
    let gallery = Hex::new(2, -1);
    let board = TestBoard::new(5)
        .with_building(lobby, BuildingId(3), 4)
        .with_building(gallery, BuildingId(3), 4);

    let raw = lobby.distance(gallery);
    assert_eq!(effective_distance(&board, lobby, 0, gallery, 2), raw + 2);

    let other = TestBoard::new(5)
        .with_building(lobby, BuildingId(3), 4)
        .with_building(gallery, BuildingId(4), 4);
    assert_eq!(effective_distance(&other, lobby, 0, gallery, 2), raw);
}

#[test]
fn unplaced_units_contribute_nothing() {
    let emitters = vec![Emitter::new(UnitId(20), TeamId(2), Hex::new(1, -1), 6, FieldMode::Ecm)];
    let observer = Observer::new(UnitId(1), BLUE);
    assert_eq!(ecm_balance(&observer, None, Some(Hex::new(0, -3)), &emitters), 0);
}
