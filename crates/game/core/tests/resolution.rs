mod common;

use combat_core::damage::JamOutcome;
use combat_core::env::{AmmoBin, BuildingId, MountedFlags, Terrain, WeaponMode};
use combat_core::{
    Arc, AttackRequest, AttackTarget, Classification, DamageTarget, Facing, Hex, Location,
    Mounted, RangeBracket, Report, Resolution, ResolveError, ScriptedDice, compute_to_hit,
    resolve_attack,
};

use common::{BLUE, RED, RecordingSink, TestBuilding, TestUnit, TestWoods, World, init_tracing};

fn shooter() -> TestUnit {
    TestUnit::mech(1, BLUE, Hex::ORIGIN, Facing::North)
}

fn target_at(distance: i32) -> TestUnit {
    TestUnit::mech(2, RED, Hex::new(0, -distance), Facing::South)
}

#[test]
fn medium_laser_hits_for_five() {
    init_tracing();
    let world = World::new();
    let attacker = shooter();
    let target = target_at(3);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut laser = Mounted::new("medium_laser", Location::RightArm, Arc::Forward);
    let mut dice = ScriptedDice::new([3, 3]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut laser,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert_eq!(result.to_hit.value(), 4);
    assert_eq!(result.roll, Some(6));
    assert!(result.hit);
    assert_eq!(sink.hits, vec![(Location::CenterTorso, 5, None)]);
    assert_eq!(dice.remaining(), 0);
    assert!(
        result
            .log
            .contains(|r| matches!(r, Report::AttackRoll { needed: 4, roll: 6, hit: true }))
    );
}

#[test]
fn distance_three_is_short_without_penalty() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(3);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let laser = Mounted::new("medium_laser", Location::RightArm, Arc::Forward);
    let snapshot = laser.snapshot(&world.catalog).unwrap();
    let mut log = combat_core::CombatLog::new();

    let outcome = compute_to_hit(&world.env(), &request, &snapshot, &mut log).unwrap();

    assert_eq!(outcome.bracket, Some(RangeBracket::Short));
    assert_eq!(outcome.distance, 3);
    assert!(outcome.target_number.modifiers().iter().all(|m| m.reason != "minimum range"));
    assert_eq!(outcome.target_number.resolution(), Resolution::Needs(4));
}

#[test]
fn twenty_rack_at_roll_seven_lands_twelve() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(7);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut lrm = Mounted::new("lrm_20", Location::LeftTorso, Arc::Forward)
        .with_ammo(AmmoBin::new("lrm_20_standard", 6));
    // attack roll 6, cluster roll 7
    let mut dice = ScriptedDice::new([3, 3, 3, 4]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut lrm,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert_eq!(result.hits, 12);
    assert_eq!(sink.hits.iter().map(|h| h.1).collect::<Vec<_>>(), vec![5, 5, 2]);
    assert_eq!(lrm.ammo.as_ref().map(|bin| bin.shots_remaining), Some(5));
    assert!(
        result
            .log
            .contains(|r| matches!(r, Report::ClusterRoll { roll: 7, hits: 12, of: 20, .. }))
    );
}

#[test]
fn out_of_range_rolls_nothing_and_spends_nothing() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(10);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut ac = Mounted::new("ac_20", Location::RightTorso, Arc::Forward)
        .with_ammo(AmmoBin::new("ac_20_standard", 5));
    let mut dice = ScriptedDice::new(Vec::new());
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut ac,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert_eq!(result.to_hit.classification(), Classification::Impossible);
    assert_eq!(result.to_hit.reason(), Some("target out of range"));
    assert_eq!(result.roll, None);
    assert!(!result.hit);
    assert_eq!(ac.ammo.as_ref().map(|bin| bin.shots_remaining), Some(5));
    assert!(sink.hits.is_empty());
}

#[test]
fn target_behind_the_attacker_is_not_in_arc() {
    let world = World::new();
    let attacker = shooter();
    let target = TestUnit::mech(2, RED, Hex::new(0, 3), Facing::North);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let laser = Mounted::new("medium_laser", Location::RightArm, Arc::Forward);
    let snapshot = laser.snapshot(&world.catalog).unwrap();
    let mut log = combat_core::CombatLog::new();

    let outcome = compute_to_hit(&world.env(), &request, &snapshot, &mut log).unwrap();

    assert_eq!(
        outcome.target_number.resolution(),
        Resolution::Impossible("target not in arc".into())
    );
}

#[test]
fn streak_hits_with_every_missile_without_a_cluster_roll() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(2);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut streak = Mounted::new("streak_srm_2", Location::LeftArm, Arc::Forward)
        .with_ammo(AmmoBin::new("streak_srm_2_standard", 50));
    let mut dice = ScriptedDice::new([4, 4]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut streak,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert_eq!(result.hits, 2);
    assert_eq!(sink.total(), 4);
    assert_eq!(dice.remaining(), 0);
}

#[test]
fn ultra_autocannon_jams_without_firing() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(4);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut uac = Mounted::new("uac_5", Location::RightTorso, Arc::Forward)
        .with_mode(WeaponMode::Ultra)
        .with_ammo(AmmoBin::new("uac_5_standard", 20));
    // attack roll 6, malfunction roll 2, second roll 6 jams
    let mut dice = ScriptedDice::new([3, 3, 1, 1, 3, 3]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut uac,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert!(!result.hit);
    assert!(uac.flags.contains(MountedFlags::JAMMED));
    assert_eq!(uac.ammo.as_ref().map(|bin| bin.shots_remaining), Some(20));
    assert!(sink.hits.is_empty());

    // jammed weapons cannot fire until the jam clears
    let snapshot = uac.snapshot(&world.catalog).unwrap();
    let mut log = combat_core::CombatLog::new();
    let outcome = compute_to_hit(&world.env(), &request, &snapshot, &mut log).unwrap();
    assert_eq!(outcome.target_number.reason(), Some("weapon jammed"));

    uac.clear_jam();
    assert!(uac.is_operable());
}

#[test]
fn ultra_autocannon_fires_two_shots_on_a_clear_check() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(4);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut uac = Mounted::new("uac_5", Location::RightTorso, Arc::Forward)
        .with_mode(WeaponMode::Ultra)
        .with_ammo(AmmoBin::new("uac_5_standard", 20));
    // attack roll 8, both shots check clear on 7, cluster roll 8 on the 2 row
    let mut dice = ScriptedDice::new([4, 4, 3, 4, 3, 4, 4, 4]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut uac,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert!(result.hit);
    assert_eq!(result.shots_fired, 2);
    assert_eq!(result.hits, 2);
    assert_eq!(sink.hits.len(), 2);
    assert_eq!(uac.ammo.as_ref().map(|bin| bin.shots_remaining), Some(18));
    assert_eq!(dice.remaining(), 0);
}

#[test]
fn rotary_checks_every_shot_and_stops_at_the_jam() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(4);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut rac = Mounted::new("rac_5", Location::RightTorso, Arc::Forward)
        .with_mode(WeaponMode::Rotary(6))
        .with_ammo(AmmoBin::new("rac_5_standard", 30));
    // attack roll 8, shot 1 clears on 8, shot 2 malfunctions on 2, second roll 6 jams
    let mut dice = ScriptedDice::new([4, 4, 4, 4, 1, 1, 3, 3]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut rac,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    let check = result.jam.unwrap();
    assert_eq!(check.cleared, 1);
    assert_eq!(check.outcome, JamOutcome::Jammed { roll: 2 });
    assert!(rac.flags.contains(MountedFlags::JAMMED));

    // the shot that cleared still fires alone, without a cluster roll
    assert!(result.hit);
    assert_eq!(result.shots_fired, 1);
    assert_eq!(result.hits, 1);
    assert_eq!(sink.hits, vec![(Location::CenterTorso, 5, None)]);
    assert_eq!(rac.ammo.as_ref().map(|bin| bin.shots_remaining), Some(29));
    assert!(result.log.contains(|r| matches!(r, Report::Jammed { roll: 2 })));
    assert!(!result.log.contains(|r| matches!(r, Report::ClusterRoll { .. })));
    assert_eq!(dice.remaining(), 0);
}

#[test]
fn rotary_checks_stop_at_the_shots_left_in_the_bin() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(4);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut rac = Mounted::new("rac_5", Location::RightTorso, Arc::Forward)
        .with_mode(WeaponMode::Rotary(6))
        .with_ammo(AmmoBin::new("rac_5_standard", 2));
    // attack roll 8, two clear checks, cluster roll 7 on the 2 row
    let mut dice = ScriptedDice::new([4, 4, 5, 5, 6, 6, 3, 4]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut rac,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert_eq!(result.jam.map(|check| check.cleared), Some(2));
    assert_eq!(result.shots_fired, 2);
    assert_eq!(result.hits, 1);
    assert_eq!(rac.ammo.as_ref().map(|bin| bin.shots_remaining), Some(0));
    assert_eq!(dice.remaining(), 0);
}

#[test]
fn lbx_cluster_rounds_spread_single_points() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(3);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut lbx = Mounted::new("lb_10x", Location::RightTorso, Arc::Forward)
        .with_ammo(AmmoBin::new("lb_10x_cluster", 10));
    let mut dice = ScriptedDice::new([2, 2, 3, 4]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut lbx,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert_eq!(result.to_hit.value(), 3);
    assert_eq!(result.hits, 6);
    assert!(sink.hits.iter().all(|hit| hit.1 == 1));
    assert_eq!(sink.hits.len(), 6);
}

#[test]
fn armor_piercing_rounds_carry_critical_modifier() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(3);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut ac = Mounted::new("ac_10", Location::RightTorso, Arc::Forward)
        .with_ammo(AmmoBin::new("ac_10_armor_piercing", 10));
    let mut dice = ScriptedDice::new([5, 5]);
    let mut sink = RecordingSink::default();

    resolve_attack(
        &world.env(),
        &request,
        &mut ac,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert_eq!(sink.hits, vec![(Location::CenterTorso, 10, Some(-2))]);
}

#[test]
fn inferno_heats_and_ignites_instead_of_damaging() {
    let world = World::new();
    let attacker = shooter();
    let target = target_at(3);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut srm = Mounted::new("srm_6", Location::LeftTorso, Arc::Forward)
        .with_ammo(AmmoBin::new("srm_6_inferno", 15));
    // attack roll 8, cluster roll 7 on the 6 row
    let mut dice = ScriptedDice::new([4, 4, 3, 4]);
    let mut sink = RecordingSink::default();

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut srm,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap();

    assert_eq!(result.hits, 4);
    assert!(sink.hits.is_empty());
    assert_eq!(sink.heat, 8);
    assert_eq!(sink.ignited, vec![Hex::new(0, -3)]);
}

#[test]
fn inferno_from_an_autocannon_is_a_data_error() {
    let mut world = World::new();
    world.catalog.add_ammo(combat_core::AmmoType {
        munition: combat_core::Munition::Inferno,
        ..world.catalog.ammo_clone("ac_10_standard")
    });
    let attacker = shooter();
    let target = target_at(3);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut ac = Mounted::new("ac_10", Location::RightTorso, Arc::Forward)
        .with_ammo(AmmoBin::new("ac_10_standard", 10));
    let mut dice = ScriptedDice::new([5, 5]);
    let mut sink = RecordingSink::default();

    let err = resolve_attack(
        &world.env(),
        &request,
        &mut ac,
        &mut dice,
        DamageTarget::unit(&mut sink),
    )
    .unwrap_err();

    assert!(matches!(err, ResolveError::UnsupportedMunition { .. }));
}

#[test]
fn building_soaks_damage_before_the_target() {
    let mut world = World::new();
    let inside = Hex::new(0, -3);
    world.board = world.board.with_building(inside, BuildingId(7), 2);
    let attacker = shooter();
    let target = target_at(3);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut laser = Mounted::new("medium_laser", Location::RightArm, Arc::Forward);
    let mut dice = ScriptedDice::new([5, 5]);
    let mut sink = RecordingSink::default();
    let mut building = TestBuilding::new(3);

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut laser,
        &mut dice,
        DamageTarget::sheltered(&mut sink, &mut building),
    )
    .unwrap();

    assert_eq!(building.cf, 0);
    assert_eq!(result.events[0].absorbed, 3);
    assert_eq!(sink.hits, vec![(Location::CenterTorso, 2, None)]);
}

#[test]
fn laser_fire_clears_woods() {
    let world = World::new();
    let attacker = shooter();
    let hex = Hex::new(0, -3);
    let request = AttackRequest::new(&attacker, AttackTarget::Hex(hex));
    let mut laser = Mounted::new("medium_laser", Location::RightArm, Arc::Forward);
    let mut dice = ScriptedDice::new([1, 1]);
    let mut woods = TestWoods {
        hex,
        factor: 30,
        burning: false,
    };

    let result = resolve_attack(
        &world.env(),
        &request,
        &mut laser,
        &mut dice,
        DamageTarget::Terrain(&mut woods),
    )
    .unwrap();

    // immobile target: 4 - 4
    assert_eq!(result.to_hit.value(), 0);
    assert!(result.hit);
    assert_eq!(woods.factor, 25);
    assert!(!woods.burning);
}

#[test]
fn heavy_woods_between_units_add_two() {
    let mut world = World::new();
    world.board = world.board.with_terrain(Hex::new(0, -2), Terrain::Woods, 2);
    let attacker = shooter();
    let target = target_at(4);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let laser = Mounted::new("medium_laser", Location::RightArm, Arc::Forward);
    let snapshot = laser.snapshot(&world.catalog).unwrap();
    let mut log = combat_core::CombatLog::new();

    let outcome = compute_to_hit(&world.env(), &request, &snapshot, &mut log).unwrap();

    // gunnery 4, medium range +2, heavy woods +2
    assert_eq!(outcome.target_number.value(), 8);
    assert_eq!(outcome.los.map(|los| los.woods), Some(2));
}

#[test]
fn missing_catalog_is_fatal() {
    let world = World::new();
    let env = combat_core::CombatEnv::new(
        Some(&world.board),
        None,
        Some(&world.emitters),
        Some(&world.rules),
    );
    let attacker = shooter();
    let target = target_at(3);
    let request = AttackRequest::new(&attacker, AttackTarget::Unit(&target));
    let mut laser = Mounted::new("medium_laser", Location::RightArm, Arc::Forward);
    let mut dice = ScriptedDice::new(Vec::new());
    let mut sink = RecordingSink::default();

    let err = resolve_attack(&env, &request, &mut laser, &mut dice, DamageTarget::unit(&mut sink))
        .unwrap_err();
    assert_eq!(err, ResolveError::Oracle(combat_core::OracleError::CatalogNotAvailable));
}

#[test]
fn off_board_hex_target_is_rejected_with_context() {
    use combat_core::{GameError, OracleError};

    let world = World::new();
    let attacker = shooter();
    let hex = Hex::new(0, -20);
    let request = AttackRequest::new(&attacker, AttackTarget::Hex(hex));
    let laser = Mounted::new("medium_laser", Location::RightArm, Arc::Forward);
    let snapshot = laser.snapshot(&world.catalog).unwrap();
    let mut log = combat_core::CombatLog::new();

    let err = compute_to_hit(&world.env(), &request, &snapshot, &mut log).unwrap_err();

    assert!(matches!(
        err,
        ResolveError::Oracle(OracleError::HexOffBoard { hex: h, .. }) if h == hex
    ));
    assert_eq!(err.error_code(), "ORACLE_HEX_OFF_BOARD");
    let context = err.context().unwrap();
    assert_eq!(context.attacker, Some(attacker.id));
    assert_eq!(context.hex, Some(hex));
    assert!(log.is_empty());
}
