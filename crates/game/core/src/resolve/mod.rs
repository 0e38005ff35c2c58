//! End-to-end attack resolution.
//!
//! [`resolve_attack`] runs one attack from modifier accumulation through the
//! attack roll, malfunction check, ammunition debit, cluster roll and damage
//! distribution, and issues the resulting mutating calls to the collaborators.
//! One attack completes before the next begins, so damage from an earlier shot
//! is visible to a later one.

mod error;

pub use error::ResolveError;

use tracing::debug;

use crate::arc::{AttackDirection, attack_direction};
use crate::cluster::{ClusterOptions, cluster_hits, cluster_roll_modifiers};
use crate::damage::{
    DamageEvent, Distribution, FiringCheck, JamOutcome, Multiplier, Salvo, Shielding,
    apply_damage, critical_modifier, damage_multiplier, damage_terrain, distribute,
    firing_check, salvo,
};
use crate::dice::DiceOracle;
use crate::env::{
    Absorber, BoardOracle, CombatEnv, Combatant, DamageSink, Mounted, Munition, Terrain,
    TerrainTarget, WeaponFlags, WeaponSnapshot,
};
use crate::hex::Hex;
use crate::report::{CombatLog, Report};
use crate::target_number::{Resolution, TargetNumber};
use crate::terrain::Cover;
use crate::to_hit::{AttackRequest, ToHitOutcome, compute_to_hit};

/// Heat an inferno missile adds to a heat-tracking target.
pub const INFERNO_HEAT_PER_MISSILE: u32 = 2;

/// Where the damage of an attack goes.
pub enum DamageTarget<'t> {
    Unit {
        sink: &'t mut dyn DamageSink,
        /// Building the target stands in or behind.
        structure: Option<&'t mut dyn Absorber>,
    },
    /// A building attacked directly.
    Building(&'t mut dyn Absorber),
    /// Woods, jungle or other terrain attacked directly.
    Terrain(&'t mut dyn TerrainTarget),
}

impl<'t> DamageTarget<'t> {
    pub fn unit(sink: &'t mut dyn DamageSink) -> Self {
        DamageTarget::Unit {
            sink,
            structure: None,
        }
    }

    pub fn sheltered(sink: &'t mut dyn DamageSink, structure: &'t mut dyn Absorber) -> Self {
        DamageTarget::Unit {
            sink,
            structure: Some(structure),
        }
    }
}

/// Everything one attack produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackResolution {
    pub to_hit: TargetNumber,
    /// Attack roll; `None` when no roll was needed or allowed.
    pub roll: Option<u32>,
    pub hit: bool,
    /// Shots that left the barrel after the malfunction checks.
    pub shots_fired: u32,
    /// Submunitions that connected.
    pub hits: u32,
    pub jam: Option<FiringCheck>,
    pub events: Vec<DamageEvent>,
    pub log: CombatLog,
}

impl AttackResolution {
    fn declined(to_hit: TargetNumber, log: CombatLog) -> Self {
        Self {
            to_hit,
            roll: None,
            hit: false,
            shots_fired: 0,
            hits: 0,
            jam: None,
            events: Vec::new(),
            log,
        }
    }

    /// Damage that reached the target.
    pub fn total_damage(&self) -> u32 {
        self.events.iter().map(|event| event.amount).sum()
    }
}

/// Resolve one weapon attack and apply its effects.
///
/// An impossible attack rolls nothing and leaves the weapon untouched. Any
/// other attack fires: each shot runs the malfunction check in turn, the shots
/// that cleared debit ammunition and, on a hit, deliver damage to `target`.
///
/// # Errors
///
/// Returns [`ResolveError`] when an oracle is missing or the catalog has no
/// entry for the weapon, its ammunition, its salvo size or its munition.
pub fn resolve_attack(
    env: &CombatEnv<'_>,
    request: &AttackRequest<'_>,
    weapon: &mut Mounted,
    dice: &mut dyn DiceOracle,
    target: DamageTarget<'_>,
) -> Result<AttackResolution, ResolveError> {
    let catalog = env.catalog()?;
    let rules = env.rules()?;
    let board = env.board()?;
    let snapshot = weapon.snapshot(catalog)?;

    let mut log = CombatLog::new();
    let outcome = compute_to_hit(env, request, &snapshot, &mut log)?;

    let resolution = outcome.target_number.resolution();
    let (roll, mut hit) = match &resolution {
        Resolution::Impossible(_) => {
            return Ok(AttackResolution::declined(outcome.target_number, log));
        }
        Resolution::AutomaticFailure(_) => (None, false),
        Resolution::AutomaticSuccess => (None, true),
        Resolution::Needs(needed) => {
            let roll = dice.d6(2);
            let hit = resolution.is_success(roll);
            log.push(Report::AttackRoll {
                needed: *needed,
                roll,
                hit,
            });
            (Some(roll), hit)
        }
    };

    let available = if snapshot.weapon.uses_ammo {
        snapshot.shots().min(snapshot.shots_remaining.unwrap_or(0))
    } else {
        snapshot.shots()
    };
    let jam = firing_check(&snapshot, available, rules, dice);
    match jam.map(|check| check.outcome) {
        Some(JamOutcome::Jammed { roll }) => {
            weapon.set_jammed();
            log.push(Report::Jammed { roll });
        }
        Some(JamOutcome::Destroyed { second, .. }) => {
            weapon.set_destroyed();
            log.push(Report::Destroyed { roll: second });
        }
        Some(JamOutcome::Clear { .. }) | None => {}
    }
    let mut result = AttackResolution {
        roll,
        jam,
        ..AttackResolution::declined(outcome.target_number.clone(), CombatLog::new())
    };
    let mut fired = jam.map_or(available, |check| check.cleared);
    if fired == 0 {
        result.log = log;
        return Ok(result);
    }

    let mut salvo = salvo(&snapshot);
    if snapshot.weapon.uses_ammo {
        fired = weapon.spend(fired);
        let remaining = weapon.ammo.as_ref().map_or(0, |bin| bin.shots_remaining);
        log.push(Report::AmmoSpent {
            shots: fired,
            remaining,
        });
    }
    if snapshot.mode.is_multi_shot() {
        salvo.count = salvo.count.min(fired);
        salvo.clustered = salvo.count > 1;
    }
    result.shots_fired = fired;

    hit &= salvo.count > 0;
    result.hit = hit;
    if !hit {
        result.log = log;
        return Ok(result);
    }

    result.hits = salvo_hits(&snapshot, &salvo, request, &outcome, rules, dice, &mut log)?;

    let target_unit = request.target.unit();
    let target_pos = request.target.position();
    let multiplier = target_multiplier(board, &snapshot, target_unit, target_pos)?;

    match target {
        DamageTarget::Unit { sink, structure } => {
            let plan = Distribution {
                salvo,
                multiplier,
                critical_modifier: critical_modifier(&snapshot),
                direction: direction(request, target_pos),
                shielding: shielding(board, target_pos, &outcome),
            };
            let events = distribute(result.hits, &plan, sink, structure, dice, &mut log);
            apply_damage(&events, sink, &mut log);
            result.events = events;

            if snapshot.munition() == Munition::Inferno {
                if target_unit.is_some_and(|unit| unit.tracks_heat()) {
                    let heat = INFERNO_HEAT_PER_MISSILE * result.hits;
                    sink.add_heat(heat);
                    log.push(Report::HeatApplied { heat });
                }
                if let Some(hex) = target_pos {
                    sink.ignite_hex(hex);
                    log.push(Report::Ignition { hex });
                }
            }
        }
        DamageTarget::Building(absorber) => {
            let amount = multiplier.apply(salvo.total_damage(result.hits));
            let debited = amount.min(absorber.construction_factor());
            absorber.debit(debited);
            log.push(Report::Absorbed {
                amount: debited,
                remaining: absorber.construction_factor(),
            });
        }
        DamageTarget::Terrain(terrain) => {
            let amount = salvo.total_damage(result.hits);
            damage_terrain(terrain, amount, &snapshot, dice, &mut log);
        }
    }

    debug!(
        attacker = %request.attacker.id(),
        weapon = %snapshot.weapon.id,
        hits = result.hits,
        damage = result.total_damage(),
        "attack resolved"
    );
    result.log = log;
    Ok(result)
}

/// Submunitions that connect once the attack roll has hit.
fn salvo_hits(
    snapshot: &WeaponSnapshot<'_>,
    salvo: &Salvo,
    request: &AttackRequest<'_>,
    outcome: &ToHitOutcome,
    rules: &crate::config::RulesConfig,
    dice: &mut dyn DiceOracle,
    log: &mut CombatLog,
) -> Result<u32, ResolveError> {
    if !salvo.clustered {
        return Ok(salvo.count);
    }
    let streak = snapshot.weapon.flags.contains(WeaponFlags::STREAK);
    if streak && !outcome.attacker_jammed {
        return Ok(salvo.count);
    }

    let modifier: i32 =
        cluster_roll_modifiers(snapshot, request.target.unit(), outcome.attacker_jammed)
            .iter()
            .map(|m| m.value)
            .sum();
    let options = ClusterOptions::from_rules(rules, snapshot.hotloaded);
    let roll = cluster_hits(salvo.count, modifier, options, dice)?;
    log.push(Report::ClusterRoll {
        roll: roll.roll,
        modifier: roll.modifier,
        hits: roll.hits,
        of: salvo.count,
    });
    Ok(roll.hits)
}

fn direction(request: &AttackRequest<'_>, target_pos: Option<Hex>) -> AttackDirection {
    let attacker_pos = request.attacker.position();
    match (attacker_pos, target_pos, request.target.unit()) {
        (Some(from), Some(to), Some(unit)) => attack_direction(from, to, unit.facing()),
        _ => AttackDirection::Front,
    }
}

fn shielding(
    board: &dyn BoardOracle,
    target_pos: Option<Hex>,
    outcome: &ToHitOutcome,
) -> Shielding {
    if target_pos.is_some_and(|hex| board.building(hex).is_some()) {
        Shielding::Inside
    } else if matches!(
        outcome.los.and_then(|los| los.cover),
        Some(Cover::Building(_))
    ) {
        Shielding::LegCover
    } else {
        Shielding::None
    }
}

/// Infantry caught without building or woods cover.
fn in_open(board: &dyn BoardOracle, hex: Hex) -> bool {
    board.building(hex).is_none()
        && !board.contains_terrain(hex, Terrain::Woods)
        && !board.contains_terrain(hex, Terrain::Jungle)
}

/// Ammunition multiplier for a snapshot against a target.
pub(crate) fn target_multiplier(
    board: &dyn BoardOracle,
    snapshot: &WeaponSnapshot<'_>,
    target: Option<&dyn Combatant>,
    target_pos: Option<Hex>,
) -> Result<Multiplier, ResolveError> {
    let open = target_pos.is_some_and(|hex| in_open(board, hex));
    damage_multiplier(
        snapshot.weapon,
        snapshot.munition(),
        target.map(|unit| unit.target_class()),
        open,
    )
}
