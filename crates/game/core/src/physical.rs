//! Physical attacks: punches, kicks and pushes.
//!
//! Physical attacks use piloting skill instead of gunnery and share the
//! movement, posture, terrain and immobility stages of weapon fire. They are
//! only legal against adjacent targets.

use tracing::debug;

use crate::arc::{Arc, AttackDirection, attack_direction, is_in_arc};
use crate::damage::DamageEvent;
use crate::dice::DiceOracle;
use crate::env::{Actuator, CombatEnv, Combatant, DamageSink, Location};
use crate::report::{CombatLog, Report};
use crate::resolve::ResolveError;
use crate::stacking::{Displacement, displacement};
use crate::target_number::{Resolution, TargetNumber};
use crate::terrain::{Viewpoint, line_of_sight};
use crate::to_hit::{
    AttackRequest, AttackTarget, attacker_movement, immobility, target_movement, target_posture,
};

/// Kind of physical attack and the limb delivering it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhysicalAttack {
    Punch(Location),
    Kick(Location),
    Push,
}

impl PhysicalAttack {
    fn arc(self) -> Arc {
        match self {
            PhysicalAttack::Punch(Location::LeftArm) => Arc::LeftArm,
            PhysicalAttack::Punch(Location::RightArm) => Arc::RightArm,
            _ => Arc::Forward,
        }
    }
}

/// Target number for a physical attack.
///
/// # Errors
///
/// Returns [`ResolveError::Oracle`] when the board or rules are missing.
pub fn physical_to_hit(
    env: &CombatEnv<'_>,
    request: &AttackRequest<'_>,
    attack: PhysicalAttack,
) -> Result<TargetNumber, ResolveError> {
    let board = env.board()?;
    let rules = env.rules()?;
    let attacker = request.attacker;

    let mut tn = TargetNumber::new(attacker.piloting(), "piloting skill");
    let (Some(from), Some(to)) = (attacker.position(), request.target.position()) else {
        tn.set_impossible("attacker or target is not on the board");
        return Ok(tn);
    };
    if !attacker.is_mech() {
        tn.set_impossible("only mechs make physical attacks");
        return Ok(tn);
    }
    if attacker.is_prone() {
        tn.set_impossible("attacker is prone");
        return Ok(tn);
    }
    if from.distance(to) != 1 {
        tn.set_impossible("target not adjacent");
        return Ok(tn);
    }
    if !is_in_arc(from, attacker.facing(), to, attack.arc()) {
        tn.set_impossible("target not in arc");
        return Ok(tn);
    }

    tn.append(limb_modifiers(attacker, attack, request.target));
    if tn.is_terminal() {
        return Ok(tn);
    }
    tn.append(immobility(&request.target));

    let from_view = Viewpoint::of_unit(board, attacker, from);
    let to_view = match request.target {
        AttackTarget::Unit(unit) => Viewpoint::of_unit(board, unit, to),
        AttackTarget::Hex(hex) => Viewpoint::of_hex(board, hex),
    };
    let los = line_of_sight(board, rules, &from_view, &to_view, false);
    if los.blocked {
        tn.set_impossible("no line of sight");
        return Ok(tn);
    }
    tn.append(los.modifiers());

    tn.append(attacker_movement(attacker));
    if let Some(target) = request.target.unit() {
        tn.append(target_movement(target, rules.advanced_target_modifiers, false));
        tn.append(target_posture(target, 1));
    }
    Ok(tn)
}

fn limb_modifiers(
    attacker: &dyn Combatant,
    attack: PhysicalAttack,
    target: AttackTarget<'_>,
) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    match attack {
        PhysicalAttack::Punch(arm) => {
            if !arm.is_arm() || attacker.is_location_destroyed(arm) {
                tn.set_impossible("no arm to punch with");
            } else if attacker.actuator_damaged(arm, Actuator::Shoulder) {
                tn.set_impossible("shoulder actuator destroyed");
            } else {
                if attacker.actuator_damaged(arm, Actuator::UpperArm) {
                    tn.add(2, "upper arm actuator damaged");
                }
                if attacker.actuator_damaged(arm, Actuator::LowerArm) {
                    tn.add(2, "lower arm actuator damaged");
                }
                if attacker.actuator_damaged(arm, Actuator::Hand) {
                    tn.add(1, "hand actuator damaged");
                }
            }
        }
        PhysicalAttack::Kick(leg) => {
            tn.add(-2, "kick");
            let legs = [Location::LeftLeg, Location::RightLeg];
            if !leg.is_leg() || legs.iter().any(|&l| attacker.is_location_destroyed(l)) {
                tn.set_impossible("no leg to kick with");
            } else if attacker.actuator_damaged(leg, Actuator::Hip) {
                tn.set_impossible("hip actuator destroyed");
            } else {
                let damaged = [
                    (Actuator::UpperLeg, "upper leg actuator damaged"),
                    (Actuator::LowerLeg, "lower leg actuator damaged"),
                    (Actuator::Foot, "foot actuator damaged"),
                ];
                for (actuator, reason) in damaged {
                    if attacker.actuator_damaged(leg, actuator) {
                        tn.add(2, reason);
                    }
                }
            }
        }
        PhysicalAttack::Push => {
            tn.add(-1, "push");
            let arms = [Location::LeftArm, Location::RightArm];
            let usable = arms.iter().all(|&arm| {
                !attacker.is_location_destroyed(arm)
                    && !attacker.actuator_damaged(arm, Actuator::Shoulder)
            });
            if !usable {
                tn.set_impossible("push needs both arms");
            } else if target.unit().is_none() {
                tn.set_impossible("only units can be pushed");
            }
        }
    }
    tn
}

/// Damage a successful punch or kick deals; pushes deal none.
pub fn physical_damage(attacker: &dyn Combatant, attack: PhysicalAttack) -> u32 {
    match attack {
        PhysicalAttack::Punch(arm) => {
            let mut damage = attacker.tonnage().div_ceil(10);
            for actuator in [Actuator::UpperArm, Actuator::LowerArm] {
                if attacker.actuator_damaged(arm, actuator) {
                    damage /= 2;
                }
            }
            damage
        }
        PhysicalAttack::Kick(_) => attacker.tonnage() / 5,
        PhysicalAttack::Push => 0,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalResolution {
    pub to_hit: TargetNumber,
    pub roll: Option<u32>,
    pub hit: bool,
    pub damage: Option<DamageEvent>,
    /// Where a pushed target must move. The caller moves it.
    pub displacement: Option<Displacement>,
    pub log: CombatLog,
}

/// Resolve a physical attack and deliver its damage to `sink`.
///
/// # Errors
///
/// Returns [`ResolveError::Oracle`] when the board or rules are missing, or
/// when a push hits and no occupancy oracle is available.
pub fn resolve_physical(
    env: &CombatEnv<'_>,
    request: &AttackRequest<'_>,
    attack: PhysicalAttack,
    dice: &mut dyn DiceOracle,
    sink: &mut dyn DamageSink,
) -> Result<PhysicalResolution, ResolveError> {
    let to_hit = physical_to_hit(env, request, attack)?;
    let mut log = CombatLog::new();
    for modifier in to_hit.modifiers() {
        log.push(Report::Modifier {
            value: modifier.value,
            reason: modifier.reason.clone(),
        });
    }

    let mut result = PhysicalResolution {
        to_hit,
        roll: None,
        hit: false,
        damage: None,
        displacement: None,
        log: CombatLog::new(),
    };

    match result.to_hit.resolution() {
        Resolution::Impossible(reason) => {
            log.push(Report::Impossible { reason });
        }
        Resolution::AutomaticFailure(_) => {}
        Resolution::AutomaticSuccess => result.hit = true,
        Resolution::Needs(needed) => {
            let roll = dice.d6(2);
            result.roll = Some(roll);
            result.hit = roll as i32 >= needed;
            log.push(Report::AttackRoll {
                needed,
                roll,
                hit: result.hit,
            });
        }
    }
    if result.hit {
        let attacker = request.attacker;
        let target = request.target.unit();
        let from = attacker.position();
        let to = request.target.position();

        match attack {
            PhysicalAttack::Push => {
                if let (Some(target), Some(at)) = (target, to) {
                    let occupancy = env.occupancy()?;
                    let board = env.board()?;
                    result.displacement =
                        displacement(board, occupancy, target, at, attacker.facing());
                    if let Some(moved) = result.displacement {
                        log.push(Report::Displaced {
                            unit: target.id(),
                            from: at,
                            to: moved.to(),
                        });
                    }
                }
            }
            PhysicalAttack::Punch(_) | PhysicalAttack::Kick(_) => {
                let direction = match (from, to, target) {
                    (Some(from), Some(to), Some(target)) => {
                        attack_direction(from, to, target.facing())
                    }
                    _ => AttackDirection::Front,
                };
                let amount = physical_damage(attacker, attack);
                let location = sink.hit_location(dice, direction);
                sink.damage(location, amount, None);
                log.push(Report::Damage { location, amount });
                result.damage = Some(DamageEvent {
                    location,
                    amount,
                    absorbed: 0,
                    critical_modifier: None,
                });
            }
        }
    }

    debug!(
        attacker = %request.attacker.id(),
        ?attack,
        hit = result.hit,
        "physical attack resolved"
    );
    result.log = log;
    Ok(result)
}
