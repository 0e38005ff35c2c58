//! Modifier orchestrator.
//!
//! [`compute_to_hit`] composes the range, arc, terrain and electronic-warfare
//! resolvers with attacker and target state into one [`TargetNumber`]. Stages
//! run in a fixed order and evaluation stops at the first stage that makes the
//! attack impossible or an automatic failure.

mod criticals;
mod movement;
mod posture;
mod secondary;
mod situational;

pub use movement::{heat_modifier, target_movement_modifier};
pub use secondary::primary_target;

pub(crate) use movement::{attacker_movement, target_movement};
pub(crate) use posture::target_posture;
pub(crate) use situational::immobility;

use tracing::debug;

use crate::arc::is_in_arc;
use crate::config::RulesConfig;
use crate::ecm::{Emitter, Observer, is_affected_by_ecm, is_protected_by_ecm};
use crate::env::{
    BoardOracle, CombatEnv, Combatant, Munition, OracleError, UnitId, WeaponFlags, WeaponSnapshot,
};
use crate::error::ErrorContext;
use crate::hex::Hex;
use crate::range::{RangeBracket, effective_distance, range_bracket};
use crate::report::{CombatLog, Report};
use crate::resolve::ResolveError;
use crate::target_number::{Classification, TargetNumber};
use crate::terrain::{LosEffects, Viewpoint, firing_ranges, line_of_sight, underwater_restriction};

/// What an attack is aimed at.
#[derive(Clone, Copy)]
pub enum AttackTarget<'a> {
    Unit(&'a dyn Combatant),
    /// A hex, or the building or terrain standing on it.
    Hex(Hex),
}

impl<'a> AttackTarget<'a> {
    pub fn position(&self) -> Option<Hex> {
        match self {
            AttackTarget::Unit(unit) => unit.position(),
            AttackTarget::Hex(hex) => Some(*hex),
        }
    }

    pub fn unit(&self) -> Option<&'a dyn Combatant> {
        match self {
            AttackTarget::Unit(unit) => Some(*unit),
            AttackTarget::Hex(_) => None,
        }
    }

    pub fn key(&self) -> TargetKey {
        match self {
            AttackTarget::Unit(unit) => TargetKey::Unit(unit.id()),
            AttackTarget::Hex(hex) => TargetKey::Hex(*hex),
        }
    }

    fn elevation(&self) -> i32 {
        self.unit().map_or(0, |unit| unit.elevation())
    }

    fn is_submerged(&self) -> bool {
        self.unit().is_some_and(|unit| unit.is_submerged())
    }
}

/// Identity of a target, for matching against declared targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKey {
    Unit(UnitId),
    Hex(Hex),
}

/// A target the attacker declared earlier this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declared {
    pub key: TargetKey,
    pub position: Hex,
}

/// One attack to evaluate. The weapon is passed separately.
#[derive(Clone, Copy)]
pub struct AttackRequest<'a> {
    pub attacker: &'a dyn Combatant,
    pub target: AttackTarget<'a>,
    /// Targets declared this turn, in declaration order.
    pub declared: &'a [Declared],
    /// Unit spotting for indirect fire.
    pub spotter: Option<&'a dyn Combatant>,
    /// Forces the attacker's ECM status instead of tracing fields.
    pub ecm_override: Option<bool>,
}

impl<'a> AttackRequest<'a> {
    pub fn new(attacker: &'a dyn Combatant, target: AttackTarget<'a>) -> Self {
        Self {
            attacker,
            target,
            declared: &[],
            spotter: None,
            ecm_override: None,
        }
    }

    #[must_use]
    pub fn with_declared(mut self, declared: &'a [Declared]) -> Self {
        self.declared = declared;
        self
    }

    #[must_use]
    pub fn with_spotter(mut self, spotter: &'a dyn Combatant) -> Self {
        self.spotter = Some(spotter);
        self
    }

    #[must_use]
    pub fn with_ecm_override(mut self, affected: bool) -> Self {
        self.ecm_override = Some(affected);
        self
    }
}

/// Result of the modifier pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToHitOutcome {
    pub target_number: TargetNumber,
    /// `None` when evaluation stopped before range was resolved.
    pub bracket: Option<RangeBracket>,
    pub distance: u32,
    pub los: Option<LosEffects>,
    /// Attacker's guidance is jammed on the line to the target.
    pub attacker_jammed: bool,
}

struct Stages<'a, 'w> {
    board: &'a dyn BoardOracle,
    rules: &'a RulesConfig,
    emitters: &'a [Emitter],
    request: &'a AttackRequest<'a>,
    weapon: &'a WeaponSnapshot<'w>,
    log: &'a mut CombatLog,
}

macro_rules! stage {
    ($tn:expr, $stage:expr) => {{
        $tn.append($stage);
        if $tn.is_terminal() {
            return;
        }
    }};
}

/// Accumulate the target number for one weapon against one target.
///
/// Rule-legality failures come back as an impossible classification inside
/// the outcome. Errors are reserved for missing oracles.
///
/// # Errors
///
/// Returns [`ResolveError::Oracle`] when the board, emitters or rules are
/// missing from `env`, or when a hex target lies off the board.
pub fn compute_to_hit(
    env: &CombatEnv<'_>,
    request: &AttackRequest<'_>,
    weapon: &WeaponSnapshot<'_>,
    log: &mut CombatLog,
) -> Result<ToHitOutcome, ResolveError> {
    let attacker = request.attacker;
    let board = env.board()?;
    if let AttackTarget::Hex(hex) = request.target
        && !board.contains(hex)
    {
        let context = ErrorContext::new()
            .with_attacker(attacker.id())
            .with_hex(hex)
            .with_message("attack aimed at a hex");
        return Err(OracleError::HexOffBoard { hex, context }.into());
    }

    let mut outcome = ToHitOutcome {
        target_number: TargetNumber::new(attacker.gunnery(), "gunnery skill"),
        bracket: None,
        distance: 0,
        los: None,
        attacker_jammed: false,
    };

    let mut stages = Stages {
        board,
        rules: env.rules()?,
        emitters: env.emitters()?.emitters(),
        request,
        weapon,
        log,
    };
    stages.run(&mut outcome);

    let tn = &outcome.target_number;
    for modifier in tn.modifiers() {
        stages.log.push(Report::Modifier {
            value: modifier.value,
            reason: modifier.reason.clone(),
        });
    }
    if tn.classification() == Classification::Impossible {
        stages.log.push(Report::Impossible {
            reason: tn.reason().unwrap_or_default().to_owned(),
        });
    }
    debug!(
        attacker = %attacker.id(),
        weapon = %weapon.weapon.id,
        target_number = %tn,
        "to-hit computed"
    );
    Ok(outcome)
}

impl Stages<'_, '_> {
    fn run(&mut self, outcome: &mut ToHitOutcome) {
        let request = self.request;
        let attacker = request.attacker;
        let weapon = self.weapon;
        let rules = self.rules;
        let tn = &mut outcome.target_number;

        let Some(attacker_pos) = attacker.position() else {
            tn.set_impossible("attacker is not on the board");
            return;
        };
        let Some(target_pos) = request.target.position() else {
            tn.set_impossible("target is not on the board");
            return;
        };
        let target_unit = request.target.unit();

        // 1. weapon state and immobility
        stage!(tn, situational::weapon_state(weapon));
        stage!(tn, immobility(&request.target));

        let jammed = request.ecm_override.unwrap_or_else(|| {
            is_affected_by_ecm(
                &Observer::of(attacker),
                Some(attacker_pos),
                Some(target_pos),
                self.emitters,
            )
        });
        outcome.attacker_jammed = jammed;
        self.log.push(Report::Ecm {
            unit: attacker.id(),
            affected: jammed,
        });

        // 2. range and arc
        let attacker_submerged = attacker.is_submerged();
        let target_submerged = request.target.is_submerged();
        if let Some(reason) =
            underwater_restriction(weapon.weapon, attacker_submerged, target_submerged)
        {
            tn.set_impossible(reason);
            return;
        }
        let ranges = firing_ranges(weapon.weapon, attacker_submerged, target_submerged);
        let distance = effective_distance(
            self.board,
            attacker_pos,
            attacker.elevation(),
            target_pos,
            request.target.elevation(),
        );
        let bracket = range_bracket(
            distance,
            ranges,
            rules.advanced_range,
            rules.extreme_range_multiplier,
        );
        outcome.distance = distance;
        outcome.bracket = Some(bracket);
        self.log.push(Report::RangeResolved { distance, bracket });
        if bracket == RangeBracket::Out {
            tn.set_impossible("target out of range");
            return;
        }
        if !is_in_arc(attacker_pos, attacker.facing(), target_pos, weapon.arc) {
            tn.set_impossible("target not in arc");
            return;
        }
        tn.add(bracket.modifier(), format!("{bracket} range"));

        // 3. terrain and line of sight
        let to = match request.target {
            AttackTarget::Unit(unit) => Viewpoint::of_unit(self.board, unit, target_pos),
            AttackTarget::Hex(hex) => Viewpoint::of_hex(self.board, hex),
        };
        let from = Viewpoint::of_unit(self.board, attacker, attacker_pos);
        let probe = attacker.has_active_probe() && !jammed;
        let los = line_of_sight(self.board, rules, &from, &to, probe);
        outcome.los = Some(los);
        self.log.push(Report::LineOfSight {
            blocked: los.blocked,
            woods: los.woods,
            smoke: los.smoke,
        });
        if los.blocked {
            stage!(tn, self.indirect_fire(&to));
        } else {
            tn.append(los.modifiers());
        }

        // 4. minimum range and same hex
        stage!(
            tn,
            situational::minimum_range(attacker, target_unit, distance, weapon, ranges, rules)
        );

        // 5. attacker movement and heat
        tn.append(attacker_movement(attacker));
        tn.append(movement::attacker_heat(attacker));

        // 6. target movement
        if let Some(target) = target_unit {
            let precision = weapon.munition() == Munition::Precision;
            tn.append(target_movement(
                target,
                rules.advanced_target_modifiers,
                precision,
            ));
        }

        // 7. posture
        stage!(
            tn,
            posture::attacker_posture(self.board, attacker, attacker_pos, weapon)
        );
        if let Some(target) = target_unit {
            tn.append(target_posture(target, distance));
        }

        // 8. secondary target
        stage!(
            tn,
            secondary::secondary_target(
                attacker,
                attacker_pos,
                request.target.key(),
                target_pos,
                request.declared,
            )
        );

        // 9. critical damage
        tn.append(criticals::actuator_damage(attacker, weapon.location));
        tn.append(criticals::sensor_damage(attacker));

        // 10. weapon and ammunition
        tn.append(situational::intrinsic(weapon, target_unit));

        // 11. stealth
        if let Some(target) = target_unit {
            let emitters = self.emitters;
            tn.append(situational::stealth(target, bracket, rules, || {
                is_protected_by_ecm(
                    &Observer::of(target),
                    Some(target_pos),
                    Some(target_pos),
                    emitters,
                )
            }));
        }
    }

    /// Indirect fire through a spotter when direct sight is blocked.
    fn indirect_fire(&self, to: &Viewpoint) -> TargetNumber {
        let weapon = self.weapon.weapon;
        let spotter = self.request.spotter.and_then(|s| s.position().map(|p| (s, p)));
        let usable = weapon.flags.contains(WeaponFlags::INDIRECT) && self.rules.indirect_fire;

        let Some((spotter, position)) = spotter.filter(|_| usable) else {
            return TargetNumber::impossible("no line of sight");
        };

        let from = Viewpoint::of_unit(self.board, spotter, position);
        let los = line_of_sight(self.board, self.rules, &from, to, spotter.has_active_probe());
        if los.blocked {
            return TargetNumber::impossible("spotter has no line of sight");
        }

        let mut tn = TargetNumber::zero();
        tn.add(1, "indirect fire");
        tn.append(los.modifiers());
        for modifier in attacker_movement(spotter).modifiers() {
            tn.add(modifier.value, format!("spotter: {}", modifier.reason));
        }
        tn
    }
}
