//! Ammunition effectiveness estimates.
//!
//! Advisory numbers for decision-making collaborators ranking the ammunition
//! a weapon could fire at a target. Everything here evaluates the resolution
//! pipeline in expectation, using the exact 2d6 distribution instead of live
//! dice, and never touches the caller's loaded ammunition.

use tracing::trace;

use crate::cluster::{ClusterOptions, cluster_roll_modifiers, expected_cluster_hits};
use crate::config::RulesConfig;
use crate::damage::{Multiplier, salvo};
use crate::env::{AmmoBin, AmmoType, CombatEnv, Combatant, Mounted, Munition, WeaponFlags};
use crate::report::CombatLog;
use crate::resolve::{ResolveError, target_multiplier};
use crate::to_hit::{AttackRequest, compute_to_hit};

/// Expected damage of firing `weapon` loaded with `bin` at the request's
/// target: hit chance × mean hits × damage per hit × ammunition multiplier.
///
/// Impossible attacks are worth 0.
///
/// # Errors
///
/// Returns [`ResolveError`] when an oracle is missing or the catalog cannot
/// describe the weapon and ammunition.
pub fn expected_damage(
    env: &CombatEnv<'_>,
    request: &AttackRequest<'_>,
    weapon: &Mounted,
    bin: &AmmoBin,
) -> Result<f64, ResolveError> {
    let catalog = env.catalog()?;
    let rules = env.rules()?;
    let board = env.board()?;

    let mut candidate = weapon.clone();
    candidate.load(bin.clone());
    let snapshot = candidate.snapshot(catalog)?;

    let mut scratch = CombatLog::new();
    let outcome = compute_to_hit(env, request, &snapshot, &mut scratch)?;
    let p_hit = outcome.target_number.resolution().success_probability();
    if p_hit == 0.0 {
        return Ok(0.0);
    }

    let mut salvo = salvo(&snapshot);
    if snapshot.weapon.uses_ammo && snapshot.mode.is_multi_shot() {
        salvo.count = salvo.count.min(bin.shots_remaining);
        salvo.clustered = salvo.count > 1;
    }

    let streak = snapshot.weapon.flags.contains(WeaponFlags::STREAK) && !outcome.attacker_jammed;
    let mean_hits = if !salvo.clustered || streak {
        f64::from(salvo.count)
    } else {
        let modifier = cluster_roll_modifiers(
            &snapshot,
            request.target.unit(),
            outcome.attacker_jammed,
        )
        .iter()
        .map(|m| m.value)
        .sum();
        let options = ClusterOptions::from_rules(rules, snapshot.hotloaded);
        expected_cluster_hits(salvo.count, modifier, options)?
    };

    let multiplier = target_multiplier(
        board,
        &snapshot,
        request.target.unit(),
        request.target.position(),
    )?;
    let value = p_hit * mean_hits * f64::from(salvo.damage_each) * multiplier.as_f64();
    trace!(ammo = %bin.ammo, p_hit, mean_hits, %multiplier, value, "expected damage");
    Ok(value)
}

/// Extra value of a munition in the target's current state.
///
/// Inferno rounds are worth double against a target already running hot;
/// cluster rounds are worth half again against a target with little armor
/// left.
pub fn situational_multiplier(
    target: Option<&dyn Combatant>,
    ammo: &AmmoType,
    rules: &RulesConfig,
) -> Multiplier {
    let Some(target) = target else {
        return Multiplier::ONE;
    };
    match ammo.munition {
        Munition::Inferno if target.tracks_heat() && target.heat() >= rules.overheat_threshold => {
            Multiplier::DOUBLE
        }
        Munition::Cluster if target.armor_ratio_percent() <= rules.light_armor_ratio_percent => {
            Multiplier::THREE_HALVES
        }
        _ => Multiplier::ONE,
    }
}

/// Rank candidate bins for `weapon` and return the best `(index, value)`.
///
/// Bins whose ammunition does not fit the weapon are skipped. Ties go to the
/// lower index. Returns `None` when no bin fits. Committing the choice is the
/// caller's business, through [`Mounted::load`].
///
/// # Errors
///
/// Returns [`ResolveError`] when an oracle is missing or a bin names
/// ammunition absent from the catalog.
pub fn ammo_adjusted_damage(
    env: &CombatEnv<'_>,
    request: &AttackRequest<'_>,
    weapon: &Mounted,
    bins: &[AmmoBin],
) -> Result<Option<(usize, f64)>, ResolveError> {
    let catalog = env.catalog()?;
    let rules = env.rules()?;
    let weapon_type = catalog
        .weapon(&weapon.weapon)
        .ok_or_else(|| ResolveError::UnknownWeapon(weapon.weapon.clone()))?;

    let mut best: Option<(usize, f64)> = None;
    for (index, bin) in bins.iter().enumerate() {
        let ammo = catalog
            .ammo(&bin.ammo)
            .ok_or_else(|| ResolveError::UnknownAmmo(bin.ammo.clone()))?;
        if !ammo.fits(weapon_type) {
            continue;
        }
        let situational = situational_multiplier(request.target.unit(), ammo, rules);
        let value = expected_damage(env, request, weapon, bin)? * situational.as_f64();
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((index, value));
        }
    }
    Ok(best)
}
