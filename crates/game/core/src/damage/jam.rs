//! Jam and explode checks for rapid-fire weapons and caseless ammunition.

use tracing::debug;

use crate::config::RulesConfig;
use crate::dice::DiceOracle;
use crate::env::{WeaponFlags, WeaponMode, WeaponSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JamOutcome {
    Clear { roll: u32 },
    /// The weapon cannot fire until the jam is cleared next phase.
    Jammed { roll: u32 },
    Destroyed { roll: u32, second: u32 },
}

impl JamOutcome {
    /// Whether the weapon still fires this attack.
    pub fn fires(self) -> bool {
        matches!(self, JamOutcome::Clear { .. })
    }
}

/// Roll at or below which the weapon malfunctions; `None` when no check runs.
pub fn jam_threshold(weapon: &WeaponSnapshot<'_>, rules: &RulesConfig) -> Option<u32> {
    let rapid = weapon.weapon.flags.contains(WeaponFlags::RAPID_FIRE);
    let base = match weapon.mode {
        WeaponMode::Ultra if rapid => rules.jam_threshold,
        WeaponMode::Rotary(shots) if rapid => {
            rules.jam_threshold
                + match shots {
                    0..=3 => 0,
                    4..=5 => 1,
                    _ => 2,
                }
        }
        _ => 0,
    };

    if weapon.is_caseless() {
        Some(base.max(1) + rules.caseless_jam_bonus)
    } else if base > 0 {
        Some(base)
    } else {
        None
    }
}

/// Run the malfunction check for a single shot, if the weapon needs one.
///
/// A roll at or below the threshold malfunctions; a second independent roll at
/// or below `jam_destroy_threshold` destroys the weapon instead of jamming it.
pub fn jam_check(
    weapon: &WeaponSnapshot<'_>,
    rules: &RulesConfig,
    dice: &mut dyn DiceOracle,
) -> Option<JamOutcome> {
    let threshold = jam_threshold(weapon, rules)?;
    let roll = dice.d6(2);
    let outcome = if roll > threshold {
        JamOutcome::Clear { roll }
    } else {
        let second = dice.d6(2);
        if second <= rules.jam_destroy_threshold {
            JamOutcome::Destroyed { roll, second }
        } else {
            JamOutcome::Jammed { roll }
        }
    };
    debug!(weapon = %weapon.weapon.id, threshold, ?outcome, "jam check");
    Some(outcome)
}

/// Malfunction checks for every shot of one firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiringCheck {
    /// Shots that cleared before the weapon malfunctioned.
    pub cleared: u32,
    /// The malfunction, or the last clear roll when every shot cleared.
    pub outcome: JamOutcome,
}

impl FiringCheck {
    pub fn malfunctioned(&self) -> bool {
        !self.outcome.fires()
    }
}

/// Check `shots` shots in order, stopping at the first malfunction.
///
/// Shots before the malfunction still fire; the malfunctioning shot and any
/// after it do not. Returns `None` when the weapon needs no check or fires
/// nothing.
pub fn firing_check(
    weapon: &WeaponSnapshot<'_>,
    shots: u32,
    rules: &RulesConfig,
    dice: &mut dyn DiceOracle,
) -> Option<FiringCheck> {
    let mut last = None;
    for shot in 0..shots {
        let outcome = jam_check(weapon, rules, dice)?;
        if !outcome.fires() {
            return Some(FiringCheck {
                cleared: shot,
                outcome,
            });
        }
        last = Some(outcome);
    }
    last.map(|outcome| FiringCheck {
        cleared: shots,
        outcome,
    })
}
