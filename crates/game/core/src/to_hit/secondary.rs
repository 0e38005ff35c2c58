//! Secondary target penalties.

use crate::arc::{Arc, is_in_arc};
use crate::env::Combatant;
use crate::hex::Hex;
use crate::target_number::TargetNumber;

use super::{Declared, TargetKey};

/// Primary target among the declared ones: the first inside the forward arc,
/// else the first declared.
pub fn primary_target(
    attacker: &dyn Combatant,
    position: Hex,
    declared: &[Declared],
) -> Option<TargetKey> {
    let facing = attacker.facing();
    declared
        .iter()
        .find(|d| is_in_arc(position, facing, d.position, Arc::Forward))
        .or_else(|| declared.first())
        .map(|d| d.key)
}

pub fn secondary_target(
    attacker: &dyn Combatant,
    position: Hex,
    target: TargetKey,
    target_position: Hex,
    declared: &[Declared],
) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    match primary_target(attacker, position, declared) {
        None => return tn,
        Some(primary) if primary == target => return tn,
        Some(_) => {}
    }

    if attacker.is_infantry() {
        tn.set_impossible("infantry cannot engage secondary targets");
    } else if attacker.is_mech() && attacker.stealth().is_some() {
        tn.set_impossible("active stealth armor prevents secondary targets");
    } else if is_in_arc(position, attacker.facing(), target_position, Arc::Forward) {
        tn.add(1, "secondary target");
    } else {
        tn.add(2, "secondary target outside forward arc");
    }
    tn
}
