//! Prone, hull-down and wading modifiers.

use crate::env::{BoardOracle, Combatant, WeaponSnapshot};
use crate::hex::Hex;
use crate::target_number::TargetNumber;

/// Restrictions and penalties from the attacker's own posture.
pub fn attacker_posture(
    board: &dyn BoardOracle,
    attacker: &dyn Combatant,
    position: Hex,
    weapon: &WeaponSnapshot<'_>,
) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    let location = weapon.location;

    if attacker.is_prone() {
        if location.is_leg() {
            tn.set_impossible("prone units cannot fire leg-mounted weapons");
            return tn;
        }
        if let Some(other) = location.opposite_arm()
            && attacker.is_location_destroyed(other)
        {
            tn.set_impossible("no arm free to prop up on");
            return tn;
        }
        tn.add(2, "attacker prone");
    } else if attacker.is_mech()
        && location.is_leg()
        && board.water_depth(position) == 1
        && attacker.elevation() == -1
    {
        tn.set_impossible("leg weapons are underwater");
    }
    tn
}

/// Modifiers from the target lying down or hiding behind cover.
pub fn target_posture(target: &dyn Combatant, distance: u32) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    if target.is_prone() {
        if distance <= 1 {
            tn.add(-2, "target prone and adjacent");
        } else {
            tn.add(1, "target prone");
        }
    }
    if target.is_hull_down() {
        tn.add(2, "target hull down");
    }
    tn
}
