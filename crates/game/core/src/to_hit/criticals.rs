//! Modifiers from critical damage to the attacker.

use crate::env::{Actuator, Combatant, Location};
use crate::target_number::TargetNumber;

/// Arm actuator damage for a weapon mounted at `location`.
///
/// A destroyed shoulder replaces the upper and lower arm penalties.
pub fn actuator_damage(attacker: &dyn Combatant, location: Location) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    if !location.is_arm() {
        return tn;
    }
    if attacker.actuator_damaged(location, Actuator::Shoulder) {
        tn.add(4, "shoulder actuator destroyed");
        return tn;
    }
    if attacker.actuator_damaged(location, Actuator::UpperArm) {
        tn.add(1, "upper arm actuator damaged");
    }
    if attacker.actuator_damaged(location, Actuator::LowerArm) {
        tn.add(1, "lower arm actuator damaged");
    }
    tn
}

pub fn sensor_damage(attacker: &dyn Combatant) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    match attacker.sensor_hits() {
        0 => {}
        1 => tn.add(2, "sensor damage"),
        _ => tn.add(4, "sensors destroyed"),
    }
    tn
}
