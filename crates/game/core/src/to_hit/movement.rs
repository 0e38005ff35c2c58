//! Movement and heat modifiers.

use crate::env::{Combatant, MoveKind};
use crate::target_number::TargetNumber;

/// Attacker movement: walked +1, ran +2, jumped or flew +3.
pub fn attacker_movement(attacker: &dyn Combatant) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    match attacker.movement().kind {
        MoveKind::Stationary => {}
        MoveKind::Walked => tn.add(1, "attacker walked"),
        MoveKind::Ran => tn.add(2, "attacker ran"),
        MoveKind::Jumped => tn.add(3, "attacker jumped"),
        MoveKind::Flew => tn.add(3, "attacker airborne"),
    }
    tn
}

/// Heat scale penalty for the attacker.
pub fn heat_modifier(heat: i32) -> i32 {
    match heat {
        i32::MIN..=7 => 0,
        8..=12 => 1,
        13..=16 => 2,
        17..=23 => 3,
        _ => 4,
    }
}

pub fn attacker_heat(attacker: &dyn Combatant) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    tn.add(heat_modifier(attacker.heat()), "attacker heat");
    tn
}

/// Target movement modifier for `hexes` moved.
pub fn target_movement_modifier(hexes: u32, advanced: bool) -> i32 {
    if advanced {
        match hexes {
            0..=2 => 0,
            3..=4 => 1,
            5..=6 => 2,
            7..=9 => 3,
            10..=13 => 4,
            14..=18 => 5,
            19..=24 => 6,
            _ => 7,
        }
    } else {
        match hexes {
            0..=2 => 0,
            3..=4 => 1,
            5..=6 => 2,
            7..=9 => 3,
            10..=17 => 4,
            18..=24 => 5,
            _ => 6,
        }
    }
}

/// Target movement, including the jump bonus.
///
/// Precision rounds cancel up to two points of the movement modifier.
pub fn target_movement(target: &dyn Combatant, advanced: bool, precision: bool) -> TargetNumber {
    let movement = target.movement();
    let mut modifier = target_movement_modifier(movement.hexes, advanced);
    if movement.kind == MoveKind::Jumped {
        modifier += 1;
    }

    let mut tn = TargetNumber::zero();
    tn.add(modifier, format!("target moved {} hexes", movement.hexes));
    if precision {
        tn.add(-modifier.min(2), "precision ammunition");
    }
    tn
}
