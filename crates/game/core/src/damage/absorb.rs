use tracing::trace;

use crate::env::Absorber;

/// Split of one damage amount between a structure and the unit behind it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Absorption {
    pub absorbed: u32,
    pub passed: u32,
}

/// Damage the structure can still soak: remaining CF scaled by its fraction.
pub fn absorption_capacity(absorber: &dyn Absorber) -> u32 {
    let (num, den) = absorber.damage_scale();
    if den == 0 {
        return 0;
    }
    (u64::from(absorber.construction_factor()) * u64::from(num) / u64::from(den)) as u32
}

/// Route `damage` through a structure, debiting what it absorbs.
pub fn absorb(damage: u32, absorber: &mut dyn Absorber) -> Absorption {
    let absorbed = damage.min(absorption_capacity(absorber));
    if absorbed > 0 {
        absorber.debit(absorbed);
    }
    trace!(damage, absorbed, "structure absorption");
    Absorption {
        absorbed,
        passed: damage - absorbed,
    }
}
