//! Terrain and line-of-sight modifiers.
//!
//! The line between two units is walked hex by hex. Hills and buildings taller
//! than both units block it outright; woods, jungle, smoke and geysers add up
//! and block once the intervening total reaches three. Where the line runs
//! along a hex seam the defender picks the worse of the two hexes.

use tracing::debug;

use crate::config::RulesConfig;
use crate::env::{BoardOracle, BuildingId, Combatant, Terrain, WeaponFlags, WeaponType};
use crate::hex::{Hex, LineStep, intervening};
use crate::range::RangeTable;
use crate::target_number::TargetNumber;

/// Intervening woods, smoke and geysers at or above this total block sight.
pub const BLOCKING_DENSITY: u32 = 3;

/// Features rise this many levels above their hex's ground.
const FEATURE_HEIGHT: i32 = 2;

/// One end of a sightline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewpoint {
    pub hex: Hex,
    /// Ground level of the hex.
    pub ground: i32,
    /// Absolute level of the top of whatever stands here.
    pub top: i32,
    pub standing_mech: bool,
    /// A standing mech up to its waist in depth-1 water.
    pub in_shallow_water: bool,
}

impl Viewpoint {
    /// Viewpoint of a unit standing at `hex`.
    pub fn of_unit(board: &dyn BoardOracle, unit: &dyn Combatant, hex: Hex) -> Self {
        let ground = board.level(hex);
        let standing_mech = unit.is_mech() && !unit.is_prone();
        Self {
            hex,
            ground,
            top: ground + unit.elevation() + unit.height(),
            standing_mech,
            in_shallow_water: standing_mech
                && board.water_depth(hex) == 1
                && unit.elevation() == -1,
        }
    }

    /// Viewpoint of a bare hex (or the building on it).
    pub fn of_hex(board: &dyn BoardOracle, hex: Hex) -> Self {
        let ground = board.level(hex);
        Self {
            hex,
            ground,
            top: ground + board.building_height(hex),
            standing_mech: false,
            in_shallow_water: false,
        }
    }
}

/// What gives a target partial cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cover {
    /// Hill or rise one level above the target.
    Terrain,
    Building(BuildingId),
    Water,
}

/// Outcome of tracing a sightline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosEffects {
    pub blocked: bool,
    /// Intervening woods and jungle.
    pub woods: u32,
    /// Intervening smoke and geysers.
    pub smoke: u32,
    /// Woods, jungle and smoke in the target's own hex.
    pub target_terrain: u32,
    pub cover: Option<Cover>,
}

impl LosEffects {
    pub fn intervening_total(&self) -> u32 {
        self.woods + self.smoke
    }

    /// To-hit contributions of this sightline. Blocking is reported by the
    /// caller, which knows whether indirect fire can bypass it.
    pub fn modifiers(&self) -> TargetNumber {
        let mut tn = TargetNumber::zero();
        tn.add(self.woods as i32, "intervening woods");
        tn.add(self.smoke as i32, "intervening smoke");
        tn.add(self.target_terrain as i32, "target in woods or smoke");
        if let Some(cover) = self.cover {
            let reason = match cover {
                Cover::Terrain => "partial cover",
                Cover::Building(_) => "partial cover (building)",
                Cover::Water => "partial cover (water)",
            };
            tn.add(1, reason);
        }
        tn
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct HexEffect {
    blocks: bool,
    woods: u32,
    smoke: u32,
}

impl HexEffect {
    fn total(&self) -> u32 {
        self.woods + self.smoke
    }
}

/// Woods and jungle density of a hex under the current rules.
fn woods_density(board: &dyn BoardOracle, rules: &RulesConfig, hex: Hex, probe: bool) -> u32 {
    let woods = board.terrain_level(hex, Terrain::Woods).map_or(0, u32::from);
    let mut jungle = board.terrain_level(hex, Terrain::Jungle).map_or(0, u32::from);
    if rules.advanced_woods && jungle > 0 {
        jungle += 1;
    }
    let reduce = |density: u32| {
        if rules.advanced_woods && probe {
            density.saturating_sub(1)
        } else {
            density
        }
    };
    reduce(woods) + reduce(jungle)
}

fn smoke_density(board: &dyn BoardOracle, hex: Hex) -> u32 {
    board.terrain_level(hex, Terrain::Smoke).map_or(0, u32::from)
}

fn hex_effect(
    board: &dyn BoardOracle,
    rules: &RulesConfig,
    hex: Hex,
    from: &Viewpoint,
    to: &Viewpoint,
    probe: bool,
) -> HexEffect {
    let ground = board.level(hex);
    let top = ground + board.building_height(hex);
    let blocks = top > from.top && top > to.top;

    let mut effect = HexEffect {
        blocks,
        ..HexEffect::default()
    };
    if ground + FEATURE_HEIGHT >= from.top.max(to.top) {
        effect.woods = woods_density(board, rules, hex, probe);
        effect.smoke = smoke_density(board, hex)
            + u32::from(board.contains_terrain(hex, Terrain::Geyser));
    }
    effect
}

/// Cover the hex adjacent to the target gives a standing mech.
fn cover_from(board: &dyn BoardOracle, hex: Hex, target: &Viewpoint) -> Option<Cover> {
    if !target.standing_mech {
        return None;
    }
    let ground = board.level(hex);
    let top = ground + board.building_height(hex);
    if top != target.ground + 1 {
        return None;
    }
    match board.building(hex) {
        Some(id) if ground < top => Some(Cover::Building(id)),
        _ => Some(Cover::Terrain),
    }
}

/// Trace the sightline from `from` to `to`.
///
/// # Arguments
///
/// * `probe` - The viewer has a working active probe (not jammed)
pub fn line_of_sight(
    board: &dyn BoardOracle,
    rules: &RulesConfig,
    from: &Viewpoint,
    to: &Viewpoint,
    probe: bool,
) -> LosEffects {
    let steps = intervening(from.hex, to.hex);
    let mut los = LosEffects::default();

    for step in &steps {
        let effect = match *step {
            LineStep::Single(hex) => hex_effect(board, rules, hex, from, to, probe),
            LineStep::Split(a, b) => {
                let ea = hex_effect(board, rules, a, from, to, probe);
                let eb = hex_effect(board, rules, b, from, to, probe);
                let worse = if eb.total() > ea.total() { eb } else { ea };
                HexEffect {
                    blocks: ea.blocks || eb.blocks,
                    ..worse
                }
            }
        };
        los.blocked |= effect.blocks;
        los.woods += effect.woods;
        los.smoke += effect.smoke;
    }

    if los.intervening_total() >= BLOCKING_DENSITY {
        los.blocked = true;
    }

    los.target_terrain = woods_density(board, rules, to.hex, probe) + smoke_density(board, to.hex);

    los.cover = if to.in_shallow_water {
        Some(Cover::Water)
    } else {
        steps.last().and_then(|step| {
            step.hexes()
                .iter()
                .find_map(|&hex| cover_from(board, hex, to))
        })
    };

    debug!(
        from = %from.hex,
        to = %to.hex,
        blocked = los.blocked,
        woods = los.woods,
        smoke = los.smoke,
        cover = ?los.cover,
        "line of sight"
    );
    los
}

/// Reason a weapon cannot engage across the water surface, if any.
pub fn underwater_restriction(
    weapon: &WeaponType,
    attacker_submerged: bool,
    target_submerged: bool,
) -> Option<&'static str> {
    if target_submerged && weapon.underwater_ranges.is_none() {
        return Some("target is underwater");
    }
    if weapon.flags.contains(WeaponFlags::UNDERWATER_ONLY) && !target_submerged {
        return Some("weapon can only fire underwater");
    }
    if attacker_submerged && weapon.underwater_ranges.is_none() {
        return Some("weapon cannot fire underwater");
    }
    None
}

/// Range table used for a shot: underwater ranges when both ends are submerged.
pub fn firing_ranges(
    weapon: &WeaponType,
    attacker_submerged: bool,
    target_submerged: bool,
) -> &RangeTable {
    match &weapon.underwater_ranges {
        Some(table) if attacker_submerged && target_submerged => table,
        _ => &weapon.ranges,
    }
}
