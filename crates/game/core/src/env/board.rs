use crate::hex::Hex;

/// Terrain features the engine asks about.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Terrain {
    /// Level 1 light, 2 heavy, 3 ultra-heavy.
    Woods,
    Jungle,
    /// Level 1 light, 2 heavy.
    Smoke,
    Geyser,
    /// Level is the depth.
    Water,
    /// Level is the height in levels.
    Building,
    Rough,
    Fire,
}

/// Identity of a building spanning one or more hexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingId(pub u32);

/// Read-only view of the hex map.
pub trait BoardOracle {
    fn contains(&self, hex: Hex) -> bool;

    /// Ground level of a hex. For water hexes this is the surface.
    fn level(&self, hex: Hex) -> i32;

    /// Level of a terrain feature in a hex, `None` when absent.
    fn terrain_level(&self, hex: Hex, terrain: Terrain) -> Option<u8>;

    fn contains_terrain(&self, hex: Hex, terrain: Terrain) -> bool {
        self.terrain_level(hex, terrain).is_some()
    }

    /// Building occupying a hex, if any.
    fn building(&self, hex: Hex) -> Option<BuildingId>;

    fn building_height(&self, hex: Hex) -> i32 {
        self.terrain_level(hex, Terrain::Building)
            .map_or(0, i32::from)
    }

    fn water_depth(&self, hex: Hex) -> i32 {
        self.terrain_level(hex, Terrain::Water).map_or(0, i32::from)
    }
}
