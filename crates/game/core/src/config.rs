/// Named ruleset toggles threaded through every affected computation.
///
/// Two independent "advanced" families exist. The tactical-operations family
/// (`advanced_range`, `advanced_woods`) changes range brackets and terrain
/// density; the maximum-tech family (`advanced_target_modifiers`,
/// `advanced_cluster_floor`) changes target movement bands and the cluster
/// roll floor. They never touch the same stage, so any combination is valid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Allow shots beyond long range into the extreme bracket.
    pub advanced_range: bool,
    /// Extreme bound = medium × multiplier for weapons without an explicit one.
    pub extreme_range_multiplier: u32,
    /// Wider target movement bands with a higher cap.
    pub advanced_target_modifiers: bool,
    /// Jungle density +1 and active probes thin woods by one level.
    pub advanced_woods: bool,
    /// Cluster roll clamps at 1 instead of 2.
    pub advanced_cluster_floor: bool,
    pub hotload_waives_minimum_range: bool,
    pub indirect_fire: bool,
    /// Stealth armor only works while the unit's own ECM is not countered.
    pub stealth_requires_own_ecm: bool,

    // ===== jam / explode =====
    /// Base jam threshold for rapid-fire weapons in multi-shot modes.
    pub jam_threshold: u32,
    /// Added to the threshold when firing caseless ammunition.
    pub caseless_jam_bonus: u32,
    /// Second roll at or below this destroys the weapon instead of jamming it.
    pub jam_destroy_threshold: u32,

    // ===== ammunition heuristic =====
    pub overheat_threshold: i32,
    pub light_armor_ratio_percent: u32,
}

impl RulesConfig {
    pub const DEFAULT_EXTREME_RANGE_MULTIPLIER: u32 = 2;
    pub const DEFAULT_JAM_THRESHOLD: u32 = 2;
    pub const DEFAULT_CASELESS_JAM_BONUS: u32 = 1;
    pub const DEFAULT_JAM_DESTROY_THRESHOLD: u32 = 4;
    pub const DEFAULT_OVERHEAT_THRESHOLD: i32 = 10;
    pub const DEFAULT_LIGHT_ARMOR_RATIO_PERCENT: u32 = 40;

    pub fn new() -> Self {
        Self {
            advanced_range: false,
            extreme_range_multiplier: Self::DEFAULT_EXTREME_RANGE_MULTIPLIER,
            advanced_target_modifiers: false,
            advanced_woods: false,
            advanced_cluster_floor: false,
            hotload_waives_minimum_range: false,
            indirect_fire: true,
            stealth_requires_own_ecm: true,
            jam_threshold: Self::DEFAULT_JAM_THRESHOLD,
            caseless_jam_bonus: Self::DEFAULT_CASELESS_JAM_BONUS,
            jam_destroy_threshold: Self::DEFAULT_JAM_DESTROY_THRESHOLD,
            overheat_threshold: Self::DEFAULT_OVERHEAT_THRESHOLD,
            light_armor_ratio_percent: Self::DEFAULT_LIGHT_ARMOR_RATIO_PERCENT,
        }
    }

    /// Every optional rule switched on.
    pub fn advanced() -> Self {
        Self {
            advanced_range: true,
            advanced_target_modifiers: true,
            advanced_woods: true,
            advanced_cluster_floor: true,
            hotload_waives_minimum_range: true,
            ..Self::new()
        }
    }

    pub fn with_advanced_range(mut self, enabled: bool) -> Self {
        self.advanced_range = enabled;
        self
    }

    pub fn with_advanced_target_modifiers(mut self, enabled: bool) -> Self {
        self.advanced_target_modifiers = enabled;
        self
    }

    pub fn with_advanced_woods(mut self, enabled: bool) -> Self {
        self.advanced_woods = enabled;
        self
    }

    pub fn with_advanced_cluster_floor(mut self, enabled: bool) -> Self {
        self.advanced_cluster_floor = enabled;
        self
    }

    pub fn with_hotload_waives_minimum_range(mut self, enabled: bool) -> Self {
        self.hotload_waives_minimum_range = enabled;
        self
    }

    pub fn with_indirect_fire(mut self, enabled: bool) -> Self {
        self.indirect_fire = enabled;
        self
    }

    pub fn with_stealth_requires_own_ecm(mut self, enabled: bool) -> Self {
        self.stealth_requires_own_ecm = enabled;
        self
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
