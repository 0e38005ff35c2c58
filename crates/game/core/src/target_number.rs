//! Modifier accumulator.
//!
//! A [`TargetNumber`] collects signed contributions with a reason each, plus a
//! classification. Once an attack is classified impossible or an automatic
//! failure, further contributions are kept for display only: the
//! classification decides the outcome, never the arithmetic sum.

use std::fmt;

/// One signed contribution to a target number.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub value: i32,
    pub reason: String,
}

impl Modifier {
    pub fn new(value: i32, reason: impl Into<String>) -> Self {
        Self {
            value,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} ({})", self.value, self.reason)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Classification {
    #[default]
    Normal,
    AutomaticSuccess,
    AutomaticFailure,
    Impossible,
}

/// Tagged outcome of a target number.
///
/// Callers match on this instead of comparing sentinel values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// Roll 2d6 and meet or beat the value.
    Needs(i32),
    Impossible(String),
    AutomaticSuccess,
    AutomaticFailure(String),
}

impl Resolution {
    /// Chance that a 2d6 attack roll succeeds.
    pub fn success_probability(&self) -> f64 {
        match self {
            Resolution::Needs(value) => success_probability(*value),
            Resolution::AutomaticSuccess => 1.0,
            Resolution::Impossible(_) | Resolution::AutomaticFailure(_) => 0.0,
        }
    }

    /// Whether a given 2d6 roll succeeds. Terminal outcomes ignore the roll.
    pub fn is_success(&self, roll: u32) -> bool {
        match self {
            Resolution::Needs(value) => roll as i32 >= *value,
            Resolution::AutomaticSuccess => true,
            Resolution::Impossible(_) | Resolution::AutomaticFailure(_) => false,
        }
    }
}

/// Accumulated difficulty of one attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetNumber {
    base: i32,
    base_reason: String,
    modifiers: Vec<Modifier>,
    classification: Classification,
    reason: Option<String>,
}

impl TargetNumber {
    pub fn new(base: i32, reason: impl Into<String>) -> Self {
        Self {
            base,
            base_reason: reason.into(),
            modifiers: Vec::new(),
            classification: Classification::Normal,
            reason: None,
        }
    }

    /// Empty accumulator with base 0, used for partial stage results.
    pub fn zero() -> Self {
        Self::new(0, "no modifiers")
    }

    pub fn impossible(reason: impl Into<String>) -> Self {
        let mut tn = Self::zero();
        tn.set_impossible(reason);
        tn
    }

    pub fn automatic_failure(reason: impl Into<String>) -> Self {
        let mut tn = Self::zero();
        tn.classify(Classification::AutomaticFailure, reason.into());
        tn
    }

    pub fn automatic_success(reason: impl Into<String>) -> Self {
        let mut tn = Self::zero();
        tn.classify(Classification::AutomaticSuccess, reason.into());
        tn
    }

    /// Append a contribution. Zero-valued contributions are dropped.
    pub fn add(&mut self, value: i32, reason: impl Into<String>) {
        if value != 0 {
            self.modifiers.push(Modifier::new(value, reason));
        }
    }

    pub fn set_impossible(&mut self, reason: impl Into<String>) {
        self.classify(Classification::Impossible, reason.into());
    }

    pub fn set_automatic_failure(&mut self, reason: impl Into<String>) {
        self.classify(Classification::AutomaticFailure, reason.into());
    }

    pub fn set_automatic_success(&mut self, reason: impl Into<String>) {
        self.classify(Classification::AutomaticSuccess, reason.into());
    }

    /// Merge another accumulator's contributions (its base is ignored).
    ///
    /// A terminal classification in `other` is inherited; an existing
    /// terminal classification in `self` is never downgraded.
    pub fn append(&mut self, other: TargetNumber) {
        self.modifiers.extend(other.modifiers);
        if other.classification != Classification::Normal {
            self.classify(
                other.classification,
                other.reason.unwrap_or_else(|| other.base_reason.clone()),
            );
        }
    }

    // Impossible > AutomaticFailure > AutomaticSuccess > Normal
    fn classify(&mut self, classification: Classification, reason: String) {
        let rank = |c: Classification| match c {
            Classification::Normal => 0,
            Classification::AutomaticSuccess => 1,
            Classification::AutomaticFailure => 2,
            Classification::Impossible => 3,
        };
        if rank(classification) > rank(self.classification) {
            self.classification = classification;
            self.reason = Some(reason);
        }
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Base plus every contribution, regardless of classification.
    pub fn value(&self) -> i32 {
        self.base + self.modifiers.iter().map(|m| m.value).sum::<i32>()
    }

    /// Impossible and automatic failure stop further evaluation.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.classification,
            Classification::Impossible | Classification::AutomaticFailure
        )
    }

    pub fn resolution(&self) -> Resolution {
        let reason = || self.reason.clone().unwrap_or_default();
        match self.classification {
            Classification::Normal => Resolution::Needs(self.value()),
            Classification::AutomaticSuccess => Resolution::AutomaticSuccess,
            Classification::AutomaticFailure => Resolution::AutomaticFailure(reason()),
            Classification::Impossible => Resolution::Impossible(reason()),
        }
    }

    /// One-line rendering, e.g. `base 4, +1 (attacker walked), +2 (medium range)`.
    pub fn describe(&self) -> String {
        let mut text = format!("base {} ({})", self.base, self.base_reason);
        for modifier in &self.modifiers {
            text.push_str(", ");
            text.push_str(&modifier.to_string());
        }
        match self.classification {
            Classification::Normal => {}
            other => {
                text.push_str(&format!(
                    " [{other}: {}]",
                    self.reason.as_deref().unwrap_or_default()
                ));
            }
        }
        text
    }
}

impl fmt::Display for TargetNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolution() {
            Resolution::Needs(value) => write!(f, "{value}"),
            Resolution::AutomaticSuccess => f.write_str("automatic success"),
            Resolution::AutomaticFailure(reason) => write!(f, "automatic failure ({reason})"),
            Resolution::Impossible(reason) => write!(f, "impossible ({reason})"),
        }
    }
}

/// Number of 2d6 outcomes (out of 36) for each total 0..=12.
pub const TWO_D6_WAYS: [u32; 13] = [0, 0, 1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];

/// Probability that 2d6 meets or beats `target`.
pub fn success_probability(target: i32) -> f64 {
    if target <= 2 {
        return 1.0;
    }
    if target > 12 {
        return 0.0;
    }
    let ways: u32 = TWO_D6_WAYS[target as usize..].iter().sum();
    f64::from(ways) / 36.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_sums_modifiers() {
        let mut tn = TargetNumber::new(4, "gunnery skill");
        tn.add(1, "attacker walked");
        tn.add(2, "medium range");
        tn.add(0, "short range");
        assert_eq!(tn.value(), 7);
        assert_eq!(tn.modifiers().len(), 2);
        assert_eq!(tn.resolution(), Resolution::Needs(7));
    }

    #[test]
    fn classification_wins_over_arithmetic() {
        let mut tn = TargetNumber::new(4, "gunnery skill");
        tn.set_impossible("no line of sight");
        tn.add(-10, "cosmetic");
        assert_eq!(
            tn.resolution(),
            Resolution::Impossible("no line of sight".into())
        );
        assert!(tn.is_terminal());
    }

    #[test]
    fn append_inherits_terminal_classification() {
        let mut tn = TargetNumber::new(4, "gunnery skill");
        let mut stage = TargetNumber::zero();
        stage.add(2, "woods");
        tn.append(stage);
        assert_eq!(tn.value(), 6);

        tn.append(TargetNumber::automatic_failure("weapon jammed"));
        assert_eq!(tn.classification(), Classification::AutomaticFailure);

        // automatic success never downgrades a failure
        tn.append(TargetNumber::automatic_success("point blank"));
        assert_eq!(tn.classification(), Classification::AutomaticFailure);
        assert_eq!(tn.reason(), Some("weapon jammed"));
    }

    #[test]
    fn describe_lists_reasons() {
        let mut tn = TargetNumber::new(4, "gunnery skill");
        tn.add(1, "attacker walked");
        tn.add(-2, "target prone");
        assert_eq!(
            tn.describe(),
            "base 4 (gunnery skill), +1 (attacker walked), -2 (target prone)"
        );
    }

    #[test]
    fn probability_table() {
        assert_eq!(success_probability(2), 1.0);
        assert_eq!(success_probability(13), 0.0);
        assert!((success_probability(7) - 21.0 / 36.0).abs() < 1e-12);
        assert!((success_probability(12) - 1.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn resolution_rolls() {
        assert!(Resolution::Needs(8).is_success(8));
        assert!(!Resolution::Needs(8).is_success(7));
        assert!(Resolution::AutomaticSuccess.is_success(2));
        assert!(!Resolution::Impossible("x".into()).is_success(12));
    }
}
