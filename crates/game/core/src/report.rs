//! Typed combat log entries.
//!
//! Every user-visible step of a resolution is appended to a [`CombatLog`] as a
//! [`Report`]. The log is a plain value handed back to the caller, which
//! renders or broadcasts it; `tracing` output is for developers only.

use std::fmt;

use crate::env::{Location, UnitId};
use crate::hex::Hex;
use crate::range::RangeBracket;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Report {
    Modifier { value: i32, reason: String },
    Impossible { reason: String },
    RangeResolved { distance: u32, bracket: RangeBracket },
    LineOfSight { blocked: bool, woods: u32, smoke: u32 },
    Ecm { unit: UnitId, affected: bool },
    AttackRoll { needed: i32, roll: u32, hit: bool },
    ClusterRoll { roll: u32, modifier: i32, hits: u32, of: u32 },
    Damage { location: Location, amount: u32 },
    Absorbed { amount: u32, remaining: u32 },
    TerrainDamaged { hex: Hex, amount: u32, remaining: u32 },
    Ignition { hex: Hex },
    HeatApplied { heat: u32 },
    Jammed { roll: u32 },
    Destroyed { roll: u32 },
    AmmoSpent { shots: u32, remaining: u32 },
    Displaced { unit: UnitId, from: Hex, to: Hex },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Modifier { value, reason } => write!(f, "{value:+} {reason}"),
            Report::Impossible { reason } => write!(f, "attack impossible: {reason}"),
            Report::RangeResolved { distance, bracket } => {
                write!(f, "range {distance} ({bracket})")
            }
            Report::LineOfSight { blocked: true, .. } => f.write_str("line of sight blocked"),
            Report::LineOfSight { woods, smoke, .. } => {
                write!(f, "line of sight clear (woods {woods}, smoke {smoke})")
            }
            Report::Ecm { unit, affected } => {
                if *affected {
                    write!(f, "{unit} is jammed")
                } else {
                    write!(f, "{unit} is not jammed")
                }
            }
            Report::AttackRoll { needed, roll, hit } => {
                let verdict = if *hit { "hits" } else { "misses" };
                write!(f, "needs {needed}, rolls {roll}: {verdict}")
            }
            Report::ClusterRoll {
                roll,
                modifier,
                hits,
                of,
            } => write!(f, "cluster roll {roll} ({modifier:+}): {hits} of {of} hit"),
            Report::Damage { location, amount } => write!(f, "{amount} damage to {location}"),
            Report::Absorbed { amount, remaining } => {
                write!(f, "building absorbs {amount} ({remaining} CF left)")
            }
            Report::TerrainDamaged {
                hex,
                amount,
                remaining,
            } => {
                if *remaining == 0 {
                    write!(f, "{amount} damage clears terrain at {hex}")
                } else {
                    write!(f, "{amount} damage to terrain at {hex} ({remaining} left)")
                }
            }
            Report::Ignition { hex } => write!(f, "fire starts at {hex}"),
            Report::HeatApplied { heat } => write!(f, "target gains {heat} heat"),
            Report::Jammed { roll } => write!(f, "weapon jams (rolled {roll})"),
            Report::Destroyed { roll } => write!(f, "weapon explodes (rolled {roll})"),
            Report::AmmoSpent { shots, remaining } => {
                write!(f, "{shots} shots fired, {remaining} remaining")
            }
            Report::Displaced { unit, from, to } => write!(f, "{unit} displaced {from} -> {to}"),
        }
    }
}

/// Ordered log of one resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: Vec<Report>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: Report) {
        self.entries.push(report);
    }

    pub fn entries(&self) -> &[Report] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Report> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry satisfies `predicate`.
    pub fn contains(&self, predicate: impl Fn(&Report) -> bool) -> bool {
        self.entries.iter().any(predicate)
    }
}

impl Extend<Report> for CombatLog {
    fn extend<T: IntoIterator<Item = Report>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for CombatLog {
    type Item = Report;
    type IntoIter = std::vec::IntoIter<Report>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CombatLog {
    type Item = &'a Report;
    type IntoIter = std::slice::Iter<'a, Report>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for CombatLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.entries {
            writeln!(f, "{report}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_per_entry() {
        let mut log = CombatLog::new();
        log.push(Report::Modifier {
            value: 2,
            reason: "medium range".into(),
        });
        log.push(Report::AttackRoll {
            needed: 8,
            roll: 9,
            hit: true,
        });
        log.push(Report::Damage {
            location: Location::LeftArm,
            amount: 5,
        });

        assert_eq!(
            log.to_string(),
            "+2 medium range\nneeds 8, rolls 9: hits\n5 damage to left_arm\n"
        );
        assert!(log.contains(|r| matches!(r, Report::Damage { amount: 5, .. })));
    }

    #[test]
    fn terrain_report_mentions_clearing() {
        let report = Report::TerrainDamaged {
            hex: Hex::new(1, 1),
            amount: 4,
            remaining: 0,
        };
        assert_eq!(report.to_string(), "4 damage clears terrain at (1, 1)");
    }
}
