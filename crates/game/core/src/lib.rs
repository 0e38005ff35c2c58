//! Attack resolution for a hex-grid tactical wargame.
//!
//! `combat-core` decides whether an attack is possible, how hard it is to hit
//! and, once the dice are rolled, how much damage lands and where. It consumes
//! read-only facts through the oracle traits in [`env`] and returns plain
//! values: a [`TargetNumber`] with its reasons, a [`CombatLog`] of typed
//! reports, and the damage calls issued to the caller's sinks.
//!
//! The pipeline, leaves first: [`hex`] geometry, [`range`] and [`arc`]
//! classification, [`terrain`] line of sight, [`ecm`] field propagation, the
//! [`to_hit`] orchestrator, the [`cluster`] table, and [`damage`]. The
//! [`resolve`] module strings them together; [`heuristic`] evaluates the same
//! pipeline in expectation for ammunition choice.
pub mod arc;
pub mod cluster;
pub mod config;
pub mod damage;
pub mod dice;
pub mod ecm;
pub mod env;
pub mod error;
pub mod heuristic;
pub mod hex;
pub mod physical;
pub mod range;
pub mod report;
pub mod resolve;
pub mod stacking;
pub mod target_number;
pub mod terrain;
pub mod to_hit;

pub use arc::{Arc, AttackDirection, attack_direction, is_in_arc};
pub use cluster::{ClusterOptions, ClusterRoll, cluster_hits, cluster_hits_for_roll};
pub use config::RulesConfig;
pub use damage::{DamageEvent, Multiplier, Salvo};
pub use dice::{DiceOracle, PcgDice, ScriptedDice};
pub use ecm::{
    Emitter, EmitterOracle, FieldClass, FieldMode, Observer, Polarity, field_count,
    is_affected_by_ecm, is_protected_by_ecm,
};
pub use env::{
    Absorber, AmmoBin, AmmoFlags, AmmoType, AmmoTypeId, BoardOracle, CatalogOracle, CombatEnv,
    Combatant, DamageSink, Location, Mounted, Munition, OracleError, TargetClass, TerrainTarget,
    UnitId, WeaponFamily, WeaponFlags, WeaponType, WeaponTypeId,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use heuristic::{ammo_adjusted_damage, expected_damage};
pub use hex::{Facing, Hex};
pub use physical::{PhysicalAttack, PhysicalResolution, resolve_physical};
pub use range::{RangeBracket, RangeTable, range_bracket};
pub use report::{CombatLog, Report};
pub use resolve::{AttackResolution, DamageTarget, ResolveError, resolve_attack};
pub use stacking::{Displacement, StackingViolation, displacement, stacking_violation};
pub use target_number::{Classification, Modifier, Resolution, TargetNumber};
pub use to_hit::{AttackRequest, AttackTarget, ToHitOutcome, compute_to_hit};
