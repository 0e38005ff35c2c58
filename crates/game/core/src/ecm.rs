//! Electronic warfare field propagation.
//!
//! Jamming (ECM) and counter-jamming (ECCM) fields are not stored anywhere:
//! they are derived on demand from the active emitters and traced along the
//! line between two points. A field touches the line when its range reaches
//! any hex strictly between the points. When the line runs along a hex seam
//! both hexes of the split pair are tested, so a field can touch a line
//! through either side.

use tracing::debug;

use crate::env::{Combatant, TeamId, UnitId};
use crate::hex::{Hex, LineStep, intervening};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FieldMode {
    Ecm,
    Eccm,
}

/// Angel-class fields count double.
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
pub enum FieldClass {
    #[default]
    Standard,
    Angel,
}

impl FieldClass {
    pub const fn weight(self) -> i32 {
        match self {
            FieldClass::Standard => 1,
            FieldClass::Angel => 2,
        }
    }
}

/// Side of an emitter relative to the queried unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Polarity {
    Friendly,
    Hostile,
}

impl Polarity {
    pub const fn sign(self) -> i32 {
        match self {
            Polarity::Friendly => 1,
            Polarity::Hostile => -1,
        }
    }
}

/// One active field source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Emitter {
    pub owner: UnitId,
    pub team: TeamId,
    /// `None` for off-board units; such emitters never contribute.
    pub position: Option<Hex>,
    pub range: u32,
    pub mode: FieldMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: FieldClass,
}

impl Emitter {
    pub fn new(owner: UnitId, team: TeamId, position: Hex, range: u32, mode: FieldMode) -> Self {
        Self {
            owner,
            team,
            position: Some(position),
            range,
            mode,
            class: FieldClass::Standard,
        }
    }

    #[must_use]
    pub fn angel(mut self) -> Self {
        self.class = FieldClass::Angel;
        self
    }

    /// Whether the field reaches any hex of `line`.
    ///
    /// Scanning stops at the first hex in range, or once the distance to the
    /// emitter starts growing again after the closest approach.
    fn reaches(&self, line: &[LineStep]) -> bool {
        let Some(origin) = self.position else {
            return false;
        };
        let mut previous = u32::MAX;
        for step in line {
            let distance = step.distance_from(origin);
            if distance <= self.range {
                return true;
            }
            if distance > previous {
                return false;
            }
            previous = distance;
        }
        false
    }
}

/// Enumerates every active emitter in the game.
///
/// Emitters carried by passengers are reported at the carrier's hex.
pub trait EmitterOracle {
    fn emitters(&self) -> &[Emitter];
}

impl EmitterOracle for Vec<Emitter> {
    fn emitters(&self) -> &[Emitter] {
        self
    }
}

impl EmitterOracle for [Emitter] {
    fn emitters(&self) -> &[Emitter] {
        self
    }
}

/// The unit whose side decides which fields are friendly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observer {
    pub id: UnitId,
    pub team: TeamId,
    pub jamming_pod: bool,
}

impl Observer {
    pub const fn new(id: UnitId, team: TeamId) -> Self {
        Self {
            id,
            team,
            jamming_pod: false,
        }
    }

    pub fn of(unit: &dyn Combatant) -> Self {
        Self {
            id: unit.id(),
            team: unit.team(),
            jamming_pod: unit.has_jamming_pod(),
        }
    }

    fn polarity_of(&self, emitter: &Emitter) -> Polarity {
        if emitter.team == self.team {
            Polarity::Friendly
        } else {
            Polarity::Hostile
        }
    }

    /// Signed contribution of one emitter to a count along `line`.
    fn contribution(&self, emitter: &Emitter, line: &[LineStep]) -> i32 {
        if emitter.position.is_none() {
            return 0;
        }
        let touches = emitter.owner == self.id || emitter.reaches(line);
        if touches {
            self.polarity_of(emitter).sign() * emitter.class.weight()
        } else {
            0
        }
    }
}

/// Hexes tested for a line from `a` to `b`: the strictly-between steps, or
/// `a` itself when nothing lies between.
fn traced_line(a: Hex, b: Hex) -> Vec<LineStep> {
    let steps = intervening(a, b);
    if steps.is_empty() {
        vec![LineStep::Single(a)]
    } else {
        steps
    }
}

/// Signed count of fields of one polarity and mode touching the line `a`-`b`.
///
/// Friendly fields count +1 (angel +2), hostile fields -1 (angel -2). The
/// observer's own emitter counts without a trace. Missing endpoints yield 0.
pub fn field_count(
    observer: &Observer,
    a: Option<Hex>,
    b: Option<Hex>,
    emitters: &[Emitter],
    polarity: Polarity,
    mode: FieldMode,
) -> i32 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0;
    };
    let line = traced_line(a, b);
    emitters
        .iter()
        .filter(|e| e.mode == mode && observer.polarity_of(e) == polarity)
        .map(|e| observer.contribution(e, &line))
        .sum()
}

/// Friendly counter-jamming minus hostile jamming along the line `a`-`b`.
///
/// An attached jamming pod is folded in first as one hostile field.
pub fn ecm_balance(
    observer: &Observer,
    a: Option<Hex>,
    b: Option<Hex>,
    emitters: &[Emitter],
) -> i32 {
    let pod = if observer.jamming_pod { -1 } else { 0 };
    let eccm = field_count(observer, a, b, emitters, Polarity::Friendly, FieldMode::Eccm);
    let ecm = field_count(observer, a, b, emitters, Polarity::Hostile, FieldMode::Ecm);
    let balance = pod + eccm + ecm;
    debug!(observer = %observer.id, eccm, ecm, pod, balance, "ecm balance");
    balance
}

/// Whether hostile jamming outweighs friendly counter-jamming on the line.
///
/// Equivalent to `ecm_balance(..) < 0`, but stops tracing as soon as the
/// remaining emitters can no longer change the sign.
pub fn is_affected_by_ecm(
    observer: &Observer,
    a: Option<Hex>,
    b: Option<Hex>,
    emitters: &[Emitter],
) -> bool {
    let relevant: Vec<&Emitter> = emitters
        .iter()
        .filter(|e| e.position.is_some())
        .filter(|e| match observer.polarity_of(e) {
            Polarity::Friendly => e.mode == FieldMode::Eccm,
            Polarity::Hostile => e.mode == FieldMode::Ecm,
        })
        .collect();

    let mut balance = if observer.jamming_pod { -1 } else { 0 };
    let (Some(a), Some(b)) = (a, b) else {
        return balance < 0;
    };

    let weight = |e: &Emitter| observer.polarity_of(e).sign() * e.class.weight();
    let mut friendly_left: i32 = relevant.iter().map(|e| weight(*e).max(0)).sum();
    let mut hostile_left: i32 = relevant.iter().map(|e| (-weight(*e)).max(0)).sum();

    let line = traced_line(a, b);
    for emitter in relevant {
        if balance + friendly_left < 0 {
            return true;
        }
        if balance - hostile_left >= 0 {
            return false;
        }
        let w = weight(emitter);
        if w > 0 {
            friendly_left -= w;
        } else {
            hostile_left += w;
        }
        balance += observer.contribution(emitter, &line);
    }
    balance < 0
}

/// Whether the defender's side jams the line more than the other side
/// counter-jams it.
pub fn is_protected_by_ecm(
    defender: &Observer,
    a: Option<Hex>,
    b: Option<Hex>,
    emitters: &[Emitter],
) -> bool {
    let ecm = field_count(defender, a, b, emitters, Polarity::Friendly, FieldMode::Ecm);
    let eccm = field_count(defender, a, b, emitters, Polarity::Hostile, FieldMode::Eccm);
    -(ecm + eccm) < 0
}
