//! Dice for deterministic attack resolution.
//!
//! Every random value the engine consumes flows through [`DiceOracle`]. The
//! oracle is passed explicitly into each resolver call, so a replay or a test
//! can substitute [`ScriptedDice`] for the seeded [`PcgDice`] stream.

/// Source of dice rolls.
///
/// Implementations must be deterministic: the same seed (or script) always
/// produces the same sequence.
pub trait DiceOracle {
    /// Next raw 32-bit value from the stream.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `0..max`. Returns 0 when `max` is 0.
    fn uniform_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// One six-sided die (1-6 inclusive).
    fn roll_face(&mut self) -> u32 {
        self.uniform_int(6) + 1
    }

    /// Sum of `n` six-sided dice.
    fn d6(&mut self, n: u32) -> u32 {
        (0..n).map(|_| self.roll_face()).sum()
    }

    /// `n` individual six-sided dice, in roll order.
    fn d6_each(&mut self, n: u32) -> Vec<u32> {
        (0..n).map(|_| self.roll_face()).collect()
    }
}

/// PCG-XSH-RR stream: 64-bit state, 32-bit output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgDice {
    state: u64,
}

impl PcgDice {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Stream for one attack, derived from the game seed and the attack's
    /// position in the phase.
    ///
    /// # Arguments
    ///
    /// * `game_seed` - Base seed set at game start
    /// * `sequence` - Attack sequence number within the game
    /// * `attacker` - Raw id of the attacking unit
    /// * `context` - Distinguishes independent streams for the same attack
    pub fn for_attack(game_seed: u64, sequence: u64, attacker: u32, context: u32) -> Self {
        Self::new(compute_seed(game_seed, sequence, attacker, context))
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl DiceOracle for PcgDice {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }
}

/// Mix seed components into one well-distributed 64-bit seed.
///
/// Constants are the SplitMix64 / FxHash multipliers followed by the murmur3
/// finalizer.
pub fn compute_seed(game_seed: u64, sequence: u64, attacker: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= sequence.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (attacker as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Replays a fixed sequence of die faces.
///
/// Each [`DiceOracle::roll_face`] consumes one face. Running out of faces
/// panics: a script that is too short is a broken test, not a game state.
/// Faces outside 1..=6 are rejected up front for the same reason.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    faces: Vec<u32>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(faces: impl Into<Vec<u32>>) -> Self {
        let faces = faces.into();
        if let Some(face) = faces.iter().find(|face| !(1..=6).contains(*face)) {
            panic!("scripted die face {face} is not between 1 and 6");
        }
        Self { faces, cursor: 0 }
    }

    /// Faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len() - self.cursor
    }
}

impl DiceOracle for ScriptedDice {
    fn next_u32(&mut self) -> u32 {
        self.roll_face() - 1
    }

    fn uniform_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    fn roll_face(&mut self) -> u32 {
        let Some(&face) = self.faces.get(self.cursor) else {
            panic!(
                "scripted dice exhausted after {} faces",
                self.faces.len()
            );
        };
        self.cursor += 1;
        face
    }
}
