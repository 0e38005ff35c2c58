use std::fmt;

/// Axial hex coordinate on a flat-topped grid.
///
/// `q` grows towards the east, `r` towards the south-south-east. The implied
/// cube coordinate is `s = -q - r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube component.
    #[inline]
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance (number of steps) between two hexes.
    pub fn distance(self, other: Hex) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    /// Adjacent hex in the given direction.
    pub fn neighbor(self, facing: Facing) -> Hex {
        let (dq, dr) = facing.offset();
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors, starting north and going clockwise.
    pub fn neighbors(self) -> [Hex; 6] {
        Facing::ALL.map(|facing| self.neighbor(facing))
    }

    pub fn is_adjacent(self, other: Hex) -> bool {
        self.distance(other) == 1
    }

    /// Center of the hex in unit-size pixel space, y pointing south.
    pub(crate) fn center(self) -> (f64, f64) {
        let q = f64::from(self.q);
        let r = f64::from(self.r);
        (1.5 * q, 3f64.sqrt() * (r + q / 2.0))
    }

    /// Bearing from this hex to `other` in whole degrees, clockwise from north.
    ///
    /// Identical hexes have bearing 0.
    pub fn degree_to(self, other: Hex) -> u32 {
        if self == other {
            return 0;
        }
        let (x1, y1) = self.center();
        let (x2, y2) = other.center();
        let degrees = (x2 - x1).atan2(y1 - y2).to_degrees().round() as i32;
        degrees.rem_euclid(360) as u32
    }

    /// Facing that points most directly at `other`.
    pub fn direction_to(self, other: Hex) -> Facing {
        Facing::from_index(((self.degree_to(other) + 30) / 60) as i32)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// One of the six hex directions, clockwise from north.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Facing {
    #[default]
    North = 0,
    NorthEast = 1,
    SouthEast = 2,
    South = 3,
    SouthWest = 4,
    NorthWest = 5,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::North,
        Facing::NorthEast,
        Facing::SouthEast,
        Facing::South,
        Facing::SouthWest,
        Facing::NorthWest,
    ];

    /// Facing for any integer index, wrapping modulo six.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(6) as usize]
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Absolute bearing of this facing in degrees.
    #[inline]
    pub const fn degrees(self) -> u32 {
        self as u32 * 60
    }

    /// Rotate clockwise by `steps` hex sides (negative rotates counter-clockwise).
    pub fn rotate(self, steps: i32) -> Self {
        Self::from_index(self.index() as i32 + steps)
    }

    pub fn opposite(self) -> Self {
        self.rotate(3)
    }

    const fn offset(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::NorthEast => (1, -1),
            Facing::SouthEast => (1, 0),
            Facing::South => (0, 1),
            Facing::SouthWest => (-1, 1),
            Facing::NorthWest => (-1, 0),
        }
    }
}
