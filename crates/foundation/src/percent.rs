use serde::{Deserialize, Serialize};

/// Whole-number percentage in `0..=100`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PercentOutOfRange(pub u32);

impl std::fmt::Display for PercentOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "percentage {} outside 0..=100", self.0)
    }
}

impl std::error::Error for PercentOutOfRange {}

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const MAX: Percent = Percent(100);

    pub fn new(value: u32) -> Result<Self, PercentOutOfRange> {
        if value > 100 {
            return Err(PercentOutOfRange(value));
        }
        Ok(Percent(value as u8))
    }

    /// Slider input: saturates at the bounds instead of failing.
    pub fn saturating(value: i64) -> Self {
        Percent(value.clamp(0, 100) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = PercentOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Percent::new(u32::from(value))
    }
}

impl From<Percent> for u8 {
    fn from(p: Percent) -> u8 {
        p.0
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
