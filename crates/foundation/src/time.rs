use serde::{Deserialize, Serialize};

/// Calendar year of an acquisition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(pub u16);

/// Years for which imagery can be requested (first Landsat 5 TM archive year
/// through the current archive year).
pub const FIRST_YEAR: Year = Year(1984);
pub const LAST_YEAR: Year = Year(2024);

impl Year {
    pub fn in_archive(self) -> bool {
        self >= FIRST_YEAR && self <= LAST_YEAR
    }

    /// All selectable years, oldest first.
    pub fn archive() -> impl Iterator<Item = Year> {
        (FIRST_YEAR.0..=LAST_YEAR.0).map(Year)
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum YearRangeError {
    OutOfArchive(Year),
    Inverted { start: Year, end: Year },
}

impl std::fmt::Display for YearRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearRangeError::OutOfArchive(y) => {
                write!(f, "year {y} outside archive {FIRST_YEAR}..={LAST_YEAR}")
            }
            YearRangeError::Inverted { start, end } => {
                write!(f, "start year {start} is after end year {end}")
            }
        }
    }
}

impl std::error::Error for YearRangeError {}

/// Inclusive temporal filter.
///
/// Invariant: `start <= end` and both lie inside the archive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    start: Year,
    end: Year,
}

#[derive(Deserialize)]
struct RawYearRange {
    start: Year,
    end: Year,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = YearRangeError;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        YearRange::new(raw.start, raw.end)
    }
}

impl YearRange {
    pub fn new(start: Year, end: Year) -> Result<Self, YearRangeError> {
        for y in [start, end] {
            if !y.in_archive() {
                return Err(YearRangeError::OutOfArchive(y));
            }
        }
        if start > end {
            return Err(YearRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Year {
        self.start
    }

    pub fn end(&self) -> Year {
        self.end
    }

    pub fn with_start(self, start: Year) -> Result<Self, YearRangeError> {
        Self::new(start, self.end)
    }

    pub fn with_end(self, end: Year) -> Result<Self, YearRangeError> {
        Self::new(self.start, end)
    }

    pub fn contains(&self, year: Year) -> bool {
        year >= self.start && year <= self.end
    }

    /// Number of years covered, inclusive.
    pub fn span(&self) -> u16 {
        self.end.0 - self.start.0 + 1
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: Year(2018),
            end: LAST_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_is_inclusive() {
        let years: Vec<Year> = Year::archive().collect();
        assert_eq!(years.first(), Some(&FIRST_YEAR));
        assert_eq!(years.last(), Some(&LAST_YEAR));
        assert_eq!(years.len(), 41);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = YearRange::new(Year(2020), Year(2019)).unwrap_err();
        assert_eq!(
            err,
            YearRangeError::Inverted {
                start: Year(2020),
                end: Year(2019)
            }
        );
    }

    #[test]
    fn rejects_years_outside_archive() {
        assert_eq!(
            YearRange::new(Year(1983), Year(2000)),
            Err(YearRangeError::OutOfArchive(Year(1983)))
        );
        assert!(YearRange::default().with_end(Year(2030)).is_err());
    }

    #[test]
    fn single_year_range_is_valid() {
        let r = YearRange::new(Year(2001), Year(2001)).unwrap();
        assert_eq!(r.span(), 1);
        assert!(r.contains(Year(2001)));
        assert!(!r.contains(Year(2002)));
    }

    #[test]
    fn default_matches_recent_window() {
        let r = YearRange::default();
        assert_eq!((r.start(), r.end()), (Year(2018), Year(2024)));
        assert_eq!(r.span(), 7);
    }

    #[test]
    fn deserialize_validates() {
        let r: YearRange = serde_json::from_str(r#"{"start":1990,"end":2000}"#).unwrap();
        assert_eq!(r.span(), 11);
        assert!(serde_json::from_str::<YearRange>(r#"{"start":2000,"end":1990}"#).is_err());
    }
}
