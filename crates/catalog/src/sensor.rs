use serde::{Deserialize, Serialize};

/// Satellite instrument families a dataset can come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    Landsat,
    Sentinel1,
    Sentinel2,
    Palsar,
}

impl Sensor {
    pub const ALL: [Sensor; 4] = [
        Sensor::Landsat,
        Sensor::Sentinel1,
        Sensor::Sentinel2,
        Sensor::Palsar,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Sensor::Landsat => "landsat",
            Sensor::Sentinel1 => "sentinel1",
            Sensor::Sentinel2 => "sentinel2",
            Sensor::Palsar => "palsar",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Sensor::Landsat => "Landsat",
            Sensor::Sentinel1 => "Sentinel-1",
            Sensor::Sentinel2 => "Sentinel-2",
            Sensor::Palsar => "PALSAR",
        }
    }

    /// Nominal ground sample distance in metres.
    pub fn resolution_m(self) -> u32 {
        match self {
            Sensor::Landsat => 30,
            Sensor::Sentinel1 | Sensor::Sentinel2 => 10,
            Sensor::Palsar => 25,
        }
    }

    /// Radar instruments see through cloud; a cloud-cover threshold means
    /// nothing for them.
    pub fn is_radar(self) -> bool {
        matches!(self, Sensor::Sentinel1 | Sensor::Palsar)
    }

    /// Accepts the key or the display name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|x| x.key().eq_ignore_ascii_case(s) || x.display_name().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::Sensor;

    #[test]
    fn parse_accepts_key_and_display_name() {
        assert_eq!(Sensor::parse("sentinel2"), Some(Sensor::Sentinel2));
        assert_eq!(Sensor::parse("Sentinel-1"), Some(Sensor::Sentinel1));
        assert_eq!(Sensor::parse(" PALSAR "), Some(Sensor::Palsar));
        assert_eq!(Sensor::parse("modis"), None);
    }

    #[test]
    fn resolutions() {
        let r: Vec<u32> = Sensor::ALL.iter().map(|s| s.resolution_m()).collect();
        assert_eq!(r, vec![30, 10, 10, 25]);
    }

    #[test]
    fn radar_instruments() {
        let radar: Vec<Sensor> = Sensor::ALL.into_iter().filter(|s| s.is_radar()).collect();
        assert_eq!(radar, vec![Sensor::Sentinel1, Sensor::Palsar]);
    }
}
