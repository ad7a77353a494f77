use serde::{Deserialize, Serialize};

/// Focus regions offered by the map panel (Indonesian island groups).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Sumatera,
    Kalimantan,
    JawaBali,
    Sulawesi,
    Nusa,
    Maluku,
    Papua,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Sumatera,
        Region::Kalimantan,
        Region::JawaBali,
        Region::Sulawesi,
        Region::Nusa,
        Region::Maluku,
        Region::Papua,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Region::Sumatera => "Sumatera",
            Region::Kalimantan => "Kalimantan",
            Region::JawaBali => "JawaBali",
            Region::Sulawesi => "Sulawesi",
            Region::Nusa => "Nusa",
            Region::Maluku => "Maluku",
            Region::Papua => "Papua",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|r| r.name().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
