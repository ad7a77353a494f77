pub mod region;
pub mod sensor;

pub use region::Region;
pub use sensor::Sensor;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub id: String,
    pub name: String,
    pub sensor: Sensor,
    /// Physical quantity or index the dataset carries (`"NDVI"`, `"VV"`, ...).
    pub variable: String,
    pub resolution_m: u32,
}

impl DatasetEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sensor: Sensor,
        variable: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sensor,
            variable: variable.into(),
            resolution_m: sensor.resolution_m(),
        }
    }

    fn matches(&self, needle_lower: &str) -> bool {
        [self.id.as_str(), self.name.as_str(), self.variable.as_str()]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
            || self.sensor.display_name().to_lowercase().contains(needle_lower)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub entries: BTreeMap<String, DatasetEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound,
    UnknownSortKey(String),
    Corrupt(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound => write!(f, "dataset not found"),
            CatalogError::UnknownSortKey(k) => {
                write!(f, "unknown sort key {k:?} (expected name, resolution or sensor)")
            }
            CatalogError::Corrupt(msg) => write!(f, "catalog snapshot corrupt: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Resolution,
    Sensor,
}

impl std::str::FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "resolution" | "res" => Ok(SortKey::Resolution),
            "sensor" => Ok(SortKey::Sensor),
            other => Err(CatalogError::UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// In-memory dataset table backing the search/sort panel.
///
/// Entries are keyed by id in a `BTreeMap`, so unsorted listings are in id
/// order and never depend on insertion history.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatasetCatalog {
    snapshot: CatalogSnapshot,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The datasets the explorer ships with.
    pub fn builtin() -> Self {
        let mut c = Self::new();
        for entry in [
            DatasetEntry::new("landsat-sr", "Landsat Surface Reflectance", Sensor::Landsat, "SR"),
            DatasetEntry::new("landsat-ndvi", "Landsat NDVI Composite", Sensor::Landsat, "NDVI"),
            DatasetEntry::new("s1-vv", "Sentinel-1 GRD Backscatter VV", Sensor::Sentinel1, "VV"),
            DatasetEntry::new("s1-vh", "Sentinel-1 GRD Backscatter VH", Sensor::Sentinel1, "VH"),
            DatasetEntry::new("s2-sr", "Sentinel-2 Surface Reflectance", Sensor::Sentinel2, "SR"),
            DatasetEntry::new("s2-ndvi", "Sentinel-2 NDVI", Sensor::Sentinel2, "NDVI"),
            DatasetEntry::new("palsar-hh", "PALSAR Mosaic HH", Sensor::Palsar, "HH"),
            DatasetEntry::new("palsar-hv", "PALSAR Mosaic HV", Sensor::Palsar, "HV"),
        ] {
            c.upsert(entry);
        }
        c
    }

    pub fn len(&self) -> usize {
        self.snapshot.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&DatasetEntry, CatalogError> {
        self.snapshot.entries.get(id).ok_or(CatalogError::NotFound)
    }

    pub fn upsert(&mut self, entry: DatasetEntry) {
        self.snapshot.entries.insert(entry.id.clone(), entry);
    }

    /// Case-insensitive substring match on id, name, variable and sensor.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&DatasetEntry> {
        self.search_for_sensors(query, &Sensor::ALL)
    }

    /// Like [`DatasetCatalog::search`], restricted to entries from `sensors`.
    pub fn search_for_sensors(&self, query: &str, sensors: &[Sensor]) -> Vec<&DatasetEntry> {
        let needle = query.trim().to_lowercase();
        self.snapshot
            .entries
            .values()
            .filter(|e| sensors.contains(&e.sensor))
            .filter(|e| needle.is_empty() || e.matches(&needle))
            .collect()
    }

    pub fn sorted(&self, key: SortKey, order: SortOrder) -> Vec<&DatasetEntry> {
        let mut rows: Vec<&DatasetEntry> = self.snapshot.entries.values().collect();
        sort_rows(&mut rows, key, order);
        rows
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.snapshot)
            .map_err(|e| CatalogError::Corrupt(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let snapshot = serde_json::from_str::<CatalogSnapshot>(raw)
            .map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        if let Some((key, entry)) = snapshot.entries.iter().find(|(k, e)| **k != e.id) {
            return Err(CatalogError::Corrupt(format!(
                "entry keyed {key:?} has id {:?}",
                entry.id
            )));
        }
        Ok(Self { snapshot })
    }
}

/// Stable sort; ties keep id order.
pub fn sort_rows(rows: &mut [&DatasetEntry], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Resolution => a.resolution_m.cmp(&b.resolution_m),
            SortKey::Sensor => a.sensor.cmp(&b.sensor),
        };
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}
