use std::collections::BTreeMap;
use std::path::Path;

use catalog::{Region, Sensor};
use foundation::{Percent, YearRange};
use layers::LayerList;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExplorerError;
use crate::tab::Tab;

/// Initial state of an explorer session.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to override. Validation happens during deserialization: layer ids must be
/// unique, the year range must be ordered and inside the archive, and cloud
/// cover must be a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    pub layers: LayerList,
    pub tab: Tab,
    pub region: Option<Region>,
    pub years: YearRange,
    pub cloud_cover: Percent,
    pub sensors: BTreeMap<Sensor, bool>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            layers: LayerList::seed(),
            tab: Tab::Map,
            region: None,
            years: YearRange::default(),
            cloud_cover: Percent::saturating(20),
            sensors: default_sensors(),
        }
    }
}

/// Landsat on, everything else off.
pub fn default_sensors() -> BTreeMap<Sensor, bool> {
    Sensor::ALL
        .into_iter()
        .map(|s| (s, s == Sensor::Landsat))
        .collect()
}

impl ExplorerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ExplorerError> {
        serde_json::from_str(raw).map_err(|e| ExplorerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ExplorerError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ExplorerError::Io(format!("read {path:?}: {e}")))?;
        let cfg = Self::from_json_str(&raw)?;
        info!(path = %path.display(), layers = cfg.layers.len(), "loaded explorer config");
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String, ExplorerError> {
        serde_json::to_string_pretty(self).map_err(|e| ExplorerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::Year;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = ExplorerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ExplorerConfig::default());
        assert_eq!(cfg.cloud_cover.get(), 20);
        assert!(cfg.sensors[&Sensor::Landsat]);
        assert!(!cfg.sensors[&Sensor::Palsar]);
    }

    #[test]
    fn partial_override() {
        let cfg = ExplorerConfig::from_json_str(
            r#"{
                "tab": "analysis",
                "region": "Kalimantan",
                "years": {"start": 2000, "end": 2010},
                "cloud_cover": 35,
                "layers": [
                    {"id": "satellite", "name": "Imagery", "visible": true},
                    {"id": "osm", "name": "Streets", "visible": false}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.tab, Tab::Analysis);
        assert_eq!(cfg.region, Some(Region::Kalimantan));
        assert_eq!(cfg.years.start(), Year(2000));
        assert_eq!(cfg.cloud_cover.get(), 35);
        let ids: Vec<&str> = cfg.layers.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["satellite", "osm"]);
    }

    #[test]
    fn rejects_invalid_values() {
        for raw in [
            r#"{"cloud_cover": 101}"#,
            r#"{"years": {"start": 2020, "end": 2001}}"#,
            r#"{"layers": [{"id":"a","name":"A","visible":true},{"id":"a","name":"B","visible":true}]}"#,
            r#"{"region": "Atlantis"}"#,
            r#"{"zoom": 4}"#,
        ] {
            assert!(
                matches!(ExplorerConfig::from_json_str(raw), Err(ExplorerError::Config(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cloud_cover": 5}}"#).unwrap();
        let cfg = ExplorerConfig::load(file.path()).unwrap();
        assert_eq!(cfg.cloud_cover.get(), 5);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ExplorerConfig::load(Path::new("/nonexistent/terravision.json")).unwrap_err();
        assert!(matches!(err, ExplorerError::Io(_)));
    }

    #[test]
    fn json_round_trip_keeps_layer_order() {
        let mut cfg = ExplorerConfig::default();
        cfg.layers.reorder("osm", "satellite");
        let back = ExplorerConfig::from_json_str(&cfg.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
