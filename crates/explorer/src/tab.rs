use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Map,
    Dataset,
    Analysis,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Map => "Map View",
            Tab::Dataset => "Dataset",
            Tab::Analysis => "Analysis",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "map" | "map view" => Ok(Tab::Map),
            "dataset" | "datasets" => Ok(Tab::Dataset),
            "analysis" => Ok(Tab::Analysis),
            _ => Err(ExplorerError::UnknownTab(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Tab;

    #[test]
    fn parses_ids_and_labels() {
        assert_eq!("map".parse::<Tab>().unwrap(), Tab::Map);
        assert_eq!("Map View".parse::<Tab>().unwrap(), Tab::Map);
        assert_eq!("DATASET".parse::<Tab>().unwrap(), Tab::Dataset);
        assert!("settings".parse::<Tab>().is_err());
    }
}
