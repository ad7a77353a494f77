use catalog::CatalogError;
use foundation::{PercentOutOfRange, YearRangeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    Years(YearRangeError),
    CloudCover(PercentOutOfRange),
    UnknownRegion(String),
    UnknownSensor(String),
    UnknownTab(String),
    UnknownAction(String),
    Catalog(CatalogError),
    Config(String),
    Io(String),
}

impl std::fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplorerError::Years(e) => write!(f, "invalid temporal range: {e}"),
            ExplorerError::CloudCover(e) => write!(f, "invalid cloud cover threshold: {e}"),
            ExplorerError::UnknownRegion(s) => write!(f, "unknown region: {s}"),
            ExplorerError::UnknownSensor(s) => write!(f, "unknown sensor: {s}"),
            ExplorerError::UnknownTab(s) => write!(f, "unknown tab: {s}"),
            ExplorerError::UnknownAction(s) => write!(f, "unknown analysis action: {s}"),
            ExplorerError::Catalog(e) => write!(f, "dataset catalog: {e}"),
            ExplorerError::Config(msg) => write!(f, "config error: {msg}"),
            ExplorerError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExplorerError::Years(e) => Some(e),
            ExplorerError::CloudCover(e) => Some(e),
            ExplorerError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<YearRangeError> for ExplorerError {
    fn from(e: YearRangeError) -> Self {
        ExplorerError::Years(e)
    }
}

impl From<CatalogError> for ExplorerError {
    fn from(e: CatalogError) -> Self {
        ExplorerError::Catalog(e)
    }
}

impl From<PercentOutOfRange> for ExplorerError {
    fn from(e: PercentOutOfRange) -> Self {
        ExplorerError::CloudCover(e)
    }
}
