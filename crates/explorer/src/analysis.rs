use catalog::{Region, Sensor};
use foundation::{Percent, YearRange};
use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

/// Buttons on the analysis panel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisAction {
    GenerateComposite,
    ExportResults,
    RunAnalysis,
    ProcessData,
}

impl AnalysisAction {
    pub const ALL: [AnalysisAction; 4] = [
        AnalysisAction::GenerateComposite,
        AnalysisAction::ExportResults,
        AnalysisAction::RunAnalysis,
        AnalysisAction::ProcessData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisAction::GenerateComposite => "Generate Composite",
            AnalysisAction::ExportResults => "Export Results",
            AnalysisAction::RunAnalysis => "Run Analysis",
            AnalysisAction::ProcessData => "Process Data",
        }
    }

    fn key(self) -> &'static str {
        match self {
            AnalysisAction::GenerateComposite => "composite",
            AnalysisAction::ExportResults => "export",
            AnalysisAction::RunAnalysis => "analysis",
            AnalysisAction::ProcessData => "process",
        }
    }
}

impl std::str::FromStr for AnalysisAction {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        AnalysisAction::ALL
            .into_iter()
            .find(|a| a.key() == needle || a.label().to_ascii_lowercase() == needle)
            .ok_or_else(|| ExplorerError::UnknownAction(s.to_string()))
    }
}

/// The filter state an action was triggered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRequest {
    pub action: AnalysisAction,
    pub region: Option<Region>,
    pub sensors: Vec<Sensor>,
    pub years: YearRange,
    pub cloud_cover: Percent,
}

impl ActionRequest {
    pub fn summary(&self) -> String {
        let region = self.region.map_or("all regions", Region::name);
        let sensors = if self.sensors.is_empty() {
            "no sensors".to_string()
        } else {
            self.sensors
                .iter()
                .map(|s| s.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let cloud = if self.radar_only() {
            "cloud cover ignored (radar only)".to_string()
        } else {
            format!("cloud cover <= {}", self.cloud_cover)
        };
        format!(
            "{} for {region} using {sensors}, {}..{}, {cloud}",
            self.action.label(),
            self.years.start(),
            self.years.end(),
        )
    }

    /// True when every selected sensor is radar, so the cloud threshold has
    /// nothing to filter.
    pub fn radar_only(&self) -> bool {
        !self.sensors.is_empty() && self.sensors.iter().all(|s| s.is_radar())
    }
}

/// Result of pressing an analysis button.
///
/// There is no processing backend; every action resolves to a placeholder
/// that echoes what would have been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionOutcome {
    Placeholder {
        request: ActionRequest,
        message: String,
    },
}

impl ActionOutcome {
    pub fn placeholder(request: ActionRequest) -> Self {
        let message = format!("{} (not implemented yet)", request.summary());
        ActionOutcome::Placeholder { request, message }
    }

    pub fn message(&self) -> &str {
        match self {
            ActionOutcome::Placeholder { message, .. } => message,
        }
    }

    pub fn action(&self) -> AnalysisAction {
        match self {
            ActionOutcome::Placeholder { request, .. } => request.action,
        }
    }
}
