use std::collections::BTreeMap;

use catalog::{DatasetCatalog, DatasetEntry, Region, Sensor, SortKey, SortOrder};
use foundation::{Percent, Year, YearRange};
use layers::{Layer, LayerList};
use runtime::{Event, EventBus, Revision};
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::{ActionOutcome, ActionRequest, AnalysisAction};
use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::tab::Tab;

/// Everything the host needs to draw one frame of the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub revision: Revision,
    pub tab: Tab,
    pub region: Option<Region>,
    pub sensors: BTreeMap<Sensor, bool>,
    pub years: YearRange,
    pub cloud_cover: Percent,
    pub layers: Vec<Layer>,
    pub last_action: Option<ActionOutcome>,
}

/// Single owner of the explorer's UI state.
///
/// All mutation goes through `&mut self` methods; each either applies fully
/// or leaves the session untouched. Methods that can be no-ops return `true`
/// only when something changed, and only then is the revision bumped and an
/// event emitted.
#[derive(Debug)]
pub struct ExplorerSession {
    layers: LayerList,
    catalog: DatasetCatalog,
    tab: Tab,
    region: Option<Region>,
    sensors: BTreeMap<Sensor, bool>,
    years: YearRange,
    cloud_cover: Percent,
    last_action: Option<ActionOutcome>,
    revision: Revision,
    events: EventBus,
}

impl Default for ExplorerSession {
    fn default() -> Self {
        Self::from_config(&ExplorerConfig::default())
    }
}

impl ExplorerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        let mut sensors = crate::config::default_sensors();
        sensors.extend(config.sensors.iter().map(|(s, on)| (*s, *on)));
        Self {
            layers: config.layers.clone(),
            catalog: DatasetCatalog::builtin(),
            tab: config.tab,
            region: config.region,
            sensors,
            years: config.years,
            cloud_cover: config.cloud_cover,
            last_action: None,
            revision: Revision::INITIAL,
            events: EventBus::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: DatasetCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn layers(&self) -> &LayerList {
        &self.layers
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn sensor_enabled(&self, sensor: Sensor) -> bool {
        self.sensors.get(&sensor).copied().unwrap_or(false)
    }

    /// Enabled sensors in menu order.
    pub fn selected_sensors(&self) -> Vec<Sensor> {
        self.sensors
            .iter()
            .filter(|(_, on)| **on)
            .map(|(s, _)| *s)
            .collect()
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    pub fn cloud_cover(&self) -> Percent {
        self.cloud_cover
    }

    pub fn last_action(&self) -> Option<&ActionOutcome> {
        self.last_action.as_ref()
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revision: self.revision,
            tab: self.tab,
            region: self.region,
            sensors: self.sensors.clone(),
            years: self.years,
            cloud_cover: self.cloud_cover,
            layers: self.layers.layers().to_vec(),
            last_action: self.last_action.clone(),
        }
    }

    fn changed(&mut self, kind: &'static str, message: String) {
        let revision = self.revision.bump();
        debug!(revision = revision.0, kind, "{message}");
        self.events.emit(revision, kind, message);
    }

    /// Bound to the per-layer visibility switch.
    pub fn toggle_layer_visibility(&mut self, id: &str, visible: bool) -> bool {
        if !self.layers.toggle_visibility(id, visible) {
            return false;
        }
        let state = if visible { "shown" } else { "hidden" };
        self.changed("layers.visibility", format!("layer {id} {state}"));
        true
    }

    /// Bound to a committed drag-end: `source` was dropped onto `target`.
    pub fn reorder_layers(&mut self, source: &str, target: &str) -> bool {
        if !self.layers.reorder(source, target) {
            return false;
        }
        self.changed("layers.reorder", format!("layer {source} moved onto {target}"));
        true
    }

    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.tab == tab {
            return false;
        }
        self.tab = tab;
        self.changed("view.tab", format!("tab {}", tab.label()));
        true
    }

    pub fn select_region(&mut self, region: Option<Region>) -> bool {
        if self.region == region {
            return false;
        }
        self.region = region;
        let name = region.map_or("none", Region::name);
        self.changed("map.region", format!("region {name}"));
        true
    }

    pub fn set_sensor(&mut self, sensor: Sensor, enabled: bool) -> bool {
        if self.sensor_enabled(sensor) == enabled {
            return false;
        }
        self.sensors.insert(sensor, enabled);
        let state = if enabled { "on" } else { "off" };
        self.changed("dataset.sensor", format!("{sensor} {state}"));
        true
    }

    /// Rejects a start year after the current end year; the range is left
    /// unchanged in that case.
    pub fn set_start_year(&mut self, start: Year) -> Result<bool, ExplorerError> {
        let years = self.years.with_start(start)?;
        Ok(self.set_years(years))
    }

    pub fn set_end_year(&mut self, end: Year) -> Result<bool, ExplorerError> {
        let years = self.years.with_end(end)?;
        Ok(self.set_years(years))
    }

    pub fn set_years(&mut self, years: YearRange) -> bool {
        if self.years == years {
            return false;
        }
        self.years = years;
        self.changed(
            "dataset.years",
            format!("years {}..{}", years.start(), years.end()),
        );
        true
    }

    pub fn set_cloud_cover(&mut self, percent: u32) -> Result<bool, ExplorerError> {
        let cloud_cover = Percent::new(percent)?;
        if self.cloud_cover == cloud_cover {
            return Ok(false);
        }
        self.cloud_cover = cloud_cover;
        self.changed("dataset.cloud_cover", format!("cloud cover {cloud_cover}"));
        Ok(true)
    }

    /// Presses an analysis button. Always yields a placeholder outcome, which
    /// also becomes the session's status line. Pressing the same button again
    /// with unchanged filters leaves the status line, and the revision, as is.
    pub fn trigger(&mut self, action: AnalysisAction) -> ActionOutcome {
        let outcome = ActionOutcome::placeholder(ActionRequest {
            action,
            region: self.region,
            sensors: self.selected_sensors(),
            years: self.years,
            cloud_cover: self.cloud_cover,
        });
        info!(action = action.label(), "analysis action has no backend; returning placeholder");
        if self.last_action.as_ref() == Some(&outcome) {
            return outcome;
        }
        self.last_action = Some(outcome.clone());
        self.changed("analysis.placeholder", outcome.message().to_string());
        outcome
    }

    /// Row the dataset table shows when `id` is selected.
    pub fn dataset(&self, id: &str) -> Result<&DatasetEntry, ExplorerError> {
        Ok(self.catalog.get(id)?)
    }

    /// Dataset table rows: search results from the enabled sensors, sorted
    /// by `key`.
    pub fn search_datasets(
        &self,
        query: &str,
        key: SortKey,
        order: SortOrder,
    ) -> Vec<&DatasetEntry> {
        let mut rows = self
            .catalog
            .search_for_sensors(query, &self.selected_sensors());
        catalog::sort_rows(&mut rows, key, order);
        rows
    }
}
