use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layer::{Layer, LayerId};
use crate::raster::seed_layers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerListError {
    EmptyId,
    DuplicateId(LayerId),
}

impl std::fmt::Display for LayerListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerListError::EmptyId => write!(f, "layer id must not be empty"),
            LayerListError::DuplicateId(id) => write!(f, "duplicate layer id: {id}"),
        }
    }
}

impl std::error::Error for LayerListError {}

/// Ordered, uniquely keyed layer stack.
///
/// Index 0 is drawn first (bottom of the map stack) and listed first in the
/// layer panel.
///
/// Invariants:
/// - Every `LayerId` appears exactly once.
/// - After construction the list is only changed by [`LayerList::toggle_visibility`]
///   and [`LayerList::reorder`]; neither adds nor removes layers.
///
/// Both mutations accept ids the host read from a previous render. Ids that
/// no longer resolve are ignored rather than reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerList {
    layers: Vec<Layer>,
}

impl LayerList {
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, LayerListError> {
        let mut seen = BTreeSet::new();
        for layer in &layers {
            if layer.id().as_str().is_empty() {
                return Err(LayerListError::EmptyId);
            }
            if !seen.insert(layer.id()) {
                return Err(LayerListError::DuplicateId(layer.id().clone()));
            }
        }
        Ok(Self { layers })
    }

    /// The default street basemap + imagery stack.
    pub fn seed() -> Self {
        Self {
            layers: seed_layers(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &LayerId> + '_ {
        self.layers.iter().map(Layer::id)
    }

    /// Visible layers in stacking order.
    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter().filter(|l| l.visible)
    }

    /// Sets the `visible` flag of the layer keyed by `id`.
    ///
    /// Returns `true` if the list changed. Unknown ids and no-change writes
    /// return `false`.
    pub fn toggle_visibility(&mut self, id: &str, visible: bool) -> bool {
        let Some(layer) = self.layers.iter_mut().find(|l| l.id() == id) else {
            debug!(layer = id, "toggle ignored: unknown layer");
            return false;
        };
        if layer.visible == visible {
            return false;
        }
        layer.visible = visible;
        debug!(layer = id, visible, "layer visibility changed");
        true
    }

    /// Moves `source` to the index `target` occupies, shifting the layers in
    /// between by one. This is a move, not a swap.
    ///
    /// Returns `true` if the list changed. Equal ids and ids that are not in
    /// the list leave it untouched.
    pub fn reorder(&mut self, source: &str, target: &str) -> bool {
        if source == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.index_of(source), self.index_of(target)) else {
            debug!(source, target, "reorder ignored: stale layer id");
            return false;
        };
        if from < to {
            self.layers[from..=to].rotate_left(1);
        } else {
            self.layers[to..=from].rotate_right(1);
        }
        debug!(source, target, from, to, "layer moved");
        true
    }
}

impl Default for LayerList {
    fn default() -> Self {
        Self::seed()
    }
}

impl TryFrom<Vec<Layer>> for LayerList {
    type Error = LayerListError;

    fn try_from(layers: Vec<Layer>) -> Result<Self, Self::Error> {
        Self::from_layers(layers)
    }
}

impl From<LayerList> for Vec<Layer> {
    fn from(list: LayerList) -> Self {
        list.layers
    }
}
