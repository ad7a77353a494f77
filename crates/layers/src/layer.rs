use serde::{Deserialize, Serialize};

/// Stable layer key. Assigned once at creation and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for LayerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A renderable map overlay entry.
///
/// `attribution` and `url` are opaque to this crate; the host hands them to
/// its tile renderer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    id: LayerId,
    pub name: String,
    pub visible: bool,
    #[serde(default)]
    pub attribution: String,
    #[serde(default)]
    pub url: String,
}

impl Layer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, visible: bool) -> Self {
        Self {
            id: LayerId::new(id),
            name: name.into(),
            visible,
            attribution: String::new(),
            url: String::new(),
        }
    }

    pub fn with_source(mut self, url: impl Into<String>, attribution: impl Into<String>) -> Self {
        self.url = url.into();
        self.attribution = attribution.into();
        self
    }

    pub fn id(&self) -> &LayerId {
        &self.id
    }
}
