use crate::layer::Layer;

/// XYZ tile source template for a raster basemap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RasterSource {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
}

impl RasterSource {
    pub fn to_layer(&self, visible: bool) -> Layer {
        Layer::new(self.id, self.name, visible).with_source(self.url, self.attribution)
    }
}

pub const OPEN_STREET_MAP: RasterSource = RasterSource {
    id: "osm",
    name: "OpenStreetMap",
    url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    attribution: "&copy; OpenStreetMap contributors",
};

pub const WORLD_IMAGERY: RasterSource = RasterSource {
    id: "satellite",
    name: "Satellite Imagery",
    url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    attribution: "Tiles &copy; Esri",
};

/// Layers every session starts with: the street basemap shown, imagery hidden.
pub fn seed_layers() -> Vec<Layer> {
    vec![OPEN_STREET_MAP.to_layer(true), WORLD_IMAGERY.to_layer(false)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_basemap_visible_and_imagery_hidden() {
        let seed = seed_layers();
        let summary: Vec<(&str, bool)> = seed.iter().map(|l| (l.id().as_str(), l.visible)).collect();
        assert_eq!(summary, vec![("osm", true), ("satellite", false)]);
        assert!(seed.iter().all(|l| l.url.contains("{z}")));
    }
}
