//! Geographic bounding boxes and the named briefing domains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainParseError;

/// A geographic bounding box in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Check if a point lies inside the box (edges included).
    ///
    /// Longitudes given in the 0..360 convention are folded to -180..180
    /// before the test.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let lon = normalize_lon(lon);
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Whether min <= max on both axes.
    pub fn is_valid(&self) -> bool {
        self.min_lon <= self.max_lon && self.min_lat <= self.max_lat
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }
}

fn normalize_lon(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    }
}

/// Named map extents used by the briefing figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Campaign default map extent.
    Orcestra,
    /// Satellite imagery figures, reaching further east than the campaign box.
    Goes,
    /// Surface wind quiver maps.
    SurfaceWind,
    /// Integrated water vapour maps, extending into the southern hemisphere.
    WaterVapour,
}

impl Domain {
    pub fn bbox(&self) -> BoundingBox {
        match self {
            Domain::Orcestra => BoundingBox::new(-65.0, -10.0, -5.0, 25.0),
            Domain::Goes => BoundingBox::new(-70.0, -10.0, 5.0, 25.0),
            Domain::SurfaceWind => BoundingBox::new(-65.0, -10.0, -5.0, 20.0),
            Domain::WaterVapour => BoundingBox::new(-70.0, -25.0, 0.0, 25.0),
        }
    }

    pub fn all() -> &'static [Domain] {
        &[
            Domain::Orcestra,
            Domain::Goes,
            Domain::SurfaceWind,
            Domain::WaterVapour,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Domain::Orcestra => "orcestra",
            Domain::Goes => "goes",
            Domain::SurfaceWind => "surface_wind",
            Domain::WaterVapour => "water_vapour",
        }
    }
}

impl FromStr for Domain {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "orcestra" => Ok(Domain::Orcestra),
            "goes" => Ok(Domain::Goes),
            "surface_wind" => Ok(Domain::SurfaceWind),
            "water_vapour" | "water_vapor" | "iwv" => Ok(Domain::WaterVapour),
            _ => Err(DomainParseError::UnknownDomain(s.to_string())),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_contains() {
        let bbox = BoundingBox::new(-50.0, -5.0, 0.0, 20.0);
        assert!(bbox.contains(-22.9, 16.7));
        assert!(bbox.contains(-50.0, -5.0));
        assert!(!bbox.contains(-59.5, 13.1));
        assert!(!bbox.contains(-22.9, 25.0));
    }

    #[test]
    fn test_bbox_contains_0_360_longitude() {
        let bbox = BoundingBox::new(-50.0, -5.0, 0.0, 20.0);
        assert!(bbox.contains(337.1, 16.7));
        assert!(!bbox.contains(300.0, 16.7));
    }

    #[test]
    fn test_domain_parse() {
        assert_eq!("Orcestra".parse::<Domain>().unwrap(), Domain::Orcestra);
        assert_eq!("surface-wind".parse::<Domain>().unwrap(), Domain::SurfaceWind);
        assert_eq!("IWV".parse::<Domain>().unwrap(), Domain::WaterVapour);
        assert!("Sal".parse::<Domain>().is_err());
    }

    #[test]
    fn test_campaign_box_inside_figure_extents() {
        let orcestra = Domain::Orcestra.bbox();
        for domain in [Domain::Goes, Domain::WaterVapour] {
            let outer = domain.bbox();
            assert!(outer.contains(orcestra.min_lon, orcestra.min_lat), "{domain}");
            assert!(outer.contains(orcestra.max_lon, orcestra.max_lat), "{domain}");
        }
    }

    #[test]
    fn test_domain_bboxes_valid() {
        for domain in Domain::all() {
            assert!(domain.bbox().is_valid(), "{domain} has inverted bounds");
        }
    }
}
