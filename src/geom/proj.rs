use anyhow::{Context, Result};
use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::types::RecordError;

/// The working planar system: spherical Mercator, meters.
const MERCATOR: &str =
    "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs";

/// The geographic system longitude/latitude are reported in.
const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// Transform from the planar projected system back to geographic
/// coordinates. Built once per pipeline run; per-coordinate failures are
/// per-record errors, not run failures.
pub(crate) struct GeographicTransform {
    from: Proj4,
    to: Proj4,
}

impl GeographicTransform {
    pub(crate) fn new() -> Result<Self> {
        let from = Proj4::from_proj_string(MERCATOR)
            .with_context(|| format!("failed to build projected CRS: {MERCATOR}"))?;
        let to = Proj4::from_proj_string(WGS84)
            .with_context(|| format!("failed to build geographic CRS: {WGS84}"))?;
        Ok(Self { from, to })
    }

    /// Inverse-project one coordinate; meters in, degrees out.
    pub(crate) fn to_geographic(&self, coord: Coord<f64>) -> Result<Coord<f64>, RecordError> {
        // Radians at the longlat end, per the transform contract.
        let mut point = (coord.x, coord.y, 0.0);
        transform(&self.from, &self.to, &mut point)
            .map_err(|err| RecordError::Projection(err.to_string()))?;

        let lon = point.0.to_degrees();
        let lat = point.1.to_degrees();
        if !lon.is_finite() || !lat.is_finite() {
            return Err(RecordError::Projection(format!(
                "non-finite geographic coordinate for ({}, {})",
                coord.x, coord.y
            )));
        }
        Ok(Coord { x: lon, y: lat })
    }

    /// Inverse-project a whole shape, e.g. to take its centroid in
    /// degrees.
    pub(crate) fn shape_to_geographic(
        &self,
        shape: &MultiPolygon<f64>,
    ) -> Result<MultiPolygon<f64>, RecordError> {
        shape.try_map_coords(|coord| self.to_geographic(coord))
    }
}
