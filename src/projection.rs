//! WGS84 to ETRS89-LCC Europe (EPSG:3034), used to measure distances
//! between reports in metres.

use crate::model::Position;
use anyhow::{anyhow, Context, Result};
use proj::{Proj, ProjCreateError};

pub const EPSG_WGS84: i32 = 4326;
pub const EPSG_METERS: i32 = 3034;

thread_local! {
    // Proj is not Sync, every rayon worker builds its own
    static PROJ_METER: Result<Proj, ProjCreateError> = Proj::new_known_crs(
        format!("EPSG:{}", EPSG_WGS84).as_str(),
        format!("EPSG:{}", EPSG_METERS).as_str(),
        None,
    );
}

/// Projects a longitude/latitude pair to planar metres.
pub fn project(lon: f64, lat: f64) -> Result<Position> {
    PROJ_METER.with(|proj| {
        let proj = proj
            .as_ref()
            .map_err(|e| anyhow!("cannot build EPSG:{EPSG_METERS} projection: {e}"))?;
        let (x, y) = proj
            .convert((lon, lat))
            .with_context(|| format!("cannot project ({lon}, {lat})"))?;
        Ok(Position { x, y })
    })
}
