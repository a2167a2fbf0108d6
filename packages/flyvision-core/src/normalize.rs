use thiserror::Error;

use crate::region::NormalizedPoint;

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("invalid screen resolution {width}x{height}")]
    InvalidResolution { width: f64, height: f64 },
}

/// Converts a pixel position into the unit-square frame of the screen.
///
/// Fails when either dimension is not strictly positive (NaN included). The
/// result is not clamped: points off-screen map outside `[0, 1]`.
pub fn normalize_point(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<NormalizedPoint, ResolveError> {
    if !(width > 0.0) || !(height > 0.0) {
        return Err(ResolveError::InvalidResolution { width, height });
    }
    Ok(NormalizedPoint::new(x / width, y / height))
}
