//! Encoded polyline conversion between provider geometry and
//! [`Coordinate`] lists.
//!
//! The codec itself comes from the `polyline` crate, which works on
//! `geo` coordinates (`x` is longitude). This module adds the precision bound
//! used by the adapters and maps codec failures into [`PolylineError`].

use geo::Coord;
use rendezvous_core::Coordinate;
use thiserror::Error;

/// Precision used by Google Maps overview polylines.
pub const GOOGLE_PRECISION: u32 = 5;

/// Highest precision accepted by the codec.
pub const MAX_PRECISION: u32 = 7;

/// Errors raised by [`decode_polyline`] and [`encode_polyline`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The input is not a valid encoded polyline.
    #[error("invalid encoded polyline: {message}")]
    Decode {
        /// Codec failure description.
        message: String,
    },
    /// The coordinates could not be encoded.
    #[error("cannot encode polyline: {message}")]
    Encode {
        /// Codec failure description.
        message: String,
    },
    /// The requested precision is not supported.
    #[error("polyline precision {precision} exceeds {MAX_PRECISION}")]
    Precision {
        /// Requested precision.
        precision: u32,
    },
}

const fn check_precision(precision: u32) -> Result<(), PolylineError> {
    if precision > MAX_PRECISION {
        return Err(PolylineError::Precision { precision });
    }
    Ok(())
}

/// Decode an encoded polyline into coordinates in `(lat, lon)` order.
///
/// # Errors
///
/// Returns [`PolylineError::Decode`] when the input contains bytes outside the
/// encoded alphabet or cannot be decoded, and [`PolylineError::Precision`]
/// when `precision` exceeds [`MAX_PRECISION`].
///
/// # Examples
///
/// ```
/// use rendezvous_core::Coordinate;
/// use rendezvous_data::polyline::{GOOGLE_PRECISION, decode_polyline};
///
/// let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@", GOOGLE_PRECISION)?;
/// assert_eq!(points[0], Coordinate::new(38.5, -120.2));
/// assert_eq!(points.len(), 3);
/// # Ok::<(), rendezvous_data::polyline::PolylineError>(())
/// ```
pub fn decode_polyline(encoded: &str, precision: u32) -> Result<Vec<Coordinate>, PolylineError> {
    check_precision(precision)?;
    let line = ::polyline::decode_polyline(encoded, precision).map_err(|err| {
        PolylineError::Decode {
            message: err.to_string(),
        }
    })?;
    Ok(line.into_iter().map(Coordinate::from).collect())
}

/// Encode coordinates as a polyline.
///
/// # Errors
///
/// Returns [`PolylineError::Encode`] when a coordinate lies outside the valid
/// latitude or longitude range, and [`PolylineError::Precision`] when
/// `precision` exceeds [`MAX_PRECISION`].
///
/// # Examples
///
/// ```
/// use rendezvous_core::Coordinate;
/// use rendezvous_data::polyline::{GOOGLE_PRECISION, encode_polyline};
///
/// let encoded = encode_polyline(&[Coordinate::new(38.5, -120.2)], GOOGLE_PRECISION)?;
/// assert_eq!(encoded, "_p~iF~ps|U");
/// # Ok::<(), rendezvous_data::polyline::PolylineError>(())
/// ```
pub fn encode_polyline(points: &[Coordinate], precision: u32) -> Result<String, PolylineError> {
    check_precision(precision)?;
    ::polyline::encode_coordinates(points.iter().map(|point| Coord::from(*point)), precision)
        .map_err(|err| PolylineError::Encode {
            message: err.to_string(),
        })
}
