//! Engine error type.

use thiserror::Error;

/// Errors raised by the reconstruction engine.
///
/// Raised before the working buffer is touched; the engine is left exactly
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructionError {
    /// The brightest pixel leaves no headroom for the background shift, so
    /// shifted pixels could overflow or alias the 0 background sentinel.
    #[error("Saturation risk: maximum pixel value {max} exceeds {limit}, no headroom for the background shift")]
    SaturationRisk { max: u16, limit: u16 },
}
