//! Where the user is.

use std::future::Future;

use crate::geo::Coordinate;

/// Failure to obtain the user's position.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    /// The user refused to share a location. Terminal: retrying will not help.
    #[error("location permission denied")]
    PermissionDenied,

    /// The provider could not produce a fix.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Supplies one coordinate per request.
pub trait LocationProvider {
    fn locate(&self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

/// A provider that always answers the same way.
///
/// Used when the location arrives with the request, and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLocation(Result<Coordinate, LocationError>);

impl FixedLocation {
    pub fn granted(at: Coordinate) -> Self {
        Self(Ok(at))
    }

    pub fn denied() -> Self {
        Self(Err(LocationError::PermissionDenied))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self(Err(LocationError::Unavailable(reason.into())))
    }
}

impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        self.0.clone()
    }
}
