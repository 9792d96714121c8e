//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Local;
use tower_http::trace::TraceLayer;

use crate::geo::Coordinate;
use crate::ranking::RankError;
use crate::session::{FixedLocation, LocationError, Session, SessionError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/hospitals", get(list_hospitals))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse one coordinate component from the query string.
fn parse_component(name: &str, raw: &str) -> Result<f64, AppError> {
    raw.trim().parse::<f64>().map_err(|_| AppError::BadRequest {
        message: format!("Invalid {name}: {raw}"),
    })
}

/// Turn the query into a location provider.
///
/// No coordinates at all means the client has no permission to share one.
fn locator_for(query: &HospitalsQuery) -> Result<FixedLocation, AppError> {
    match (query.lat.as_deref(), query.lon.as_deref()) {
        (None, None) => Ok(FixedLocation::denied()),
        (Some(lat), Some(lon)) => {
            let lat = parse_component("lat", lat)?;
            let lon = parse_component("lon", lon)?;
            let at = Coordinate::new(lat, lon).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?;
            Ok(FixedLocation::granted(at))
        }
        _ => Err(AppError::BadRequest {
            message: "Both lat and lon are required".to_string(),
        }),
    }
}

/// Ranked hospitals near the given location.
async fn list_hospitals(
    State(state): State<AppState>,
    Query(query): Query<HospitalsQuery>,
) -> Result<Json<HospitalsResponse>, AppError> {
    let locator = locator_for(&query)?;
    let session = Session::start(&locator, state.feeds.as_ref(), &state.config).await?;

    Ok(Json(HospitalsResponse::from_session(&session, Local::now())))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Forbidden { message: String },
    NotFound { message: String },
    BadGateway { message: String, detail: Option<String> },
    Internal { message: String },
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Location(LocationError::PermissionDenied) => AppError::Forbidden {
                message: "Location permission is required to find nearby hospitals".to_string(),
            },
            // The two arms below are not produced by the routes above: query
            // locations never report `Unavailable` and no route selects.
            SessionError::Location(LocationError::Unavailable(reason)) => AppError::Internal {
                message: format!("Location unavailable: {reason}"),
            },
            SessionError::Rank(RankError::Format(format)) => AppError::BadGateway {
                message: format.to_string(),
                detail: Some(format.snippet),
            },
            SessionError::Rank(e @ RankError::Fetch { .. }) => AppError::BadGateway {
                message: e.to_string(),
                detail: None,
            },
            SessionError::UnknownHospital(id) => AppError::NotFound {
                message: format!("Unknown hospital: {id}"),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, detail) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::Forbidden { message } => (StatusCode::FORBIDDEN, message, None),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::BadGateway { message, detail } => (StatusCode::BAD_GATEWAY, message, detail),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        if status.is_server_error() {
            tracing::error!(%status, "{message}");
        } else {
            tracing::debug!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message, detail });
        (status, body).into_response()
    }
}
