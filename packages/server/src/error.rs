//! HTTP error mapping.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use safe_route_risk::RiskError;
use safe_route_server_models::ApiErrorBody;
use safe_route_stats::{InvalidYearError, StatsYear};

/// Errors returned by API handlers. Every variant renders as
/// `{"error": message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The engine rejected the request.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// A `year` parameter is not a four-digit year.
    #[error(transparent)]
    InvalidYear(#[from] InvalidYearError),

    /// No region with this name exists.
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// The region exists but has no record for the year.
    #[error("No statistics for region '{region}' in {year}")]
    MissingRecord {
        /// Requested region.
        region: String,
        /// Requested year.
        year: StatsYear,
    },

    /// No statistics years are loaded, so there is no default year.
    #[error("No statistics years are loaded")]
    NoStatistics,

    /// Malformed query string, path, or body.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Risk(RiskError::InvalidArgument { .. })
            | Self::InvalidYear(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Risk(RiskError::UnknownYear(_))
            | Self::UnknownRegion(_)
            | Self::MissingRecord { .. }
            | Self::NoStatistics => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            error: self.to_string(),
        })
    }
}
