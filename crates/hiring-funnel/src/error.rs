use crate::config::ConfigError;
use crate::funnel::FunnelError;
use crate::harvest::HarvestError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Harvest(HarvestError),
    Funnel(FunnelError),
    Export(csv::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Funnel(FunnelError::DepartmentNotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Funnel(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Harvest(
                HarvestError::Http(_) | HarvestError::Status { .. } | HarvestError::Decode { .. },
            ) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Harvest(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Harvest(err) => write!(f, "harvest error: {}", err),
            AppError::Funnel(err) => write!(f, "analysis error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Harvest(err) => Some(err),
            AppError::Funnel(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<HarvestError> for AppError {
    fn from(value: HarvestError) -> Self {
        Self::Harvest(value)
    }
}

impl From<FunnelError> for AppError {
    fn from(value: FunnelError) -> Self {
        Self::Funnel(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::{ApplicationId, RecordKind};

    #[test]
    fn analysis_errors_map_to_client_statuses() {
        let missing = AppError::from(FunnelError::DepartmentNotFound {
            name: "design".to_string(),
        });
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let dangling = AppError::from(FunnelError::MissingCandidate {
            application_id: ApplicationId(1),
            candidate_id: 2,
        });
        assert_eq!(dangling.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let upstream = AppError::from(HarvestError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        });
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);

        let local = AppError::from(HarvestError::MissingToken {
            kind: RecordKind::Scorecards,
        });
        assert_eq!(local.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            local.to_string(),
            "harvest error: no cached scorecards and HARVEST_API_TOKEN is not set"
        );
    }
}
