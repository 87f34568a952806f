use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use credvest_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Core(e) => match e {
                CoreError::Validation(_) | CoreError::Calculation(_) => StatusCode::BAD_REQUEST,
                CoreError::Database(
                    DatabaseError::UniqueViolation(_) | DatabaseError::ForeignKeyViolation(_),
                ) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoreError) -> StatusCode {
        ApiError::from(err).status()
    }

    #[test]
    fn test_constraint_errors_map_to_conflict() {
        assert_eq!(
            status_of(CoreError::Database(DatabaseError::UniqueViolation(
                "accounts.account_number".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CoreError::Database(DatabaseError::ForeignKeyViolation(
                "goal_plans.account_id".to_string()
            ))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_core_errors_map_to_statuses() {
        assert_eq!(
            status_of(CoreError::not_found("Account", "a-1")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::invalid_input("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::Unexpected("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
