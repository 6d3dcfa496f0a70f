use warp::http::StatusCode;
use warp::reply::{Reply, Response};

use puzzle_core::ValidationError;
use puzzle_persistence::StoreError;
use puzzle_types::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    BadRequest(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("Incorrect credentials")]
    IncorrectCredentials,
    #[error("Internal server error")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, .. } => ApiError::NotFound(format!(
                "{}{} not found",
                entity[..1].to_uppercase(),
                &entity[1..]
            )),
            StoreError::Conflict { entity, key } => {
                ApiError::Conflict(format!("{} '{}' already exists", entity, key))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::IncorrectCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response {
        if let ApiError::Internal(details) = &self {
            tracing::error!("Request failed: {}", details);
        }
        let status = self.status();
        warp::reply::with_status(warp::reply::json(&ErrorResponse::new(self.to_string())), status)
            .into_response()
    }
}
