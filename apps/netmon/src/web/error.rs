use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("could not load probe history")]
    QueryFailure(#[from] StoreError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::QueryFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The store error stays in the server log; callers only get the summary.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
