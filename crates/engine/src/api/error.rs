//! HTTP error mapping.
//!
//! Every non-2xx response carries `{ "message": ... }`. Storage details are
//! logged here and never reach the client.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fichas_domain::{DamageExpressionError, DomainError};
use fichas_shared::ErrorBody;

use crate::use_cases::CharacterError;

pub const MSG_NOT_FOUND: &str = "Ficha não encontrada";
pub const MSG_FORBIDDEN: &str = "Acesso negado";
pub const MSG_MASTER_ONLY: &str = "Acesso negado. Apenas mestres.";
pub const MSG_NO_TOKEN: &str = "Token não fornecido";
pub const MSG_BAD_TOKEN: &str = "Token inválido";
pub const MSG_INTERNAL: &str = "Erro interno do servidor";

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(&'static str),
    Forbidden(&'static str),
    NotFound,
    BadRequest(String),
    Internal,
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, MSG_NOT_FOUND.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl From<DamageExpressionError> for ApiError {
    fn from(e: DamageExpressionError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg)
            | DomainError::Parse(msg)
            | DomainError::InvalidId(msg) => ApiError::BadRequest(msg),
            DomainError::InvalidDamageExpression(expression) => {
                DamageExpressionError::new(expression).into()
            }
            DomainError::InvalidStateTransition(msg) => {
                tracing::error!(error = %msg, "Roll interaction out of order");
                ApiError::Internal
            }
        }
    }
}

impl From<CharacterError> for ApiError {
    fn from(e: CharacterError) -> Self {
        match e {
            CharacterError::NotFound(_) => ApiError::NotFound,
            CharacterError::Forbidden(_) => ApiError::Forbidden(MSG_FORBIDDEN),
            CharacterError::MasterOnly => ApiError::Forbidden(MSG_MASTER_ONLY),
            CharacterError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CharacterError::Domain(e) => e.into(),
            CharacterError::Repo(e) if e.is_not_found() => ApiError::NotFound,
            CharacterError::Repo(e) => {
                tracing::error!(error = %e, "Character storage failed");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
