use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    envelope::{Envelope, Status},
    store::StoreError,
};

pub const BLOG_NOT_FOUND: &str = "Blog not found";
pub const DUPLICATE_TITLE: &str = "A blog with this title already exists";

#[derive(Debug)]
pub enum AppError {
    NotFound,
    DuplicateTitle,
    Invalid {
        status: StatusCode,
        message: String,
    },
    RouteNotFound(String),
    Store {
        error: StoreError,

        #[cfg(debug_assertions)]
        backtrace: backtrace::Backtrace,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Envelope::message(Status::Fail, BLOG_NOT_FOUND),
            ),
            AppError::DuplicateTitle => (
                StatusCode::CONFLICT,
                Envelope::message(Status::Error, DUPLICATE_TITLE),
            ),
            AppError::Invalid { status, message } => {
                (status, Envelope::message(Status::Fail, message))
            }
            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                Envelope::message(
                    Status::Fail,
                    format!("Route: {path} does not exist on this server"),
                ),
            ),
            AppError::Store {
                error,
                #[cfg(debug_assertions)]
                backtrace,
            } => {
                #[cfg(debug_assertions)]
                tracing::error!(
                    error = %error,
                    frames = ?filter_backtrace(&backtrace),
                    "Store operation failed"
                );
                #[cfg(not(debug_assertions))]
                tracing::error!(error = %error, "Store operation failed");

                // The store message carries no secrets, so it is passed through.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::message(Status::Error, error.to_string()),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        AppError::Store {
            error,

            #[cfg(debug_assertions)]
            backtrace: backtrace::Backtrace::new(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };

        AppError::Invalid {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Invalid {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<&'static str> for AppError {
    fn from(message: &'static str) -> Self {
        AppError::Invalid {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

/// Keeps only the frames that belong to this crate, as `name at file:line`.
#[cfg(debug_assertions)]
fn filter_backtrace(backtrace: &backtrace::Backtrace) -> Vec<String> {
    const MODULE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");
    let mut frames_info: Vec<String> = Vec::new();

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            if let (Some(name), Some(filename), Some(lineno)) = (
                symbol.name().map(|n| n.to_string()),
                symbol.filename(),
                symbol.lineno(),
            ) {
                if name.contains(MODULE_PREFIX) {
                    frames_info.push(format!("{name} at {}:{lineno}", filename.display()));
                }
            }
        }
    }

    frames_info
}
