//! REST API module.
//!
//! Handlers translate HTTP requests into class service calls. Bodies are the plain
//! class/member JSON; failures use the error envelope from [`crate::errors`].

mod classes;
mod members;
pub mod validate;

pub use classes::*;
pub use members::*;

use axum::extract::FromRequest;

use crate::errors::AppError;

/// JSON body extractor whose rejections (bad syntax, missing fields) become validation errors.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Response type shared by all handlers.
pub type ApiResult<T> = Result<T, AppError>;
