use crate::error::GridError;
use serde::Serialize;

/// Envelope returned by every batch operation.
///
/// Expected validation failures land in `errors` rather than panicking or
/// surfacing a raw error; `data` is present exactly when `success` is true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> GridResponse<T> {
    pub fn ok(data: T) -> Self {
        GridResponse {
            success: true,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn fail(errors: Vec<String>) -> Self {
        GridResponse {
            success: false,
            data: None,
            errors,
        }
    }

    pub fn fail_with(message: impl Into<String>) -> Self {
        Self::fail(vec![message.into()])
    }
}

impl<T> From<Result<T, GridError>> for GridResponse<T> {
    fn from(result: Result<T, GridError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail_with(e.to_string()),
        }
    }
}
