use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Uniform success envelope: `{statusCode, message, data?}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status_code: StatusCode,
    pub message: &'static str,
    pub data: Option<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, T: Serialize> {
    status_code: u16,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with data
    pub fn ok(data: T, message: &'static str) -> Self {
        Self {
            status_code: StatusCode::OK,
            message,
            data: Some(data),
        }
    }

    /// 201 Created with data
    pub fn created(data: T, message: &'static str) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            message,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 200 OK carrying only a message
    pub fn message_only(message: &'static str) -> Self {
        Self {
            status_code: StatusCode::OK,
            message,
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            status_code: self.status_code.as_u16(),
            message: self.message,
            data: self.data.as_ref(),
        };

        (self.status_code, Json(envelope)).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
