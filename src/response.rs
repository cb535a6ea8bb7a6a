//! Standard success envelope for API responses.
//!
//! Successful responses are wrapped as
//! `{"success": true, "message": ..., "data": ...}`; error responses carry
//! `{"success": false, "error": ...}` and are produced by
//! [`crate::error::AppError`].

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

/// 200 OK with the standard envelope.
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::new(message, data))
}

/// 201 Created with the standard envelope.
pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::new(message, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = ApiResponse::new("done", serde_json::json!({"id": 7}));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "done");
        assert_eq!(value["data"]["id"], 7);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ok("x", 1).status(), 200);
        assert_eq!(created("x", 1).status(), 201);
    }
}
