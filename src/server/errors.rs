use ntex::{http, web};
use serde_json::json;

use crate::api::errors::ApiError;

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        match self {
            ApiError::Internal(msg) => log::error!("[InternalServerError] {msg}"),
            _ => log::info!("request rejected: {:?}", self),
        }

        web::HttpResponse::build(self.status_code()).json(&json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ApiError::ValidationFails | ApiError::UserAlreadyExists => {
                http::StatusCode::BAD_REQUEST
            }
            // registration answers a wrong input shape with 401, clients rely on it
            ApiError::InvalidUserData => http::StatusCode::UNAUTHORIZED,
            ApiError::UserNotFound
            | ApiError::PasswordMismatch
            | ApiError::MissingToken
            | ApiError::InvalidToken => http::StatusCode::UNAUTHORIZED,
            ApiError::UrlNotFound => http::StatusCode::NOT_FOUND,
            ApiError::Internal(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::error::WebResponseError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::ValidationFails, 400),
            (ApiError::UserAlreadyExists, 400),
            (ApiError::InvalidUserData, 401),
            (ApiError::UserNotFound, 401),
            (ApiError::PasswordMismatch, 401),
            (ApiError::MissingToken, 401),
            (ApiError::InvalidToken, 401),
            (ApiError::UrlNotFound, 404),
            (ApiError::Internal("boom".into()), 500),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{err:?}");
        }
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err = ApiError::Internal("sqlite: disk I/O error".into());

        assert_eq!(err.to_string(), "Internal server error.");
    }
}
