use ntex::{
    http::{Payload, header},
    web::{Error, FromRequest, HttpRequest},
};

use crate::{api::errors::ApiError, consts};

/// Raw token sent as `Authorization: Bearer <token>`
pub struct BearerToken(pub String);

/// Extracts the token from the authorization header
fn get_bearer_token(req: &HttpRequest) -> Result<BearerToken, ApiError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(consts::BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| BearerToken(token.to_string()))
        .ok_or(ApiError::MissingToken)
}

impl<Err> FromRequest<Err> for BearerToken {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        futures::future::ready(get_bearer_token(req).map_err(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::test::TestRequest;

    #[test]
    fn test_get_bearer_token() {
        let req = TestRequest::default()
            .header("authorization", "Bearer abc.def.ghi")
            .to_http_request();

        assert!(get_bearer_token(&req).is_ok_and(|token| token.0 == "abc.def.ghi"));
    }

    #[test]
    fn test_get_bearer_token_missing_or_malformed() {
        let missing = TestRequest::default().to_http_request();
        let basic = TestRequest::default()
            .header("authorization", "Basic YWxpY2U6c2VjcmV0")
            .to_http_request();
        let empty = TestRequest::default()
            .header("authorization", "Bearer ")
            .to_http_request();

        for req in [missing, basic, empty] {
            assert!(matches!(get_bearer_token(&req), Err(ApiError::MissingToken)));
        }
    }
}
