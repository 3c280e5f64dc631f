use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

/// Header carrying the caller's identity, set by the gateway in front of us.
pub const OWNER_HEADER: &str = "x-openid";

/// The caller's opaque user handle.
///
/// Identity is established upstream; this extractor only reads it. Requests
/// without the header are rejected with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for Owner {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let owner = req
            .headers()
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Owner(v.to_string()))
            .ok_or_else(|| {
                actix_web::error::ErrorUnauthorized(format!("Missing {OWNER_HEADER} header"))
            });

        ready(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn reads_owner_from_header() {
        let (req, mut payload) = TestRequest::default()
            .insert_header((OWNER_HEADER, "user-1"))
            .to_http_parts();

        let owner = Owner::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(owner.as_str(), "user-1");
    }

    #[actix_web::test]
    async fn blank_or_missing_header_is_unauthorized() {
        for req in [
            TestRequest::default(),
            TestRequest::default().insert_header((OWNER_HEADER, "  ")),
        ] {
            let (req, mut payload) = req.to_http_parts();
            let err = Owner::from_request(&req, &mut payload).await.unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::UNAUTHORIZED
            );
        }
    }
}
