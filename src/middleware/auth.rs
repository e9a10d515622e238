use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

/// Header carrying the caller's role
pub const ROLE_HEADER: &str = "x-user-role";

/// Only this role may write
pub const ADMIN_ROLE: &str = "admin";

/// Stateless role check: allow only when the role header is exactly `admin`
pub fn check_role(headers: &HeaderMap) -> Result<(), ApiError> {
    match headers.get(ROLE_HEADER).map(|v| v.to_str()) {
        Some(Ok(role)) if role == ADMIN_ROLE => Ok(()),
        _ => Err(ApiError::forbidden("Access Denied")),
    }
}

/// Middleware guarding write routes. Runs before body extraction, so the
/// handler and the repository are never reached on denial.
pub async fn require_admin(headers: HeaderMap, request: Request, next: Next) -> Result<Response, ApiError> {
    if let Err(err) = check_role(&headers) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Role check failed: {} header missing or not '{}'",
            ROLE_HEADER,
            ADMIN_ROLE
        );
        return Err(err);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(role: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static(role));
        headers
    }

    #[test]
    fn admin_is_allowed() {
        assert!(check_role(&headers_with("admin")).is_ok());
    }

    #[test]
    fn missing_header_is_forbidden() {
        let err = check_role(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.message(), "Access Denied");
    }

    #[test]
    fn other_roles_are_forbidden() {
        assert!(check_role(&headers_with("user")).is_err());
        assert!(check_role(&headers_with("Admin")).is_err());
        assert!(check_role(&headers_with("admin ")).is_err());
        assert!(check_role(&headers_with("")).is_err());
    }

    #[test]
    fn non_ascii_header_is_forbidden() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_bytes(b"adm\xffin").unwrap());
        assert!(check_role(&headers).is_err());
    }
}
