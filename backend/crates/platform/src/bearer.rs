//! Bearer Credential Extraction
//!
//! Parses `Authorization: Bearer <token>` (RFC 6750 section 2.1).

use axum::http::{HeaderMap, header};

/// Value for the `WWW-Authenticate` header on 401 responses
pub const WWW_AUTHENTICATE_BEARER: &str = "Bearer";

/// Error when extracting a bearer token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization header is not a Bearer credential")]
    InvalidScheme,

    #[error("Bearer token is empty")]
    EmptyToken,
}

/// Extract the bearer token from request headers
///
/// The scheme name is matched case-insensitively. The token itself is
/// returned verbatim, minus surrounding whitespace.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?;

    let (scheme, token) = value
        .trim_start()
        .split_once(' ')
        .ok_or(BearerError::InvalidScheme)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::InvalidScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let headers = headers_with("bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), Err(BearerError::MissingHeader));
    }

    #[test]
    fn test_other_scheme_rejected() {
        let headers = headers_with("Basic YWRtaW46cGFzc3dvcmQ=");
        assert_eq!(extract_bearer_token(&headers), Err(BearerError::InvalidScheme));

        let headers = headers_with("Bearer");
        assert_eq!(extract_bearer_token(&headers), Err(BearerError::InvalidScheme));
    }

    #[test]
    fn test_empty_token_rejected() {
        let headers = headers_with("Bearer    ");
        assert_eq!(extract_bearer_token(&headers), Err(BearerError::EmptyToken));
    }
}
