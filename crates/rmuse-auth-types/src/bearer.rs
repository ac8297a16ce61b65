use http::HeaderMap;
use http::header::AUTHORIZATION;

/// An `Authorization` header was sent but carries no usable token.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedAuthorization {
    #[error("authorization header is not visible ASCII")]
    NotAscii,
    #[error("authorization scheme without a token")]
    MissingToken,
}

/// Extract the token from the `Authorization` header.
///
/// Accepts both `Bearer <token>` and a bare token. A missing or blank header
/// yields `Ok(None)`. A header that is present but unusable is an error.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, MalformedAuthorization> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| MalformedAuthorization::NotAscii)?
        .trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };
    if token.is_empty() {
        return Err(MalformedAuthorization::MissingToken);
    }
    Ok(Some(token.to_owned()))
}
