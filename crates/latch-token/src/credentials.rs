//! HTTP Basic credential parsing.

use crate::error::TokenError;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use std::fmt;

/// Scheme prefix of a Basic Authorization header, including the separating space.
pub const BASIC_SCHEME: &str = "Basic ";

/// Standard alphabet, padding optional.
const BASIC_PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A username/password pair taken from a Basic header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,

    /// `None` when the decoded payload had no `:` separator.
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Render these credentials as a `Basic ...` header value.
    pub fn to_basic_header(&self) -> String {
        let raw = match &self.password {
            Some(password) => format!("{}:{}", self.username, password),
            None => self.username.clone(),
        };
        format!("{}{}", BASIC_SCHEME, base64::engine::general_purpose::STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Parse an Authorization header value of the form `Basic <base64(user:pass)>`.
///
/// The scheme is matched case-sensitively. The decoded payload is split on its
/// first `:`, so passwords may themselves contain colons. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn parse_basic_header(header: Option<&str>) -> Result<Credentials, TokenError> {
    let header = header.map(str::trim_start).unwrap_or_default();
    if header.trim_end().is_empty() {
        return Err(TokenError::AuthEmpty);
    }

    let encoded = header
        .strip_prefix(BASIC_SCHEME)
        .ok_or(TokenError::AuthInvalidScheme)?
        .trim();

    let decoded = BASIC_PAYLOAD
        .decode(encoded)
        .map_err(|_| TokenError::AuthMalformed)?;
    let decoded = String::from_utf8_lossy(&decoded);

    let credentials = match decoded.split_once(':') {
        Some((username, password)) => Credentials::new(username, Some(password.to_string())),
        None => Credentials::new(&*decoded, None),
    };

    if credentials.username.is_empty() {
        return Err(TokenError::AuthMalformed);
    }

    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_empty_header() {
        assert!(matches!(parse_basic_header(None), Err(TokenError::AuthEmpty)));
        assert!(matches!(parse_basic_header(Some("")), Err(TokenError::AuthEmpty)));
        assert!(matches!(parse_basic_header(Some("   ")), Err(TokenError::AuthEmpty)));
    }

    #[test]
    fn test_wrong_scheme() {
        for header in ["Digest abc", "basic YWxpY2U6c2VjcmV0", "Bearer x", "BasicYWxpY2U="] {
            assert!(
                matches!(parse_basic_header(Some(header)), Err(TokenError::AuthInvalidScheme)),
                "{header}"
            );
        }
    }

    #[test]
    fn test_username_and_password() {
        let creds = parse_basic_header(Some("Basic YWxpY2U6c2VjcmV0")).unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_password_keeps_later_colons() {
        // "bob:pa:ss:word"
        let creds = parse_basic_header(Some("Basic Ym9iOnBhOnNzOndvcmQ=")).unwrap();
        assert_eq!(creds.username, "bob");
        assert_eq!(creds.password.as_deref(), Some("pa:ss:word"));
    }

    #[test]
    fn test_username_only() {
        // "carol"
        let creds = parse_basic_header(Some("Basic Y2Fyb2w=")).unwrap();
        assert_eq!(creds.username, "carol");
        assert_eq!(creds.password, None);

        // "carol:" has an empty, but present, password
        let creds = parse_basic_header(Some("Basic Y2Fyb2w6")).unwrap();
        assert_eq!(creds.password.as_deref(), Some(""));
    }

    #[test]
    fn test_unpadded_payload() {
        let creds = parse_basic_header(Some("Basic Y2Fyb2w")).unwrap();
        assert_eq!(creds.username, "carol");
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            parse_basic_header(Some("Basic not*base64")),
            Err(TokenError::AuthMalformed)
        ));
        assert!(matches!(parse_basic_header(Some("Basic ")), Err(TokenError::AuthMalformed)));
        // ":secret"
        assert!(matches!(
            parse_basic_header(Some("Basic OnNlY3JldA==")),
            Err(TokenError::AuthMalformed)
        ));
    }

    #[test]
    fn test_header_roundtrip() {
        let creds = Credentials::new("admin", Some("pass".to_string()));
        assert_eq!(creds.to_basic_header(), "Basic YWRtaW46cGFzcw==");
        assert_eq!(parse_basic_header(Some(&creds.to_basic_header())).unwrap(), creds);
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::new("admin", Some("hunter2".to_string()));
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
