//! End-to-end properties of header parsing and the token codec.
//!
//! Run with: cargo test --package latch-token --test token_properties

use chrono::{DateTime, Utc};
use latch_token::{
    CodecKeys, CounterLayout, Credentials, TokenClaims, TokenCodec, TokenError,
    parse_basic_header,
};

const PAYLOAD_KEY: &str = "0123456789abcdef0123456789abcdef";
const VALIDATOR_KEY: &str = "fedcba9876543210fedcba9876543210";

fn codec() -> TokenCodec {
    TokenCodec::new(CodecKeys::from_secrets(PAYLOAD_KEY, VALIDATOR_KEY).unwrap())
}

fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

/// Header "admin:pass" with a one hour lifetime minted at the epoch.
#[test]
fn test_login_header_to_claims() {
    let creds = parse_basic_header(Some("Basic YWRtaW46cGFzcw==")).unwrap();
    assert_eq!(creds.username, "admin");
    assert_eq!(creds.password.as_deref(), Some("pass"));

    let token = codec().encode(&creds, at(0), 3600).unwrap();
    assert_eq!(token.expires_in, 3600);
    assert!(token.token.starts_with("Bearer "));

    let claims = codec().decode(&token.token, at(0)).unwrap();
    assert_eq!(
        claims,
        TokenClaims {
            username: "admin".to_string(),
            permission: "Admin".to_string(),
            expires_at: 3_600_000,
        }
    );
}

#[test]
fn test_roundtrip_various_users() {
    let codec = codec();
    let now = at(1_700_000_000_123);

    for (username, ttl) in [
        ("a", 1),
        ("alice", 60),
        ("user.with.dots", 3600),
        ("ünïcödé-名前", 86_400),
        ("a-username-that-spans-more-than-one-aes-block", 7 * 86_400),
    ] {
        let token = codec
            .encode(&Credentials::new(username, Some("pw".into())), now, ttl)
            .unwrap();

        // Any instant strictly before expiry decodes.
        for later in [now, at(now.timestamp_millis() + ttl * 1000 - 1)] {
            let claims = codec.decode(&token.token, later).unwrap();
            assert_eq!(claims.username, username);
            assert_eq!(claims.permission, "Admin");
            assert_eq!(claims.expires_at, now.timestamp_millis() + ttl * 1000);
        }
    }
}

#[test]
fn test_expiry_boundary() {
    let codec = codec();
    let token = codec
        .encode(&Credentials::new("alice", None), at(5_000), 10)
        .unwrap();
    let expires_at = 15_000;

    assert!(codec.decode(&token.token, at(expires_at - 1)).is_ok());
    assert!(matches!(
        codec.decode(&token.token, at(expires_at)),
        Err(TokenError::TokenExpired { expires_at: 15_000 })
    ));
    assert!(matches!(
        codec.decode(&token.token, at(expires_at + 1)),
        Err(TokenError::TokenExpired { .. })
    ));
}

#[test]
fn test_single_character_tamper_never_validates() {
    let codec = codec();
    let token = codec
        .encode(&Credentials::new("alice", None), at(0), 3600)
        .unwrap()
        .token;
    let prefix = "Bearer ".len();

    for i in prefix..token.len() {
        let original = token.as_bytes()[i];
        if original == b'.' {
            continue;
        }

        for replacement in b"0123456789abcdefABCDEF" {
            if *replacement == original {
                continue;
            }
            let mut tampered = token.clone().into_bytes();
            tampered[i] = *replacement;
            let tampered = String::from_utf8(tampered).unwrap();

            match codec.decode(&tampered, at(1)) {
                Err(TokenError::TokenMalformed) | Err(TokenError::TokenInvalidSignature) => {}
                other => panic!("tamper at {i} with {} gave {other:?}", *replacement as char),
            }
        }
    }
}

#[test]
fn test_wrong_keys_rejected() {
    let token = codec()
        .encode(&Credentials::new("alice", None), at(0), 3600)
        .unwrap()
        .token;

    let other_validator =
        TokenCodec::new(CodecKeys::from_secrets(PAYLOAD_KEY, "another-validator-key-0123456789").unwrap());
    assert!(matches!(
        other_validator.decode(&token, at(1)),
        Err(TokenError::TokenInvalidSignature)
    ));
}

#[test]
fn test_encoding_is_deterministic() {
    let creds = Credentials::new("alice", Some("secret".into()));
    let now = at(1_234_567);

    let first = codec().encode(&creds, now, 3600).unwrap();
    let second = codec().encode(&creds, now, 3600).unwrap();
    assert_eq!(first, second);

    let later = codec().encode(&creds, at(1_234_568), 3600).unwrap();
    assert_ne!(first.token, later.token);
}

#[test]
fn test_password_does_not_affect_token() {
    let now = at(42);
    let a = codec()
        .encode(&Credentials::new("alice", Some("one".into())), now, 60)
        .unwrap();
    let b = codec()
        .encode(&Credentials::new("alice", None), now, 60)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_header_parsing_cases() {
    assert!(matches!(parse_basic_header(None), Err(TokenError::AuthEmpty)));
    assert!(matches!(parse_basic_header(Some("")), Err(TokenError::AuthEmpty)));
    assert!(matches!(
        parse_basic_header(Some("Digest abc")),
        Err(TokenError::AuthInvalidScheme)
    ));

    let creds = parse_basic_header(Some("Basic YWxpY2U6c2VjcmV0")).unwrap();
    assert_eq!(creds, Credentials::new("alice", Some("secret".to_string())));
}

#[test]
fn test_all_key_sizes_and_layouts() {
    let keys = [
        ("payload-key-0001", "validator-key-01"),
        ("payload-key-000000000001", "validator-key-0000000001"),
        (PAYLOAD_KEY, VALIDATOR_KEY),
    ];

    for (payload, validator) in keys {
        for layout in [CounterLayout::ResetPerField, CounterLayout::Continuous] {
            let codec = TokenCodec::new(CodecKeys::from_secrets(payload, validator).unwrap())
                .with_layout(layout);
            let token = codec
                .encode(&Credentials::new("bob", None), at(0), 10)
                .unwrap();
            assert_eq!(codec.decode(&token.token, at(1)).unwrap().username, "bob");
        }
    }
}
