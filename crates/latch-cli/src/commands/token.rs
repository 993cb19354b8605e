//! Token commands.
//!
//! `latch token issue` - Mint a token for a username.
//! `latch token decode` - Verify a token and print its claims.
//! `latch token parse-header` - Show what a Basic header decodes to.

use anyhow::Context;
use chrono::Utc;
use latch_core::CounterLayout;
use latch_token::{CodecKeys, Credentials, TokenClaims, TokenCodec, parse_basic_header};
use std::fs;
use std::path::Path;

/// Resolve a key from either a file path or the secret itself.
///
/// The key string can be:
/// - A path to a file containing the key
/// - The key directly (e.g., from the AUTH_AES_KEY env var)
fn resolve_secret(key: Option<String>, what: &str, env: &str) -> anyhow::Result<String> {
    let key_str = key.with_context(|| {
        format!("{what} key not provided. Either pass --{what}-key <key|path> or set {env}")
    })?;

    let path = Path::new(&key_str);
    if path.is_file() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what} key from file: {}", path.display()))?;
        return Ok(contents.trim_end_matches(['\r', '\n']).to_string());
    }

    Ok(key_str)
}

/// Build a codec from CLI key arguments.
pub fn build_codec(
    payload_key: Option<String>,
    validator_key: Option<String>,
    layout: CounterLayout,
) -> anyhow::Result<TokenCodec> {
    let payload = resolve_secret(payload_key, "payload", "AUTH_AES_KEY")?;
    let validator = resolve_secret(validator_key, "validator", "AUTH_AES_VALIDATOR_KEY")?;
    let keys = CodecKeys::from_secrets(&payload, &validator)?;
    Ok(TokenCodec::new(keys).with_layout(layout))
}

/// Parse a lifetime like "1h" or "90s" into whole seconds.
fn parse_ttl(ttl: &str) -> anyhow::Result<i64> {
    let duration = humantime::parse_duration(ttl.trim())
        .with_context(|| format!("invalid ttl: {ttl}"))?;
    Ok(i64::try_from(duration.as_secs())?)
}

/// Mint a token for `username` and print the login response body.
pub fn issue(codec: &TokenCodec, username: &str, ttl: &str) -> anyhow::Result<()> {
    let ttl_seconds = parse_ttl(ttl)?;
    let token = codec.encode(&Credentials::new(username, None), Utc::now(), ttl_seconds)?;
    println!("{}", serde_json::to_string_pretty(&token)?);
    Ok(())
}

/// Verify `token` against the current time.
pub fn decode(codec: &TokenCodec, token: &str) -> anyhow::Result<()> {
    match codec.decode(token.trim(), Utc::now()) {
        Ok(claims) => {
            println!("✔ Token is valid");
            println!();
            print_claims(&claims);
        }
        Err(e) => {
            println!("✖ Token verification failed ({}): {}", e.code(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_claims(claims: &TokenClaims) {
    println!("Token Details:");
    println!("  Username:   {}", claims.username);
    println!("  Permission: {}", claims.permission);
    match claims.expires_at_utc() {
        Some(at) => println!("  Expires:    {} ({} ms)", at.to_rfc3339(), claims.expires_at),
        None => println!("  Expires:    {} ms", claims.expires_at),
    }
    let remaining = claims.time_until_expiration(Utc::now());
    println!("  Remaining:  {}s", remaining.num_seconds());
}

/// Show the username and whether a password was present.
pub fn parse_header(header: &str) -> anyhow::Result<()> {
    let creds = parse_basic_header(Some(header))?;
    println!("Username: {}", creds.username);
    println!(
        "Password: {}",
        if creds.password.is_some() { "present" } else { "absent" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl("1h").unwrap(), 3600);
        assert_eq!(parse_ttl("30m").unwrap(), 1800);
        assert_eq!(parse_ttl("45s").unwrap(), 45);
        assert!(parse_ttl("forever").is_err());
    }

    #[test]
    fn test_build_codec_from_literal_keys() {
        let codec = build_codec(
            Some("0123456789abcdef".to_string()),
            Some("fedcba9876543210".to_string()),
            CounterLayout::ResetPerField,
        )
        .unwrap();

        let token = codec
            .encode(&Credentials::new("alice", None), Utc::now(), 60)
            .unwrap();
        assert_eq!(codec.decode(&token.token, Utc::now()).unwrap().username, "alice");
    }

    #[test]
    fn test_build_codec_from_key_files() {
        let dir = tempdir().unwrap();
        let payload_path = dir.path().join("payload.key");
        let validator_path = dir.path().join("validator.key");
        fs::write(&payload_path, "0123456789abcdef\n").unwrap();
        fs::write(&validator_path, "fedcba9876543210").unwrap();

        let from_files = build_codec(
            Some(payload_path.to_string_lossy().to_string()),
            Some(validator_path.to_string_lossy().to_string()),
            CounterLayout::ResetPerField,
        )
        .unwrap();
        let from_literals = build_codec(
            Some("0123456789abcdef".to_string()),
            Some("fedcba9876543210".to_string()),
            CounterLayout::ResetPerField,
        )
        .unwrap();

        let now = Utc::now();
        let creds = Credentials::new("bob", None);
        assert_eq!(
            from_files.encode(&creds, now, 60).unwrap(),
            from_literals.encode(&creds, now, 60).unwrap()
        );
    }

    #[test]
    fn test_missing_key() {
        let err = build_codec(None, Some("fedcba9876543210".to_string()), CounterLayout::default())
            .unwrap_err();
        assert!(err.to_string().contains("AUTH_AES_KEY"));
    }

    #[test]
    fn test_parse_header_rejects_other_schemes() {
        assert!(parse_header("Digest abc").is_err());
        assert!(parse_header("Basic YWxpY2U6c2VjcmV0").is_ok());
    }
}
