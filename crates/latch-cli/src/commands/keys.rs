//! Key management commands.
//!
//! `latch keys generate` - Generate a payload key and a validator key.
//! `latch hash-password` - Hash a password for the credential store.

use anyhow::ensure;
use latch_token::generate_secret;
use std::fs;
use std::path::PathBuf;

/// Generate a new pair of codec keys.
pub fn generate(length: usize, output: Option<PathBuf>) -> anyhow::Result<()> {
    ensure!(
        matches!(length, 16 | 24 | 32),
        "key length must be 16, 24 or 32 bytes, got {}",
        length
    );

    let payload = generate_secret(length);
    let validator = generate_secret(length);

    if let Some(output_dir) = output {
        fs::create_dir_all(&output_dir)?;

        let payload_path = output_dir.join("payload.key");
        let validator_path = output_dir.join("validator.key");

        fs::write(&payload_path, &payload)?;
        fs::write(&validator_path, &validator)?;

        println!("✔ Generated AES-{} keys:", length * 8);
        println!("  Payload key:   {}", payload_path.display());
        println!("  Validator key: {}", validator_path.display());
        println!();
        println!("⚠️  Keep both keys secret! Never commit them to version control.");
        println!();
        println!("Reference them from latch.toml:");
        println!("  [auth]");
        println!("  payload_key_file = \"{}\"", payload_path.display());
        println!("  validator_key_file = \"{}\"", validator_path.display());
    } else {
        println!("AUTH_AES_KEY={}", payload);
        println!("AUTH_AES_VALIDATOR_KEY={}", validator);
    }

    Ok(())
}

/// Print an Argon2 PHC string for `password`.
pub fn hash_password(password: &str) -> anyhow::Result<()> {
    println!("{}", latch_token::hash_password(password)?);
    Ok(())
}
