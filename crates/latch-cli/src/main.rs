mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use latch_core::CounterLayout;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "latch", version, about = "Latch token service CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Key management (generate)
    Keys {
        #[command(subcommand)]
        cmd: KeysCommand,
    },

    /// Token operations (issue/decode/parse-header)
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },

    /// Print an Argon2 hash for a `[[auth.users]]` entry
    HashPassword {
        password: String,
    },

    /// Run the HTTP service using the configuration file
    Serve {
        /// Configuration file (defaults to $LATCH_CONFIG, then ./latch.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum KeysCommand {
    /// Generate a fresh payload key and validator key
    Generate {
        /// Key length in bytes: 16, 24 or 32
        #[arg(long, default_value_t = 32)]
        length: usize,

        /// Write `payload.key` and `validator.key` into this directory instead of printing
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct KeyArgs {
    /// Payload key, or a path to a file containing it
    #[arg(long, env = "AUTH_AES_KEY", hide_env_values = true)]
    payload_key: Option<String>,

    /// Validator key, or a path to a file containing it
    #[arg(long, env = "AUTH_AES_VALIDATOR_KEY", hide_env_values = true)]
    validator_key: Option<String>,

    /// Counter layout the token was (or will be) minted with
    #[arg(long, value_enum, default_value_t = LayoutArg::ResetPerField)]
    layout: LayoutArg,
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Mint a token for a username
    Issue {
        #[command(flatten)]
        keys: KeyArgs,

        #[arg(long)]
        username: String,

        /// Token lifetime (e.g. "1h", "30m")
        #[arg(long, default_value = "1h")]
        ttl: String,

        /// Permission label
        #[arg(long, default_value = latch_token::DEFAULT_PERMISSION)]
        permission: String,
    },

    /// Verify a token and print its claims
    Decode {
        #[command(flatten)]
        keys: KeyArgs,

        /// Full token string including the "Bearer " prefix
        token: String,
    },

    /// Parse a Basic Authorization header value
    ParseHeader {
        header: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    ResetPerField,
    Continuous,
}

impl From<LayoutArg> for CounterLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::ResetPerField => CounterLayout::ResetPerField,
            LayoutArg::Continuous => CounterLayout::Continuous,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Keys { cmd } => match cmd {
            KeysCommand::Generate { length, output } => commands::keys::generate(length, output)?,
        },

        Command::Token { cmd } => match cmd {
            TokenCommand::Issue {
                keys,
                username,
                ttl,
                permission,
            } => {
                let codec = commands::token::build_codec(
                    keys.payload_key,
                    keys.validator_key,
                    keys.layout.into(),
                )?
                .with_permission(permission);
                commands::token::issue(&codec, &username, &ttl)?
            }
            TokenCommand::Decode { keys, token } => {
                let codec = commands::token::build_codec(
                    keys.payload_key,
                    keys.validator_key,
                    keys.layout.into(),
                )?;
                commands::token::decode(&codec, &token)?
            }
            TokenCommand::ParseHeader { header } => commands::token::parse_header(&header)?,
        },

        Command::HashPassword { password } => commands::keys::hash_password(&password)?,

        Command::Serve { config } => commands::serve::run(config).await?,
    }

    Ok(())
}
