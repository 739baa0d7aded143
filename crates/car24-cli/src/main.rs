use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use car24_client::BackendConfig;
use car24_core::proto::client_service::CreateOtp;
use car24_core::{OtpFlow, TokenIssuer};

#[derive(Parser)]
#[command(name = "car24", version, about = "Car24 gateway operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint or inspect session tokens offline
    Token {
        #[command(subcommand)]
        command: TokenCommand,
    },

    /// Run the one-time code login against the client service
    Otp {
        #[command(subcommand)]
        command: OtpCommand,
    },
}

#[derive(Subcommand)]
enum TokenCommand {
    /// Sign a 10-minute session token for a user id
    Mint {
        /// Client service id of the user
        #[arg(long)]
        id: String,

        /// Signing secret (reads from SECRET_KEY env var if not provided)
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret: String,
    },

    /// Check a token's signature and expiry and print its claims
    Verify {
        token: String,

        /// Signing secret (reads from SECRET_KEY env var if not provided)
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret: String,
    },
}

#[derive(Subcommand)]
enum OtpCommand {
    /// Ask the client service to send a code
    Send {
        /// Phone number, e.g. +15551234567
        #[arg(long)]
        phone: String,

        /// Delivery channel
        #[arg(long, default_value = "sms")]
        channel: String,
    },

    /// Verify a code and print the resulting session token
    Verify {
        #[arg(long)]
        phone: String,

        #[arg(long)]
        code: String,

        /// Signing secret (reads from SECRET_KEY env var if not provided)
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays pipeable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("car24_client=warn,car24_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { command } => match command {
            TokenCommand::Mint { id, secret } => cmd_token_mint(&id, &secret)?,
            TokenCommand::Verify { token, secret } => cmd_token_verify(&token, &secret)?,
        },
        Commands::Otp { command } => match command {
            OtpCommand::Send { phone, channel } => cmd_otp_send(phone, channel).await?,
            OtpCommand::Verify {
                phone,
                code,
                secret,
            } => cmd_otp_verify(&phone, &code, &secret).await?,
        },
    }

    Ok(())
}

fn cmd_token_mint(id: &str, secret: &str) -> Result<()> {
    let session = TokenIssuer::new(secret).issue(id)?;
    println!("{}", session.token);
    eprintln!("expires at {}", format_timestamp(session.claims.exp));
    Ok(())
}

fn cmd_token_verify(token: &str, secret: &str) -> Result<()> {
    let claims = TokenIssuer::new(secret)
        .verify(token)
        .context("Token rejected")?;

    let output = serde_json::json!({
        "id": claims.id,
        "issued_at": format_timestamp(claims.iat),
        "expires_at": format_timestamp(claims.exp),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn cmd_otp_send(phone: String, channel: String) -> Result<()> {
    let flow = connect_flow(None)?;
    let receipt = flow
        .issue(CreateOtp {
            phone_number: phone,
            channel,
            locale: String::new(),
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}

async fn cmd_otp_verify(phone: &str, code: &str, secret: &str) -> Result<()> {
    let flow = connect_flow(Some(secret))?;
    let session = flow.verify(code, phone).await?;
    println!("{}", session.token);
    Ok(())
}

/// Build an OTP flow against the client service named in the environment.
///
/// Sending a code needs no secret; the issuer is then keyed with an empty one
/// and never used.
fn connect_flow(secret: Option<&str>) -> Result<OtpFlow> {
    let config = BackendConfig::from_env().context("Invalid backend configuration")?;
    let backends = car24_client::connect(&config)?;
    Ok(OtpFlow::new(
        backends.identity,
        TokenIssuer::new(secret.unwrap_or_default()),
    ))
}

fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
