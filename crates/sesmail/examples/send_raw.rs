//! Example: send a message with an attachment through `SendRawEmail`
//!
//! ## Prerequisites
//!
//! Set environment variables:
//! ```bash
//! export SES_ACCESS_KEY="AKID..."
//! export SES_SECRET_KEY="..."
//! export SES_FROM="verified-sender@example.com"
//! export SES_TO="recipient@example.com"
//! # optional, defaults to us-east-1
//! export SES_REGION="eu-west-1"
//! # optional, attached when set
//! export SES_ATTACHMENT="./report.pdf"
//! ```
//!
//! ## Running
//!
//! ```bash
//! cargo run --example send_raw
//! ```

use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use sesmail::{Attachment, CancellationToken, Config, Credentials, Message, SesClient};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sesmail=debug,send_raw=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let access_key = env::var("SES_ACCESS_KEY").context("SES_ACCESS_KEY not set")?;
    let secret_key = env::var("SES_SECRET_KEY").context("SES_SECRET_KEY not set")?;
    let from = env::var("SES_FROM").context("SES_FROM not set")?;
    let to = env::var("SES_TO").context("SES_TO not set")?;
    let region = env::var("SES_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    let mut attachments = Vec::new();
    if let Ok(path) = env::var("SES_ATTACHMENT") {
        let content = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
        let name = Path::new(&path)
            .file_name()
            .map_or_else(|| path.clone(), |n| n.to_string_lossy().into_owned());
        attachments.push(Attachment::new(content, "application/octet-stream", name));
    }

    let message = Message::new(
        from,
        to,
        "sesmail example",
        "<p>Sent with <b>sesmail</b>.</p>",
        "Sent with sesmail.",
        attachments,
    );

    let config = Config::builder(
        Config::regional_endpoint(&region),
        Credentials::new(access_key, secret_key),
    )
    .timeout(Duration::from_secs(30))
    .build()?;
    let client = SesClient::new(config)?;

    // Ctrl-C aborts an in-flight send
    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let receipt = client.send_with_cancel(&message, &token).await?;
    info!(
        message_id = ?receipt.message_id,
        request_id = ?receipt.request_id,
        "Message accepted"
    );

    Ok(())
}
