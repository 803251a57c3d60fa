#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Sends one email through the notification service

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use notification_service::{
    domain::notifications::DEFAULT_CONTENT_TYPE, EmailRequest, JenkinsArgs,
    JenkinsNotificationClient, JenkinsSettings,
};
use tracing::{error, info};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// Primary recipient, may be repeated
    #[clap(long, required = true)]
    pub to: Vec<String>,

    /// Carbon-copy recipient, may be repeated
    #[clap(long)]
    pub cc: Vec<String>,

    /// Blind carbon-copy recipient, may be repeated
    #[clap(long)]
    pub bcc: Vec<String>,

    /// The subject of the email
    #[clap(long)]
    pub subject: String,

    /// The body of the email
    #[clap(long)]
    pub body: String,

    /// The MIME type of the body
    #[clap(long, default_value = DEFAULT_CONTENT_TYPE)]
    pub content_type: String,

    /// A file to attach
    #[clap(long)]
    pub attachment: Option<PathBuf>,

    /// The Jenkins configuration
    #[clap(flatten)]
    pub jenkins: JenkinsArgs,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let settings = JenkinsSettings::try_from(args.jenkins)?;
    let client = JenkinsNotificationClient::from_settings(settings)?;

    let mut email = EmailRequest::new(args.to, args.subject, args.body)
        .with_cc(args.cc)
        .with_bcc(args.bcc)
        .with_content_type(args.content_type);

    if let Some(attachment) = args.attachment {
        email = email.with_attachment(attachment);
    }

    info!("Sending email via the notification service");

    if let Err(e) = client.send_email(&email).await {
        error!(error = %e, "Failed to send notification");

        return Err(e.into());
    }

    info!("Email dispatch command sent");

    Ok(())
}
