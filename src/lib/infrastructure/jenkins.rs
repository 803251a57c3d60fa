//! Jenkins notification backend
//!
//! Sends email by triggering a parameterised Jenkins job
//! (`/job/{name}/buildWithParameters`) whose pipeline relays the message.

use std::{io, path::Path};

use async_trait::async_trait;
use reqwest::{
    header::LOCATION,
    multipart::{Form, Part},
    Body, Client,
};
use serde::Serialize;
use tokio::fs::{self, File};
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info};

use crate::{
    domain::notifications::{
        Backend, BackendError, EmailRequest, NotificationClient, NotificationError,
    },
    infrastructure::config::{JenkinsArgs, JenkinsSettings},
};

/// Multipart field the job reads the attachment from
pub const ATTACHMENT_FIELD: &str = "ATTACHMENT_FILE";

/// Build parameters expected by the email job
#[derive(Debug, Serialize)]
struct BuildParameters<'a> {
    token: &'a str,

    #[serde(rename = "RECIPIENTS")]
    recipients: String,

    #[serde(rename = "SUBJECT")]
    subject: &'a str,

    #[serde(rename = "BODY")]
    body: &'a str,

    #[serde(rename = "CONTENT_TYPE")]
    content_type: &'a str,
}

/// Backend that triggers a Jenkins job to send the email
#[derive(Debug, Clone)]
pub struct JenkinsBackend {
    settings: JenkinsSettings,
    client: Client,
    build_url: String,
}

impl JenkinsBackend {
    /// Creates a new Jenkins backend.
    ///
    /// The HTTP client never goes through a proxy, whatever the environment says.
    pub fn new(settings: JenkinsSettings) -> Result<Self, BackendError> {
        let client = Client::builder()
            .no_proxy()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| BackendError::with_cause("Could not create the Jenkins HTTP client", e))?;

        let build_url = format!(
            "{}/job/{}/buildWithParameters",
            settings.url, settings.job_name
        );

        Ok(Self {
            settings,
            client,
            build_url,
        })
    }

    /// The URL the job is triggered with
    pub fn build_url(&self) -> &str {
        &self.build_url
    }

    /// Triggers the email job.
    ///
    /// # Returns
    /// - [`Ok`] with the queue URL Jenkins reported in its `Location` header, if any.
    /// - [`Err`] containing a [`BackendError`] if the attachment is missing or the
    ///   request fails.
    pub async fn trigger(&self, request: &EmailRequest) -> Result<Option<String>, BackendError> {
        // The attachment handle lives inside the form and is dropped with the request.
        let form = match &request.attachment_path {
            Some(path) => Some(attachment_form(path).await?),
            None => None,
        };

        let params = BuildParameters {
            token: &self.settings.build_token,
            recipients: request.all_recipients(),
            subject: &request.subject,
            body: &request.body,
            content_type: &request.content_type,
        };

        info!(
            job = %self.settings.job_name,
            url = %self.build_url,
            has_attachment = form.is_some(),
            "Triggering Jenkins job"
        );

        let mut builder = self
            .client
            .post(&self.build_url)
            .basic_auth(&self.settings.user, Some(&self.settings.api_token))
            .query(&params);

        if let Some(form) = form {
            builder = builder.multipart(form);
        }

        let response = builder
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                // The URL carries the build token.
                let e = e.without_url();

                error!(job = %self.settings.job_name, error = %e, "Jenkins request failed");

                BackendError::with_cause(format!("HTTP request to Jenkins failed: {}", e), e)
            })?;

        let queue_url = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string());

        info!(
            job = %self.settings.job_name,
            status = %response.status(),
            queue_url = ?queue_url,
            "Successfully triggered Jenkins job"
        );

        Ok(queue_url)
    }
}

#[async_trait]
impl Backend for JenkinsBackend {
    async fn send(&self, request: &EmailRequest) -> Result<(), BackendError> {
        self.trigger(request).await.map(|_| ())
    }
}

/// A [`NotificationClient`] sending through Jenkins
pub type JenkinsNotificationClient = NotificationClient<JenkinsBackend>;

impl NotificationClient<JenkinsBackend> {
    /// Creates a client backed by Jenkins using the given settings.
    pub fn from_settings(settings: JenkinsSettings) -> Result<Self, BackendError> {
        Ok(Self::new(JenkinsBackend::new(settings)?))
    }

    /// Creates a client backed by Jenkins, configured from the environment
    /// (and a `.env` file, if one exists).
    pub fn from_env() -> Result<Self, NotificationError> {
        let settings = JenkinsSettings::try_from(JenkinsArgs::from_env()?)?;

        Ok(Self::from_settings(settings)?)
    }
}

async fn attachment_form(path: &Path) -> Result<Form, BackendError> {
    let not_found = || {
        BackendError::new(format!(
            "Attachment file not found at: {}",
            path.display()
        ))
    };

    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Err(not_found()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => {
            return Err(BackendError::with_cause(
                format!("Could not read attachment {}", path.display()),
                e,
            ))
        }
    }

    let file = File::open(path).await.map_err(|e| {
        BackendError::with_cause(
            format!("Could not open attachment {}", path.display()),
            e,
        )
    })?;

    let length = file
        .metadata()
        .await
        .map_err(|e| {
            BackendError::with_cause(
                format!("Could not read attachment {}", path.display()),
                e,
            )
        })?
        .len();

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(file_name = %file_name, length, "Attaching file");

    let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), length)
        .file_name(file_name);

    Ok(Form::new().part(ATTACHMENT_FIELD, part))
}
