//! Email request

use std::{collections::BTreeSet, path::PathBuf};

/// Content type used when none is given
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// A request to send one email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailRequest {
    /// The primary recipients
    pub to_recipients: Vec<String>,

    /// The carbon-copy recipients
    pub cc_recipients: Vec<String>,

    /// The blind carbon-copy recipients
    pub bcc_recipients: Vec<String>,

    /// The subject of the email
    pub subject: String,

    /// The body of the email, interpreted according to `content_type`
    pub body: String,

    /// The MIME type of the body
    pub content_type: String,

    /// A file to attach to the email
    pub attachment_path: Option<PathBuf>,
}

impl EmailRequest {
    /// Creates a new request with no CC/BCC recipients, an HTML body and no attachment.
    pub fn new<I, S>(to_recipients: I, subject: impl Into<String>, body: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to_recipients: to_recipients.into_iter().map(Into::into).collect(),
            cc_recipients: Vec::new(),
            bcc_recipients: Vec::new(),
            subject: subject.into(),
            body: body.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            attachment_path: None,
        }
    }

    /// Sets the CC recipients.
    pub fn with_cc<I, S>(mut self, cc_recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc_recipients = cc_recipients.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the BCC recipients.
    pub fn with_bcc<I, S>(mut self, bcc_recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bcc_recipients = bcc_recipients.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the content type of the body.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Attaches the file at `path`.
    pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachment_path = Some(path.into());
        self
    }

    /// Encodes every recipient into the single comma-separated field understood by
    /// the email-ext plugin: the distinct `to` addresses, plus one `cc:a,b` token
    /// and one `bcc:a,b` token when those lists are not empty.
    ///
    /// Tokens are deduplicated and emitted in sorted order.
    pub fn all_recipients(&self) -> String {
        let mut recipients: BTreeSet<String> = self.to_recipients.iter().cloned().collect();

        if !self.cc_recipients.is_empty() {
            recipients.insert(format!("cc:{}", self.cc_recipients.join(",")));
        }

        if !self.bcc_recipients.is_empty() {
            recipients.insert(format!("bcc:{}", self.bcc_recipients.join(",")));
        }

        recipients.into_iter().collect::<Vec<_>>().join(",")
    }
}
