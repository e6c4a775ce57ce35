//! Server-side HTML rendering
//!
//! A pure function of (template, data) -> HTML string. Tera auto-escapes
//! every interpolation; the one deliberate exception is the provider's HTML
//! message body, which can only cross the render boundary wrapped in
//! [`TrustedHtml`] and is piped through `| safe` in exactly one template.
//! That exposure is inherited from the original design: the provider is
//! trusted with raw markup, the rest of the page is not.

use std::fmt;

use integration_mailtm::{MessageDetail, MessageSummary};
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

/// Error type for view rendering
#[derive(Debug, Error)]
pub enum ViewError {
    /// Template compilation failed at startup
    #[error("Template compilation failed: {0}")]
    Compile(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),
}

/// Provider-supplied HTML that is intentionally rendered unescaped
///
/// Constructing this type is the explicit opt-in; nothing else reaches a
/// `| safe` filter.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Wrap provider HTML for raw rendering
    pub fn new(html: String) -> Self {
        Self(html)
    }

    /// The wrapped markup
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Data for the index page
#[derive(Debug, Serialize)]
pub struct IndexView {
    /// Currently bound address, if any
    pub email: Option<String>,
    /// Pending flash messages
    pub flashes: Vec<String>,
}

/// One row of the inbox listing
#[derive(Debug, Serialize)]
pub struct InboxEntry {
    pub id: String,
    pub subject: String,
    pub sender: String,
    pub intro: String,
    pub seen: bool,
    pub received_at: String,
}

impl From<MessageSummary> for InboxEntry {
    fn from(summary: MessageSummary) -> Self {
        Self {
            subject: subject_or_default(summary.subject.as_deref()),
            sender: sender_or_default(summary.sender()),
            intro: summary.intro.clone().unwrap_or_default(),
            seen: summary.seen,
            received_at: format_timestamp(&summary.created_at),
            id: summary.id,
        }
    }
}

/// Data for the inbox page
#[derive(Debug, Serialize)]
pub struct InboxView {
    pub email: String,
    pub flashes: Vec<String>,
    pub messages: Vec<InboxEntry>,
}

/// Data for the message detail page
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub subject: String,
    pub sender: String,
    pub text: String,
    pub body_html: TrustedHtml,
    pub received_at: String,
}

impl From<MessageDetail> for MessageView {
    fn from(detail: MessageDetail) -> Self {
        Self {
            subject: subject_or_default(detail.subject.as_deref()),
            sender: sender_or_default(detail.sender()),
            text: detail.text.clone().unwrap_or_default(),
            received_at: format_timestamp(&detail.created_at),
            body_html: TrustedHtml::new(detail.html),
        }
    }
}

fn subject_or_default(subject: Option<&str>) -> String {
    match subject {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => "(no subject)".to_string(),
    }
}

fn sender_or_default(sender: Option<&str>) -> String {
    sender.unwrap_or("unknown sender").to_string()
}

fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Tera engine with the three embedded page templates
pub struct TemplateEngine {
    tera: Tera,
}

impl fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateEngine").finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Compile the embedded templates
    ///
    /// # Errors
    ///
    /// Returns an error if any embedded template fails to compile.
    pub fn new() -> Result<Self, ViewError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("index.html", include_str!("../templates/index.html")),
            ("inbox.html", include_str!("../templates/inbox.html")),
            ("message.html", include_str!("../templates/message.html")),
        ])
        .map_err(|e| ViewError::Compile(e.to_string()))?;

        Ok(Self { tera })
    }

    fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, ViewError> {
        let context = tera::Context::from_serialize(data)
            .map_err(|e| ViewError::Render(e.to_string()))?;
        self.tera
            .render(template, &context)
            .map_err(|e| ViewError::Render(e.to_string()))
    }

    /// Render the index page
    pub fn render_index(&self, data: &IndexView) -> Result<String, ViewError> {
        self.render("index.html", data)
    }

    /// Render the inbox listing
    pub fn render_inbox(&self, data: &InboxView) -> Result<String, ViewError> {
        self.render("inbox.html", data)
    }

    /// Render one message
    pub fn render_message(&self, data: &MessageView) -> Result<String, ViewError> {
        self.render("message.html", data)
    }
}
