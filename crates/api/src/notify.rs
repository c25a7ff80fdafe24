//! New-inquiry email notification via SMTP.
//!
//! [`InquiryMailer`] wraps the `lettre` async SMTP transport to send a
//! plain-text heads-up to the site owner when a visitor submits the contact
//! form. Configuration comes from environment variables; if `SMTP_HOST` is
//! not set, [`EmailConfig::from_env`] returns `None` and no mailer is
//! constructed.

use folio_db::models::inquiry::ContactInquiry;

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration for the SMTP notification service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Recipient for new-inquiry notifications.
    pub notify_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` or `CONTACT_NOTIFY_TO` is not set,
    /// signalling that email delivery is not configured and should be
    /// skipped.
    ///
    /// | Variable            | Required | Default              |
    /// |---------------------|----------|----------------------|
    /// | `SMTP_HOST`         | yes      | —                    |
    /// | `CONTACT_NOTIFY_TO` | yes      | —                    |
    /// | `SMTP_PORT`         | no       | `587`                |
    /// | `SMTP_FROM`         | no       | `noreply@folio.local` |
    /// | `SMTP_USER`         | no       | —                    |
    /// | `SMTP_PASSWORD`     | no       | —                    |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let notify_address = std::env::var("CONTACT_NOTIFY_TO").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@folio.local".to_string()),
            notify_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Sends new-inquiry notification emails via SMTP.
pub struct InquiryMailer {
    config: EmailConfig,
    site_name: String,
}

impl InquiryMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig, site_name: String) -> Self {
        Self { config, site_name }
    }

    /// Send the notification for a freshly submitted inquiry.
    pub async fn send_new_inquiry(&self, inquiry: &ContactInquiry) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let subject = format!(
            "[{}] New inquiry from {}",
            self.site_name, inquiry.name
        );
        let body = format!(
            "Name: {}\nEmail: {}\nPhone: {}\nSubject: {}\nSubmitted: {}\n\n{}\n",
            inquiry.name,
            inquiry.email,
            if inquiry.phone.is_empty() { "-" } else { &inquiry.phone },
            if inquiry.subject.is_empty() { "-" } else { &inquiry.subject },
            inquiry.submitted_at,
            inquiry.message,
        );

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.notify_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(inquiry_id = inquiry.id, "New-inquiry notification email sent");
        Ok(())
    }
}
