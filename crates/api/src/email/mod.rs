//! Outbound email via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport to send plain-text
//! notification emails: tier results to candidates, and approval/rejection
//! notices to admin applicants. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None` and no mailer should be constructed.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use skillgate_core::assessment::SkillTier;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

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

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@skillgate.local";

/// Default display name for the platform in email subjects and bodies.
const DEFAULT_APP_NAME: &str = "Skillgate";

/// Configuration for the SMTP email service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Platform display name used in subjects and bodies.
    pub app_name: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      | --                         |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `noreply@skillgate.local`  |
    /// | `APP_NAME`      | no       | `Skillgate`                |
    /// | `SMTP_USER`     | no       | --                         |
    /// | `SMTP_PASSWORD` | no       | --                         |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            app_name: std::env::var("APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message rendering
// ---------------------------------------------------------------------------

/// Subject line for a tier-result email.
fn tier_result_subject(app_name: &str, tier: SkillTier) -> String {
    format!(
        "Your Skill Assessment Results - {} (Tier {}) | {app_name}",
        tier.name(),
        tier.as_i16()
    )
}

/// Plain-text body for a tier-result email, rendered from the static tier
/// metadata table.
fn tier_result_body(app_name: &str, candidate_name: &str, tier: SkillTier) -> String {
    let info = tier.info();
    format!(
        "Hello {candidate_name},\n\n\
         Thank you for completing the {app_name} skill assessment! We've evaluated \
         your responses and are excited to share your results.\n\n\
         Your tier: Tier {} - {}\n\n\
         What this means:\n{}\n\n\
         Next steps:\n\
         - Our team will review your profile and tier assignment\n\
         - We'll match you with suitable projects based on your skill level\n\
         - You'll receive an email within 2-3 business days with further instructions\n\n\
         The {app_name} Team",
        info.tier.as_i16(),
        info.name,
        info.description
    )
}

fn admin_approved_body(app_name: &str, admin_name: &str) -> String {
    format!(
        "Hello {admin_name},\n\n\
         Your {app_name} administrator account has been approved. You can now log in \
         to the review dashboard.\n\n\
         The {app_name} Team"
    )
}

fn admin_rejected_body(app_name: &str, admin_name: &str, reason: &str) -> String {
    format!(
        "Hello {admin_name},\n\n\
         Your {app_name} administrator registration was not approved.\n\n\
         Reason: {reason}\n\n\
         The {app_name} Team"
    )
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends notification emails via SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send a tier-result notification to a candidate.
    pub async fn send_tier_result(
        &self,
        to_email: &str,
        candidate_name: &str,
        tier: SkillTier,
    ) -> Result<(), EmailError> {
        let subject = tier_result_subject(&self.config.app_name, tier);
        let body = tier_result_body(&self.config.app_name, candidate_name, tier);
        self.send(to_email, &subject, body).await
    }

    /// Notify an admin applicant that their account was approved.
    pub async fn send_admin_approved(
        &self,
        to_email: &str,
        admin_name: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("Your {} admin account was approved", self.config.app_name);
        let body = admin_approved_body(&self.config.app_name, admin_name);
        self.send(to_email, &subject, body).await
    }

    /// Notify an admin applicant that their registration was rejected.
    pub async fn send_admin_rejected(
        &self,
        to_email: &str,
        admin_name: &str,
        reason: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("Your {} admin registration", self.config.app_name);
        let body = admin_rejected_body(&self.config.app_name, admin_name, reason);
        self.send(to_email, &subject, body).await
    }

    async fn send(&self, to_email: &str, subject: &str, body: String) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let transport = builder.build();
        transport.send(email).await?;

        tracing::info!(to = %to_email, subject = %subject, "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_result_subject_names_the_tier() {
        let subject = tier_result_subject("Skillgate", SkillTier::Tier3);
        assert!(subject.contains("Multi-Framework Developer"));
        assert!(subject.contains("Tier 3"));
    }

    #[test]
    fn test_tier_result_body_uses_metadata_table() {
        let body = tier_result_body("Skillgate", "Ada", SkillTier::Tier4);
        assert!(body.starts_with("Hello Ada,"));
        assert!(body.contains("Tier 4 - Advanced Full-Stack Developer"));
        assert!(body.contains(SkillTier::Tier4.info().description));
    }

    #[test]
    fn test_rejection_body_includes_reason() {
        let body = admin_rejected_body("Skillgate", "Grace", "Incomplete profile");
        assert!(body.contains("Reason: Incomplete profile"));
    }
}
