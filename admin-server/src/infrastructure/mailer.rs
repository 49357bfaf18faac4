use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VerificationMail {
    pub(crate) to: String,
    pub(crate) recipient_name: Option<String>,
    pub(crate) token: String,
}

#[async_trait]
pub(crate) trait Mailer: Send + Sync {
    async fn send_verification(&self, mail: VerificationMail) -> Result<()>;
}

pub(crate) struct LogMailer {
    app_url: String,
}

impl LogMailer {
    pub(crate) fn new(app_url: impl Into<String>) -> Self {
        Self {
            app_url: app_url.into(),
        }
    }

    pub(crate) fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/api/v1/auths/verify-email?token={token}",
            self.app_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, mail: VerificationMail) -> Result<()> {
        let greeting = mail.recipient_name.as_deref().unwrap_or("there");
        info!(
            to = %mail.to,
            link = %self.verification_link(&mail.token),
            "verification mail for {greeting}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LogMailer;

    #[test]
    fn verification_link_joins_app_url() {
        let mailer = LogMailer::new("https://admin.example.com/");
        assert_eq!(
            mailer.verification_link("abc"),
            "https://admin.example.com/api/v1/auths/verify-email?token=abc"
        );
    }
}
