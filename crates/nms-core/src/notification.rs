use crate::{Error, Result};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Trait for surfacing transient, dismissible notifications to the operator
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, severity: Severity, message: &str) -> Result<()>;

    /// Surface a failed operation using the most specific message available
    async fn notify_error(&self, context: &str, error: &Error) -> Result<()> {
        let message = format!("{}: {}", context, error.user_message());
        self.notify(Severity::Error, &message).await
    }
}

/// Notifier that writes to the tracing log
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, severity: Severity, message: &str) -> Result<()> {
        match severity {
            Severity::Success | Severity::Info => tracing::info!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<(Severity, String)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, severity: Severity, message: &str) -> Result<()> {
            self.seen.lock().unwrap().push((severity, message.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_notify_error_uses_response_message() {
        let notifier = RecordingNotifier::default();
        let err = Error::Http {
            status: 400,
            message: Some("tac out of range".to_string()),
        };

        notifier
            .notify_error("failed saving network", &err)
            .await
            .unwrap();

        let seen = notifier.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[(
                Severity::Error,
                "failed saving network: tac out of range".to_string()
            )]
        );
    }
}
