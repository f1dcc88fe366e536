//! Notification sink port

use async_trait::async_trait;

use crate::entities::NewNotification;

use super::RepoResult;

/// Destination for best-effort notifications (inbox table, pub/sub, ...)
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn deliver(&self, notification: &NewNotification) -> RepoResult<()>;
}
