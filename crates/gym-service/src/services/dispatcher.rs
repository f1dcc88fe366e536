//! Notification dispatcher
//!
//! A bounded queue in front of one background worker. Callers enqueue without
//! waiting; the worker hands each notification to every sink in turn.

use std::sync::Arc;

use gym_core::{NewNotification, NotificationSink};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default queue length when none is configured
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::Sender<NewNotification>,
}

impl NotificationDispatcher {
    /// Start the worker on the current tokio runtime.
    ///
    /// The worker stops once every dispatcher clone is dropped and the queue
    /// has drained.
    pub fn spawn(
        sinks: Vec<Arc<dyn NotificationSink>>,
        queue_capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(queue_capacity.max(1));
        let worker = tokio::spawn(run_worker(receiver, sinks));
        (Self { sender }, worker)
    }

    /// Enqueue a notification; returns whether it was accepted.
    ///
    /// Never waits. A full or closed queue drops the notification.
    pub fn dispatch(&self, notification: NewNotification) -> bool {
        match self.sender.try_send(notification) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                warn!(
                    event_type = %dropped.event_type,
                    recipient_id = dropped.recipient_id,
                    "Notification queue full, dropping notification"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(dropped)) => {
                warn!(
                    event_type = %dropped.event_type,
                    recipient_id = dropped.recipient_id,
                    "Notification worker stopped, dropping notification"
                );
                false
            }
        }
    }

    /// Free slots left in the queue
    pub fn remaining_capacity(&self) -> usize {
        self.sender.capacity()
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("remaining_capacity", &self.sender.capacity())
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<NewNotification>,
    sinks: Vec<Arc<dyn NotificationSink>>,
) {
    while let Some(notification) = receiver.recv().await {
        for sink in &sinks {
            match sink.deliver(&notification).await {
                Ok(()) => debug!(
                    sink = sink.name(),
                    event_type = %notification.event_type,
                    recipient_id = notification.recipient_id,
                    "Notification delivered"
                ),
                Err(e) => warn!(
                    sink = sink.name(),
                    event_type = %notification.event_type,
                    error = %e,
                    "Notification delivery failed"
                ),
            }
        }
    }
    debug!("Notification worker stopped");
}
