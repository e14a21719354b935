use datepoll_common::services::{NewResponseNotice, NotificationService};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Send a new-response notice in the background.
///
/// The caller never waits on the relay; failures are logged and dropped.
/// The handle is returned so tests can await completion.
pub fn dispatch_new_response(
    notifier: Arc<dyn NotificationService>,
    notice: NewResponseNotice,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let to = notice.to.clone();
        match notifier.notify_new_response(notice).await {
            Ok(()) => debug!("Notification delivered to {}", to),
            Err(e) => warn!("Failed to notify {} of new response: {}", to, e),
        }
    })
}
