//! Deferred, cancellable navigation.
//!
//! After a confirmed transfer the UI moves to the history view on its own,
//! a couple of seconds after the summary is shown. The pending move is a
//! task owned by whoever scheduled it; dropping the owner cancels the
//! navigation so it can never act on a torn-down view.

use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// How long the transfer summary stays on screen before the redirect fires.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Navigation targets the core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Transfer,
    History,
    Login,
}

/// A scheduled one-shot navigation.
///
/// Fires at most once; dropping the handle before the delay elapses cancels
/// it.
#[derive(Debug)]
pub struct DeferredRedirect {
    handle: JoinHandle<()>,
}

impl DeferredRedirect {
    /// Send `route` on `routes` after `delay`.
    pub fn schedule(route: Route, routes: UnboundedSender<Route>, delay: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if routes.send(route).is_err() {
                debug!("route receiver dropped before redirect to {route:?} fired");
            }
        });
        DeferredRedirect { handle }
    }

    /// Cancel the pending navigation, if it has not fired yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for DeferredRedirect {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::error::TryRecvError;

    #[tokio::test(start_paused = true)]
    async fn fires_exactly_once_after_the_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _redirect = DeferredRedirect::schedule(Route::History, tx, REDIRECT_DELAY);

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(rx.recv().await, Some(Route::History));
        // Nothing further is ever sent.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_navigation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let redirect = DeferredRedirect::schedule(Route::History, tx, REDIRECT_DELAY);
        drop(redirect);

        tokio::time::advance(Duration::from_secs(10)).await;
        // The sender side is gone entirely, so the channel reports closed.
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_cancel_stops_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let redirect = DeferredRedirect::schedule(Route::History, tx, REDIRECT_DELAY);
        redirect.cancel();

        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
        drop(redirect);
    }
}
