//! Bounded wait for the third-party form to appear
//!
//! The CRM widget injects its form into the page asynchronously, so the
//! personalizer has to wait for it. The wait is a cancellable timed poll with
//! a hard attempt ceiling: if the form never shows up, we log a warning and
//! abandon personalization. Absence of the form is never an error.

use crate::render::RenderTarget;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Polling bounds for the readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    /// 50 attempts at 200 ms, a 10 second ceiling
    fn default() -> Self {
        Self {
            max_attempts: 50,
            interval: Duration::from_millis(200),
        }
    }
}

/// Outcome of the readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Form and region select are both present
    Ready,
    /// The form never appeared within the attempt ceiling
    TimedOut,
    /// The caller cancelled the wait
    Cancelled,
}

/// Poll until the form and its region-sensitive select are both present.
///
/// The first check fires immediately; detection cancels further polling. No
/// lock is held across an await point.
pub async fn await_form<P: RenderTarget>(
    page: &Mutex<P>,
    policy: PollPolicy,
    token: &CancellationToken,
) -> Readiness {
    let mut ticker = time::interval(policy.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    for attempt in 1..=policy.max_attempts {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(attempt, "readiness wait cancelled");
                return Readiness::Cancelled;
            }
            _ = ticker.tick() => {
                let ready = {
                    let page = page.lock();
                    page.form_present() && page.region_select_present()
                };
                if ready {
                    debug!(attempt, "form detected");
                    return Readiness::Ready;
                }
            }
        }
    }

    warn!(
        attempts = policy.max_attempts,
        "form never appeared; abandoning personalization"
    );
    Readiness::TimedOut
}
