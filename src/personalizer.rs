//! Page personalizer: orchestration of readiness, content and submission
//!
//! One `Personalizer` is created per page load. It owns the resolved
//! [`PageContext`], the [`Catalog`], the render target handle, and the
//! option snapshot cache, so repeated personalization always restores from
//! the unfiltered superset.
//!
//! Concurrency model: the render target sits behind a `parking_lot` mutex so
//! the embedder can keep feeding it events while the poller runs. Locks are
//! held per call, never across an await point.

use crate::applier::apply_content;
use crate::catalog::Catalog;
use crate::context::PageContext;
use crate::filter::{filter_options, OptionSnapshot};
use crate::readiness::{await_form, PollPolicy, Readiness};
use crate::render::{FormField, Notice, RenderTarget, SENTINEL_NONE};
use crate::submission::{first_violation, SubmissionError, SubmissionTransport, CRM_ENDPOINT};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Settle delay between form detection and option filtering; the CRM widget
/// streams its options in after the form itself lands
const OPTION_SETTLE: Duration = Duration::from_millis(500);

/// Options below this count mean the widget is still loading; filtering a
/// partial list would snapshot an incomplete superset
const MIN_LOADED_OPTIONS: usize = 10;

/// Delay between the confirmation notice and the field reset
const RESET_DELAY: Duration = Duration::from_secs(2);

const CONFIRMATION_TEXT: &str =
    "Thank you for your application! Our team will contact you shortly.";
const TRANSPORT_ERROR_TEXT: &str =
    "Something went wrong while submitting your application. Please try again.";

/// Text fields cleared after a successful submission. Selects go back to the
/// sentinel; the product field and hidden routing entries are preserved.
const RESET_TEXT_FIELDS: [FormField; 4] = [
    FormField::FirstName,
    FormField::LastName,
    FormField::Email,
    FormField::Phone,
];
const RESET_SELECT_FIELDS: [FormField; 2] = [FormField::HearAbout, FormField::Hackerspaces];

/// Outcome of a personalization pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalizeOutcome {
    /// Content applied; options filtered when the widget had finished loading
    Applied,
    /// The path did not resolve to a landing-page context
    Unresolved,
    /// The form never appeared within the poll ceiling
    TimedOut,
    /// The embedder cancelled the wait
    Cancelled,
}

/// Per-page personalization engine.
pub struct Personalizer<P> {
    page: Arc<Mutex<P>>,
    context: PageContext,
    catalog: Catalog,
    policy: PollPolicy,
    snapshot: Mutex<Option<OptionSnapshot>>,
}

impl<P: RenderTarget> Personalizer<P> {
    pub fn new(page: Arc<Mutex<P>>, context: PageContext, catalog: Catalog) -> Self {
        Self {
            page,
            context,
            catalog,
            policy: PollPolicy::default(),
            snapshot: Mutex::new(None),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// A handle to the shared render target
    pub fn page(&self) -> Arc<Mutex<P>> {
        Arc::clone(&self.page)
    }

    /// Full personalization pass: wait for the form, apply content, then
    /// filter the region options once the widget has settled.
    ///
    /// Every failure path degrades to "skip the enhancement": an unresolved
    /// context, a readiness timeout and cancellation all leave the page as
    /// it was found.
    pub async fn personalize(&self, token: &CancellationToken) -> PersonalizeOutcome {
        if !self.context.is_resolved() {
            debug!("context unresolved; skipping personalization");
            return PersonalizeOutcome::Unresolved;
        }

        match await_form(&self.page, self.policy, token).await {
            Readiness::TimedOut => return PersonalizeOutcome::TimedOut,
            Readiness::Cancelled => return PersonalizeOutcome::Cancelled,
            Readiness::Ready => {}
        }

        self.apply();

        time::sleep(OPTION_SETTLE).await;
        if token.is_cancelled() {
            return PersonalizeOutcome::Cancelled;
        }

        let loaded = self
            .page
            .lock()
            .options()
            .map_or(0, |options| options.len());
        if loaded > MIN_LOADED_OPTIONS {
            self.filter();
        } else {
            debug!(loaded, "option list still loading; skipping filter pass");
        }

        PersonalizeOutcome::Applied
    }

    /// Apply course metadata, region name and translations to the page.
    pub fn apply(&self) {
        let mut page = self.page.lock();
        apply_content(&mut *page, &self.context, &self.catalog);
    }

    /// Filter the region select against the hackerspace directory. Safe to
    /// call repeatedly: the snapshot cache guarantees each pass starts from
    /// the unfiltered superset.
    pub fn filter(&self) -> bool {
        let Some(region) = self.context.region.as_deref() else {
            return false;
        };
        let mut page = self.page.lock();
        let mut snapshot = self.snapshot.lock();
        filter_options(&mut *page, region, &self.catalog, &mut snapshot)
    }

    /// Validate the form and deliver it to the CRM endpoint.
    ///
    /// Validation failure focuses the offending field and surfaces its
    /// message. Transport failure surfaces a generic message and leaves the
    /// form as-is. Success shows the confirmation notice and, after a short
    /// delay, clears the visible fields while preserving the hidden routing
    /// fields and the product field.
    pub async fn submit<T: SubmissionTransport + ?Sized>(
        &self,
        transport: &T,
    ) -> Result<(), SubmissionError> {
        let entries = {
            let mut page = self.page.lock();
            if let Some(violation) = first_violation(&*page) {
                page.show_notice(Notice::error(violation.to_string()));
                if let Some(field) = violation.offending_field() {
                    page.focus_field(field);
                }
                return Err(violation);
            }
            page.form_entries()
        };

        debug!(fields = entries.len(), "submitting lead form");
        if let Err(error) = transport.deliver(CRM_ENDPOINT, &entries).await {
            warn!(%error, "lead submission failed");
            self.page.lock().show_notice(Notice::error(TRANSPORT_ERROR_TEXT));
            return Err(error.into());
        }

        info!("lead submitted");
        self.page
            .lock()
            .show_notice(Notice::confirmation(CONFIRMATION_TEXT));

        time::sleep(RESET_DELAY).await;
        self.reset_visible_fields();
        Ok(())
    }

    fn reset_visible_fields(&self) {
        let mut page = self.page.lock();
        for field in RESET_TEXT_FIELDS {
            page.set_field_value(field, "");
        }
        for field in RESET_SELECT_FIELDS {
            page.set_field_value(field, SENTINEL_NONE);
        }
    }
}
