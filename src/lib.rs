//! leadpage-core - landing-page personalization and lead capture
//!
//! Headless engine for customizing course landing pages from their URL path
//! and managing the lead-capture form the CRM injects into them.
//!
//! # Architecture
//! - `context`: resolve `{region, language, track}` from the URL path
//! - `catalog`: static lookup tables (courses, regions, translations)
//! - `render`: the `RenderTarget` seam over the host page, plus `MemoryPage`
//! - `applier`: write course/region/translation content onto the page
//! - `filter`: region-based option filtering with an idempotence snapshot
//! - `readiness`: bounded, cancellable wait for the injected form
//! - `submission`: validation and multipart delivery to the CRM endpoint
//! - `personalizer`: per-page orchestration of all of the above

pub mod applier;
pub mod catalog;
pub mod context;
pub mod filter;
pub mod personalizer;
pub mod readiness;
pub mod render;
pub mod submission;

pub use catalog::{Catalog, CatalogError, CourseInfo, Translation, DEFAULT_LANGUAGE};
pub use context::PageContext;
pub use filter::OptionSnapshot;
pub use personalizer::{PersonalizeOutcome, Personalizer};
pub use readiness::{PollPolicy, Readiness};
pub use render::{
    FormField, MemoryPage, Notice, NoticeKind, RenderTarget, SelectOption, TextSlot,
    REQUIRED_MARKER, SENTINEL_NONE,
};
pub use submission::{
    email_shape_ok, HttpTransport, SubmissionError, SubmissionTransport, TransportError,
    CRM_ENDPOINT, REQUIRED_FIELDS,
};
