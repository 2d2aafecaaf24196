//! Region-based option filtering with an idempotence snapshot
//!
//! The region-sensitive select arrives from the CRM with every hackerspace
//! worldwide. Filtering keeps only the entries relevant to the detected
//! region. The first run snapshots the unfiltered option list; every later
//! run rebuilds from that snapshot, so filtering is idempotent and switching
//! region never filters an already-filtered list.

use crate::catalog::Catalog;
use crate::render::{Notice, RenderTarget, SelectOption, SENTINEL_NONE};
use tracing::{debug, info};

/// The unfiltered option superset, captured from the live control the first
/// time filtering runs and cached for the page's lifetime.
pub type OptionSnapshot = Vec<SelectOption>;

/// Filter the select's options down to the region's hackerspaces.
///
/// Matching is case-sensitive substring containment on the option's value or
/// label, not exact match: CRM option values sometimes carry prefixes or
/// suffixes around the hackerspace name. The sentinel no-selection entry is
/// always kept. An empty directory entry for the region leaves the control
/// untouched.
///
/// Returns `true` when the option list was rebuilt.
pub fn filter_options<P: RenderTarget + ?Sized>(
    page: &mut P,
    region: &str,
    catalog: &Catalog,
    snapshot: &mut Option<OptionSnapshot>,
) -> bool {
    let Some(current) = page.options() else {
        debug!(region, "region select not present; nothing to filter");
        return false;
    };

    // Idempotent guard: only the very first run captures the superset
    if snapshot.is_none() {
        *snapshot = Some(current);
    }

    let allowed = catalog.region_hackerspaces(region);
    if allowed.is_empty() {
        debug!(region, "no hackerspace directory entry; options left untouched");
        return false;
    }

    let original = snapshot.as_ref().map_or(&[][..], Vec::as_slice);
    let filtered: Vec<SelectOption> = original
        .iter()
        .filter(|opt| {
            opt.value == SENTINEL_NONE
                || allowed
                    .iter()
                    .any(|name| opt.value.contains(name.as_str()) || opt.label.contains(name.as_str()))
        })
        .cloned()
        .collect();

    info!(
        region,
        kept = filtered.len(),
        total = original.len(),
        "filtered hackerspace options"
    );
    page.set_options(filtered);

    let region_display = catalog.region_name(region).unwrap_or(region);
    page.show_notice(Notice::region_detected(format!("{region_display} detected")));
    true
}
