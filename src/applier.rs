//! Content applier: writes the resolved context onto the page
//!
//! Pure side effects against a [`RenderTarget`]; every lookup miss skips just
//! that one update and nothing else.

use crate::catalog::{Catalog, Translation};
use crate::context::PageContext;
use crate::render::{FormField, RenderTarget, TextSlot, REQUIRED_MARKER};
use tracing::debug;

/// Apply course metadata, region name and translated captions to the page.
pub fn apply_content<P: RenderTarget + ?Sized>(
    page: &mut P,
    context: &PageContext,
    catalog: &Catalog,
) {
    if let Some(course) = context.track.as_deref().and_then(|t| catalog.course(t)) {
        page.set_text(TextSlot::CourseTitle, &course.title);
        page.set_text(TextSlot::CourseSubtitle, &course.subtitle);
        page.set_text(
            TextSlot::DocumentTitle,
            &format!("{} - {}", course.title, catalog.site_name),
        );
        page.set_field_value(FormField::Product, &course.product);
        debug!(track = ?context.track, "applied course metadata");
    }

    if let Some(name) = context.region.as_deref().and_then(|r| catalog.region_name(r)) {
        page.set_text(TextSlot::LocationName, name);
    }

    if let Some(translation) = context
        .language
        .as_deref()
        .and_then(|l| catalog.translation(l))
    {
        translate_form(page, translation);
    }
}

/// Rewrite the form captions in the given language.
fn translate_form<P: RenderTarget + ?Sized>(page: &mut P, translation: &Translation) {
    page.set_text(TextSlot::FormTitle, &translation.form_title);

    let captions = [
        (FormField::FirstName, &translation.first_name),
        (FormField::LastName, &translation.last_name),
        (FormField::Email, &translation.email),
        (FormField::Phone, &translation.phone),
        (FormField::HearAbout, &translation.hear_about),
        (FormField::Hackerspaces, &translation.hackerspaces),
    ];
    for (field, caption) in captions {
        relabel(page, field, caption);
    }

    page.set_text(TextSlot::SubmitButton, &translation.submit);
    page.set_text(TextSlot::ResetButton, &translation.reset);
}

/// Replace a field's label text, keeping the trailing required marker when
/// the current label carries one. Fields without a label are left alone.
fn relabel<P: RenderTarget + ?Sized>(page: &mut P, field: FormField, caption: &str) {
    let Some(current) = page.field_label(field) else {
        return;
    };
    let label = if current.trim_end().ends_with(REQUIRED_MARKER) {
        format!("{caption} {REQUIRED_MARKER}")
    } else {
        caption.to_string()
    };
    page.set_field_label(field, &label);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{MemoryPage, SelectOption};

    fn installed_page() -> MemoryPage {
        let mut page = MemoryPage::new();
        page.install_form(vec![SelectOption::sentinel()]);
        page
    }

    #[test]
    fn test_applies_course_and_region() {
        let mut page = installed_page();
        let context = PageContext::resolve("/TN/fr/courses/web-development/");
        apply_content(&mut page, &context, Catalog::builtin());

        assert_eq!(page.text(TextSlot::CourseTitle), Some("Web Development"));
        assert_eq!(
            page.text(TextSlot::DocumentTitle),
            Some("Web Development - GOMYCODE")
        );
        assert_eq!(page.text(TextSlot::LocationName), Some("Tunisia"));
        assert_eq!(
            page.field_value(FormField::Product).as_deref(),
            Some("Web Development Essentials")
        );
    }

    #[test]
    fn test_translates_labels_preserving_required_marker() {
        let mut page = installed_page();
        // A label without the marker should not gain one
        page.set_field_label(FormField::Phone, "Phone");
        let context = PageContext::resolve("/TN/fr/courses/web-development/");
        apply_content(&mut page, &context, Catalog::builtin());

        assert_eq!(page.field_label(FormField::FirstName).as_deref(), Some("Prénom *"));
        assert_eq!(page.field_label(FormField::Phone).as_deref(), Some("Téléphone"));
        assert_eq!(page.text(TextSlot::SubmitButton), Some("Envoyer"));
        assert_eq!(page.text(TextSlot::ResetButton), Some("Réinitialiser"));
    }

    #[test]
    fn test_unknown_track_skips_course_updates_only() {
        let mut page = installed_page();
        let context = PageContext::resolve("/TN/en/courses/basket-weaving/");
        apply_content(&mut page, &context, Catalog::builtin());

        assert_eq!(page.text(TextSlot::CourseTitle), None);
        assert_eq!(page.field_value(FormField::Product).as_deref(), Some(""));
        // Region and translations still applied
        assert_eq!(page.text(TextSlot::LocationName), Some("Tunisia"));
        assert_eq!(page.text(TextSlot::SubmitButton), Some("Submit"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let mut page = installed_page();
        let context = PageContext::resolve("/KE/sw/courses/devops/");
        apply_content(&mut page, &context, Catalog::builtin());
        assert_eq!(page.field_label(FormField::LastName).as_deref(), Some("Last Name *"));
    }

    #[test]
    fn test_empty_context_is_a_no_op() {
        let mut page = installed_page();
        apply_content(&mut page, &PageContext::default(), Catalog::builtin());
        assert_eq!(page.text(TextSlot::CourseTitle), None);
        assert_eq!(page.text(TextSlot::LocationName), None);
        assert_eq!(page.text(TextSlot::FormTitle), None);
    }
}
