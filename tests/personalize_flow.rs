//! End-to-end personalization flow against the in-memory render target
//!
//! Simulates a French visitor landing on the Tunisian web-development page:
//! the CRM form appears a few poll intervals after page load, content and
//! translations are applied once, and the hackerspace select is filtered to
//! the Tunisian entries.

use leadpage_core::{
    Catalog, FormField, MemoryPage, NoticeKind, PageContext, PersonalizeOutcome, Personalizer,
    RenderTarget, SelectOption, TextSlot, SENTINEL_NONE,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn worldwide_options() -> Vec<SelectOption> {
    let mut options = vec![SelectOption::sentinel()];
    for region in ["TN", "MA", "DZ", "SN", "NG", "CI", "EG", "KE", "JO"] {
        for name in Catalog::builtin().region_hackerspaces(region) {
            options.push(SelectOption::new(name.clone(), name.clone()));
        }
    }
    options
}

#[tokio::test(start_paused = true)]
async fn personalizes_page_once_crm_form_appears() {
    let page = Arc::new(Mutex::new(MemoryPage::new()));
    let personalizer = Personalizer::new(
        Arc::clone(&page),
        PageContext::resolve("/TN/fr/courses/web-development/"),
        Catalog::builtin().clone(),
    );
    let token = CancellationToken::new();

    let run = tokio::spawn({
        let token = token.clone();
        async move {
            let outcome = personalizer.personalize(&token).await;
            (personalizer, outcome)
        }
    });

    // The CRM widget injects its form well within the poll ceiling
    tokio::time::sleep(Duration::from_millis(700)).await;
    page.lock().install_form(worldwide_options());

    let (personalizer, outcome) = run.await.unwrap();
    assert_eq!(outcome, PersonalizeOutcome::Applied);

    {
        let page = page.lock();

        // Course content and document title
        assert_eq!(page.text(TextSlot::CourseTitle), Some("Web Development"));
        assert_eq!(
            page.text(TextSlot::CourseSubtitle),
            Some("Create modern and responsive websites")
        );
        assert_eq!(
            page.text(TextSlot::DocumentTitle),
            Some("Web Development - GOMYCODE")
        );
        assert_eq!(page.text(TextSlot::LocationName), Some("Tunisia"));
        assert_eq!(
            page.field_value(FormField::Product).as_deref(),
            Some("Web Development Essentials")
        );

        // French captions, required markers preserved
        assert_eq!(
            page.text(TextSlot::FormTitle),
            Some("Formulaire de Contact - Inscription aux Cours")
        );
        assert_eq!(page.field_label(FormField::FirstName).as_deref(), Some("Prénom *"));
        assert_eq!(page.text(TextSlot::SubmitButton), Some("Envoyer"));

        // Hackerspace select filtered to sentinel + 13 Tunisian entries
        let options = page.options().unwrap();
        assert_eq!(options.len(), 14);
        assert_eq!(options[0].value, SENTINEL_NONE);
        assert!(options.iter().any(|o| o.value == "Sousse Hackerspace"));
        assert!(options.iter().all(|o| o.value != "Casablanca Hackerspace"));

        // Region indicator raised
        let notice = page.last_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::RegionDetected);
        assert_eq!(notice.text, "Tunisia detected");
    }

    // A second pass restores from the snapshot: same visible option set
    let before = page.lock().options().unwrap();
    assert!(personalizer.filter());
    assert_eq!(page.lock().options().unwrap(), before);
}

#[tokio::test(start_paused = true)]
async fn abandons_silently_when_form_never_appears() {
    let page = Arc::new(Mutex::new(MemoryPage::new()));
    let personalizer = Personalizer::new(
        Arc::clone(&page),
        PageContext::resolve("/MA/en/courses/devops/"),
        Catalog::builtin().clone(),
    );

    let outcome = personalizer.personalize(&CancellationToken::new()).await;
    assert_eq!(outcome, PersonalizeOutcome::TimedOut);

    let page = page.lock();
    // Exactly the poll ceiling, then nothing: no content, no notices
    assert_eq!(page.presence_poll_count(), 50);
    assert_eq!(page.text(TextSlot::CourseTitle), None);
    assert!(page.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancellation_abandons_the_wait() {
    let page = Arc::new(Mutex::new(MemoryPage::new()));
    let personalizer = Personalizer::new(
        Arc::clone(&page),
        PageContext::resolve("/TN/fr/courses/devops/"),
        Catalog::builtin().clone(),
    );
    let token = CancellationToken::new();

    let run = tokio::spawn({
        let token = token.clone();
        async move { personalizer.personalize(&token).await }
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    token.cancel();

    assert_eq!(run.await.unwrap(), PersonalizeOutcome::Cancelled);
    assert!(page.lock().notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn non_course_path_leaves_the_page_alone() {
    let page = Arc::new(Mutex::new(MemoryPage::new()));
    page.lock().install_form(worldwide_options());
    let personalizer = Personalizer::new(
        Arc::clone(&page),
        PageContext::from_url("https://example.com/blog/2026/why-learn-rust/"),
        Catalog::builtin().clone(),
    );

    let outcome = personalizer.personalize(&CancellationToken::new()).await;
    assert_eq!(outcome, PersonalizeOutcome::Unresolved);

    let page = page.lock();
    assert_eq!(page.text(TextSlot::CourseTitle), None);
    assert_eq!(page.options().unwrap().len(), worldwide_options().len());
}
