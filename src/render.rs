//! Render target abstraction over the host page
//!
//! The personalization logic never touches a real DOM. Everything it does to
//! the page goes through [`RenderTarget`]: set a text slot, rewrite a field
//! label, swap the option list, raise a transient notice. Embedders implement
//! the trait for their UI substrate; tests and headless embedders use
//! [`MemoryPage`].

use std::cell::Cell;
use std::collections::HashMap;
use std::time::Duration;

/// Sentinel value the CRM uses for "no selection" in its selects
pub const SENTINEL_NONE: &str = "-None-";

/// Marker the host form appends to labels of required fields
pub const REQUIRED_MARKER: char = '*';

/// How long the region indicator stays visible
pub const INDICATOR_DURATION: Duration = Duration::from_secs(3);

/// How long the submission confirmation stays visible
pub const CONFIRMATION_DURATION: Duration = Duration::from_secs(5);

/// Text slots the content applier can rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    /// The document/tab title
    DocumentTitle,
    CourseTitle,
    CourseSubtitle,
    /// Displayed region name
    LocationName,
    FormTitle,
    SubmitButton,
    ResetButton,
}

/// Named fields of the lead-capture form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    /// "How did you hear about us" select
    HearAbout,
    /// Region-sensitive hackerspace select
    Hackerspaces,
    /// Hidden product routing field
    Product,
}

impl FormField {
    /// All fields, in the order the CRM form declares them
    pub const ALL: [FormField; 7] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
        FormField::HearAbout,
        FormField::Hackerspaces,
        FormField::Product,
    ];

    /// The field's name on the CRM wire
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::HearAbout => "CONTACTCF12",
            FormField::Hackerspaces => "CONTACTCF126",
            FormField::Product => "CONTACTCF329",
        }
    }
}

/// One entry of a select control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The "no selection" placeholder entry
    pub fn sentinel() -> Self {
        Self::new(SENTINEL_NONE, SENTINEL_NONE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// "Region X detected" indicator shown after option filtering
    RegionDetected,
    /// Post-submission thank-you message
    Confirmation,
    /// Validation or transport failure message
    Error,
}

/// A transient, auto-dismissing message. Core supplies the display duration;
/// dismissal (fade-out etc.) is the render target's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub duration: Duration,
}

impl Notice {
    pub fn region_detected(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::RegionDetected,
            text: text.into(),
            duration: INDICATOR_DURATION,
        }
    }

    pub fn confirmation(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Confirmation,
            text: text.into(),
            duration: CONFIRMATION_DURATION,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
            duration: CONFIRMATION_DURATION,
        }
    }
}

/// Abstract output surface for page personalization.
///
/// Readers take `&self`, mutators `&mut self`; the personalizer keeps the
/// target behind a mutex and holds the lock only for the duration of a call,
/// never across an await point.
pub trait RenderTarget: Send {
    /// Whether the third-party form has been injected yet
    fn form_present(&self) -> bool;

    /// Whether the region-sensitive select control exists yet
    fn region_select_present(&self) -> bool;

    fn set_text(&mut self, slot: TextSlot, text: &str);

    /// Current label text of a field, `None` if the field has no label
    fn field_label(&self, field: FormField) -> Option<String>;

    fn set_field_label(&mut self, field: FormField, label: &str);

    fn field_value(&self, field: FormField) -> Option<String>;

    fn set_field_value(&mut self, field: FormField, value: &str);

    /// Current options of the region-sensitive select
    fn options(&self) -> Option<Vec<SelectOption>>;

    fn set_options(&mut self, options: Vec<SelectOption>);

    fn focus_field(&mut self, field: FormField);

    fn show_notice(&mut self, notice: Notice);

    /// The whole form as ordered name/value pairs, hidden routing fields
    /// included, ready for multipart submission
    fn form_entries(&self) -> Vec<(String, String)>;
}

// ─────────────────────────────────────────────────────────────────────────────
// IN-MEMORY RENDER TARGET
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory render target for tests and headless embedders.
///
/// Starts without a form, mirroring the real page where the CRM widget is
/// injected asynchronously; [`MemoryPage::install_form`] simulates the
/// injection. Presence polls are counted so the poller's bounds are
/// observable.
#[derive(Debug, Default)]
pub struct MemoryPage {
    texts: HashMap<TextSlot, String>,
    labels: HashMap<FormField, String>,
    values: HashMap<FormField, String>,
    options: Option<Vec<SelectOption>>,
    hidden_entries: Vec<(String, String)>,
    notices: Vec<Notice>,
    focused: Option<FormField>,
    form_installed: bool,
    presence_polls: Cell<u32>,
}

impl MemoryPage {
    /// An empty page: no form yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the third-party widget injecting its form, with the given
    /// options in the region-sensitive select. Labels carry the CRM's
    /// English defaults; required fields carry the trailing marker.
    pub fn install_form(&mut self, options: Vec<SelectOption>) {
        self.labels = HashMap::from([
            (FormField::FirstName, "First Name *".to_string()),
            (FormField::LastName, "Last Name *".to_string()),
            (FormField::Email, "Email *".to_string()),
            (FormField::Phone, "Phone *".to_string()),
            (FormField::HearAbout, "How did you hear about us? *".to_string()),
            (FormField::Hackerspaces, "Hackerspaces *".to_string()),
        ]);
        self.values = HashMap::from([
            (FormField::FirstName, String::new()),
            (FormField::LastName, String::new()),
            (FormField::Email, String::new()),
            (FormField::Phone, String::new()),
            (FormField::HearAbout, SENTINEL_NONE.to_string()),
            (FormField::Hackerspaces, SENTINEL_NONE.to_string()),
            (FormField::Product, String::new()),
        ]);
        self.hidden_entries = vec![
            ("xnQsjsdp".to_string(), "lead-routing-token".to_string()),
            ("xmIwtLD".to_string(), "form-instance-token".to_string()),
            ("actionType".to_string(), "Q29udGFjdHM=".to_string()),
            ("returnURL".to_string(), "null".to_string()),
        ];
        self.options = Some(options);
        self.form_installed = true;
    }

    /// How many times the poller has checked for the form so far
    pub fn presence_poll_count(&self) -> u32 {
        self.presence_polls.get()
    }

    pub fn text(&self, slot: TextSlot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn focused_field(&self) -> Option<FormField> {
        self.focused
    }

    pub fn hidden_entries(&self) -> &[(String, String)] {
        &self.hidden_entries
    }
}

impl RenderTarget for MemoryPage {
    fn form_present(&self) -> bool {
        self.presence_polls.set(self.presence_polls.get() + 1);
        self.form_installed
    }

    fn region_select_present(&self) -> bool {
        self.options.is_some()
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn field_label(&self, field: FormField) -> Option<String> {
        self.labels.get(&field).cloned()
    }

    fn set_field_label(&mut self, field: FormField, label: &str) {
        self.labels.insert(field, label.to_string());
    }

    fn field_value(&self, field: FormField) -> Option<String> {
        self.values.get(&field).cloned()
    }

    fn set_field_value(&mut self, field: FormField, value: &str) {
        self.values.insert(field, value.to_string());
    }

    fn options(&self) -> Option<Vec<SelectOption>> {
        self.options.clone()
    }

    fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = Some(options);
    }

    fn focus_field(&mut self, field: FormField) {
        self.focused = Some(field);
    }

    fn show_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn form_entries(&self) -> Vec<(String, String)> {
        let mut entries = self.hidden_entries.clone();
        for field in FormField::ALL {
            if let Some(value) = self.values.get(&field) {
                entries.push((field.wire_name().to_string(), value.clone()));
            }
        }
        entries
    }
}
