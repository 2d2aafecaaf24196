//! Static lookup tables driving page personalization
//!
//! The catalog is externally supplied configuration: course metadata, region
//! display names, the region → hackerspace directory, and per-language form
//! captions. It is loaded once (or taken from the built-in defaults) and
//! read-only afterwards. Lookup misses are expected and surface as `None`,
//! never as errors.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Language used when the resolved language has no translation set
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Display metadata for a course track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub title: String,
    pub subtitle: String,
    /// CRM product label written into the hidden product field
    pub product: String,
}

/// Form captions for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub form_title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hear_about: String,
    pub hackerspaces: String,
    pub submit: String,
    pub reset: String,
}

/// The full personalization catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Brand suffix appended to the document title
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// Track identifier → course metadata
    pub courses: HashMap<String, CourseInfo>,
    /// Region code → display name
    pub region_names: HashMap<String, String>,
    /// Region code → ordered hackerspace names offered in that region
    pub hackerspaces: HashMap<String, Vec<String>>,
    /// Language code → form captions
    pub translations: HashMap<String, Translation>,
}

fn default_site_name() -> String {
    "GOMYCODE".to_string()
}

impl Catalog {
    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The built-in default catalog
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn course(&self, track: &str) -> Option<&CourseInfo> {
        self.courses.get(track)
    }

    pub fn region_name(&self, region: &str) -> Option<&str> {
        self.region_names.get(region).map(String::as_str)
    }

    /// Hackerspace names for a region; `None` or an empty list both mean
    /// "no filtering for this region"
    pub fn region_hackerspaces(&self, region: &str) -> &[String] {
        self.hackerspaces.get(region).map_or(&[], Vec::as_slice)
    }

    /// Captions for a language, falling back to [`DEFAULT_LANGUAGE`].
    /// Returns `None` only when the default language is missing too.
    pub fn translation(&self, language: &str) -> Option<&Translation> {
        self.translations
            .get(language)
            .or_else(|| self.translations.get(DEFAULT_LANGUAGE))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

fn course(title: &str, subtitle: &str, product: &str) -> CourseInfo {
    CourseInfo {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        product: product.to_string(),
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let courses = HashMap::from([
        (
            "ux-ui-design".to_string(),
            course(
                "UX & UI Design Course",
                "Become a User Interface and User Experience Designer",
                "UX & UI Design",
            ),
        ),
        (
            "data-scientist".to_string(),
            course(
                "Data Science Course",
                "Master data analysis and Machine Learning",
                "Data Scientist Bootcamp",
            ),
        ),
        (
            "software-developer".to_string(),
            course(
                "Software Developer Bootcamp",
                "Become a professional Full-Stack Developer",
                "Software Developer Bootcamp",
            ),
        ),
        (
            "cybersecurity".to_string(),
            course(
                "Cybersecurity Course",
                "Protect systems and data",
                "Cyber Security Bootcamp: Certified CompTIA Security+ 701",
            ),
        ),
        (
            "web-development".to_string(),
            course(
                "Web Development",
                "Create modern and responsive websites",
                "Web Development Essentials",
            ),
        ),
        (
            "graphic-design".to_string(),
            course(
                "Graphic Design",
                "Create professional visuals with Adobe",
                "Graphic Design - Adobe Certified",
            ),
        ),
        (
            "devops".to_string(),
            course(
                "DevOps Bootcamp",
                "Master development and operations practices",
                "The DevOps Bootcamp",
            ),
        ),
        (
            "machine-learning".to_string(),
            course(
                "Machine Learning",
                "Build intelligent systems and algorithms",
                "Machine learning",
            ),
        ),
        (
            "ai-introduction".to_string(),
            course(
                "Introduction to AI",
                "Discover Artificial Intelligence fundamentals",
                "Introduction to Artificial Intelligence",
            ),
        ),
    ]);

    let region_names = HashMap::from([
        ("TN".to_string(), "Tunisia".to_string()),
        ("MA".to_string(), "Morocco".to_string()),
        ("DZ".to_string(), "Algeria".to_string()),
        ("SN".to_string(), "Senegal".to_string()),
        ("NG".to_string(), "Nigeria".to_string()),
        ("CI".to_string(), "Ivory Coast".to_string()),
        ("EG".to_string(), "Egypt".to_string()),
        ("KE".to_string(), "Kenya".to_string()),
        ("JO".to_string(), "Jordan".to_string()),
    ]);

    let hackerspaces = HashMap::from([
        (
            "TN".to_string(),
            names(&[
                "Tunis Lac Hackerspace",
                "Sousse Hackerspace",
                "El Menzah Hackerspace",
                "Nabeul Hackerspace",
                "Tunis Downtown Hackerspace",
                "Gabes Hackerspace",
                "Tunis El Mourouj Hackerspace",
                "Tunis Bardo Hackerspace",
                "Tunis Boumhel Hackerspace",
                "Tataouine Hackerspace",
                "Kairouan Hackerspace",
                "Tozeur Hackerspace",
                "Tunisia Online Hackerspace",
            ]),
        ),
        (
            "MA".to_string(),
            names(&[
                "Casablanca Hackerspace",
                "Marrakech Hackerspace",
                "Morocco Online Hackerspace",
            ]),
        ),
        (
            "DZ".to_string(),
            names(&[
                "Algiers Hackerspace",
                "Bab Ezzouar Hackerspace",
                "Algiers Online Hackerspace",
            ]),
        ),
        (
            "SN".to_string(),
            names(&[
                "Point E Hackerspace",
                "Yoff Hackerspace",
                "Senegal Online Hackerspace",
            ]),
        ),
        (
            "NG".to_string(),
            names(&[
                "Yaba Hackerspace",
                "Ikeja HackerSpace",
                "Abuja Hackerspace",
                "Nigeria Online Hackerspace",
            ]),
        ),
        (
            "CI".to_string(),
            names(&[
                "Marcory Zone 4",
                "Riviera Hackerspace",
                "Ivory Coast Online Hackerspace",
            ]),
        ),
        ("EG".to_string(), names(&["Egypt Online Hackerspace"])),
        (
            "KE".to_string(),
            names(&["Nairobi Hackerspace", "Kenya Online Hackerspace"]),
        ),
        (
            "JO".to_string(),
            names(&["Amman Hackerspace", "Jordan Online Hackerspace"]),
        ),
    ]);

    let translations = HashMap::from([
        (
            "en".to_string(),
            Translation {
                form_title: "Contact Form - Course Registration".to_string(),
                first_name: "First Name".to_string(),
                last_name: "Last Name".to_string(),
                email: "Email".to_string(),
                phone: "Phone".to_string(),
                hear_about: "How did you hear about GOMYCODE?".to_string(),
                hackerspaces: "Hackerspaces".to_string(),
                submit: "Submit".to_string(),
                reset: "Reset".to_string(),
            },
        ),
        (
            "fr".to_string(),
            Translation {
                form_title: "Formulaire de Contact - Inscription aux Cours".to_string(),
                first_name: "Prénom".to_string(),
                last_name: "Nom".to_string(),
                email: "Email".to_string(),
                phone: "Téléphone".to_string(),
                hear_about: "Comment avez-vous entendu parler de GOMYCODE?".to_string(),
                hackerspaces: "Hackerspaces".to_string(),
                submit: "Envoyer".to_string(),
                reset: "Réinitialiser".to_string(),
            },
        ),
    ]);

    Catalog {
        site_name: default_site_name(),
        courses,
        region_names,
        hackerspaces,
        translations,
    }
});
