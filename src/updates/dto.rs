use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A localized-text bundle advertised by the remote catalog for one
/// subject+language pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleBundle {
    pub subject_id: String,
    pub language: String,
    /// Raw upstream revision timestamp, parsed lazily at comparison time.
    pub updated_at: String,
    /// Install data the host needs (download url, version, ...), passed
    /// through untouched.
    #[serde(default)]
    pub package: serde_json::Value,
}

impl LocaleBundle {
    pub fn revised_at(&self) -> Option<DateTime<Utc>> {
        parse_revision(&self.updated_at)
    }
}

/// Local knowledge of an installed translation. Absence of a record means
/// "not installed"; absence of `revision` means the install never recorded
/// one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstalledLocale {
    pub subject_id: String,
    pub language: String,
    #[serde(default)]
    pub revision: Option<String>,
}

/// Result of the targeted single-subject inquiry.
#[derive(Debug, Clone, PartialEq)]
pub enum SubjectUpdates {
    /// The inquiry targets this negotiator's subject: the full bundle list,
    /// no staleness filtering.
    Bundles(Vec<LocaleBundle>),
    /// Not our subject; the caller falls through to its default behavior.
    NotApplicable,
}

/// Parses the revision timestamps the catalog and the install records carry.
/// Accepts RFC 3339 plus the PO-revision shapes translation tooling emits.
pub fn parse_revision(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    // PO-Revision-Date style: "2020-01-10 12:00+0000"
    for format in ["%Y-%m-%d %H:%M%z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}
