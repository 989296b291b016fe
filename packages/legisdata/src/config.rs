//! Configuration constants, label tables and validation functions.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ParserError, Result};

/// Assembly identifier written into every record's metadata.
pub const DEFAULT_DUN: &str = "selangor";

/// Root of the `<year>/session-<n>/<type>-<class>` data tree.
pub const DEFAULT_DATA_ROOT: &str = "data";

/// Labels that open a speakline without appearing in any roster.
///
/// Matched against the uppercased node text, in this order.
pub const HANSARD_ROLES: &[&str] = &[
    "TUAN SPEAKER",
    "Y.B TUAN SPEAKER",
    "Y.B. TUAN SPEAKER",
    "TUAN TIMBALAN SPEAKER",
    "Y.B TUAN TIMBALAN SPEAKER",
    "Y.B. TUAN TIMBALAN SPEAKER",
    "SETIAUSAHA DEWAN",
    "Y.A.B. DATO' MENTERI BESAR",
];

/// Chair labels. An answer given by one of these closes its question block.
pub const CHAIR_LABELS: &[&str] = &[
    "TUAN SPEAKER",
    "Y.B TUAN SPEAKER",
    "Y.B. TUAN SPEAKER",
    "TUAN TIMBALAN SPEAKER",
    "Y.B TUAN TIMBALAN SPEAKER",
    "Y.B. TUAN TIMBALAN SPEAKER",
];

/// Honorifics removed from the front of a person's display name.
///
/// Longest first so `Y.A.B.` wins over `Y.A.B`.
pub const NAME_HONORIFICS: &[&str] = &["Y.A.B.", "Y.A.B", "Y.B.", "Y.B", "EN.", "PN.", "TN."];

/// Markers where a guest's role starts (last occurrence wins).
pub const GUEST_ROLE_MARKERS: &[&str] = &["Setiausaha", "Penasihat", "Pegawai"];

/// Markers where an officer line's shared role starts (first positive occurrence wins).
pub const OFFICER_ROLE_MARKERS: &[&str] = &["Setiausaha", "Penolong", "Bentara", "Pelapor"];

/// Tokens that start a new officer name on a combined officer line.
pub const OFFICER_NAME_TOKENS: &[&str] = &["Encik", "Puan"];

/// Heading of an oral inquiry record.
pub const ORAL_INQUIRY_HEADING: &str = "PERTANYAAN-PERTANYAAN MULUT DARIPADA";

/// Heading of a written inquiry record.
pub const WRITTEN_INQUIRY_HEADING: &str = "PERTANYAAN-PERTANYAAN BERTULIS DARIPADA";

/// Four digit year.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

/// Options that change how a single document is scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Collect a diagnostic for every node that no rule claims.
    pub debug: bool,

    /// Only accept officer entries inside the officer section.
    ///
    /// When `false` (the default), lines starting with "puan" are taken as
    /// officer entries in any section, exactly as the historical parser did.
    pub strict_officer_section: bool,
}

impl ParseOptions {
    /// Enable diagnostic collection.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Confine officer entries to the officer section.
    #[must_use]
    pub fn with_strict_officer_section(mut self, strict: bool) -> Self {
        self.strict_officer_section = strict;
        self
    }
}

/// Document family of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingType {
    Hansard,
    Inquiry,
}

impl ListingType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hansard => "hansard",
            Self::Inquiry => "inquiry",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing stage of a listing directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingClass {
    Raw,
    Extract,
    Parse,
}

impl ListingClass {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Extract => "extract",
            Self::Parse => "parse",
        }
    }
}

/// Validate a sitting year.
///
/// # Examples
/// ```
/// use legisdata::config::validate_year;
///
/// assert!(validate_year("2024").is_ok());
/// assert!(validate_year("24").is_err());
/// ```
pub fn validate_year(year: &str) -> Result<u16> {
    if !YEAR_PATTERN.is_match(year) {
        return Err(ParserError::InvalidYear(year.to_string()));
    }

    match year.parse::<u16>() {
        Ok(value) if (1900..=2100).contains(&value) => Ok(value),
        _ => Err(ParserError::InvalidYear(year.to_string())),
    }
}

/// Validate a session number (1-based).
pub fn validate_session(session: &str) -> Result<u16> {
    match session.trim().parse::<u16>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(ParserError::InvalidSession(session.to_string())),
    }
}

/// Base directory for one session: `<root>/<year>/session-<session>`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use legisdata::config::path_generate;
///
/// assert_eq!(
///     path_generate(Path::new("data"), 2024, 1),
///     Path::new("data/2024/session-1")
/// );
/// ```
#[must_use]
pub fn path_generate(root: &Path, year: u16, session: u16) -> PathBuf {
    root.join(year.to_string()).join(format!("session-{session}"))
}

/// Listing directory below a session base: `<base>/<type>-<class>`.
#[must_use]
pub fn data_get_path(base: &Path, listing_type: ListingType, listing_class: ListingClass) -> PathBuf {
    base.join(format!("{}-{}", listing_type.as_str(), listing_class.as_str()))
}
