//! Library record model representing one institution in the holdings collection.

use serde::{Deserialize, Serialize};

/// The category an institution belongs to
///
/// This is a closed set: documents carrying any other `libraryType` value are
/// screened out by the loader before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryKind {
    #[serde(rename = "Academic")]
    Academic,
    #[serde(rename = "Public & School (K-12)")]
    PublicSchool,
    #[serde(rename = "Government, State & National")]
    Government,
    #[serde(rename = "Vendor")]
    Vendor,
    #[serde(rename = "Museums & Archives")]
    MuseumsArchives,
    #[serde(rename = "Special")]
    Special,
    #[serde(rename = "Other")]
    Other,
}

impl LibraryKind {
    /// Every kind, in the order the filter bar lists them
    pub const ALL: [LibraryKind; 7] = [
        LibraryKind::Academic,
        LibraryKind::PublicSchool,
        LibraryKind::Government,
        LibraryKind::Vendor,
        LibraryKind::MuseumsArchives,
        LibraryKind::Special,
        LibraryKind::Other,
    ];

    /// Returns the label used in the source document
    pub fn label(&self) -> &'static str {
        match self {
            LibraryKind::Academic => "Academic",
            LibraryKind::PublicSchool => "Public & School (K-12)",
            LibraryKind::Government => "Government, State & National",
            LibraryKind::Vendor => "Vendor",
            LibraryKind::MuseumsArchives => "Museums & Archives",
            LibraryKind::Special => "Special",
            LibraryKind::Other => "Other",
        }
    }

    /// Returns the short display name
    pub fn name(&self) -> &'static str {
        match self {
            LibraryKind::Academic => "Academic",
            LibraryKind::PublicSchool => "Public & School",
            LibraryKind::Government => "Government",
            LibraryKind::Vendor => "Vendor",
            LibraryKind::MuseumsArchives => "Museums & Archives",
            LibraryKind::Special => "Special",
            LibraryKind::Other => "Other",
        }
    }

    /// Returns the command-line identifier
    pub fn slug(&self) -> &'static str {
        match self {
            LibraryKind::Academic => "academic",
            LibraryKind::PublicSchool => "public",
            LibraryKind::Government => "government",
            LibraryKind::Vendor => "vendor",
            LibraryKind::MuseumsArchives => "museums",
            LibraryKind::Special => "special",
            LibraryKind::Other => "other",
        }
    }

    /// Look up a kind by slug or document label (case-insensitive)
    pub fn lookup(value: &str) -> Option<LibraryKind> {
        let value = value.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.slug().eq_ignore_ascii_case(value) || kind.label().eq_ignore_ascii_case(value)
        })
    }
}

impl std::fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A library or institution with its holdings count
///
/// Field names on the wire follow the source document, so a record
/// round-trips through the same JSON shape the loader reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier assigned by the external catalog (OCLC symbol)
    #[serde(rename = "institutionIdentifier")]
    pub id: String,

    /// Display name
    #[serde(rename = "institutionName")]
    pub name: String,

    /// Institution category
    #[serde(rename = "libraryType")]
    pub kind: LibraryKind,

    #[serde(rename = "City", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or province
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Holdings count as it appears in the document (string-encoded)
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

impl Record {
    /// Create a new record with required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: LibraryKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            city: None,
            region: None,
            country: None,
            count: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Set the city
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state/region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the country code
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the raw holdings count
    pub fn count(mut self, count: impl Into<String>) -> Self {
        self.count = Some(count.into());
        self
    }

    /// Set the geocoordinates
    pub fn coordinates(mut self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.latitude = Some(latitude.into());
        self.longitude = Some(longitude.into());
        self
    }

    /// Holdings count as an integer.
    ///
    /// Reads the leading run of digits, so `"12abc"` is 12 and `"3.5"` is 3.
    /// Missing counts, and counts without leading digits (including negative
    /// ones), are `0`. Counts too large for `u64` saturate.
    pub fn holdings(&self) -> u64 {
        self.count.as_deref().map(leading_integer).unwrap_or(0)
    }

    /// The text fields the free-text search looks at, absent ones as `""`
    pub fn searchable_fields(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.city.as_deref().unwrap_or(""),
            self.region.as_deref().unwrap_or(""),
            self.country.as_deref().unwrap_or(""),
        ]
    }

    /// City, state and country joined with ", ", skipping absent parts
    pub fn location(&self) -> String {
        join_present(&[&self.city, &self.region, &self.country])
    }

    /// City and country only
    pub fn short_location(&self) -> String {
        join_present(&[&self.city, &self.country])
    }

    /// Maps search link, when both coordinates are known
    pub fn map_url(&self) -> Option<String> {
        match (self.latitude.as_deref(), self.longitude.as_deref()) {
            (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => Some(format!(
                "https://www.google.com/maps/search/?api=1&query={},{}",
                lat, lon
            )),
            _ => None,
        }
    }
}

fn join_present(parts: &[&Option<String>]) -> String {
    parts
        .iter()
        .filter_map(|p| p.as_deref())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn leading_integer(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match &digits[..end] {
        "" => 0,
        run => run.parse().unwrap_or(u64::MAX),
    }
}
