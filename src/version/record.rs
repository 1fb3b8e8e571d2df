use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{ReleaseDate, VersionCode};

/// One row of the build-numbers table. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    name: String,
    html_name: Option<String>,
    code: VersionCode,
    date: ReleaseDate,
}

impl VersionRecord {
    pub fn new(name: impl Into<String>, code: VersionCode, date: ReleaseDate) -> Self {
        Self {
            name: name.into(),
            html_name: None,
            code,
            date,
        }
    }

    /// Attach the linked (HTML) rendering of the name.
    pub fn with_html_name(mut self, html_name: impl Into<String>) -> Self {
        self.html_name = Some(html_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn html_name(&self) -> Option<&str> {
        self.html_name.as_deref()
    }

    pub fn code(&self) -> &VersionCode {
        &self.code
    }

    /// Day-precise release date; `None` for month-only or unparseable dates.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date.exact()
    }

    /// `YYYY-MM-DD` for exact dates, the fallback text otherwise.
    pub fn date_string(&self) -> String {
        self.date.to_string()
    }
}

impl Serialize for VersionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.name.is_empty() {
            map.serialize_entry("name", &self.name)?;
        }
        map.serialize_entry("short_code", &self.code)?;
        // a fallback string means the date is not an exact representation
        match &self.date {
            ReleaseDate::Exact(date) => map.serialize_entry("date", date)?,
            other => map.serialize_entry("date_str", &other.to_string())?,
        }
        if let Some(html_name) = &self.html_name {
            map.serialize_entry("html_name", html_name)?;
        }
        map.end()
    }
}
