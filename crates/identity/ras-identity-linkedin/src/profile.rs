//! Extended LinkedIn profile model.
//!
//! Every field is independently optional: `None` means the source document
//! did not carry the key. Lists keep the order of the source collection.

use crate::error::LinkedInResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker that replaces every `\n` in free-text profile fields.
pub const LINE_BREAK: &str = "<br />";

/// Replace each newline with [`LINE_BREAK`], leaving every other character as is.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace('\n', LINE_BREAK)
}

/// Rich profile data attached to a LinkedIn login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<Position>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educations: Option<Vec<Education>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
}

impl ExtendedProfile {
    /// Profile used when extraction fails: every list is present and empty,
    /// every scalar is unset.
    pub fn empty() -> Self {
        Self {
            certifications: Some(Vec::new()),
            courses: Some(Vec::new()),
            skills: Some(Vec::new()),
            positions: Some(Vec::new()),
            educations: Some(Vec::new()),
            projects: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Serialized form attached to the identity record.
    pub fn to_json(&self) -> LinkedInResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// An employment position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub title: String,
    pub is_current_company: bool,
    /// `"month - year"`
    pub start_date: String,
    /// `"month - year"`, unset while the position is open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub school_name: String,
    /// `"degree startYear - endYear"`, or just the degree when either year is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
