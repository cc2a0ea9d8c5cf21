//! Projection of a LinkedIn profile document into identity fields and an
//! extended profile.
//!
//! The projection is a pure function of its inputs. Extraction of the
//! extended profile is all-or-nothing: any malformed element, or a missing or
//! non-numeric `lastModifiedTimestamp`, replaces the whole profile with
//! [`ExtendedProfile::empty`]. Descriptive sub-fields such as a company's
//! industry may be absent without failing the extraction. The identity fields
//! are extracted on their own and never fail.

use crate::error::{LinkedInError, LinkedInResult};
use crate::lookup::{
    Object, field, lenient_text, map_collection, optional_object, optional_text, required,
    required_bool, required_object, required_text,
};
use crate::profile::{Education, ExtendedProfile, Position, Project, normalize_line_breaks};
use crate::types::{IdentityFields, TokenInfo};
use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

/// JSON object returned by the LinkedIn people endpoint.
pub type ProfileDocument = serde_json::Map<String, Value>;

const LAST_MODIFIED: &str = "lastModifiedTimestamp";

/// Result of a projection, including why the extended profile was reset.
#[derive(Debug)]
pub struct Projection {
    pub identity: IdentityFields,
    pub profile: ExtendedProfile,
    /// Set when extraction failed and `profile` holds the empty defaults, or
    /// when the profile could not be serialized into `identity.extended_profile`.
    pub extraction_error: Option<LinkedInError>,
}

pub struct ProfileProjector;

impl ProfileProjector {
    /// Project a profile document together with the token metadata.
    ///
    /// Never fails: an unparsable `expires_in` leaves the expiry unset and a
    /// malformed document yields the empty extended profile.
    pub fn project(
        document: &ProfileDocument,
        access_token: &str,
        expires_in: &str,
    ) -> (IdentityFields, ExtendedProfile) {
        let projection = Self::project_detailed(document, TokenInfo::new(access_token, expires_in));
        (projection.identity, projection.profile)
    }

    /// Same as [`ProfileProjector::project`], but keeps the extraction error.
    pub fn project_detailed(document: &ProfileDocument, token: TokenInfo) -> Projection {
        let (profile, extraction_error) = match Self::try_extract_profile(document) {
            Ok(profile) => (profile, None),
            Err(err) => (ExtendedProfile::empty(), Some(err)),
        };

        let (extended_profile, extraction_error) = match profile.to_json() {
            Ok(json) => (json, extraction_error),
            Err(err) => (String::new(), extraction_error.or(Some(err))),
        };
        let identity = identity_fields(document, token, extended_profile);

        Projection {
            identity,
            profile,
            extraction_error,
        }
    }

    /// Extract the extended profile, failing on the first malformed field.
    pub fn try_extract_profile(document: &ProfileDocument) -> LinkedInResult<ExtendedProfile> {
        Ok(ExtendedProfile {
            last_modified: Some(last_modified(document)?),
            summary: optional_text(document, "", "summary")?.map(|s| normalize_line_breaks(&s)),
            interests: optional_text(document, "", "interests")?
                .map(|s| normalize_line_breaks(&s)),
            certifications: map_collection(document, "certifications", |c, path| {
                required_text(c, path, "name")
            })?,
            courses: map_collection(document, "courses", |c, path| required_text(c, path, "name"))?,
            skills: map_collection(document, "skills", skill)?,
            positions: map_collection(document, "positions", position)?,
            educations: map_collection(document, "educations", education)?,
            projects: map_collection(document, "projects", project)?,
        })
    }
}

fn identity_fields(
    document: &ProfileDocument,
    token: TokenInfo,
    extended_profile: String,
) -> IdentityFields {
    let given_name = lenient_text(document, "firstName");
    let family_name = lenient_text(document, "lastName");
    let name = lenient_text(document, "formattedName").or_else(|| {
        match (&given_name, &family_name) {
            (Some(given), Some(family)) => Some(format!("{} {}", given, family)),
            _ => None,
        }
    });

    IdentityFields {
        id: field(document, "id").map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        given_name,
        family_name,
        name,
        email: lenient_text(document, "emailAddress"),
        headline: lenient_text(document, "headline"),
        industry: lenient_text(document, "industry"),
        public_profile_url: lenient_text(document, "publicProfileUrl"),
        picture_url: lenient_text(document, "pictureUrl"),
        profile: Value::Object(document.clone()),
        access_token: token.access_token,
        expires_in: token.expires_in,
        extended_profile,
    }
}

fn last_modified(document: &Object) -> LinkedInResult<DateTime<Utc>> {
    let Value::Number(number) = required(document, "", LAST_MODIFIED)? else {
        return Err(LinkedInError::UnexpectedType {
            field: LAST_MODIFIED.to_string(),
            expected: "a number",
        });
    };

    epoch_millis(number)
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| LinkedInError::InvalidTimestamp(LAST_MODIFIED.to_string()))
}

/// Whole milliseconds from any JSON number. Fractions are truncated.
fn epoch_millis(number: &Number) -> Option<i64> {
    if let Some(millis) = number.as_i64() {
        return Some(millis);
    }
    if let Some(millis) = number.as_u64() {
        return i64::try_from(millis).ok();
    }

    number
        .as_f64()
        .map(f64::trunc)
        .filter(|millis| {
            millis.is_finite() && *millis >= i64::MIN as f64 && *millis < i64::MAX as f64
        })
        .map(|millis| millis as i64)
}

/// `"month - year"` from a `{month, year}` date object.
fn month_year(date: &Object, path: &str) -> LinkedInResult<String> {
    Ok(format!(
        "{} - {}",
        required_text(date, path, "month")?,
        required_text(date, path, "year")?
    ))
}

fn year(parent: &Object, path: &str, key: &str) -> LinkedInResult<Option<String>> {
    let Some(date) = optional_object(parent, path, key)? else {
        return Ok(None);
    };
    optional_text(date, &format!("{}.{}", path, key), "year")
}

fn skill(element: &Object, path: &str) -> LinkedInResult<String> {
    let skill = required_object(element, path, "skill")?;
    required_text(skill, &format!("{}.skill", path), "name")
}

fn position(element: &Object, path: &str) -> LinkedInResult<Position> {
    let company = required_object(element, path, "company")?;
    let company_path = format!("{}.company", path);
    let start = required_object(element, path, "startDate")?;

    let end_path = format!("{}.endDate", path);
    let end_date = optional_object(element, path, "endDate")?
        .map(|end| month_year(end, &end_path))
        .transpose()?;

    Ok(Position {
        company: required_text(company, &company_path, "name")?,
        industry: optional_text(company, &company_path, "industry")?,
        title: required_text(element, path, "title")?,
        is_current_company: required_bool(element, path, "isCurrent")?,
        start_date: month_year(start, &format!("{}.startDate", path))?,
        end_date,
        summary: optional_text(element, path, "summary")?.map(|s| normalize_line_breaks(&s)),
    })
}

fn education(element: &Object, path: &str) -> LinkedInResult<Education> {
    let degree = optional_text(element, path, "degree")?;
    let start_year = year(element, path, "startDate")?;
    let end_year = year(element, path, "endDate")?;

    let degree = degree.map(|degree| match (start_year, end_year) {
        (Some(start), Some(end)) => format!("{} {} - {}", degree, start, end),
        _ => degree,
    });

    Ok(Education {
        school_name: required_text(element, path, "schoolName")?,
        degree,
        field_of_study: optional_text(element, path, "fieldOfStudy")?,
    })
}

fn project(element: &Object, path: &str) -> LinkedInResult<Project> {
    Ok(Project {
        name: required_text(element, path, "name")?,
        description: optional_text(element, path, "description")?
            .map(|s| normalize_line_breaks(&s)),
        url: optional_text(element, path, "url")?,
    })
}
