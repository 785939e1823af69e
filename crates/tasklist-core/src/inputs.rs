//! Procedure input types and their validation.
//!
//! Inputs arrive as loosely-typed JSON (`due_date` is a string) and are
//! validated into typed values (`NewTask`, `TaskChanges`) before they reach
//! the database. Validation collects every failing field instead of stopping
//! at the first one.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, FieldError};

/// Naive date-time layouts accepted for `due_date`, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const INVALID_DATE_MESSAGE: &str = "Invalid date format, expected YYYY-MM-DDTHH:MM:SS.SSSZ";
const YEAR_OUT_OF_RANGE_MESSAGE: &str = "Due date year must be between 0000 and 9999";

const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Input for `task.create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CreateTaskInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

/// Input for `task.update`. Description and due date are replaced wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UpdateTaskInput {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Input for `task.set_done`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SetDoneInput {
    pub id: String,
    pub done: bool,
}

/// Input for procedures addressing a single task (`task.get`, `task.delete`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskIdInput {
    pub id: String,
}

/// Validated fields for a new task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_done: bool,
}

/// Validated replacement fields for an existing task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTaskInput {
    /// Validate and normalize into a `NewTask`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<NewTask, CoreError> {
        let mut errors = Vec::new();
        let title = check_title(&self.title, &mut errors);
        let due_date = check_due_date(self.due_date.as_deref(), &mut errors);
        finish(errors)?;
        Ok(NewTask {
            title,
            description: normalize_description(self.description.as_deref()),
            due_date,
            is_done: self.is_done.unwrap_or(false),
        })
    }
}

impl UpdateTaskInput {
    /// Validate and normalize into `TaskChanges`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<TaskChanges, CoreError> {
        let mut errors = Vec::new();
        check_id(&self.id, &mut errors);
        let title = check_title(&self.title, &mut errors);
        let due_date = check_due_date(self.due_date.as_deref(), &mut errors);
        finish(errors)?;
        Ok(TaskChanges {
            title,
            description: normalize_description(self.description.as_deref()),
            due_date,
        })
    }
}

impl SetDoneInput {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the id is empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_id(&self.id)
    }
}

impl TaskIdInput {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the id is empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_id(&self.id)
    }
}

/// Reject empty task ids before they reach the database.
///
/// # Errors
///
/// Returns `CoreError::Validation` on the `id` field.
pub fn validate_id(id: &str) -> Result<(), CoreError> {
    let mut errors = Vec::new();
    check_id(id, &mut errors);
    finish(errors)
}

/// Parse a due-date string into a UTC timestamp.
///
/// Accepts RFC 3339 with an offset, naive date-times (treated as UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC). Future-ness is not checked here.
///
/// The UTC year must fall in `0000..=9999`: stored timestamps are fixed-width
/// RFC 3339 text and must read back and sort as such.
///
/// # Errors
///
/// Returns `CoreError::Validation` on the `due_date` field if no layout
/// matches or the instant is outside the storable year range.
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    let parsed = parse_any_layout(raw.trim())
        .ok_or_else(|| CoreError::validation("due_date", INVALID_DATE_MESSAGE))?;
    if !STORABLE_YEARS.contains(&parsed.year()) {
        return Err(CoreError::validation("due_date", YEAR_OUT_OF_RANGE_MESSAGE));
    }
    Ok(parsed)
}

fn parse_any_layout(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn check_id(id: &str, errors: &mut Vec<FieldError>) {
    if id.trim().is_empty() {
        errors.push(FieldError::new("id", "Task id is required"));
    }
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new("title", "Task title is required"));
    }
    trimmed.to_string()
}

fn check_due_date(raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<DateTime<Utc>> {
    // An empty string means "no deadline", same as an absent field.
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match parse_due_date(raw) {
        Ok(dt) => Some(dt),
        Err(err) => {
            errors.extend_from_slice(err.field_errors());
            None
        }
    }
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

fn finish(errors: Vec<FieldError>) -> Result<(), CoreError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2099-01-01T09:00:00Z", (2099, 1, 1, 9, 0, 0))]
    #[case("2099-01-01T09:00:00.000Z", (2099, 1, 1, 9, 0, 0))]
    #[case("2099-01-01T11:00:00+02:00", (2099, 1, 1, 9, 0, 0))]
    #[case("2099-01-01T09:00", (2099, 1, 1, 9, 0, 0))]
    #[case("2099-01-01T09:00:30", (2099, 1, 1, 9, 0, 30))]
    #[case("2099-01-01 09:00:00", (2099, 1, 1, 9, 0, 0))]
    #[case("2099-01-01", (2099, 1, 1, 0, 0, 0))]
    #[case("  2099-01-01  ", (2099, 1, 1, 0, 0, 0))]
    fn parses_accepted_layouts(#[case] raw: &str, #[case] expected: (i32, u32, u32, u32, u32, u32)) {
        let (y, mo, d, h, mi, s) = expected;
        let want = Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap();
        assert_eq!(parse_due_date(raw).unwrap(), want);
    }

    #[rstest]
    #[case("tomorrow")]
    #[case("2099-13-01")]
    #[case("2099-02-30")]
    #[case("09:00")]
    fn rejects_unparseable_dates(#[case] raw: &str) {
        let err = parse_due_date(raw).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "due_date");
    }

    #[rstest]
    #[case("-0001-01-01")]
    #[case("+10000-01-01")]
    #[case("-0001-06-01T12:00:00")]
    #[case("9999-12-31T23:30:00-01:00")]
    fn rejects_years_outside_storable_range(#[case] raw: &str) {
        let err = parse_due_date(raw).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field_errors()[0].field, "due_date");
    }

    #[test]
    fn signed_year_reports_range_message() {
        let err = parse_due_date("-0001-01-01").unwrap_err();
        assert_eq!(err.field_errors()[0].message, YEAR_OUT_OF_RANGE_MESSAGE);
    }

    #[test]
    fn last_storable_instant_is_accepted() {
        let due = parse_due_date("9999-12-31T23:59:59Z").unwrap();
        assert_eq!(due.year(), 9999);
    }

    #[test]
    fn create_defaults_to_not_done_without_deadline() {
        let input = CreateTaskInput {
            title: "  Buy milk ".into(),
            ..Default::default()
        };
        let task = input.validate().unwrap();
        assert_eq!(
            task,
            NewTask {
                title: "Buy milk".into(),
                description: None,
                due_date: None,
                is_done: false,
            }
        );
    }

    #[test]
    fn create_collects_title_and_date_errors() {
        let input = CreateTaskInput {
            title: "   ".into(),
            due_date: Some("not a date".into()),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "due_date"]);
    }

    #[test]
    fn create_accepts_past_dates() {
        let input = CreateTaskInput {
            title: "Old".into(),
            due_date: Some("2000-01-01T00:00:00Z".into()),
            ..Default::default()
        };
        assert!(input.validate().unwrap().due_date.is_some());
    }

    #[test]
    fn empty_strings_mean_absent() {
        let input = CreateTaskInput {
            title: "Title".into(),
            description: Some(String::new()),
            due_date: Some(String::new()),
            is_done: Some(true),
        };
        let task = input.validate().unwrap();
        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
        assert!(task.is_done);
    }

    #[test]
    fn update_requires_id() {
        let input = UpdateTaskInput {
            id: String::new(),
            title: "Title".into(),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "id");
    }

    #[test]
    fn set_done_and_id_inputs_reject_blank_ids() {
        assert!(SetDoneInput { id: " ".into(), done: true }.validate().is_err());
        assert!(TaskIdInput { id: "tsk-1".into() }.validate().is_ok());
    }
}
