//! Create/edit form state and client-side validation.
//!
//! The draft is an immutable value: every edit produces a new `TaskDraft`
//! that replaces the old one wholesale. Validation runs before any remote
//! call and yields per-field messages.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use std::fmt::Display;

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use tasklist_core::entities::Task;
use tasklist_core::errors::FieldError;
use tasklist_core::inputs::{CreateTaskInput, UpdateTaskInput};

use crate::api::TaskApi;
use crate::error::ClientError;
use crate::notify::{Notification, Notifier};

pub const TITLE_REQUIRED: &str = "Task title is required";
pub const DUE_DATE_REQUIRED: &str = "Due date is required when specifying time";
pub const DUE_TIME_REQUIRED: &str = "Due time is required when specifying date";
pub const INVALID_DUE_DATE: &str = "Invalid due date";
pub const INVALID_DUE_TIME: &str = "Invalid due time";
pub const DUE_IN_PAST: &str = "Due time must be in the future";

pub const CREATED: &str = "New Task Added!";
pub const UPDATED: &str = "Task Updated";
pub const SUBMIT_FAILED: &str = "An error occurred while updating the task.";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { task_id: String },
}

/// In-progress field values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, or empty.
    pub due_date: String,
    /// `HH:MM` (24-hour), or empty.
    pub due_time: String,
}

impl TaskDraft {
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_due_date(self, due_date: impl Into<String>) -> Self {
        Self {
            due_date: due_date.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_due_time(self, due_time: impl Into<String>) -> Self {
        Self {
            due_time: due_time.into(),
            ..self
        }
    }

    /// Pre-populate from a stored task, rendering the deadline as wall-clock
    /// time in `tz` for that instant.
    #[must_use]
    pub fn from_task<Tz>(task: &Task, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let (due_date, due_time) = task
            .due_date
            .map(|due| {
                let local = due.with_timezone(tz);
                (
                    local.format(DATE_FORMAT).to_string(),
                    local.format(TIME_FORMAT).to_string(),
                )
            })
            .unwrap_or_default();
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date,
            due_time,
        }
    }
}

/// Per-field validation messages. `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
}

impl FormErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.due_date.is_none() && self.due_time.is_none()
    }

    /// Flattened `(field, message)` pairs in form order.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        [
            ("title", &self.title),
            ("due_date", &self.due_date),
            ("due_time", &self.due_time),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.as_ref().map(|m| FieldError::new(field, m)))
        .collect()
    }

    /// Fold server-reported field errors onto the matching form fields.
    fn absorb(&mut self, fields: &[FieldError]) {
        for field in fields {
            let slot = match field.field.as_str() {
                "title" => &mut self.title,
                "due_date" => &mut self.due_date,
                _ => continue,
            };
            slot.get_or_insert_with(|| field.message.clone());
        }
    }
}

/// Validate a draft against `now`, returning the combined UTC deadline.
///
/// # Errors
///
/// Returns every failing field at once.
pub fn validate_draft<Tz: TimeZone>(
    draft: &TaskDraft,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, FormErrors> {
    let mut errors = FormErrors::default();

    if draft.title.trim().is_empty() {
        errors.title = Some(TITLE_REQUIRED.to_string());
    }

    let date = draft.due_date.trim();
    let time = draft.due_time.trim();
    let due = match (date.is_empty(), time.is_empty()) {
        (true, true) => None,
        (true, false) => {
            errors.due_date = Some(DUE_DATE_REQUIRED.to_string());
            None
        }
        (false, true) => {
            errors.due_time = Some(DUE_TIME_REQUIRED.to_string());
            None
        }
        (false, false) => {
            let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok();
            let time = parse_time(time);
            if date.is_none() {
                errors.due_date = Some(INVALID_DUE_DATE.to_string());
            }
            if time.is_none() {
                errors.due_time = Some(INVALID_DUE_TIME.to_string());
            }
            let due = date.zip(time).and_then(|(d, t)| resolve_local(tz, d.and_time(t)));
            if due.is_some_and(|due| due <= now) {
                errors.due_time = Some(DUE_IN_PAST.to_string());
            }
            due
        }
    };

    if errors.is_empty() { Ok(due) } else { Err(errors) }
}

/// The instant a wall-clock reading denotes in `tz`, using that date's
/// offset. A reading repeated by a backward shift takes the earlier
/// instant; one skipped by a forward shift is moved past the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    let resolved = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => tz.from_local_datetime(&(local + Duration::hours(1))).earliest(),
    };
    resolved.map(|dt| dt.with_timezone(&Utc))
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Shared view of whether a submission is in flight.
#[derive(Debug, Clone, Default)]
pub struct SubmitState(Arc<AtomicBool>);

impl SubmitState {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn begin(&self) -> SubmitGuard {
        self.0.store(true, Ordering::Release);
        SubmitGuard(Arc::clone(&self.0))
    }
}

/// Clears the in-flight flag when the submission finishes or is dropped.
struct SubmitGuard(Arc<AtomicBool>);

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored. The form should close and the list refresh.
    Saved(Task),
    /// Rejected locally; nothing was sent.
    Invalid(FormErrors),
    /// The remote call failed; the draft is kept.
    Failed(ClientError),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn should_close(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Owns the draft for one create or edit session.
///
/// Dates and times in the draft are wall-clock values in `Tz`.
#[derive(Debug)]
pub struct TaskFormController<Tz: TimeZone = Local> {
    mode: FormMode,
    draft: TaskDraft,
    errors: FormErrors,
    tz: Tz,
    submit_state: SubmitState,
}

impl TaskFormController<Local> {
    /// An empty create form in the local time zone.
    #[must_use]
    pub fn create() -> Self {
        Self::new(None, Local)
    }

    /// An edit form for `task` in the local time zone.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self::new(Some(task), Local)
    }
}

impl<Tz> TaskFormController<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Create mode when `task` is `None`, edit mode otherwise.
    #[must_use]
    pub fn new(task: Option<&Task>, tz: Tz) -> Self {
        let (mode, draft) = match task {
            Some(task) => (
                FormMode::Edit {
                    task_id: task.id.clone(),
                },
                TaskDraft::from_task(task, &tz),
            ),
            None => (FormMode::Create, TaskDraft::default()),
        };
        Self {
            mode,
            draft,
            errors: FormErrors::default(),
            tz,
            submit_state: SubmitState::default(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Replace the draft wholesale.
    pub fn set_draft(&mut self, draft: TaskDraft) {
        self.draft = draft;
    }

    /// Derive a new draft from the current one.
    pub fn edit_draft(&mut self, f: impl FnOnce(TaskDraft) -> TaskDraft) {
        self.draft = f(std::mem::take(&mut self.draft));
    }

    #[must_use]
    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submit_state.is_submitting()
    }

    /// Handle for observing submission progress from elsewhere.
    #[must_use]
    pub fn submit_state(&self) -> SubmitState {
        self.submit_state.clone()
    }

    /// Validate the current draft, storing the resulting errors.
    pub fn validate_at(&mut self, now: DateTime<Utc>) -> bool {
        match validate_draft(&self.draft, &self.tz, now) {
            Ok(_) => {
                self.errors = FormErrors::default();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    pub async fn submit<A, N>(&mut self, api: &A, notifier: &N) -> SubmitOutcome
    where
        A: TaskApi,
        N: Notifier + ?Sized,
    {
        self.submit_at(api, notifier, Utc::now()).await
    }

    /// Validate against `now`, then create or update according to mode.
    pub async fn submit_at<A, N>(&mut self, api: &A, notifier: &N, now: DateTime<Utc>) -> SubmitOutcome
    where
        A: TaskApi,
        N: Notifier + ?Sized,
    {
        let due = match validate_draft(&self.draft, &self.tz, now) {
            Ok(due) => due,
            Err(errors) => {
                self.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };
        self.errors = FormErrors::default();

        let _in_flight = self.submit_state.begin();
        let title = self.draft.title.trim().to_string();
        let description = Some(self.draft.description.clone()).filter(|d| !d.trim().is_empty());
        let due_date = due.map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true));

        let result = match &self.mode {
            FormMode::Create => {
                api.create(&CreateTaskInput {
                    title,
                    description,
                    due_date,
                    is_done: Some(false),
                })
                .await
            }
            FormMode::Edit { task_id } => {
                api.update(&UpdateTaskInput {
                    id: task_id.clone(),
                    title,
                    description,
                    due_date,
                })
                .await
            }
        };

        match result {
            Ok(task) => {
                let message = if self.is_editing() { UPDATED } else { CREATED };
                notifier.notify(Notification::success(message));
                self.draft = TaskDraft::default();
                SubmitOutcome::Saved(task)
            }
            Err(err) => {
                tracing::warn!(error = %err, "task form submission failed");
                if let ClientError::Validation(fields) = &err {
                    self.errors.absorb(fields);
                }
                notifier.notify(Notification::failure(SUBMIT_FAILED));
                SubmitOutcome::Failed(err)
            }
        }
    }
}
