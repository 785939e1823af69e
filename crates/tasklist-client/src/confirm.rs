//! Confirmation gate in front of "undo completion".

use tasklist_core::entities::Task;
use tasklist_core::errors::CoreError;

/// Either nothing is awaiting confirmation, or exactly one task's undo is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmationFlow {
    #[default]
    Idle,
    PendingConfirm {
        task_id: String,
    },
}

impl ConfirmationFlow {
    /// Ask to undo `task`. Only a done task may be requested, and only from `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` otherwise; the state is unchanged.
    pub fn request(&mut self, task: &Task) -> Result<(), CoreError> {
        match self {
            Self::Idle if task.is_done => {
                *self = Self::PendingConfirm {
                    task_id: task.id.clone(),
                };
                Ok(())
            }
            Self::Idle => Err(CoreError::InvalidTransition {
                entity_type: "task".into(),
                id: task.id.clone(),
                from: "undone".into(),
                to: "pending_undo".into(),
            }),
            Self::PendingConfirm { task_id } => Err(CoreError::InvalidTransition {
                entity_type: "task".into(),
                id: task.id.clone(),
                from: format!("pending_undo({task_id})"),
                to: "pending_undo".into(),
            }),
        }
    }

    /// Accept the pending request, returning its task id. `None` when idle.
    pub fn confirm(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::PendingConfirm { task_id } => Some(task_id),
            Self::Idle => None,
        }
    }

    /// Drop any pending request.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    #[must_use]
    pub fn pending_task_id(&self) -> Option<&str> {
        match self {
            Self::PendingConfirm { task_id } => Some(task_id),
            Self::Idle => None,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::PendingConfirm { .. })
    }
}
