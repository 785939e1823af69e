//! Routes list actions to the task API, emits notifications and keeps the
//! shared snapshot fresh.
//!
//! Actions take `&mut self`, so a caller cannot start a second mutation
//! before the first resolves. After every successful mutation the full
//! collection is re-fetched; there is no local merge.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeZone;
use tasklist_core::entities::Task;
use tasklist_core::errors::CoreError;

use crate::api::TaskApi;
use crate::confirm::ConfirmationFlow;
use crate::error::ClientError;
use crate::form::{SubmitOutcome, TaskFormController};
use crate::notify::{Notification, Notifier};
use crate::poller::RefreshPoller;
use crate::snapshot::{TaskSnapshot, refresh_into};
use crate::view::TaskListView;

pub const MARKED_DONE: &str = "Task marked as done!";
pub const MARK_DONE_FAILED: &str = "Failed to mark task as done.";
pub const MARKED_UNDONE: &str = "Task marked as undone!";
pub const MARK_UNDONE_FAILED: &str = "Failed to mark task as undone.";
pub const DELETED: &str = "Task deleted!";
pub const DELETE_FAILED: &str = "Failed to delete task.";

pub struct TaskBoard<A, N: ?Sized> {
    api: Arc<A>,
    notifier: Arc<N>,
    snapshot: TaskSnapshot,
    view: TaskListView,
    confirmation: ConfirmationFlow,
}

impl<A, N> TaskBoard<A, N>
where
    A: TaskApi,
    N: Notifier + ?Sized,
{
    #[must_use]
    pub fn new(api: Arc<A>, notifier: Arc<N>) -> Self {
        Self {
            api,
            notifier,
            snapshot: TaskSnapshot::new(),
            view: TaskListView::default(),
            confirmation: ConfirmationFlow::default(),
        }
    }

    #[must_use]
    pub const fn api(&self) -> &Arc<A> {
        &self.api
    }

    #[must_use]
    pub const fn snapshot(&self) -> &TaskSnapshot {
        &self.snapshot
    }

    /// Copy of the last fetched collection, in service order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.snapshot.tasks()
    }

    #[must_use]
    pub const fn view(&self) -> &TaskListView {
        &self.view
    }

    pub const fn view_mut(&mut self) -> &mut TaskListView {
        &mut self.view
    }

    #[must_use]
    pub const fn confirmation(&self) -> &ConfirmationFlow {
        &self.confirmation
    }

    /// Re-fetch the full collection.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        refresh_into(self.api.as_ref(), &self.snapshot).await.map(|_| ())
    }

    /// Start refreshing the snapshot every `every` in the background.
    pub fn start_polling(&self, every: Duration) -> RefreshPoller
    where
        A: 'static,
    {
        RefreshPoller::spawn(Arc::clone(&self.api), self.snapshot.clone(), every)
    }

    /// # Errors
    ///
    /// Returns the API error after emitting a failure notification.
    pub async fn mark_done(&mut self, id: &str) -> Result<Task, ClientError> {
        let result = self.api.set_done(id, true).await;
        self.settle(result, MARKED_DONE, MARK_DONE_FAILED).await
    }

    /// Begin undoing a completed task; nothing is sent until confirmed.
    ///
    /// # Errors
    ///
    /// `NotFound` if the task is not in the current snapshot,
    /// `InvalidTransition` if it is not done or another undo is pending.
    pub fn request_undo(&mut self, id: &str) -> Result<(), CoreError> {
        let task = self
            .snapshot
            .find(id)
            .ok_or_else(|| CoreError::not_found("task", id))?;
        self.confirmation.request(&task)
    }

    /// Carry out the pending undo. `None` if nothing was pending.
    pub async fn confirm_undo(&mut self) -> Option<Result<Task, ClientError>> {
        let id = self.confirmation.confirm()?;
        let result = self.api.set_done(&id, false).await;
        Some(self.settle(result, MARKED_UNDONE, MARK_UNDONE_FAILED).await)
    }

    /// Abandon the pending undo without contacting the service.
    pub fn cancel_undo(&mut self) {
        self.confirmation.cancel();
    }

    /// # Errors
    ///
    /// Returns the API error after emitting a failure notification.
    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        let result = self.api.delete(id).await;
        self.settle(result, DELETED, DELETE_FAILED).await
    }

    /// A blank create form whose date and time fields are read in `tz`.
    #[must_use]
    pub fn create_form<Tz>(&self, tz: Tz) -> TaskFormController<Tz>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        TaskFormController::new(None, tz)
    }

    /// An edit form pre-populated from the snapshot.
    ///
    /// # Errors
    ///
    /// `NotFound` if the task is not in the snapshot, `InvalidTransition`
    /// if it is already done.
    pub fn edit_form<Tz>(&self, id: &str, tz: Tz) -> Result<TaskFormController<Tz>, CoreError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let task = self
            .snapshot
            .find(id)
            .ok_or_else(|| CoreError::not_found("task", id))?;
        if task.is_done {
            return Err(CoreError::InvalidTransition {
                entity_type: "task".into(),
                id: task.id,
                from: "done".into(),
                to: "editing".into(),
            });
        }
        Ok(TaskFormController::new(Some(&task), tz))
    }

    /// Submit a form through this board's API and notifier, refreshing on success.
    pub async fn submit_form<Tz>(&mut self, form: &mut TaskFormController<Tz>) -> SubmitOutcome
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let outcome = form.submit(self.api.as_ref(), self.notifier.as_ref()).await;
        if outcome.should_close() {
            self.refresh_after_mutation().await;
        }
        outcome
    }

    async fn settle<T>(
        &self,
        result: Result<T, ClientError>,
        success: &str,
        failure: &str,
    ) -> Result<T, ClientError> {
        match result {
            Ok(value) => {
                self.notifier.notify(Notification::success(success));
                self.refresh_after_mutation().await;
                Ok(value)
            }
            Err(error) => {
                tracing::warn!(%error, "{failure}");
                self.notifier.notify(Notification::failure(failure));
                Err(error)
            }
        }
    }

    async fn refresh_after_mutation(&self) {
        if let Err(error) = self.refresh().await {
            tracing::warn!(%error, "refresh after mutation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{CREATED, TaskDraft};
    use crate::notify::RecordingNotifier;
    use crate::test_support::{FailingApi, memory_service};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tasklist_core::enums::StatusFilter;
    use tasklist_core::inputs::CreateTaskInput;
    use tasklist_db::service::TaskService;

    type TestBoard = TaskBoard<TaskService, RecordingNotifier>;

    async fn board() -> (TestBoard, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let board = TaskBoard::new(Arc::new(memory_service().await), Arc::clone(&notifier));
        (board, notifier)
    }

    async fn seed(board: &TestBoard, title: &str) -> Task {
        let task = board
            .api()
            .create_task(&CreateTaskInput {
                title: title.into(),
                ..Default::default()
            })
            .await
            .unwrap();
        board.refresh().await.unwrap();
        task
    }


    #[tokio::test]
    async fn created_task_appears_open_and_not_past_due() {
        let (mut board, notifier) = board().await;
        let mut form = board.create_form(Utc);
        form.set_draft(
            TaskDraft::default()
                .with_title("Buy milk")
                .with_due_date("2099-01-01")
                .with_due_time("09:00"),
        );

        assert!(board.submit_form(&mut form).await.should_close());

        let tasks = board.tasks();
        assert_eq!(tasks.len(), 1);
        let rows = board.view().rows_at(&tasks, Utc::now());
        assert_eq!(rows[0].task.title, "Buy milk");
        assert!(!rows[0].task.is_done);
        assert!(!rows[0].past_due);
        assert_eq!(notifier.last(), Some(Notification::success(CREATED)));
    }

    #[tokio::test]
    async fn mark_done_notifies_and_refreshes() {
        let (mut board, notifier) = board().await;
        let task = seed(&board, "Chore").await;

        board.mark_done(&task.id).await.unwrap();

        assert!(board.snapshot().find(&task.id).unwrap().is_done);
        assert_eq!(notifier.last(), Some(Notification::success(MARKED_DONE)));
    }

    #[tokio::test]
    async fn mark_done_twice_stays_done() {
        let (mut board, _) = board().await;
        let task = seed(&board, "Twice").await;

        assert!(board.mark_done(&task.id).await.unwrap().is_done);
        assert!(board.mark_done(&task.id).await.unwrap().is_done);
    }

    #[tokio::test]
    async fn undo_cancel_leaves_task_done() {
        let (mut board, notifier) = board().await;
        let task = seed(&board, "Finished").await;
        board.mark_done(&task.id).await.unwrap();
        let before = notifier.notifications().len();

        board.request_undo(&task.id).unwrap();
        assert_eq!(board.confirmation().pending_task_id(), Some(task.id.as_str()));
        board.cancel_undo();

        assert_eq!(board.confirmation(), &ConfirmationFlow::Idle);
        assert!(board.confirm_undo().await.is_none());
        board.refresh().await.unwrap();
        assert!(board.snapshot().find(&task.id).unwrap().is_done);
        assert_eq!(notifier.notifications().len(), before);
    }

    #[tokio::test]
    async fn undo_confirm_reopens_task() {
        let (mut board, notifier) = board().await;
        let task = seed(&board, "Reopen").await;
        board.mark_done(&task.id).await.unwrap();

        board.request_undo(&task.id).unwrap();
        let reopened = board.confirm_undo().await.unwrap().unwrap();

        assert!(!reopened.is_done);
        assert!(!board.snapshot().find(&task.id).unwrap().is_done);
        assert_eq!(notifier.last(), Some(Notification::success(MARKED_UNDONE)));
    }

    #[tokio::test]
    async fn undo_on_open_task_is_rejected() {
        let (mut board, _) = board().await;
        let task = seed(&board, "Still open").await;
        assert!(board.request_undo(&task.id).is_err());
        assert!(!board.confirmation().is_pending());
    }

    #[tokio::test]
    async fn delete_missing_task_notifies_failure_and_keeps_list() {
        let (mut board, notifier) = board().await;
        let kept = seed(&board, "Kept").await;

        let err = board.delete("tsk-00000000").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(notifier.last(), Some(Notification::failure(DELETE_FAILED)));
        board.refresh().await.unwrap();
        assert_eq!(board.tasks(), vec![kept]);
    }

    #[tokio::test]
    async fn delete_removes_task_from_snapshot() {
        let (mut board, notifier) = board().await;
        let task = seed(&board, "Gone").await;

        board.delete(&task.id).await.unwrap();

        assert!(board.tasks().is_empty());
        assert_eq!(notifier.last(), Some(Notification::success(DELETED)));
    }

    #[tokio::test]
    async fn transport_failure_is_notified_not_raised_as_panic() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut board = TaskBoard::new(Arc::new(FailingApi::default()), Arc::clone(&notifier));

        assert!(board.mark_done("tsk-00000001").await.unwrap_err().is_transport());
        assert_eq!(notifier.last(), Some(Notification::failure(MARK_DONE_FAILED)));
        assert_eq!(board.api().calls(), 1);
    }

    #[tokio::test]
    async fn view_filters_snapshot() {
        let (mut board, _) = board().await;
        let open = seed(&board, "Open one").await;
        let done = seed(&board, "Done one").await;
        board.mark_done(&done.id).await.unwrap();

        board.view_mut().set_filter(StatusFilter::Undone);
        let tasks = board.tasks();
        let visible = board.view().visible(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, open.id);
    }

    #[tokio::test]
    async fn edit_form_refuses_done_task() {
        let (mut board, _) = board().await;
        let task = seed(&board, "Done").await;
        board.mark_done(&task.id).await.unwrap();
        assert!(board.edit_form(&task.id, Utc).is_err());
    }

    #[tokio::test]
    async fn polling_picks_up_external_changes() {
        let (board, _) = board().await;
        let poller = board.start_polling(Duration::from_millis(10));
        let mut rx = board.snapshot().subscribe();

        board
            .api()
            .create_task(&CreateTaskInput {
                title: "From elsewhere".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                rx.changed().await.unwrap();
                if !rx.borrow_and_update().is_empty() {
                    break;
                }
            }
        })
        .await
        .unwrap();

        poller.shutdown().await;
    }
}
