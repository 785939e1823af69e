//! The HTTP transport against a real server on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use tasklist_client::board::{DELETED, MARKED_DONE, TaskBoard};
use tasklist_client::form::{SubmitOutcome, TaskDraft};
use tasklist_client::http::HttpTaskApi;
use tasklist_client::notify::{Notification, RecordingNotifier};
use tasklist_client::{ClientError, TaskApi};
use tasklist_core::inputs::{CreateTaskInput, UpdateTaskInput};
use tasklist_db::service::TaskService;
use tasklist_server::{AppState, bind_ephemeral, serve};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    api: HttpTaskApi,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), tasklist_server::ServerError>>,
}

impl TestServer {
    async fn start() -> Self {
        let service = TaskService::new_local(":memory:").await.unwrap();
        let (listener, addr) = bind_ephemeral().await.unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, AppState::new(service), async move {
            let _ = stopped.await;
        }));
        let api = HttpTaskApi::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        Self { api, stop, handle }
    }

    async fn stop(self) {
        self.stop.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

fn titled(title: &str) -> CreateTaskInput {
    CreateTaskInput {
        title: title.into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn procedures_roundtrip_over_http() {
    let server = TestServer::start().await;
    let api = &server.api;

    assert_eq!(api.health().await.unwrap().status, "healthy");

    let created = api
        .create(&CreateTaskInput {
            title: "Buy milk".into(),
            due_date: Some("2099-01-01T09:00:00.000Z".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        created.due_date,
        Some(Utc.with_ymd_and_hms(2099, 1, 1, 9, 0, 0).unwrap())
    );
    assert_eq!(api.get(&created.id).await.unwrap(), created);

    let updated = api
        .update(&UpdateTaskInput {
            id: created.id.clone(),
            title: "Buy oat milk".into(),
            description: Some("the barista one".into()),
            due_date: None,
        })
        .await
        .unwrap();
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.due_date, None);

    assert!(api.set_done(&created.id, true).await.unwrap().is_done);
    assert_eq!(api.list().await.unwrap().len(), 1);

    api.delete(&created.id).await.unwrap();
    assert!(api.list().await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn server_errors_map_to_client_variants() {
    let server = TestServer::start().await;
    let api = &server.api;

    let err = api.create(&titled("   ")).await.unwrap_err();
    let ClientError::Validation(fields) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(fields[0].field, "title");

    let err = api.set_done("tsk-00000000", true).await.unwrap_err();
    assert!(err.is_not_found());

    let err = api.delete("tsk-00000000").await.unwrap_err();
    assert!(err.is_not_found());

    server.stop().await;
}

#[tokio::test]
async fn stopped_server_is_transport_error() {
    let server = TestServer::start().await;
    let api = server.api.clone();
    server.stop().await;

    assert!(api.list().await.unwrap_err().is_transport());
}

#[tokio::test]
async fn board_drives_the_http_transport() {
    let server = TestServer::start().await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut board = TaskBoard::new(Arc::new(server.api.clone()), Arc::clone(&notifier));

    let mut form = board.create_form(Utc);
    form.set_draft(TaskDraft::default().with_title("Over the wire"));
    let SubmitOutcome::Saved(task) = board.submit_form(&mut form).await else {
        panic!("submission should succeed");
    };
    assert_eq!(board.tasks().len(), 1);

    board.mark_done(&task.id).await.unwrap();
    assert_eq!(notifier.last(), Some(Notification::success(MARKED_DONE)));

    board.delete(&task.id).await.unwrap();
    assert_eq!(notifier.last(), Some(Notification::success(DELETED)));
    assert!(board.tasks().is_empty());

    server.stop().await;
}
