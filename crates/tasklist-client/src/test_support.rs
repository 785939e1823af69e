//! Shared fakes for tasklist-client unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use tasklist_core::entities::Task;
use tasklist_core::inputs::{CreateTaskInput, UpdateTaskInput};
use tasklist_db::service::TaskService;

use crate::api::TaskApi;
use crate::error::ClientError;
use crate::form::SubmitState;

pub async fn memory_service() -> TaskService {
    TaskService::new_local(":memory:").await.unwrap()
}

/// Every call fails with a transport error; calls are counted.
#[derive(Debug, Default)]
pub struct FailingApi {
    calls: AtomicUsize,
}

impl FailingApi {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClientError::Transport("connection refused".into()))
    }
}

impl TaskApi for FailingApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        self.fail()
    }

    async fn get(&self, _id: &str) -> Result<Task, ClientError> {
        self.fail()
    }

    async fn create(&self, _input: &CreateTaskInput) -> Result<Task, ClientError> {
        self.fail()
    }

    async fn update(&self, _input: &UpdateTaskInput) -> Result<Task, ClientError> {
        self.fail()
    }

    async fn set_done(&self, _id: &str, _done: bool) -> Result<Task, ClientError> {
        self.fail()
    }

    async fn delete(&self, _id: &str) -> Result<(), ClientError> {
        self.fail()
    }
}

/// Records whether a form reported itself as submitting during `create`.
#[derive(Debug)]
pub struct ProbeApi {
    state: SubmitState,
    seen: Mutex<Option<bool>>,
}

impl ProbeApi {
    pub fn new(state: SubmitState) -> Self {
        Self {
            state,
            seen: Mutex::new(None),
        }
    }

    pub fn saw_submitting(&self) -> Option<bool> {
        *self.seen.lock().unwrap()
    }
}

impl TaskApi for ProbeApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        Ok(Vec::new())
    }

    async fn get(&self, id: &str) -> Result<Task, ClientError> {
        Err(ClientError::NotFound(id.to_string()))
    }

    async fn create(&self, input: &CreateTaskInput) -> Result<Task, ClientError> {
        *self.seen.lock().unwrap() = Some(self.state.is_submitting());
        let now = Utc::now();
        Ok(Task {
            id: "tsk-00000001".into(),
            title: input.title.clone(),
            description: input.description.clone(),
            due_date: None,
            is_done: false,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, input: &UpdateTaskInput) -> Result<Task, ClientError> {
        Err(ClientError::NotFound(input.id.clone()))
    }

    async fn set_done(&self, id: &str, _done: bool) -> Result<Task, ClientError> {
        Err(ClientError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        Err(ClientError::NotFound(id.to_string()))
    }
}
