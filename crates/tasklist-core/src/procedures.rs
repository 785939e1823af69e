//! Route paths of the task procedures, shared by server and clients.

pub const HEALTH: &str = "/health";
pub const TASK_LIST: &str = "/rpc/task.list";
pub const TASK_GET: &str = "/rpc/task.get";
pub const TASK_CREATE: &str = "/rpc/task.create";
pub const TASK_UPDATE: &str = "/rpc/task.update";
pub const TASK_SET_DONE: &str = "/rpc/task.set_done";
pub const TASK_DELETE: &str = "/rpc/task.delete";

/// Error codes carried in `ApiError::code`.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
