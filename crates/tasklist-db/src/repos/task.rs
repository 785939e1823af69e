//! Task repository: create, list, update, completion toggle and delete.

use chrono::SubsecRound;
use libsql::Connection;
use tasklist_core::entities::Task;
use tasklist_core::errors::CoreError;
use tasklist_core::ids::PREFIX_TASK;
use tasklist_core::inputs::{CreateTaskInput, UpdateTaskInput, validate_id};
use tasklist_core::responses::DeleteResponse;

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{format_datetime, get_bool, get_opt_string, now_millis, parse_datetime, parse_optional_datetime};
use crate::service::TaskService;

const SELECT_COLS: &str = "id, title, description, due_date, is_done, created_at, updated_at";

/// List order: open tasks first, then earliest deadline, deadline-less last.
const LIST_ORDER: &str = "is_done ASC, due_date IS NULL ASC, due_date ASC, created_at ASC, id ASC";

/// Attempts at drawing an unused ID before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        due_date: parse_optional_datetime(get_opt_string(row, 3)?.as_deref())?,
        is_done: get_bool(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn task_not_found(id: &str) -> DatabaseError {
    CoreError::not_found("task", id).into()
}

async fn fetch_task(conn: &Connection, id: &str) -> Result<Task, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
        .await?;
    let row = rows.next().await?.ok_or_else(|| task_not_found(id))?;
    row_to_task(&row)
}

/// Draw a task id that is neither live nor retired.
async fn next_task_id(conn: &Connection) -> Result<String, DatabaseError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = generate_id(conn, PREFIX_TASK).await?;
        let mut rows = conn
            .query(
                "SELECT 1 FROM tasks WHERE id = ?1 UNION ALL SELECT 1 FROM retired_ids WHERE id = ?1",
                [id.as_str()],
            )
            .await?;
        if rows.next().await?.is_none() {
            return Ok(id);
        }
        tracing::debug!(%id, "generated id already issued, retrying");
    }
    Err(DatabaseError::InvalidState(format!(
        "could not draw an unused task id in {MAX_ID_ATTEMPTS} attempts"
    )))
}

impl TaskService {
    /// Create a task. Title must be non-blank; `due_date` must parse.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Core(Validation)` on bad input, otherwise storage errors.
    pub async fn create_task(&self, input: &CreateTaskInput) -> Result<Task, DatabaseError> {
        let new_task = input.validate()?;
        let now = now_millis();
        let due_date = new_task.due_date.map(|due| due.trunc_subsecs(3));

        let conn = self.db().conn().await;
        let id = next_task_id(&conn).await?;
        conn.execute(
            &format!("INSERT INTO tasks ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            libsql::params![
                id.as_str(),
                new_task.title.as_str(),
                new_task.description.as_deref(),
                due_date.as_ref().map(format_datetime),
                i64::from(new_task.is_done),
                format_datetime(&now),
                format_datetime(&now)
            ],
        )
        .await?;

        tracing::debug!(task_id = %id, "created task");

        Ok(Task {
            id,
            title: new_task.title,
            description: new_task.description,
            due_date,
            is_done: new_task.is_done,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a single task.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Core(NotFound)` if no task has this id.
    pub async fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        let conn = self.db().conn().await;
        fetch_task(&conn, id).await
    }

    /// Every task, open before done, then by ascending due date with
    /// deadline-less tasks last, then by creation time.
    ///
    /// # Errors
    ///
    /// Returns storage errors or `DatabaseError::Query` on malformed rows.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks ORDER BY {LIST_ORDER}"),
                (),
            )
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Replace title, description and due date. Leaves `is_done` alone.
    ///
    /// # Errors
    ///
    /// `Validation` on bad input, `NotFound` if the id does not exist.
    pub async fn update_task(&self, input: &UpdateTaskInput) -> Result<Task, DatabaseError> {
        let changes = input.validate()?;
        let now = now_millis();
        let due_date = changes.due_date.map(|due| due.trunc_subsecs(3));

        let conn = self.db().conn().await;
        let affected = conn
            .execute(
                "UPDATE tasks SET title = ?1, description = ?2, due_date = ?3, updated_at = ?4 WHERE id = ?5",
                libsql::params![
                    changes.title.as_str(),
                    changes.description.as_deref(),
                    due_date.as_ref().map(format_datetime),
                    format_datetime(&now),
                    input.id.as_str()
                ],
            )
            .await?;

        if affected == 0 {
            return Err(task_not_found(&input.id));
        }
        tracing::debug!(task_id = %input.id, "updated task");
        fetch_task(&conn, &input.id).await
    }

    /// Set the completion flag. Repeating the same value is a no-op in effect.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id does not exist.
    pub async fn set_task_done(&self, id: &str, done: bool) -> Result<Task, DatabaseError> {
        validate_id(id)?;
        let now = now_millis();

        let conn = self.db().conn().await;
        let affected = conn
            .execute(
                "UPDATE tasks SET is_done = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(done), format_datetime(&now), id],
            )
            .await?;

        if affected == 0 {
            return Err(task_not_found(id));
        }
        tracing::debug!(task_id = %id, done, "set task completion");
        fetch_task(&conn, id).await
    }

    /// Permanently remove a task and retire its id.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id does not exist; nothing is changed in that case.
    pub async fn delete_task(&self, id: &str) -> Result<DeleteResponse, DatabaseError> {
        validate_id(id)?;
        let now = now_millis();

        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;
        let affected = tx.execute("DELETE FROM tasks WHERE id = ?1", [id]).await?;
        if affected == 0 {
            tx.rollback().await?;
            return Err(task_not_found(id));
        }
        tx.execute(
            "INSERT OR IGNORE INTO retired_ids (id, retired_at) VALUES (?1, ?2)",
            libsql::params![id, format_datetime(&now)],
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(task_id = %id, "deleted task");
        Ok(DeleteResponse { deleted: true })
    }
}
