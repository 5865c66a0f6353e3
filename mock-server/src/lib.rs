use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskList {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    pub checked: bool,
}

#[derive(Deserialize)]
pub struct ListName {
    pub name: String,
}

#[derive(Deserialize)]
pub struct TaskDescription {
    pub description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOrder {
    pub task_to_swap_id: Uuid,
}

#[derive(Clone, Debug)]
struct TaskRow {
    task: Task,
    list_id: Uuid,
    order: i64,
}

/// Lists in creation order; tasks ordered per list by `order`.
#[derive(Default)]
pub struct Store {
    lists: Vec<TaskList>,
    tasks: Vec<TaskRow>,
}

impl Store {
    fn has_list(&self, id: Uuid) -> bool {
        self.lists.iter().any(|l| l.id == id)
    }

    fn task_index(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|r| r.task.id == id)
    }

    fn tasks_of(&self, list_id: Uuid) -> Vec<Task> {
        let mut rows: Vec<&TaskRow> = self.tasks.iter().filter(|r| r.list_id == list_id).collect();
        rows.sort_by_key(|r| r.order);
        rows.into_iter().map(|r| r.task.clone()).collect()
    }

    fn next_order(&self, list_id: Uuid) -> i64 {
        self.tasks
            .iter()
            .filter(|r| r.list_id == list_id)
            .map(|r| r.order)
            .max()
            .unwrap_or(0)
            + 1
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/lists", get(list_lists).post(create_list))
        .route("/api/list/{id}", patch(rename_list).delete(delete_list))
        .route("/api/list/{id}/tasks", get(list_tasks))
        .route("/api/list/{id}/task", post(create_task))
        .route("/api/task/{id}", delete(delete_task))
        .route("/api/task/{id}/check", patch(toggle_task))
        .route("/api/task/{id}/description", patch(update_description))
        .route("/api/task/{id}/swapOrder", patch(swap_order))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock task list server listening");
    }
    axum::serve(listener, app()).await
}

// --- lists ---

async fn list_lists(State(db): State<Db>) -> Json<Vec<TaskList>> {
    Json(db.read().await.lists.clone())
}

async fn create_list(
    State(db): State<Db>,
    Json(input): Json<ListName>,
) -> Result<(StatusCode, Json<TaskList>), StatusCode> {
    if input.name.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let list = TaskList {
        id: Uuid::new_v4(),
        name: input.name,
    };
    db.write().await.lists.push(list.clone());
    Ok((StatusCode::CREATED, Json(list)))
}

async fn rename_list(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<ListName>,
) -> Result<Json<TaskList>, StatusCode> {
    if input.name.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let list = store
        .lists
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    list.name = input.name;
    Ok(Json(list.clone()))
}

async fn delete_list(State(db): State<Db>, Path(id): Path<Uuid>) -> StatusCode {
    let mut store = db.write().await;
    if !store.has_list(id) {
        return StatusCode::NOT_FOUND;
    }
    store.lists.retain(|l| l.id != id);
    store.tasks.retain(|r| r.list_id != id);
    StatusCode::NO_CONTENT
}

// --- tasks ---

async fn list_tasks(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, StatusCode> {
    let store = db.read().await;
    if !store.has_list(id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(store.tasks_of(id)))
}

async fn create_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<TaskDescription>,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    let mut store = db.write().await;
    if !store.has_list(id) {
        return Err(StatusCode::NOT_FOUND);
    }
    if input.description.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let task = Task {
        id: Uuid::new_v4(),
        description: input.description,
        checked: false,
    };
    let order = store.next_order(id);
    store.tasks.push(TaskRow {
        task: task.clone(),
        list_id: id,
        order,
    });
    Ok((StatusCode::CREATED, Json(task)))
}

async fn toggle_task(State(db): State<Db>, Path(id): Path<Uuid>) -> StatusCode {
    let mut store = db.write().await;
    match store.tasks.iter_mut().find(|r| r.task.id == id) {
        Some(row) => {
            row.task.checked = !row.task.checked;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn update_description(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<TaskDescription>,
) -> Result<Json<Task>, StatusCode> {
    if input.description.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let row = store
        .tasks
        .iter_mut()
        .find(|r| r.task.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    row.task.description = input.description;
    Ok(Json(row.task.clone()))
}

async fn swap_order(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<SwapOrder>,
) -> StatusCode {
    let mut store = db.write().await;
    let (Some(a), Some(b)) = (store.task_index(id), store.task_index(input.task_to_swap_id)) else {
        return StatusCode::NOT_FOUND;
    };
    if store.tasks[a].list_id != store.tasks[b].list_id {
        return StatusCode::BAD_REQUEST;
    }
    let tasks = &mut store.tasks;
    let (order_a, order_b) = (tasks[a].order, tasks[b].order);
    tasks[a].order = order_b;
    tasks[b].order = order_a;
    StatusCode::NO_CONTENT
}

async fn delete_task(State(db): State<Db>, Path(id): Path<Uuid>) -> StatusCode {
    let mut store = db.write().await;
    match store.task_index(id) {
        Some(index) => {
            store.tasks.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
