//! Domain types and request payloads for the task list API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch schema drift between the two crates.
//! `TaskList::tasks` and `TaskList::loaded` are client-side state: the wire
//! shape of a list is only `{id, name}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, ordered collection of tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskList {
    pub id: Uuid,
    pub name: String,
    /// Tasks in server order. Only meaningful when `loaded` is true.
    #[serde(default, skip_serializing)]
    pub tasks: Vec<Task>,
    /// Whether `tasks` reflects a completed fetch for this list.
    #[serde(skip)]
    pub loaded: bool,
}

impl TaskList {
    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn contains_task(&self, id: Uuid) -> bool {
        self.task(id).is_some()
    }

    /// Forget the task sequence, e.g. when navigating away from the list.
    pub(crate) fn unload(&mut self) {
        self.tasks.clear();
        self.loaded = false;
    }
}

/// A checkable unit of work. Its position is its index in the parent list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub checked: bool,
}

/// Payload for creating or renaming a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListName {
    pub name: String,
}

/// Payload for creating a task or editing its description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescription {
    pub description: String,
}

/// Payload for exchanging the positions of two tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOrder {
    pub task_to_swap_id: Uuid,
}
