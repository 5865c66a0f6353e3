//! Client state model: the session's copy of lists and the selected list's
//! tasks, reconciled against the remote store.
//!
//! # Reconciliation
//! Every mutating operation either succeeds and is then reflected locally,
//! or fails and leaves local state untouched. The one exception is toggle,
//! which flips the task locally as soon as the request is issued and flips
//! it back if the request fails.
//!
//! Task order is never patched locally: after anything that can change the
//! order the selected list is refetched wholesale with
//! [`ClientState::load_tasks_for_selected`].
//!
//! # Generations
//! Each list carries two counters. `generation` is bumped whenever a task
//! load starts or a task mutation is applied on the list; a load whose
//! generation is no longer current when its response arrives is discarded.
//! `snapshot` is bumped whenever server state for the list's tasks is
//! applied (a load, or an edited task); a failed toggle only
//! rolls back if the task it flipped is still the one from the same
//! snapshot.
//!
//! Operations that need interleaving with other work come in two phases
//! (`begin_*` returns a pending request, `finish_*` applies its response).
//! The plain variants run both phases over the gateway's transport.

use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Task, TaskList};
use crate::view::Render;

#[derive(Debug, Default, Clone, Copy)]
struct ListClock {
    generation: u64,
    snapshot: u64,
}

/// Result of a task refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The selected list's tasks were replaced with the server's.
    Applied,
    /// A newer load or mutation started, or the selection moved; the
    /// response was dropped.
    Stale,
    /// Nothing is selected, so nothing was requested.
    NoSelection,
}

/// An issued task load awaiting its response.
#[derive(Debug)]
#[must_use]
pub struct PendingTasks {
    list_id: Uuid,
    generation: u64,
    request: HttpRequest,
}

impl PendingTasks {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

/// A toggle already applied locally, awaiting server confirmation.
#[derive(Debug)]
#[must_use]
pub struct PendingToggle {
    list_id: Uuid,
    task_id: Uuid,
    snapshot: u64,
    request: HttpRequest,
}

impl PendingToggle {
    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

pub struct ClientState<T, R> {
    gateway: Gateway<T>,
    renderer: R,
    lists: Vec<TaskList>,
    selected: Option<Uuid>,
    clocks: HashMap<Uuid, ListClock>,
}

impl<T: Transport, R: Render> ClientState<T, R> {
    pub fn new(gateway: Gateway<T>, renderer: R) -> Self {
        Self {
            gateway,
            renderer,
            lists: Vec::new(),
            selected: None,
            clocks: HashMap::new(),
        }
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn selected_list(&self) -> Option<&TaskList> {
        let id = self.selected?;
        self.lists.iter().find(|l| l.id == id)
    }

    /// Tasks of the selected list, empty when nothing is selected.
    pub fn tasks(&self) -> &[Task] {
        self.selected_list()
            .map(|l| l.tasks.as_slice())
            .unwrap_or(&[])
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    /// Replace the list collection with the server's and select the first
    /// list, loading its tasks.
    pub fn load_lists(&mut self) -> Result<(), ApiError> {
        let lists = self
            .gateway
            .list_all()
            .inspect_err(|err| warn!(error = %err, "failed to load lists"))?;

        self.lists = lists;
        self.selected = None;
        let live = &self.lists;
        self.clocks.retain(|id, _| live.iter().any(|l| l.id == *id));
        if self.lists.is_empty() {
            self.render_lists();
            self.render_tasks();
            return Ok(());
        }
        self.select_list(0).map(|_| ())
    }

    /// Select the list at `index` and load its tasks. The previously
    /// selected list's tasks are dropped.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn select_list(&mut self, index: usize) -> Result<Refresh, ApiError> {
        assert!(
            index < self.lists.len(),
            "list index {index} out of range ({} lists)",
            self.lists.len()
        );
        let id = self.lists[index].id;
        if let Some(previous) = self.selected.filter(|p| *p != id) {
            if let Some(list) = self.list_mut(previous) {
                list.unload();
            }
        }
        self.selected = Some(id);
        self.render_lists();
        self.render_tasks();
        self.load_tasks_for_selected()
    }

    /// Create a list and append it. An existing selection is kept; the
    /// first list ever added to an empty collection becomes selected.
    pub fn add_list(&mut self, name: &str) -> Result<Uuid, ApiError> {
        if name.is_empty() {
            return Err(ApiError::empty("list name"));
        }
        let mut list = self
            .gateway
            .create_list(name)
            .inspect_err(|err| warn!(error = %err, "failed to create list"))?;

        let id = list.id;
        let select = self.selected.is_none();
        if select {
            // A list fresh from the server has no tasks yet.
            list.loaded = true;
            self.selected = Some(id);
        }
        self.lists.push(list);
        self.render_lists();
        if select {
            self.render_tasks();
        }
        Ok(id)
    }

    pub fn rename_list(&mut self, id: Uuid, name: &str) -> Result<(), ApiError> {
        if name.is_empty() {
            return Err(ApiError::empty("list name"));
        }
        let renamed = self
            .gateway
            .rename_list(id, name)
            .inspect_err(|err| warn!(list_id = %id, error = %err, "failed to rename list"))?;

        if let Some(list) = self.list_mut(id) {
            list.name = renamed.name;
        }
        self.render_lists();
        if self.selected == Some(id) {
            self.render_tasks();
        }
        Ok(())
    }

    /// Delete a list. If it was selected, selection moves to the first
    /// remaining list (whose tasks are then loaded) or to none.
    ///
    /// An `Err` always means the list still exists. If the delete succeeds
    /// but loading the next list's tasks fails, the failure is logged and
    /// that list stays unloaded until the next refresh.
    pub fn delete_list(&mut self, id: Uuid) -> Result<(), ApiError> {
        self.gateway
            .delete_list(id)
            .inspect_err(|err| warn!(list_id = %id, error = %err, "failed to delete list"))?;

        self.lists.retain(|l| l.id != id);
        self.clocks.remove(&id);
        if self.selected == Some(id) {
            self.selected = self.lists.first().map(|l| l.id);
        }
        self.render_lists();
        self.render_tasks();

        let needs_load = self.selected_list().is_some_and(|l| !l.loaded);
        if needs_load {
            // Already logged by the load.
            let _ = self.load_tasks_for_selected();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Task loads
    // ------------------------------------------------------------------

    pub fn load_tasks_for_selected(&mut self) -> Result<Refresh, ApiError> {
        let Some(pending) = self.begin_load_tasks() else {
            return Ok(Refresh::NoSelection);
        };
        let response = self.gateway.execute(pending.request());
        self.finish_load_tasks(pending, response)
    }

    /// Start a load of the selected list's tasks. Any load already in
    /// flight for the list becomes stale.
    pub fn begin_load_tasks(&mut self) -> Option<PendingTasks> {
        let list_id = self.selected?;
        let generation = self.bump(list_id);
        Some(PendingTasks {
            list_id,
            generation,
            request: self.gateway.client().build_list_tasks(list_id),
        })
    }

    pub fn finish_load_tasks(
        &mut self,
        pending: PendingTasks,
        response: Result<HttpResponse, ApiError>,
    ) -> Result<Refresh, ApiError> {
        if !self.is_current(pending.list_id, pending.generation) {
            debug!(
                list_id = %pending.list_id,
                generation = pending.generation,
                "discarding stale task load"
            );
            return Ok(Refresh::Stale);
        }

        let tasks = response
            .and_then(|r| self.gateway.client().parse_list_tasks(r))
            .inspect_err(|err| {
                warn!(list_id = %pending.list_id, error = %err, "failed to load tasks")
            })?;

        let Some(list) = self.list_mut(pending.list_id) else {
            return Ok(Refresh::Stale);
        };
        list.tasks = tasks;
        list.loaded = true;
        self.clock_mut(pending.list_id).snapshot += 1;
        self.render_tasks();
        Ok(Refresh::Applied)
    }

    // ------------------------------------------------------------------
    // Task mutations
    // ------------------------------------------------------------------

    pub fn add_task(&mut self, description: &str) -> Result<Uuid, ApiError> {
        if description.is_empty() {
            return Err(ApiError::empty("task description"));
        }
        let list_id = self.require_selection()?;
        let task = self
            .gateway
            .create_task(list_id, description)
            .inspect_err(|err| warn!(list_id = %list_id, error = %err, "failed to create task"))?;

        let id = task.id;
        self.bump(list_id);
        if let Some(list) = self.list_mut(list_id) {
            list.tasks.push(task);
        }
        self.render_tasks();
        Ok(id)
    }

    pub fn toggle_task(&mut self, task_id: Uuid) -> Result<(), ApiError> {
        let pending = self.begin_toggle(task_id)?;
        let response = self.gateway.execute(pending.request());
        self.finish_toggle(pending, response)
    }

    /// Flip the task locally and return the request that confirms it.
    pub fn begin_toggle(&mut self, task_id: Uuid) -> Result<PendingToggle, ApiError> {
        let list_id = self.require_selection()?;
        let task = self
            .list_mut(list_id)
            .and_then(|l| l.task_mut(task_id))
            .ok_or(ApiError::NotFound)?;
        task.checked = !task.checked;

        self.bump(list_id);
        let snapshot = self.clock_mut(list_id).snapshot;
        self.render_tasks();
        Ok(PendingToggle {
            list_id,
            task_id,
            snapshot,
            request: self.gateway.client().build_toggle_task(task_id),
        })
    }

    /// Apply the server's answer to a toggle. On failure the local flip is
    /// undone unless the list has been reloaded since.
    pub fn finish_toggle(
        &mut self,
        pending: PendingToggle,
        response: Result<HttpResponse, ApiError>,
    ) -> Result<(), ApiError> {
        let result = response.and_then(|r| self.gateway.client().parse_toggle_task(r));
        let Err(err) = result else {
            return Ok(());
        };
        warn!(task_id = %pending.task_id, error = %err, "failed to toggle task");

        let unchanged = self
            .clocks
            .get(&pending.list_id)
            .is_some_and(|c| c.snapshot == pending.snapshot);
        if unchanged {
            let rolled_back = match self
                .list_mut(pending.list_id)
                .and_then(|l| l.task_mut(pending.task_id))
            {
                Some(task) => {
                    task.checked = !task.checked;
                    true
                }
                None => false,
            };
            if rolled_back {
                self.render_tasks();
            }
        }
        Err(err)
    }

    pub fn edit_task(&mut self, task_id: Uuid, description: &str) -> Result<(), ApiError> {
        if description.is_empty() {
            return Err(ApiError::empty("task description"));
        }
        let list_id = self.require_task(task_id)?;
        let updated = self
            .gateway
            .update_task_description(task_id, description)
            .inspect_err(|err| warn!(task_id = %task_id, error = %err, "failed to edit task"))?;

        // The server's `checked` supersedes any toggle still in flight.
        let clock = self.clock_mut(list_id);
        clock.generation += 1;
        clock.snapshot += 1;
        if let Some(task) = self.list_mut(list_id).and_then(|l| l.task_mut(task_id)) {
            task.description = updated.description;
            task.checked = updated.checked;
        }
        self.render_tasks();
        Ok(())
    }

    pub fn delete_task(&mut self, task_id: Uuid) -> Result<(), ApiError> {
        let list_id = self.require_task(task_id)?;
        self.gateway
            .delete_task(task_id)
            .inspect_err(|err| warn!(task_id = %task_id, error = %err, "failed to delete task"))?;

        self.bump(list_id);
        if let Some(list) = self.list_mut(list_id) {
            list.tasks.retain(|t| t.id != task_id);
        }
        self.render_tasks();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn list_mut(&mut self, id: Uuid) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    fn require_selection(&self) -> Result<Uuid, ApiError> {
        self.selected
            .ok_or_else(|| ApiError::Validation("no list selected".to_string()))
    }

    /// The selected list's id, provided it holds `task_id`.
    fn require_task(&self, task_id: Uuid) -> Result<Uuid, ApiError> {
        let list_id = self.require_selection()?;
        match self.selected_list() {
            Some(list) if list.contains_task(task_id) => Ok(list_id),
            _ => Err(ApiError::NotFound),
        }
    }

    fn clock_mut(&mut self, list_id: Uuid) -> &mut ListClock {
        self.clocks.entry(list_id).or_default()
    }

    fn bump(&mut self, list_id: Uuid) -> u64 {
        let clock = self.clock_mut(list_id);
        clock.generation += 1;
        clock.generation
    }

    fn is_current(&self, list_id: Uuid, generation: u64) -> bool {
        self.selected == Some(list_id)
            && self.lists.iter().any(|l| l.id == list_id)
            && self
                .clocks
                .get(&list_id)
                .is_some_and(|c| c.generation == generation)
    }

    fn render_lists(&mut self) {
        self.renderer.render_lists(&self.lists, self.selected);
    }

    fn render_tasks(&mut self) {
        let selected = self.selected;
        let list = selected.and_then(|id| self.lists.iter().find(|l| l.id == id));
        self.renderer.render_tasks(list);
    }
}
