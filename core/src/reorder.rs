//! Reorder controller: turns a drag gesture over the task rows into one
//! server-side swap followed by one authoritative reload.
//!
//! The gesture is described independently of any UI toolkit. The host hands
//! over the ancestor path of the element under the pointer, innermost first,
//! as a slice of [`DropNode`]s; the controller picks the nearest task row.
//!
//! Local order is never rearranged here. Whatever the swap's outcome, the
//! selected list is refetched so the view shows the server's order.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::ClientState;
use crate::transport::Transport;
use crate::view::Render;

/// One element on the path from the pointer target up to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropNode {
    TaskRow(Uuid),
    Other,
}

/// Nearest task row on an innermost-first ancestor path.
pub fn nearest_task_row(path: &[DropNode]) -> Option<Uuid> {
    path.iter().find_map(|node| match node {
        DropNode::TaskRow(id) => Some(*id),
        DropNode::Other => None,
    })
}

/// Why a drop issued no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    NoDrag,
    NoTarget,
    SameTask,
    /// Either task is not in the selected list.
    ForeignTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Swapped { source: Uuid, target: Uuid },
    Ignored(Ignored),
}

#[derive(Debug, Default)]
pub struct ReorderController {
    dragged: Option<Uuid>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragged(&self) -> Option<Uuid> {
        self.dragged
    }

    /// Record the task the gesture started on. A gesture that starts
    /// outside any task row records nothing.
    pub fn drag_start(&mut self, origin: &[DropNode]) {
        self.dragged = nearest_task_row(origin);
        debug!(dragged = ?self.dragged, "drag started");
    }

    /// Whether the host must suppress its default handling so that a drop
    /// can be observed here.
    pub fn drag_over(&self, _path: &[DropNode]) -> bool {
        self.dragged.is_some()
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
    }

    /// Finish the gesture over `path`.
    ///
    /// Issues exactly one swap and one reload, or nothing at all. A failed
    /// swap is returned after the reload has run; if both fail, the swap's
    /// error wins.
    pub fn drop_on<T: Transport, R: Render>(
        &mut self,
        state: &mut ClientState<T, R>,
        path: &[DropNode],
    ) -> Result<DropOutcome, ApiError> {
        let Some(source) = self.dragged.take() else {
            return Ok(DropOutcome::Ignored(Ignored::NoDrag));
        };
        let Some(target) = nearest_task_row(path) else {
            return Ok(DropOutcome::Ignored(Ignored::NoTarget));
        };
        if source == target {
            return Ok(DropOutcome::Ignored(Ignored::SameTask));
        }
        let same_list = state
            .selected_list()
            .is_some_and(|l| l.contains_task(source) && l.contains_task(target));
        if !same_list {
            debug!(%source, %target, "ignoring drop across lists");
            return Ok(DropOutcome::Ignored(Ignored::ForeignTask));
        }

        let swapped = state
            .gateway()
            .swap_task_order(source, target)
            .inspect_err(|err| warn!(%source, %target, error = %err, "failed to swap tasks"));
        let reloaded = state.load_tasks_for_selected();

        swapped?;
        reloaded?;
        Ok(DropOutcome::Swapped { source, target })
    }
}
