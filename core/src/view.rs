//! Collaborators the core talks to but does not implement: a rendering
//! surface and an input prompt.

use uuid::Uuid;

use crate::types::TaskList;

/// Pure projection of the client state. Called after every state change.
pub trait Render {
    fn render_lists(&mut self, lists: &[TaskList], selected: Option<Uuid>);

    /// `list` is the selected list, or `None` when nothing is selected.
    fn render_tasks(&mut self, list: Option<&TaskList>);
}

/// Renderer that draws nothing. Useful for headless hosts and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRender;

impl Render for NullRender {
    fn render_lists(&mut self, _lists: &[TaskList], _selected: Option<Uuid>) {}

    fn render_tasks(&mut self, _list: Option<&TaskList>) {}
}

/// Source of user input for naming and destructive-action confirmation.
pub trait Prompt {
    /// Returns `None` when the user cancels.
    fn ask(&mut self, message: &str) -> Option<String>;

    fn confirm(&mut self, message: &str) -> bool;
}
