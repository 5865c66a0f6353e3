//! REPL commands and their dispatch onto the client core.
//!
//! Rows and lists are addressed by their 1-based position on screen.

use clap::{Parser, Subcommand};
use tasklist_core::{
    actions, ApiError, ClientState, DropNode, DropOutcome, Prompt, Render, ReorderController,
    Transport,
};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reload all lists from the server
    Lists,
    /// Select a list and load its tasks
    Select { list: usize },
    /// Create a list
    NewList,
    /// Rename the selected list
    RenameList,
    /// Delete the selected list
    DeleteList,
    /// Reload the selected list's tasks
    Reload,
    /// Add a task to the selected list
    NewTask,
    /// Check or uncheck a task
    Toggle { task: usize },
    /// Change a task's description
    Edit { task: usize },
    /// Delete a task
    Delete { task: usize },
    /// Drag a task onto another one, swapping their positions
    Move { from: usize, to: usize },
    /// Leave
    Quit,
}

pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, T, R, P> {
    pub state: &'a mut ClientState<T, R>,
    pub prompt: &'a mut P,
    pub reorder: &'a mut ReorderController,
}

impl<T: Transport, R: Render, P: Prompt> Session<'_, T, R, P> {
    pub fn run(&mut self, command: Command) -> anyhow::Result<Flow> {
        match command {
            Command::Lists => self.state.load_lists()?,
            Command::Select { list } => {
                let index = self.list_index(list)?;
                self.state.select_list(index)?;
            }
            Command::NewList => {
                actions::add_list(self.state, self.prompt)?;
            }
            Command::RenameList => {
                actions::rename_selected_list(self.state, self.prompt)?;
            }
            Command::DeleteList => {
                actions::delete_selected_list(self.state, self.prompt)?;
            }
            Command::Reload => {
                self.state.load_tasks_for_selected()?;
            }
            Command::NewTask => {
                if actions::add_task(self.state, self.prompt)?.is_none()
                    && self.state.selected_id().is_none()
                {
                    println!("Select or create a list first");
                }
            }
            Command::Toggle { task } => {
                let id = self.task_id(task)?;
                self.state.toggle_task(id)?;
            }
            Command::Edit { task } => {
                let id = self.task_id(task)?;
                actions::edit_task(self.state, self.prompt, id)?;
            }
            Command::Delete { task } => {
                let id = self.task_id(task)?;
                self.state.delete_task(id)?;
            }
            Command::Move { from, to } => {
                let origin = self.row_path(from);
                let target = self.row_path(to);
                self.reorder.drag_start(&origin);
                if let DropOutcome::Ignored(reason) = self.reorder.drop_on(self.state, &target)? {
                    println!("Nothing to move ({reason:?})");
                }
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn list_index(&self, position: usize) -> Result<usize, ApiError> {
        let count = self.state.lists().len();
        if position == 0 || position > count {
            return Err(ApiError::Validation(format!(
                "no list at position {position} (there are {count})"
            )));
        }
        Ok(position - 1)
    }

    fn task_id(&self, position: usize) -> Result<Uuid, ApiError> {
        position
            .checked_sub(1)
            .and_then(|i| self.state.tasks().get(i))
            .map(|t| t.id)
            .ok_or_else(|| ApiError::Validation(format!("no task at position {position}")))
    }

    /// A row that does not exist behaves like a drop outside the task rows.
    fn row_path(&self, position: usize) -> Vec<DropNode> {
        match self.task_id(position) {
            Ok(id) => vec![DropNode::TaskRow(id)],
            Err(_) => vec![DropNode::Other],
        }
    }
}
