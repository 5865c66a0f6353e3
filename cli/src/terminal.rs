//! Line-oriented terminal implementations of the render and prompt
//! collaborators.

use std::io::{self, BufRead, Write};

use tasklist_core::{Prompt, Render, TaskList};
use uuid::Uuid;

/// Prints both views to any writer, stdout by default.
pub struct TerminalView<W> {
    out: W,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Rendering never fails the operation that triggered it.
    fn emit(&mut self, text: String) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

impl<W: Write> Render for TerminalView<W> {
    fn render_lists(&mut self, lists: &[TaskList], selected: Option<Uuid>) {
        let mut text = String::from("Lists:\n");
        if lists.is_empty() {
            text.push_str("  (none)\n");
        }
        for (i, list) in lists.iter().enumerate() {
            let marker = if Some(list.id) == selected { '>' } else { ' ' };
            text.push_str(&format!("{marker} {}. {}\n", i + 1, list.name));
        }
        self.emit(text);
    }

    fn render_tasks(&mut self, list: Option<&TaskList>) {
        let Some(list) = list else {
            self.emit("No list available\n".to_string());
            return;
        };
        let mut text = format!("Tasks of {}:\n", list.name);
        if list.tasks.is_empty() {
            text.push_str("  (empty)\n");
        }
        for (i, task) in list.tasks.iter().enumerate() {
            let mark = if task.checked { 'x' } else { ' ' };
            text.push_str(&format!("  {}. [{mark}] {}\n", i + 1, task.description));
        }
        self.emit(text);
    }
}

/// Asks on stdout and reads the answer from stdin. EOF cancels.
pub struct StdinPrompt;

impl StdinPrompt {
    fn read_answer(message: &str) -> Option<String> {
        print!("{message} ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Prompt for StdinPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        Self::read_answer(message)
    }

    fn confirm(&mut self, message: &str) -> bool {
        Self::read_answer(&format!("{message} [y/N]"))
            .is_some_and(|a| matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}
