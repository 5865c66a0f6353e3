//! User intents that need input first: ask through a [`Prompt`], then call
//! into the state model. A cancelled or empty answer does nothing and sends
//! nothing.

use uuid::Uuid;

use crate::error::ApiError;
use crate::state::ClientState;
use crate::transport::Transport;
use crate::view::{Prompt, Render};

fn answer(prompt: &mut impl Prompt, message: &str) -> Option<String> {
    prompt.ask(message).filter(|a| !a.is_empty())
}

/// Returns the new list's id, or `None` if the user cancelled.
pub fn add_list<T: Transport, R: Render>(
    state: &mut ClientState<T, R>,
    prompt: &mut impl Prompt,
) -> Result<Option<Uuid>, ApiError> {
    let Some(name) = answer(prompt, "Name of the new list:") else {
        return Ok(None);
    };
    state.add_list(&name).map(Some)
}

pub fn add_task<T: Transport, R: Render>(
    state: &mut ClientState<T, R>,
    prompt: &mut impl Prompt,
) -> Result<Option<Uuid>, ApiError> {
    if state.selected_id().is_none() {
        return Ok(None);
    }
    let Some(description) = answer(prompt, "New task:") else {
        return Ok(None);
    };
    state.add_task(&description).map(Some)
}

pub fn rename_selected_list<T: Transport, R: Render>(
    state: &mut ClientState<T, R>,
    prompt: &mut impl Prompt,
) -> Result<bool, ApiError> {
    let Some(id) = state.selected_id() else {
        return Ok(false);
    };
    let Some(name) = answer(prompt, "New name for the list:") else {
        return Ok(false);
    };
    state.rename_list(id, &name)?;
    Ok(true)
}

pub fn edit_task<T: Transport, R: Render>(
    state: &mut ClientState<T, R>,
    prompt: &mut impl Prompt,
    task_id: Uuid,
) -> Result<bool, ApiError> {
    let Some(description) = answer(prompt, "New description:") else {
        return Ok(false);
    };
    state.edit_task(task_id, &description)?;
    Ok(true)
}

/// Delete the selected list once the user confirms. Returns whether a
/// delete happened.
pub fn delete_selected_list<T: Transport, R: Render>(
    state: &mut ClientState<T, R>,
    prompt: &mut impl Prompt,
) -> Result<bool, ApiError> {
    let Some(list) = state.selected_list() else {
        return Ok(false);
    };
    let id = list.id;
    let message = format!("Delete the list \"{}\"?", list.name);
    if !prompt.confirm(&message) {
        return Ok(false);
    }
    state.delete_list(id)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::*;

    #[test]
    fn cancelled_prompt_sends_nothing() {
        let mut s = loaded_state(json!([]));
        let mut prompt = ScriptedPrompt::default();

        assert_eq!(add_list(&mut s, &mut prompt).unwrap(), None);
        assert_eq!(add_task(&mut s, &mut prompt).unwrap(), None);
        assert!(s.gateway().transport().requests().is_empty());
    }

    #[test]
    fn empty_answer_counts_as_cancel() {
        let mut s = loaded_state(json!([]));
        let mut prompt = ScriptedPrompt::answering("");

        assert_eq!(add_list(&mut s, &mut prompt).unwrap(), None);
        assert!(s.gateway().transport().requests().is_empty());
    }

    #[test]
    fn add_list_uses_answer() {
        let mut s = loaded_state(json!([]));
        s.gateway().transport().respond(201, list_json(3, "Garden"));
        let mut prompt = ScriptedPrompt::answering("Garden");

        assert_eq!(add_list(&mut s, &mut prompt).unwrap(), Some(id(3)));
        assert_eq!(s.lists().len(), 3);
    }

    #[test]
    fn add_task_without_selection_does_not_prompt() {
        let mut s = state();
        let mut prompt = ScriptedPrompt::answering("Buy milk");

        assert_eq!(add_task(&mut s, &mut prompt).unwrap(), None);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut s = loaded_state(json!([]));
        let mut prompt = ScriptedPrompt::confirming(false);

        assert!(!delete_selected_list(&mut s, &mut prompt).unwrap());
        assert!(s.gateway().transport().requests().is_empty());
        assert_eq!(prompt.asked, ["Delete the list \"Home\"?"]);
    }

    #[test]
    fn confirmed_delete_removes_selected_list() {
        let mut s = loaded_state(json!([]));
        let t = s.gateway().transport();
        t.respond_empty(204);
        t.respond(200, json!([]));
        let mut prompt = ScriptedPrompt::confirming(true);

        assert!(delete_selected_list(&mut s, &mut prompt).unwrap());
        assert_eq!(s.selected_id(), Some(id(2)));
    }

    #[test]
    fn rename_and_edit_use_answers() {
        let mut s = loaded_state(json!([task_json(10, "Buy milk", false)]));
        let t = s.gateway().transport();
        t.respond(200, list_json(1, "House"));
        t.respond(200, task_json(10, "Buy bread", false));
        let mut prompt = ScriptedPrompt {
            answers: [Some("House".to_string()), Some("Buy bread".to_string())].into(),
            ..ScriptedPrompt::default()
        };

        assert!(rename_selected_list(&mut s, &mut prompt).unwrap());
        assert!(edit_task(&mut s, &mut prompt, id(10)).unwrap());
        assert_eq!(s.lists()[0].name, "House");
        assert_eq!(s.tasks()[0].description, "Buy bread");
    }
}
