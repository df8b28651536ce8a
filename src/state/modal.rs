//! Modal dialog state and the edit-session draft.

use super::types::{NewsItem, NewsStatus};

/// Which draft field currently receives keystrokes in the edit modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    /// The headline input.
    Title,
    /// The description body input.
    Description,
}

/// Ephemeral state for the modal edit workflow.
///
/// Owned exclusively by the edit modal: the collection is never touched until
/// a commit is acknowledged by the server. The draft is discarded on cancel
/// and after a successful commit; opening the modal for another item silently
/// replaces any previous draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDraft {
    /// Identifier of the item being edited.
    pub id: i64,
    /// Draft headline.
    pub title: String,
    /// Draft description (HTML source, edited as text).
    pub description: String,
    /// Field that currently receives input.
    pub field: EditField,
    /// Set while a commit is in flight; locks the draft against double
    /// submission until the mutation reply arrives.
    pub saving: bool,
    /// Failure message from the last commit attempt, shown inside the modal.
    /// The draft itself stays intact so no unsaved edits are lost.
    pub error: Option<String>,
}

impl EditDraft {
    /// What: Open a draft seeded from the current state of an item.
    ///
    /// Inputs:
    /// - `item`: The collection row being edited.
    ///
    /// Output: A draft copying the item's `title` and `description`, cursor
    /// on the title field.
    pub fn from_item(item: &NewsItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            description: item.description.clone(),
            field: EditField::Title,
            saving: false,
            error: None,
        }
    }

    /// Switch keystroke focus to the other field.
    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            EditField::Title => EditField::Description,
            EditField::Description => EditField::Title,
        };
    }

    /// Mutable access to whichever field has keystroke focus.
    pub fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            EditField::Title => &mut self.title,
            EditField::Description => &mut self.description,
        }
    }
}

/// Modal dialog state for the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Modal {
    /// No modal; keystrokes go to the current route.
    #[default]
    None,
    /// Informational alert with a non-interactive message. Used for mutation
    /// failures so the operator explicitly acknowledges them.
    Alert {
        /// Message shown in the dialog body.
        message: String,
    },
    /// Help overlay with keybindings. Dismissed with Esc/Enter.
    Help,
    /// The edit session: a single draft over one news item.
    EditNews {
        /// The live draft.
        draft: EditDraft,
    },
    /// Confirmation dialog before toggling an item's status.
    ConfirmToggle {
        /// Identifier of the item to toggle.
        id: i64,
        /// Status the item will be moved to on confirm.
        to: NewsStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::{EditDraft, EditField};
    use crate::state::types::{NewsItem, NewsStatus};

    fn item() -> NewsItem {
        NewsItem {
            id: 7,
            title: "Headline".to_string(),
            description: "<p>Body</p>".to_string(),
            status: NewsStatus::Active,
            priority: 1,
            language: "en".to_string(),
            url: String::new(),
            source_url: String::new(),
            source_url_formate: String::new(),
            author: String::new(),
            published_at: String::new(),
            read_more_content: String::new(),
        }
    }

    /// What: Opening a draft copies the item's editable fields only.
    ///
    /// Inputs: A populated news item.
    /// Output: Draft mirrors title/description, starts on the title field,
    /// not saving.
    #[test]
    fn draft_copies_editable_fields() {
        let d = EditDraft::from_item(&item());
        assert_eq!(d.id, 7);
        assert_eq!(d.title, "Headline");
        assert_eq!(d.description, "<p>Body</p>");
        assert_eq!(d.field, EditField::Title);
        assert!(!d.saving);
    }

    /// What: Field toggling alternates and routes keystrokes accordingly.
    ///
    /// Inputs: A fresh draft, toggled twice, with edits to each active field.
    /// Output: Edits land in title first, then description after a toggle.
    #[test]
    fn field_toggle_routes_keystrokes() {
        let mut d = EditDraft::from_item(&item());
        d.active_field_mut().push('!');
        assert_eq!(d.title, "Headline!");
        d.toggle_field();
        assert_eq!(d.field, EditField::Description);
        d.active_field_mut().push('!');
        assert_eq!(d.description, "<p>Body</p>!");
        d.toggle_field();
        assert_eq!(d.field, EditField::Title);
    }
}
