//! Client-side edit buffer.
//!
//! [`DraftState`] is a plain value and [`reduce`] the only way to change
//! it, so every create/edit/reset transition can be checked without a
//! terminal or a server.

use std::path::PathBuf;

use eventboard_core::types::DbId;

use crate::model::EventItem;

/// Fields of the form as the user is editing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub date: String,
    /// Newly chosen file, not yet uploaded.
    pub image: Option<PathBuf>,
    /// Image the event already has on the server.
    pub image_url: Option<String>,
}

/// The form plus which event, if any, it is editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    pub form: EventForm,
    pub editing_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetTitle(String),
    SetDescription(String),
    SetDate(String),
    /// Pick a file (`Some`) or clear the file picker (`None`).
    ChooseFile(Option<PathBuf>),
    /// Drop both the chosen file and the existing image.
    ClearImage,
    /// Load an event from the list into the form.
    Edit(EventItem),
    Reset,
}

/// Apply one action to the draft.
pub fn reduce(state: DraftState, action: FormAction) -> DraftState {
    let DraftState {
        mut form,
        editing_id,
    } = state;

    match action {
        FormAction::SetTitle(title) => form.title = title,
        FormAction::SetDescription(description) => form.description = description,
        FormAction::SetDate(date) => form.date = date,
        FormAction::ChooseFile(Some(path)) => {
            form.image = Some(path);
            form.image_url = None;
        }
        FormAction::ChooseFile(None) => form.image = None,
        FormAction::ClearImage => {
            form.image = None;
            form.image_url = None;
        }
        FormAction::Edit(event) => {
            return DraftState {
                form: EventForm {
                    title: event.title,
                    description: event.description,
                    date: event.date,
                    image: None,
                    image_url: event.url,
                },
                editing_id: Some(event.id),
            };
        }
        FormAction::Reset => return DraftState::default(),
    }

    DraftState { form, editing_id }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Title and Date are required")]
    MissingRequired,
}

/// What gets sent to the API when the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Present for updates.
    pub id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub date: String,
    pub image: Option<PathBuf>,
    /// Ask the server to drop the existing image.
    pub remove_image: bool,
}

impl DraftState {
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Whether the form should display the event's current image.
    pub fn shows_existing_image(&self) -> bool {
        self.form.image.is_none() && self.form.image_url.is_some()
    }

    /// Build the request for the current draft.
    ///
    /// While editing, a cleared image reference with no replacement file
    /// becomes a removal request.
    pub fn submission(&self) -> Result<Submission, DraftError> {
        let form = &self.form;
        if form.title.trim().is_empty() || form.date.trim().is_empty() {
            return Err(DraftError::MissingRequired);
        }

        Ok(Submission {
            id: self.editing_id,
            title: form.title.clone(),
            description: form.description.clone(),
            date: form.date.clone(),
            image: form.image.clone(),
            remove_image: self.is_editing() && form.image.is_none() && form.image_url.is_none(),
        })
    }
}
