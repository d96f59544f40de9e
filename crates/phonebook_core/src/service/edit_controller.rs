//! Edit-mode controller binding the contact form to the record store.
//!
//! # Responsibility
//! - Track whether the form holds a new candidate or a selected contact.
//! - Gate create vs update on that mode and reset to `New` after every
//!   completed write or explicit clear.
//! - Dispatch presentation commands and return the refreshed listing.
//!
//! # Invariants
//! - `create` is only accepted in `New`; `update` only in `Editing`.
//! - A command that returns `Err` leaves the store, the form and the mode
//!   unchanged; a refresh failure after a commit travels in the report.
//! - Delete targets the highlighted row supplied by the caller, not the
//!   edited contact, and runs only after an explicit confirmation.
//! - Logs carry ids and counts only, never field values.

use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which record the form currently represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Form holds an unsaved candidate; only `create` is allowed.
    #[default]
    New,
    /// Form holds the loaded contact `id`; only `update` is allowed.
    Editing(ContactId),
}

/// One editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Address,
}

impl ContactField {
    /// Parses a field label (case-insensitive).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "address" => Some(Self::Address),
            _ => None,
        }
    }
}

/// Transient form values; not authoritative until committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl ContactForm {
    /// Returns whether every field is empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.phone.is_empty()
            && self.email.is_empty()
            && self.address.is_empty()
    }

    fn to_draft(&self) -> ContactDraft {
        ContactDraft::from_fields(
            self.name.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.address.as_str(),
        )
    }

    fn load(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone().unwrap_or_default(),
            address: contact.address.clone().unwrap_or_default(),
        }
    }
}

/// User actions accepted by the controller.
///
/// `Select`/`Delete` carry the currently highlighted row, `None` when the
/// surface has nothing highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Create,
    Update,
    Delete(Option<ContactId>),
    Select(Option<ContactId>),
    Clear,
}

/// Yes/no prompt consulted before a delete proceeds.
pub trait ConfirmDelete {
    fn confirm_delete(&mut self, id: ContactId) -> bool;
}

impl<F> ConfirmDelete for F
where
    F: FnMut(ContactId) -> bool,
{
    fn confirm_delete(&mut self, id: ContactId) -> bool {
        self(id)
    }
}

/// Result of a delete request that passed the selection check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(ContactId),
    /// User answered "no"; nothing changed.
    Declined,
}

/// Successful command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Created(Contact),
    Updated(Contact),
    Deleted(ContactId),
    DeleteDeclined,
    Selected(Contact),
    Cleared,
}

/// Command outcome plus the listing the surface should now display.
///
/// `contacts` is read after the command has committed; a failed read does
/// not undo or hide `outcome`.
#[derive(Debug)]
pub struct ActionReport {
    pub outcome: CommandOutcome,
    pub contacts: RepoResult<Vec<Contact>>,
}

/// Errors surfaced by controller operations.
#[derive(Debug)]
pub enum ControllerError {
    /// Name or phone is empty.
    Validation(ContactValidationError),
    /// Target contact does not exist.
    NotFound(ContactId),
    /// Create/update attempted in the wrong mode.
    WrongMode(&'static str),
    /// Select/delete attempted with no highlighted row.
    NoSelection,
    /// Storage transport failure.
    Repo(RepoError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::WrongMode(message) => write!(f, "{message}"),
            Self::NoSelection => write!(f, "select a contact first"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ContactValidationError> for ControllerError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;

const CREATE_WRONG_MODE: &str = "must be in New mode; clear the form before adding";
const UPDATE_WRONG_MODE: &str = "must select an existing contact first";

/// Edit-mode state machine owning its record store.
pub struct EditController<R: ContactRepository> {
    repo: R,
    mode: EditMode,
    form: ContactForm,
}

impl<R: ContactRepository> EditController<R> {
    /// Creates a controller in `New` mode with an empty form.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            mode: EditMode::New,
            form: ContactForm::default(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Whether the surface should enable its create action.
    pub fn can_create(&self) -> bool {
        self.mode == EditMode::New
    }

    /// Whether the surface should enable its update action.
    pub fn can_update(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Overwrites one form field. Does not change the mode.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.form.name = value,
            ContactField::Phone => self.form.phone = value,
            ContactField::Email => self.form.email = value,
            ContactField::Address => self.form.address = value,
        }
    }

    /// Returns a snapshot of every stored contact.
    pub fn list_all(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    /// Loads the highlighted contact into the form and enters `Editing`.
    ///
    /// Unsaved form input is discarded.
    pub fn select(&mut self, selection: Option<ContactId>) -> ControllerResult<Contact> {
        let id = selection.ok_or(ControllerError::NoSelection)?;
        let contact = self
            .repo
            .get_contact(id)?
            .ok_or(ControllerError::NotFound(id))?;

        self.form = ContactForm::load(&contact);
        self.mode = EditMode::Editing(id);
        info!("event=contact_select module=editor status=ok id={id}");
        Ok(contact)
    }

    /// Persists the form as a new contact.
    ///
    /// # Errors
    /// - `WrongMode` while editing an existing contact.
    /// - `Validation` when name or phone is empty; the form is kept.
    pub fn create(&mut self) -> ControllerResult<Contact> {
        if !self.can_create() {
            warn!("event=contact_create module=editor status=rejected reason=wrong_mode");
            return Err(ControllerError::WrongMode(CREATE_WRONG_MODE));
        }

        let contact = self.repo.create_contact(&self.form.to_draft())?;
        info!(
            "event=contact_create module=editor status=ok id={}",
            contact.id
        );
        self.reset();
        Ok(contact)
    }

    /// Overwrites the contact being edited with the form values.
    ///
    /// # Errors
    /// - `WrongMode` in `New` mode.
    /// - `Validation` or `NotFound` from the store; form and mode are kept.
    pub fn update(&mut self) -> ControllerResult<Contact> {
        let EditMode::Editing(id) = self.mode else {
            warn!("event=contact_update module=editor status=rejected reason=wrong_mode");
            return Err(ControllerError::WrongMode(UPDATE_WRONG_MODE));
        };

        let contact = self.repo.update_contact(id, &self.form.to_draft())?;
        info!("event=contact_update module=editor status=ok id={id}");
        self.reset();
        Ok(contact)
    }

    /// Deletes the highlighted contact after confirmation.
    ///
    /// Allowed in either mode. A declined prompt is a no-op.
    pub fn delete(
        &mut self,
        selection: Option<ContactId>,
        prompt: &mut impl ConfirmDelete,
    ) -> ControllerResult<DeleteOutcome> {
        let id = selection.ok_or(ControllerError::NoSelection)?;
        if !prompt.confirm_delete(id) {
            info!("event=contact_delete module=editor status=declined id={id}");
            return Ok(DeleteOutcome::Declined);
        }

        self.repo.delete_contact(id)?;
        info!("event=contact_delete module=editor status=ok id={id}");
        self.reset();
        Ok(DeleteOutcome::Deleted(id))
    }

    /// Discards form input and returns to `New`.
    pub fn clear(&mut self) {
        self.reset();
    }

    /// Runs one command and returns its outcome with the refreshed listing.
    ///
    /// `Err` means the command itself failed and nothing changed. Once a
    /// command has committed, a listing failure is reported inside the
    /// returned `ActionReport` instead.
    pub fn dispatch(
        &mut self,
        command: Command,
        prompt: &mut impl ConfirmDelete,
    ) -> ControllerResult<ActionReport> {
        let outcome = match command {
            Command::Create => CommandOutcome::Created(self.create()?),
            Command::Update => CommandOutcome::Updated(self.update()?),
            Command::Delete(selection) => match self.delete(selection, prompt)? {
                DeleteOutcome::Deleted(id) => CommandOutcome::Deleted(id),
                DeleteOutcome::Declined => CommandOutcome::DeleteDeclined,
            },
            Command::Select(selection) => CommandOutcome::Selected(self.select(selection)?),
            Command::Clear => {
                self.clear();
                CommandOutcome::Cleared
            }
        };

        let contacts = self.repo.list_contacts();
        if let Err(err) = &contacts {
            warn!("event=contact_list module=editor status=error error={err}");
        }
        Ok(ActionReport { outcome, contacts })
    }

    fn reset(&mut self) {
        self.form = ContactForm::default();
        self.mode = EditMode::New;
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactField, ContactForm, EditMode};

    #[test]
    fn field_labels_parse_case_insensitively() {
        assert_eq!(ContactField::parse("NAME"), Some(ContactField::Name));
        assert_eq!(ContactField::parse(" address "), Some(ContactField::Address));
        assert_eq!(ContactField::parse("fax"), None);
    }

    #[test]
    fn default_mode_is_new_and_form_is_empty() {
        assert_eq!(EditMode::default(), EditMode::New);
        assert!(ContactForm::default().is_empty());
    }

    #[test]
    fn editing_mode_serializes_with_id() {
        let json = serde_json::to_string(&EditMode::Editing(3)).expect("mode should serialize");
        assert_eq!(json, r#"{"editing":3}"#);
    }
}
