//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/get/update/delete over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `ContactDraft::validate()` before any SQL mutation.
//! - Every operation is a single statement, so it is all-or-nothing.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Listing order is `id ASC` (insertion order).

use crate::db::schema::contacts_table_exists;
use crate::db::DbError;
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone,
    email,
    address
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    MissingTable,
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::MissingTable => write!(f, "contacts table is missing; open the database first"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::MissingTable | Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record-store interface for contact CRUD operations.
///
/// The edit controller only talks to this trait, so the embedded engine can
/// be replaced without touching controller logic.
pub trait ContactRepository {
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact>;
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository borrowing the process connection.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection whose schema has already been bootstrapped.
    ///
    /// # Errors
    /// - `MissingTable` when `contacts` does not exist (connection was not
    ///   opened through `db::open_db*`).
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !contacts_table_exists(conn)? {
            return Err(RepoError::MissingTable);
        }
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (name, phone, email, address) VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.name.as_str(),
                draft.phone.as_str(),
                draft.email.as_deref(),
                draft.address.as_deref(),
            ],
        )?;

        Ok(with_id(self.conn.last_insert_rowid(), draft))
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let contact = stmt.query_row([id], raw_contact).optional()?;
        contact.map(checked).transpose()
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                phone = ?2,
                email = ?3,
                address = ?4
             WHERE id = ?5;",
            params![
                draft.name.as_str(),
                draft.phone.as_str(),
                draft.email.as_deref(),
                draft.address.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(with_id(id, draft))
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn with_id(id: ContactId, draft: &ContactDraft) -> Contact {
    Contact {
        id,
        name: draft.name.clone(),
        phone: draft.phone.clone(),
        email: draft.email.clone(),
        address: draft.address.clone(),
    }
}

fn raw_contact(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
    })
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    checked(raw_contact(row)?)
}

fn checked(contact: Contact) -> RepoResult<Contact> {
    contact.validate().map_err(|err| {
        RepoError::InvalidData(format!("row id={} violates `{err}`", contact.id))
    })?;
    Ok(contact)
}
