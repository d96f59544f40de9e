use phonebook_core::db::open_db_in_memory;
use phonebook_core::{
    ContactDraft, ContactRepository, ContactValidationError, RepoError, SqliteContactRepository,
};
use rusqlite::Connection;

fn draft(name: &str, phone: &str, email: &str, address: &str) -> ContactDraft {
    ContactDraft::from_fields(name, phone, email, address)
}

#[test]
fn create_assigns_id_and_lists_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let created = repo
        .create_contact(&draft("Alice", "555-1000", "a@x.com", "1 Main St"))
        .unwrap();
    assert_eq!(created.id, 1);

    let listed = repo.list_contacts().unwrap();
    assert_eq!(listed, vec![created]);
    assert_eq!(listed[0].email.as_deref(), Some("a@x.com"));
    assert_eq!(listed[0].address.as_deref(), Some("1 Main St"));
}

#[test]
fn create_adds_exactly_one_row_and_allows_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let first = repo.create_contact(&draft("Bob", "1", "", "")).unwrap();
    let before = repo.list_contacts().unwrap().len();
    let second = repo.create_contact(&draft("Bob", "1", "", "")).unwrap();

    assert_eq!(repo.list_contacts().unwrap().len(), before + 1);
    assert_ne!(first.id, second.id);
    assert_eq!(second.email, None);
}

#[test]
fn create_with_empty_required_field_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    repo.create_contact(&draft("Alice", "555-1000", "", ""))
        .unwrap();

    let err = repo.create_contact(&draft("", "555", "", "")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::NameRequired)
    ));

    let err = repo.create_contact(&draft("Carol", "", "", "")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::PhoneRequired)
    ));

    assert_eq!(repo.list_contacts().unwrap().len(), 1);
}

#[test]
fn whitespace_only_fields_are_not_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let created = repo.create_contact(&draft(" ", "\t", "", "")).unwrap();
    assert_eq!(created.name, " ");
    assert_eq!(created.phone, "\t");
}

#[test]
fn list_order_is_insertion_order_and_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    for name in ["Zed", "Amy", "Mia"] {
        repo.create_contact(&draft(name, "000", "", "")).unwrap();
    }

    let first = repo.list_contacts().unwrap();
    let names: Vec<&str> = first.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Zed", "Amy", "Mia"]);
    assert_eq!(repo.list_contacts().unwrap(), first);
}

#[test]
fn update_overwrites_all_fields_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let created = repo
        .create_contact(&draft("Alice", "555-1000", "a@x.com", "1 Main St"))
        .unwrap();

    let updated = repo
        .update_contact(created.id, &draft("Alicia", "555-2000", "", "2 Oak Ave"))
        .unwrap();
    assert_eq!(updated.id, created.id);

    let listed = repo.list_contacts().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], updated);
    assert_eq!(listed[0].email, None);
}

#[test]
fn update_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let err = repo
        .update_contact(42, &draft("Ghost", "000", "", ""))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
    assert!(repo.list_contacts().unwrap().is_empty());
}

#[test]
fn update_validation_runs_before_lookup() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let created = repo.create_contact(&draft("Alice", "1", "", "")).unwrap();

    let err = repo
        .update_contact(created.id, &draft("Alice", "", "", ""))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.get_contact(created.id).unwrap(), Some(created));
}

#[test]
fn delete_is_permanent_and_repeated_delete_fails() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let created = repo.create_contact(&draft("Alice", "1", "", "")).unwrap();

    repo.delete_contact(created.id).unwrap();
    assert!(repo.get_contact(created.id).unwrap().is_none());

    let err = repo.delete_contact(created.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == created.id));
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let first = repo.create_contact(&draft("A", "1", "", "")).unwrap();
    repo.delete_contact(first.id).unwrap();

    let second = repo.create_contact(&draft("B", "2", "", "")).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn try_new_requires_bootstrapped_schema() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteContactRepository::try_new(&conn)
        .err()
        .expect("bare connection should be rejected");
    assert!(matches!(err, RepoError::MissingTable));
}

#[test]
fn invalid_persisted_row_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO contacts (name, phone) VALUES ('', '555');",
        [],
    )
    .unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let err = repo.list_contacts().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
