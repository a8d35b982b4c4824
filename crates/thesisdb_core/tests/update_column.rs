use rusqlite::types::Value;
use thesisdb_core::{DbWriter, NewUser, RecordWriter, WriteError};

#[test]
fn updates_one_column_of_one_row() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let alice = writer.add_user(&NewUser::new("alice", "CS")).unwrap();
    writer.add_user(&NewUser::new("bob", "CS")).unwrap();

    writer
        .update_column(alice, "users", "belong", Value::Text("Physics".to_string()))
        .unwrap();

    let reader = writer.reader();
    assert_eq!(reader.get_user("alice").unwrap().unwrap().belong, "Physics");
    assert_eq!(reader.get_user("bob").unwrap().unwrap().belong, "CS");
}

#[test]
fn missing_row_is_not_found() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let err = writer
        .update_column(42, "users", "belong", Value::Text("x".to_string()))
        .unwrap_err();
    assert!(matches!(err, WriteError::NotFound { ref table, id: 42 } if table == "users"));
}

#[test]
fn hostile_identifiers_are_quoted_not_executed() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let id = writer.add_user(&NewUser::new("alice", "CS")).unwrap();

    let err = writer
        .update_column(
            id,
            "users",
            "belong\" = 'x'; DROP TABLE users; --",
            Value::Text("x".to_string()),
        )
        .unwrap_err();
    assert!(matches!(err, WriteError::Persistence(_)));
    assert!(writer.reader().get_user("alice").unwrap().is_some());
}

#[test]
fn empty_identifier_is_rejected_before_sql() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let err = writer
        .update_column(1, "", "belong", Value::Null)
        .unwrap_err();
    assert!(matches!(err, WriteError::InvalidIdentifier(_)));
}

#[test]
fn constraint_failure_rolls_back_update() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let id = writer.add_user(&NewUser::new("alice", "CS")).unwrap();

    let err = writer
        .update_column(id, "users", "belong", Value::Null)
        .unwrap_err();
    assert!(matches!(err, WriteError::Persistence(_)));
    assert_eq!(writer.reader().get_user("alice").unwrap().unwrap().belong, "CS");
}
