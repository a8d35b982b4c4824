use thesisdb_core::{DbWriter, NewUser, RecordWriter, UserReader, ValidationError, WriteError};

fn user_count(writer: &DbWriter) -> i64 {
    writer
        .connection()
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn minimal_user_is_stored_with_empty_names() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let id = writer.add_user(&NewUser::new("abc123", "CS")).unwrap();

    let stored = writer.reader().get_user("abc123").unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.name_ja, "");
    assert_eq!(stored.name_en, "");
    assert_eq!(stored.belong, "CS");
}

#[test]
fn full_user_is_stored_verbatim() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let input = NewUser {
        name_ja: Some("山田 太郎".to_string()),
        name_en: Some("Taro Yamada".to_string()),
        ..NewUser::new("tyamada", "Graduate School of Informatics")
    };
    writer.add_user(&input).unwrap();

    let stored = writer.reader().get_user("tyamada").unwrap().unwrap();
    assert_eq!(stored.name_ja, "山田 太郎");
    assert_eq!(stored.name_en, "Taro Yamada");
}

#[test]
fn short_login_fails_with_format_error_before_belong_check() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let input = NewUser {
        login_name: Some("ab".to_string()),
        ..NewUser::default()
    };

    let err = writer.add_user(&input).unwrap_err();
    assert!(matches!(
        err,
        WriteError::Validation(ValidationError::InvalidFormat {
            field: "login_name",
            ..
        })
    ));
    assert_eq!(user_count(&writer), 0);
}

#[test]
fn long_belong_is_rejected_and_nothing_is_written() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let err = writer
        .add_user(&NewUser::new("alice", "b".repeat(51)))
        .unwrap_err();

    assert!(matches!(
        err,
        WriteError::Validation(ValidationError::TooLong { field: "belong", .. })
    ));
    assert_eq!(user_count(&writer), 0);
}

#[test]
fn duplicate_login_name_is_rejected() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    writer.add_user(&NewUser::new("alice", "CS")).unwrap();

    let err = writer.add_user(&NewUser::new("alice", "EE")).unwrap_err();
    assert!(matches!(
        err,
        WriteError::Validation(ValidationError::DuplicateLoginName)
    ));
    assert_eq!(user_count(&writer), 1);
    assert!(writer.reader().does_user_exist("alice").unwrap());
    assert!(!writer.reader().does_user_exist("bob").unwrap());
}

#[test]
fn unique_index_backs_the_precheck() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    writer.add_user(&NewUser::new("alice", "CS")).unwrap();

    // Same login under a different case is a distinct name for the index.
    writer.add_user(&NewUser::new("ALICE", "CS")).unwrap();

    let err = writer
        .connection()
        .execute(
            "INSERT INTO users (login_name, belong) VALUES ('alice', 'XX');",
            [],
        )
        .unwrap_err();
    assert_eq!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::ConstraintViolation)
    );
}

#[test]
fn error_message_names_field_and_rule() {
    let mut writer = DbWriter::open_in_memory().unwrap();
    let input = NewUser {
        name_en: Some("n".repeat(60)),
        ..NewUser::new("alice", "CS")
    };
    let message = writer.add_user(&input).unwrap_err().to_string();
    assert!(message.contains("name_en"));
    assert!(message.contains("too long"));
}
