use toodle_core::db::open_db_in_memory;
use toodle_core::{
    LoginRepository, LoginService, LoginStatus, RepoError, SqliteLoginRepository,
};

#[test]
fn validate_login_distinguishes_unknown_user_and_wrong_password() {
    let conn = open_db_in_memory().unwrap();
    let service = LoginService::new(SqliteLoginRepository::try_new(&conn).unwrap());
    service.create_login("alice", "secret").unwrap();

    assert_eq!(
        service.validate_login("alice", "wrong").unwrap(),
        LoginStatus::IncorrectPassword
    );
    assert_eq!(
        service.validate_login("bob", "x").unwrap(),
        LoginStatus::UnknownUsername
    );
    assert_eq!(
        service.validate_login("alice", "secret").unwrap(),
        LoginStatus::Valid
    );
}

#[test]
fn only_valid_logins_are_marked_used() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLoginRepository::try_new(&conn).unwrap();
    let created = repo.create_login("alice", "secret").unwrap();
    assert_eq!(created.times_used, 0);
    assert_eq!(created.time_last_used, None);
    assert_eq!(created.guid.len(), 32);

    let service = LoginService::new(SqliteLoginRepository::try_new(&conn).unwrap());
    service.validate_login("alice", "nope").unwrap();
    service.validate_login("alice", "secret").unwrap();
    service.validate_login("alice", "secret").unwrap();

    let reloaded = repo.find_by_username("alice").unwrap().unwrap();
    assert_eq!(reloaded.times_used, 2);
    assert!(reloaded.time_last_used.is_some());
}

#[test]
fn duplicate_username_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLoginRepository::try_new(&conn).unwrap();
    repo.create_login("alice", "one").unwrap();

    let err = repo.create_login("alice", "two").unwrap_err();
    assert!(matches!(err, RepoError::Conflict { entity: "login", .. }));
}

#[test]
fn serialized_login_omits_password() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLoginRepository::try_new(&conn).unwrap();
    let login = repo.create_login("alice", "secret").unwrap();

    let json = serde_json::to_value(&login).unwrap();
    assert_eq!(json["username"], "alice");
    assert!(json.get("password").is_none());
}
