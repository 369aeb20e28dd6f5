use tempfile::TempDir;
use toodle_client::{ClientError, Item, ItemFields, LoginStatus, Store, StoreConfig};

fn file_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&StoreConfig::in_documents_dir(dir.path())).unwrap();
    (dir, store)
}

fn names(items: &[Item]) -> Vec<String> {
    items.iter().map(|item| item.name().unwrap()).collect()
}

#[test]
fn new_store_is_seeded_with_to_do() {
    let store = Store::in_memory().unwrap();
    let categories = store.categories().list().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name().unwrap(), "To Do");
}

#[test]
fn work_category_collects_report_and_email() {
    let store = Store::in_memory().unwrap();
    let mut work = store.categories().create("Work").unwrap();
    let mut report = store.items().create(ItemFields::new("Report")).unwrap();
    let mut email = store.items().create(ItemFields::new("Email")).unwrap();

    work.add_item(&store, &mut report).unwrap();
    work.add_item(&store, &mut email).unwrap();
    assert_eq!(names(work.items(&store).unwrap()), ["Report", "Email"]);

    assert_eq!(report.due_date().unwrap(), None);
    report.set_due_date(Some(1_700_000_000)).unwrap();
    assert_eq!(report.due_date().unwrap(), Some(1_700_000_000));
    assert_eq!(
        report.due_date_as_string().unwrap().as_deref(),
        Some("2023-11-14T22:13:20.000+0000")
    );

    store.items().save(&report).unwrap();
    let report_uuid = report.uuid().unwrap();
    let stored = store
        .items()
        .list()
        .unwrap()
        .into_iter()
        .find(|item| item.uuid().unwrap() == report_uuid)
        .unwrap();
    assert_eq!(stored.due_date().unwrap(), Some(1_700_000_000));
    assert_eq!(stored.completion_date().unwrap(), None);
    assert!(!stored.is_complete().unwrap());
}

#[test]
fn added_item_appears_once_even_after_an_earlier_read() {
    let store = Store::in_memory().unwrap();
    let mut work = store.categories().create("Work").unwrap();
    let mut report = store.items().create(ItemFields::new("Report")).unwrap();
    work.add_item(&store, &mut report).unwrap();
    assert_eq!(work.items(&store).unwrap().len(), 1);

    let mut email = store.items().create(ItemFields::new("Email")).unwrap();
    work.add_item(&store, &mut email).unwrap();
    let email_uuid = email.uuid().unwrap();
    let listed = work
        .items(&store)
        .unwrap()
        .iter()
        .filter(|item| item.uuid().unwrap() == email_uuid)
        .count();
    assert_eq!(listed, 1);

    work.add_item(&store, &mut email).unwrap();
    assert_eq!(names(work.items(&store).unwrap()), ["Report", "Email"]);
}

#[test]
fn cached_items_are_served_until_invalidated() {
    let store = Store::in_memory().unwrap();
    let mut work = store.categories().create("Work").unwrap();
    assert!(work.items(&store).unwrap().is_empty());

    let work_id = work.id().unwrap();
    let mut other_view = store
        .categories()
        .list()
        .unwrap()
        .into_iter()
        .find(|category| category.id().unwrap() == work_id)
        .unwrap();
    let mut report = store.items().create(ItemFields::new("Report")).unwrap();
    other_view.add_item(&store, &mut report).unwrap();

    assert!(work.items(&store).unwrap().is_empty());
    work.invalidate_items();
    assert_eq!(names(work.items(&store).unwrap()), ["Report"]);
}

#[test]
fn moving_an_item_leaves_its_old_category() {
    let store = Store::in_memory().unwrap();
    let mut work = store.categories().create("Work").unwrap();
    let mut home = store.categories().create("Home").unwrap();
    let mut report = store.items().create(ItemFields::new("Report")).unwrap();

    work.add_item(&store, &mut report).unwrap();
    home.add_item(&store, &mut report).unwrap();
    work.invalidate_items();

    assert!(work.items(&store).unwrap().is_empty());
    assert_eq!(names(home.items(&store).unwrap()), ["Report"]);
}

#[test]
fn item_labels_keep_order_and_identity() {
    let store = Store::in_memory().unwrap();
    let urgent = store.labels().create("urgent", "#FF0000").unwrap();
    let later = store.labels().create("later", "00ff00").unwrap();
    assert_eq!(urgent.color().unwrap(), "#ff0000");
    assert_eq!(later.color().unwrap(), "#00ff00");

    let mut item = store
        .items()
        .create(
            ItemFields::new("Report")
                .due_date(1_700_000_000)
                .labels(&[&later, &urgent]),
        )
        .unwrap();
    let ids = item
        .labels(&store)
        .unwrap()
        .iter()
        .map(|label| label.id().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(ids, [later.id().unwrap(), urgent.id().unwrap()]);

    store
        .items()
        .update(
            &mut item,
            ItemFields::new("Report").labels(&[&urgent, &urgent]),
        )
        .unwrap();
    let names = item
        .labels(&store)
        .unwrap()
        .iter()
        .map(|label| label.name().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(names, ["urgent"]);
    assert_eq!(item.due_date().unwrap(), None);
}

#[test]
fn update_replaces_fields_and_clears_absent_dates() {
    let store = Store::in_memory().unwrap();
    let mut item = store
        .items()
        .create(ItemFields::new("Report").due_date(100).completion_date(200))
        .unwrap();
    assert!(item.is_complete().unwrap());

    store
        .items()
        .update(&mut item, ItemFields::new("Final report").due_date(300))
        .unwrap();
    assert_eq!(item.name().unwrap(), "Final report");
    assert_eq!(item.due_date().unwrap(), Some(300));
    assert_eq!(item.completion_date().unwrap(), None);

    let error = store
        .items()
        .update(&mut item, ItemFields::new(""))
        .unwrap_err();
    assert!(matches!(error, ClientError::InvalidArgument(_)));
    assert_eq!(item.name().unwrap(), "Final report");
}

#[test]
fn update_against_another_store_fails() {
    let (_dir_a, store_a) = file_store();
    let (_dir_b, store_b) = file_store();
    let mut item = store_a.items().create(ItemFields::new("Report")).unwrap();

    let error = store_b
        .items()
        .update(&mut item, ItemFields::new("Renamed"))
        .unwrap_err();
    assert!(matches!(error, ClientError::UpdateFailed { .. }));
    assert_eq!(item.name().unwrap(), "Report");

    let error = store_b.items().save(&item).unwrap_err();
    assert!(matches!(error, ClientError::UpdateFailed { .. }));
}

#[test]
fn item_with_label_from_another_store_is_not_created() {
    let (_dir_a, store_a) = file_store();
    let (_dir_b, store_b) = file_store();
    let local = store_a.labels().create("local-only", "#000000").unwrap();
    let foreign = store_b.labels().create("foreign", "#123456").unwrap();
    assert_eq!(local.id().unwrap(), foreign.id().unwrap());

    let error = store_a
        .items()
        .create(ItemFields::new("Report").labels(&[&foreign]))
        .unwrap_err();
    assert!(matches!(error, ClientError::NotFound { .. }));
    assert!(store_a.items().list().unwrap().is_empty());

    let mut item = store_a.items().create(ItemFields::new("Email")).unwrap();
    let error = store_a
        .items()
        .update(&mut item, ItemFields::new("Renamed").labels(&[&foreign]))
        .unwrap_err();
    assert!(matches!(error, ClientError::UpdateFailed { .. }));
    assert_eq!(item.name().unwrap(), "Email");
    assert!(item.labels(&store_a).unwrap().is_empty());
}

#[test]
fn label_update_from_another_store_fails() {
    let (_dir_a, store_a) = file_store();
    let (_dir_b, store_b) = file_store();
    store_a.labels().create("local-only", "#000000").unwrap();
    let mut foreign = store_b.labels().create("foreign", "#000000").unwrap();

    foreign.set_color("#ffffff").unwrap();
    let error = store_a.labels().update(&foreign).unwrap_err();
    assert!(matches!(error, ClientError::UpdateFailed { .. }));

    let stored = store_a.labels().list().unwrap();
    assert_eq!(stored[0].name().unwrap(), "local-only");
    assert_eq!(stored[0].color().unwrap(), "#000000");

    store_b.labels().update(&foreign).unwrap();
    assert_eq!(store_b.labels().list().unwrap()[0].color().unwrap(), "#ffffff");
}

#[test]
fn category_from_another_store_cannot_take_an_item() {
    let (_dir_a, store_a) = file_store();
    let (_dir_b, store_b) = file_store();
    let mut to_do = store_a.categories().list().unwrap().remove(0);
    let mut foreign = store_b.categories().list().unwrap().remove(0);
    assert_eq!(to_do.id().unwrap(), foreign.id().unwrap());
    let mut report = store_a.items().create(ItemFields::new("Report")).unwrap();

    let error = foreign.add_item(&store_a, &mut report).unwrap_err();
    assert!(matches!(error, ClientError::UpdateFailed { .. }));
    assert!(to_do.items(&store_a).unwrap().is_empty());
}

#[test]
fn text_with_interior_nul_never_reaches_the_store() {
    let store = Store::in_memory().unwrap();
    let error = store.categories().create("Wo\0rk").unwrap_err();
    assert!(matches!(error, ClientError::InvalidArgument(_)));
    assert_eq!(store.categories().list().unwrap().len(), 1);
}

#[test]
fn label_colors_are_validated_and_persisted() {
    let store = Store::in_memory().unwrap();
    assert!(matches!(
        store.labels().create("bad", "#12345"),
        Err(ClientError::InvalidArgument(_))
    ));

    let mut urgent = store.labels().create("urgent", "#ff0000").unwrap();
    assert!(matches!(
        store.labels().create("URGENT", "#00ff00"),
        Err(ClientError::UpdateFailed { .. })
    ));

    assert!(matches!(
        urgent.set_color("zzzzzz"),
        Err(ClientError::InvalidArgument(_))
    ));
    assert_eq!(urgent.color().unwrap(), "#ff0000");

    urgent.set_color("#00FF00").unwrap();
    store.labels().update(&urgent).unwrap();
    let stored = store.labels().list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].color().unwrap(), "#00ff00");
}

#[test]
fn alice_and_bob_validation() {
    let store = Store::in_memory().unwrap();
    let mut alice = store.logins().create("alice", "secret").unwrap().unwrap();
    assert_eq!(alice.username().unwrap(), "alice");
    assert_eq!(alice.status(), LoginStatus::Valid);
    assert_eq!(alice.times_used().unwrap(), 0);
    assert_eq!(alice.time_last_used().unwrap(), None);
    assert!(alice.time_password_changed().unwrap() >= alice.time_created().unwrap());
    assert!(!alice.guid().unwrap().is_empty());

    let logins = store.logins();
    assert_eq!(logins.validate("alice", "secret").unwrap(), LoginStatus::Valid);
    assert_eq!(
        logins.validate("alice", "wrong").unwrap(),
        LoginStatus::IncorrectPassword
    );
    assert_eq!(
        logins.validate("bob", "secret").unwrap(),
        LoginStatus::UnknownUsername
    );
    assert!(logins.create("alice", "other").unwrap().is_none());

    assert!(matches!(
        alice.set_guid(""),
        Err(ClientError::InvalidArgument(_))
    ));
    alice.set_guid("device-1").unwrap();
    assert_eq!(alice.guid().unwrap(), "device-1");
}

#[test]
fn store_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_documents_dir(dir.path());
    {
        let store = Store::open(&config).unwrap();
        store.items().create(ItemFields::new("Report")).unwrap();
    }
    assert!(dir.path().join(toodle_client::STORE_FILE_NAME).exists());

    let store = Store::open(&config).unwrap();
    let items = store.items().list().unwrap();
    assert_eq!(names(&items), ["Report"]);
    assert_eq!(store.categories().list().unwrap().len(), 1);
}

#[test]
fn unopenable_store_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let error = Store::open_uri(dir.path().join("missing/dir/todolist.db").to_str().unwrap())
        .unwrap_err();
    assert!(matches!(error, ClientError::Unavailable(_)));
}
