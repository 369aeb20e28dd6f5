use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use toodle_ffi::categories::*;
use toodle_ffi::error::{toodle_last_error_code, toodle_last_error_message};
use toodle_ffi::items::*;
use toodle_ffi::labels::*;
use toodle_ffi::logins::*;
use toodle_ffi::store::{toodle_store_destroy, toodle_store_open};
use toodle_ffi::strings::{toodle_string_destroy, toodle_timestamp_destroy};
use toodle_ffi::{toodle_debug_live_handles, ErrorCode, RawStore, STATUS_BOUNDARY_FAILURE};

fn c(value: &str) -> CString {
    CString::new(value).unwrap()
}

unsafe fn take(value: *mut c_char) -> String {
    assert!(!value.is_null());
    let text = CStr::from_ptr(value).to_str().unwrap().to_owned();
    toodle_string_destroy(value);
    text
}

unsafe fn open_memory() -> *mut RawStore {
    let uri = c(":memory:");
    let store = toodle_store_open(uri.as_ptr());
    assert!(!store.is_null());
    store
}

#[test]
fn store_is_seeded_and_handles_balance() {
    unsafe {
        let baseline = toodle_debug_live_handles();
        let store = open_memory();

        let list = toodle_category_list(store);
        assert_eq!(toodle_category_list_count(list), 1);
        let first = toodle_category_list_at(list, 0);
        assert_eq!(take(toodle_category_get_name(first)), "To Do");
        assert!(toodle_category_list_at(list, 1).is_null());
        assert_eq!(toodle_last_error_code(), ErrorCode::InvalidArgument.code());

        toodle_category_destroy(first);
        toodle_category_list_destroy(list);
        toodle_store_destroy(store);
        assert_eq!(toodle_debug_live_handles(), baseline);
    }
}

#[test]
fn null_arguments_report_invalid_argument_instead_of_crashing() {
    unsafe {
        assert!(toodle_store_open(ptr::null()).is_null());
        assert_eq!(toodle_last_error_code(), ErrorCode::InvalidArgument.code());
        let message = take(toodle_last_error_message());
        assert!(message.contains("uri"));

        assert_eq!(toodle_item_list_count(ptr::null()), 0);
        assert!(toodle_item_get_name(ptr::null()).is_null());
        assert_eq!(
            toodle_login_validate(ptr::null(), ptr::null(), ptr::null()),
            STATUS_BOUNDARY_FAILURE
        );
    }
}

#[test]
fn item_create_packs_dates_and_labels() {
    unsafe {
        let store = open_memory();
        let (name, red, blue) = (c("urgent"), c("#ff0000"), c("0000FF"));
        let urgent = toodle_label_create(store, name.as_ptr(), red.as_ptr());
        let later_name = c("later");
        let later = toodle_label_create(store, later_name.as_ptr(), blue.as_ptr());
        assert_eq!(take(toodle_label_get_color(later)), "#0000ff");

        let labels = [later as *const RawLabel, urgent as *const RawLabel];
        let due: i64 = 1_700_000_000;
        let item_name = c("Report");
        let item = toodle_item_create(
            store,
            item_name.as_ptr(),
            &due,
            ptr::null(),
            labels.as_ptr(),
            labels.len(),
        );
        assert!(!item.is_null());
        let uuid = uuid::Uuid::parse_str(&take(toodle_item_get_uuid(item))).unwrap();
        assert_eq!(uuid.get_version_num(), 4);

        let due_out = toodle_item_get_due_date(item);
        assert_eq!(*due_out, due);
        toodle_timestamp_destroy(due_out);
        assert!(toodle_item_get_completion_date(item).is_null());

        let attached = toodle_item_labels(store, item);
        assert_eq!(toodle_label_list_count(attached), 2);
        let first = toodle_label_list_at(attached, 0);
        assert_eq!(take(toodle_label_get_name(first)), "later");

        toodle_label_destroy(first);
        toodle_label_list_destroy(attached);
        toodle_item_destroy(item);
        toodle_label_destroy(urgent);
        toodle_label_destroy(later);
        toodle_store_destroy(store);
    }
}

#[test]
fn item_writes_reject_a_label_from_another_store_with_the_same_id() {
    unsafe {
        let (store, other) = (open_memory(), open_memory());
        let (local_name, foreign_name) = (c("local-only"), c("foreign"));
        let black = c("#000000");
        let local = toodle_label_create(store, local_name.as_ptr(), black.as_ptr());
        let foreign = toodle_label_create(other, foreign_name.as_ptr(), black.as_ptr());
        assert_eq!(toodle_label_get_id(local), toodle_label_get_id(foreign));
        let labels = [foreign as *const RawLabel];

        let report = c("Report");
        let rejected = toodle_item_create(
            store,
            report.as_ptr(),
            ptr::null(),
            ptr::null(),
            labels.as_ptr(),
            labels.len(),
        );
        assert!(rejected.is_null());
        assert_eq!(toodle_last_error_code(), ErrorCode::NotFound.code());
        let none = toodle_item_list(store);
        assert_eq!(toodle_item_list_count(none), 0);
        toodle_item_list_destroy(none);

        let email = c("Email");
        let item =
            toodle_item_create(store, email.as_ptr(), ptr::null(), ptr::null(), ptr::null(), 0);
        let renamed = c("Renamed");
        let code = toodle_item_update(
            store,
            item,
            renamed.as_ptr(),
            ptr::null(),
            ptr::null(),
            labels.as_ptr(),
            labels.len(),
        );
        assert_eq!(code, ErrorCode::NotFound.code());
        assert_eq!(take(toodle_item_get_name(item)), "Email");

        let all = toodle_item_list(store);
        let stored = toodle_item_list_at(all, 0);
        assert_eq!(take(toodle_item_get_name(stored)), "Email");
        let attached = toodle_item_labels(store, stored);
        assert_eq!(toodle_label_list_count(attached), 0);

        toodle_label_list_destroy(attached);
        toodle_item_destroy(stored);
        toodle_item_list_destroy(all);
        toodle_item_destroy(item);
        toodle_label_destroy(foreign);
        toodle_label_destroy(local);
        toodle_store_destroy(other);
        toodle_store_destroy(store);
    }
}

#[test]
fn label_update_from_another_store_leaves_both_stores_untouched() {
    unsafe {
        let (store, other) = (open_memory(), open_memory());
        let (local_name, foreign_name) = (c("local-only"), c("foreign"));
        let black = c("#000000");
        let local = toodle_label_create(store, local_name.as_ptr(), black.as_ptr());
        let foreign = toodle_label_create(other, foreign_name.as_ptr(), black.as_ptr());

        let white = c("#ffffff");
        assert_eq!(toodle_label_set_color(foreign, white.as_ptr()), ErrorCode::Ok.code());
        assert_eq!(toodle_label_update(store, foreign), ErrorCode::NotFound.code());

        let listed = toodle_label_list(store);
        let stored = toodle_label_list_at(listed, 0);
        assert_eq!(take(toodle_label_get_name(stored)), "local-only");
        assert_eq!(take(toodle_label_get_color(stored)), "#000000");

        // The owning store still accepts the write.
        assert_eq!(toodle_label_update(other, foreign), ErrorCode::Ok.code());

        toodle_label_destroy(stored);
        toodle_label_list_destroy(listed);
        toodle_label_destroy(foreign);
        toodle_label_destroy(local);
        toodle_store_destroy(other);
        toodle_store_destroy(store);
    }
}

#[test]
fn category_from_another_store_cannot_file_an_item() {
    unsafe {
        let (store, other) = (open_memory(), open_memory());
        let local = toodle_category_list(store);
        let foreign = toodle_category_list(other);
        let to_do = toodle_category_list_at(local, 0);
        let foreign_to_do = toodle_category_list_at(foreign, 0);
        assert_eq!(toodle_category_get_id(to_do), toodle_category_get_id(foreign_to_do));

        let laundry = c("Laundry");
        let item =
            toodle_item_create(store, laundry.as_ptr(), ptr::null(), ptr::null(), ptr::null(), 0);
        assert_eq!(
            toodle_category_add_item(store, foreign_to_do, item),
            ErrorCode::NotFound.code()
        );
        assert!(toodle_category_items(store, foreign_to_do).is_null());

        let filed = toodle_category_items(store, to_do);
        assert_eq!(toodle_item_list_count(filed), 0);
        toodle_item_list_destroy(filed);

        assert_eq!(toodle_category_add_item(store, to_do, item), ErrorCode::Ok.code());
        let filed = toodle_category_items(store, to_do);
        assert_eq!(toodle_item_list_count(filed), 1);

        toodle_item_list_destroy(filed);
        toodle_item_destroy(item);
        toodle_category_destroy(foreign_to_do);
        toodle_category_destroy(to_do);
        toodle_category_list_destroy(foreign);
        toodle_category_list_destroy(local);
        toodle_store_destroy(other);
        toodle_store_destroy(store);
    }
}

#[test]
fn file_url_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toodle.db");
    let uri = c(&format!("file://{}", path.display()));
    unsafe {
        let store = toodle_store_open(uri.as_ptr());
        assert!(!store.is_null());
        let (name, color) = (c("urgent"), c("#ff0000"));
        toodle_label_destroy(toodle_label_create(store, name.as_ptr(), color.as_ptr()));
        toodle_store_destroy(store);

        let reopened = toodle_store_open(uri.as_ptr());
        let labels = toodle_label_list(reopened);
        assert_eq!(toodle_label_list_count(labels), 1);
        toodle_label_list_destroy(labels);
        toodle_store_destroy(reopened);
    }
    assert!(path.exists());
}

#[test]
fn login_status_codes_cover_each_outcome() {
    unsafe {
        let store = open_memory();
        let (alice, secret, wrong) = (c("alice"), c("secret"), c("wrong"));
        let login = toodle_login_create(store, alice.as_ptr(), secret.as_ptr());
        assert!(!login.is_null());
        assert_eq!(toodle_login_get_status(login), 0);
        assert_eq!(toodle_login_get_times_used(login), 0);
        assert!(toodle_login_get_time_last_used(login).is_null());

        assert!(toodle_login_create(store, alice.as_ptr(), wrong.as_ptr()).is_null());
        assert_eq!(toodle_last_error_code(), ErrorCode::Rejected.code());

        assert_eq!(toodle_login_validate(store, alice.as_ptr(), secret.as_ptr()), 0);
        assert_eq!(toodle_login_validate(store, c("bob").as_ptr(), wrong.as_ptr()), 1);
        assert_eq!(toodle_login_validate(store, alice.as_ptr(), wrong.as_ptr()), 2);

        toodle_login_destroy(login);
        toodle_store_destroy(store);
    }
}
