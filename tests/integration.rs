// SPDX-License-Identifier: MPL-2.0
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use smartpos_settings::application::port::StorageError;
use smartpos_settings::application::store::{
    ColorsPatch, CompanyPatch, PartialSettings, SettingsEvent, SettingsStore, UiPatch,
};
use smartpos_settings::domain::functions::FunctionKey;
use smartpos_settings::domain::roles::RoleLevel;
use smartpos_settings::domain::settings::{
    Settings, TaxRate, ThemeMode, DEFAULT_COMPANY_NAME, DEFAULT_PRIMARY_COLOR, MAX_LOGO_BYTES,
};
use smartpos_settings::error::{ImportError, LogoError};
use smartpos_settings::infrastructure::storage::{FileStorage, MemoryStorage, LEGACY_SLOT_KEY};
use smartpos_settings::ui::{FormField, FormFields};
use tempfile::tempdir;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn png(len: usize) -> Vec<u8> {
    let mut bytes = PNG_MAGIC.to_vec();
    bytes.resize(len.max(PNG_MAGIC.len()), 0);
    bytes
}

fn recorded_events(store: &mut SettingsStore<MemoryStorage>) -> Rc<RefCell<Vec<SettingsEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |event, _| sink.borrow_mut().push(event));
    events
}

#[test]
fn fresh_install_shows_default_company() {
    let store = SettingsStore::open(MemoryStorage::new());
    assert_eq!(store.current(), &Settings::default());
    assert_eq!(store.current().company.name, "Xyz Computers");
    assert_eq!(store.current().page_title(), "Xyz Computers - SmartPOS");
}

#[test]
fn saved_patch_is_what_the_next_load_sees() {
    let storage = MemoryStorage::new();
    let mut store = SettingsStore::open(storage.clone());

    let mut patch = PartialSettings {
        company: CompanyPatch {
            name: Some("Acme Ltd".into()),
            tax_rate: Some("18".into()),
            ..CompanyPatch::default()
        },
        ui: UiPatch {
            theme: Some("dark".into()),
            ..UiPatch::default()
        },
        ..PartialSettings::default()
    };
    patch.functions.insert(FunctionKey::Hrm, true);

    let report = store.save(patch).expect("memory storage accepts the write");
    assert!(report.rejected.is_empty());

    let mut expected = Settings::default();
    expected.company.name = "Acme Ltd".into();
    expected.company.tax_rate = TaxRate::new(18.0).expect("in range");
    expected.ui.theme = ThemeMode::Dark;
    expected.functions.set(FunctionKey::Hrm, true);

    let reloaded = SettingsStore::open(storage);
    assert_eq!(reloaded.current(), &expected);
}

#[test]
fn invalid_color_is_rejected_alone() {
    let mut store = SettingsStore::open(MemoryStorage::new());
    let mut patch = PartialSettings::default();
    patch.branding.colors = ColorsPatch {
        primary: Some("blue".into()),
        secondary: Some("#112233".into()),
        ..ColorsPatch::default()
    };

    let report = store.save(patch).expect("save succeeds");
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].field, "branding.colors.primary");

    let colors = &store.current().branding.colors;
    assert_eq!(colors.primary.as_str(), DEFAULT_PRIMARY_COLOR);
    assert_eq!(colors.secondary.as_str(), "#112233");
}

#[test]
fn tax_rate_out_of_range_is_rejected_and_numeric_text_is_parsed() {
    let mut store = SettingsStore::open(MemoryStorage::new());

    let mut patch = PartialSettings::default();
    patch.company.tax_rate = Some(150.0.into());
    let report = store.save(patch).expect("save succeeds");
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].field, "company.taxRate");
    assert_eq!(store.current().company.tax_rate, TaxRate::default());

    let mut patch = PartialSettings::default();
    patch.company.tax_rate = Some("18".into());
    let report = store.save(patch).expect("save succeeds");
    assert!(report.rejected.is_empty());
    assert_eq!(store.current().company.tax_rate.to_string(), "18");
}

#[test]
fn export_then_import_reproduces_the_settings() {
    let mut source = SettingsStore::open(MemoryStorage::new());
    let mut patch = PartialSettings::default();
    patch.company.name = Some("Round Trip Traders".into());
    patch.company.currency = Some("eur".into());
    patch.functions.insert(FunctionKey::Sales, false);
    source.save(patch).expect("save succeeds");
    source.set_logo(png(64)).expect("valid png");

    let snapshot = source.export_snapshot().expect("export succeeds");

    let target_storage = MemoryStorage::new();
    let mut target = SettingsStore::open(target_storage.clone());
    let report = target.import_snapshot(&snapshot).expect("import succeeds");
    assert!(report.discarded.is_empty());
    assert_eq!(target.current(), source.current());
    assert_eq!(target.current().company.currency, "EUR");

    let reloaded = SettingsStore::open(target_storage);
    assert_eq!(reloaded.current(), source.current());
}

#[test]
fn malformed_import_leaves_state_untouched() {
    let storage = MemoryStorage::new();
    let mut store = SettingsStore::open(storage.clone());
    let mut patch = PartialSettings::default();
    patch.company.name = Some("Kept".into());
    store.save(patch).expect("save succeeds");
    let before = storage.blob();

    for bytes in [&b"not json"[..], b"[1, 2, 3]", b"\xff\xfe"] {
        let result = store.import_snapshot(bytes);
        assert!(matches!(result, Err(ImportError::Malformed(_))), "{bytes:?}");
    }
    assert_eq!(store.current().company.name, "Kept");
    assert_eq!(storage.blob(), before);
}

#[test]
fn reset_restores_defaults_durably() {
    let storage = MemoryStorage::new();
    let mut store = SettingsStore::open(storage.clone());
    let mut patch = PartialSettings::default();
    patch.company.name = Some("Temporary".into());
    store.save(patch).expect("save succeeds");

    let settings = store.try_reset().expect("reset succeeds");
    assert_eq!(settings, Settings::default());

    let reloaded = SettingsStore::open(storage);
    assert_eq!(reloaded.current(), &Settings::default());
}

#[test]
fn toggle_flips_known_keys_and_rejects_unknown_ones() {
    let mut store = SettingsStore::open(MemoryStorage::new());
    let events = recorded_events(&mut store);

    assert_eq!(store.toggle_function("sales"), Ok(false));
    assert!(!store.current().is_function_enabled(FunctionKey::Sales));

    let before = store.current().clone();
    let err = store.toggle_function("not_a_key").expect_err("unknown key");
    assert_eq!(err.key, "not_a_key");
    assert_eq!(store.current(), &before);

    assert_eq!(
        *events.borrow(),
        vec![SettingsEvent::FunctionToggled {
            key: FunctionKey::Sales,
            enabled: false,
        }]
    );
}

#[test]
fn toggle_is_not_persisted_until_asked() {
    let storage = MemoryStorage::new();
    let mut store = SettingsStore::open(storage.clone());
    store.toggle_function("hrm").expect("known key");
    assert!(storage.blob().is_none());

    store.persist().expect("persist succeeds");
    let reloaded = SettingsStore::open(storage);
    assert!(reloaded.current().is_function_enabled(FunctionKey::Hrm));
}

#[test]
fn listeners_hear_every_change_until_unsubscribed() {
    let mut store = SettingsStore::open(MemoryStorage::new());
    let titles = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&titles);
    let id = store.subscribe(move |_, settings| sink.borrow_mut().push(settings.page_title()));

    let mut patch = PartialSettings::default();
    patch.company.name = Some("Listener Co".into());
    store.save(patch).expect("save succeeds");
    store.reset();

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.load();

    assert_eq!(
        *titles.borrow(),
        vec![
            "Listener Co - SmartPOS".to_string(),
            format!("{DEFAULT_COMPANY_NAME} - SmartPOS"),
        ]
    );
}

#[test]
fn persisted_out_of_range_tax_falls_back_to_default() {
    let blob = br#"{"company":{"name":"Acme","taxRate":-5}}"#;
    let mut store = SettingsStore::new(MemoryStorage::with_blob(&blob[..]));
    let report = store.load_with_report();

    assert_eq!(report.settings.company.name, "Acme");
    assert_eq!(report.settings.company.tax_rate, TaxRate::default());
    assert_eq!(report.discarded.len(), 1);
    assert_eq!(report.discarded[0].field, "company.taxRate");
    assert!(report.corruption.is_none());
}

#[test]
fn persisted_unknown_functions_are_ignored() {
    let blob = br#"{"functions":{"teleport":{"enabled":true},"sales":{"enabled":false},"hrm":true}}"#;
    let mut store = SettingsStore::new(MemoryStorage::with_blob(&blob[..]));
    let report = store.load_with_report();

    assert!(report.is_clean());
    assert!(!report.settings.is_function_enabled(FunctionKey::Sales));
    assert!(report.settings.is_function_enabled(FunctionKey::Hrm));
    assert!(report.settings.is_function_enabled(FunctionKey::Reports));
}

#[test]
fn corrupt_blob_loads_defaults_and_reports_it() {
    let mut store = SettingsStore::new(MemoryStorage::with_blob(&b"{ truncated"[..]));
    let report = store.load_with_report();

    assert_eq!(report.settings, Settings::default());
    assert!(report.corruption.is_some());
    assert!(!report.is_clean());
}

#[test]
fn unreadable_storage_loads_defaults() {
    let mut store = SettingsStore::new(MemoryStorage::unavailable());
    let report = store.load_with_report();
    assert_eq!(report.settings, Settings::default());
    assert_eq!(report.storage_error, Some(StorageError::Unavailable));
}

#[test]
fn failed_write_keeps_the_in_memory_change() {
    let storage = MemoryStorage::new();
    let mut store = SettingsStore::open(storage.clone());
    storage.set_unavailable(true);

    let mut patch = PartialSettings::default();
    patch.company.name = Some("Offline".into());
    patch.branding.colors.primary = Some("red".into());
    let failure = store.save(patch).expect_err("storage is unavailable");

    assert_eq!(failure.source, StorageError::Unavailable);
    assert_eq!(failure.rejected.len(), 1);
    assert_eq!(store.current().company.name, "Offline");
}

#[test]
fn quota_exceeded_is_reported() {
    let mut store = SettingsStore::open(MemoryStorage::with_quota(16));
    let failure = store
        .save(PartialSettings::default())
        .expect_err("document is larger than the quota");
    assert!(matches!(failure.source, StorageError::QuotaExceeded { quota: 16, .. }));
}

#[test]
fn oversized_logo_is_rejected_and_current_logo_kept() {
    let mut store = SettingsStore::open(MemoryStorage::new());
    store.set_logo(png(32)).expect("small png");

    let err = store
        .set_logo(png(MAX_LOGO_BYTES + 1))
        .expect_err("over the limit");
    assert_eq!(
        err,
        LogoError::PayloadTooLarge {
            size: MAX_LOGO_BYTES + 1,
            limit: MAX_LOGO_BYTES,
        }
    );
    assert_eq!(err.user_message(), "Logo file too large! Please select a file under 2MB.");
    assert_eq!(store.current().branding.logo.as_ref().map(|logo| logo.len()), Some(32));

    assert_eq!(store.set_logo(b"plain text".to_vec()), Err(LogoError::UnsupportedFormat));
}

#[test]
fn logo_survives_save_and_load() {
    let storage = MemoryStorage::new();
    let mut store = SettingsStore::open(storage.clone());
    let bytes = png(128);
    store.set_logo(bytes.clone()).expect("valid png");
    store.persist().expect("persist succeeds");

    let reloaded = SettingsStore::open(storage.clone());
    let logo = reloaded.current().branding.logo.as_ref().expect("logo kept");
    assert_eq!(logo.bytes(), &bytes[..]);

    let mut store = reloaded;
    assert!(store.remove_logo());
    assert!(!store.remove_logo());
    store.persist().expect("persist succeeds");
    assert!(SettingsStore::open(storage).current().branding.logo.is_none());
}

#[test]
fn imported_roles_drive_permissions() {
    let mut store = SettingsStore::open(MemoryStorage::new());
    let snapshot = br#"{
        "users": {"roles": [
            {"name": "Owner", "level": "admin", "permissions": ["all"]},
            {"name": "Cashier", "level": "employee", "permissions": ["sales"]}
        ]}
    }"#;
    store.import_snapshot(snapshot).expect("import succeeds");

    let settings = store.current();
    assert_eq!(settings.users.roles.len(), 2);
    assert!(settings.role_allows(RoleLevel::Employee, FunctionKey::Sales));
    assert!(!settings.role_allows(RoleLevel::Employee, FunctionKey::Customer));
    assert!(settings.role_allows(RoleLevel::Admin, FunctionKey::Reports));
    // Disabled functions stay unavailable to every role.
    assert!(!settings.role_allows(RoleLevel::Admin, FunctionKey::Hrm));
    assert!(!settings.role_allows(RoleLevel::Manager, FunctionKey::Sales));
}

#[test]
fn form_edits_round_trip_through_the_store() {
    let mut store = SettingsStore::open(MemoryStorage::new());
    let mut fields = FormFields::from_settings(store.current());
    fields.set(FormField::CompanyName, String::from("Form Co"));
    fields.set(FormField::TaxRate, String::new());

    let report = store.save(fields.to_patch()).expect("save succeeds");
    assert!(report.rejected.is_empty());
    assert_eq!(store.current().company.name, "Form Co");
    assert_eq!(store.current().company.tax_rate.to_string(), "0");

    let refreshed = FormFields::from_settings(store.current());
    assert_eq!(refreshed.get(FormField::CompanyName), "Form Co");
    assert_eq!(refreshed.get(FormField::TaxRate), "0");
}

#[test]
fn file_storage_round_trip() {
    let dir = tempdir().expect("temp dir");
    let storage = FileStorage::open(dir.path(), "smartposSettings").expect("valid key");
    let mut store = SettingsStore::open(storage.clone());

    let mut patch = PartialSettings::default();
    patch.company.timezone = Some("Asia/Colombo".into());
    store.save(patch).expect("save succeeds");
    assert!(storage.path().exists());

    let reloaded = SettingsStore::open(storage);
    assert_eq!(reloaded.current().company.timezone, "Asia/Colombo");
}

#[test]
fn legacy_slot_is_read_until_first_save() {
    let dir = tempdir().expect("temp dir");
    fs::write(
        dir.path().join(format!("{LEGACY_SLOT_KEY}.json")),
        br#"{"company":{"name":"Legacy Shop"}}"#,
    )
    .expect("write legacy slot");

    let storage = FileStorage::open_with_fallback(dir.path(), "smartposSettings").expect("valid key");
    let mut store = SettingsStore::open(storage.clone());
    assert_eq!(store.current().company.name, "Legacy Shop");

    store.persist().expect("persist succeeds");
    assert!(storage.path().exists());
}
