mod common;

use chrono::NaiveDate;
use gift_tracker::{ConfigManager, GiftDraft, GiftStatus, GiftTracker, TrackerError};

use common::setup_test_env;

fn draft_for(tracker: &GiftTracker, name: &str, price: &str) -> GiftDraft {
    let mut draft = GiftDraft::new(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    draft.name = name.into();
    draft.price = price.into();
    draft.recipient = tracker.store().recipients().first().cloned();
    draft.category = tracker.store().categories().first().cloned();
    draft
}

fn seeded() -> GiftTracker {
    let (mut tracker, _) = setup_test_env();
    tracker.add_recipient("Rosa").expect("recipient");
    tracker.add_category("Garden").expect("category");
    tracker
}

#[test]
fn add_flow_appends_validated_gift() {
    let mut tracker = seeded();
    let id = tracker
        .add_gift(&draft_for(&tracker, "Trowel", "12.50"))
        .expect("add gift");

    let gift = tracker.store().gift(id).expect("stored");
    assert_eq!(gift.recipient.name, "Rosa");
    assert_eq!(gift.category.name, "Garden");
    assert_eq!(gift.price, 12.5);
}

#[test]
fn invalid_drafts_surface_messages_and_do_not_mutate() {
    let mut tracker = seeded();

    let err = tracker
        .add_gift(&draft_for(&tracker, "Seeds", "cheap"))
        .expect_err("price is not a number");
    assert!(
        matches!(err, TrackerError::InvalidInput(ref message) if message.contains("Price")),
        "unexpected error: {err:?}"
    );

    let mut missing_recipient = draft_for(&tracker, "Seeds", "3");
    missing_recipient.recipient = None;
    let err = tracker.add_gift(&missing_recipient).unwrap_err();
    assert_eq!(err.to_string(), "Invalid input: Select a recipient");

    assert!(tracker.store().gifts().is_empty());
}

#[test]
fn blank_recipient_names_are_rejected() {
    let (mut tracker, _) = setup_test_env();
    assert!(matches!(
        tracker.add_recipient("   "),
        Err(TrackerError::InvalidInput(_))
    ));
    assert!(tracker.store().recipients().is_empty());
}

#[test]
fn edit_flow_replaces_gift_and_marks_it_purchased() {
    let mut tracker = seeded();
    let id = tracker
        .add_gift(&draft_for(&tracker, "Gloves", "20"))
        .unwrap();

    let mut draft = GiftDraft::from_gift(tracker.store().gift(id).unwrap());
    draft.status = GiftStatus::Purchased;
    draft.store = "Garden Centre".into();
    assert!(tracker.edit_gift(id, &draft).unwrap());

    let gift = tracker.store().gift(id).unwrap();
    assert!(gift.is_purchased());
    assert_eq!(gift.store, "Garden Centre");
    assert_eq!(tracker.store().gifts().len(), 1);
}

#[test]
fn editing_a_deleted_gift_reports_false() {
    let mut tracker = seeded();
    let id = tracker.add_gift(&draft_for(&tracker, "Hose", "30")).unwrap();
    let draft = GiftDraft::from_gift(tracker.store().gift(id).unwrap());
    tracker.store_mut().delete_gifts(&[0]).unwrap();

    assert!(!tracker.edit_gift(id, &draft).unwrap());
    assert!(tracker.store().gifts().is_empty());
}

#[test]
fn out_of_range_delete_maps_to_invalid_input() {
    let mut tracker = seeded();
    let err: TrackerError = tracker
        .store_mut()
        .delete_recipients(&[4])
        .unwrap_err()
        .into();
    assert!(matches!(err, TrackerError::InvalidInput(_)));
    assert_eq!(tracker.store().recipients().len(), 1);
}

#[test]
fn gift_list_uses_configured_order_and_search() {
    let mut tracker = seeded();
    for (name, price) in [("Shears", "15"), ("Apron", "18"), ("Rake", "25")] {
        tracker.add_gift(&draft_for(&tracker, name, price)).unwrap();
    }

    let names: Vec<&str> = tracker.gift_list("").iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Apron", "Rake", "Shears"]);

    let names: Vec<&str> = tracker.gift_list("RA").iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Rake"]);
}

#[test]
fn descending_default_comes_from_config() {
    let root = common::temp_root();
    let mut config = common::config_in(&root);
    config.default_sort_ascending = false;
    let mut tracker = GiftTracker::open(config).unwrap();
    tracker.add_recipient("Rosa").unwrap();
    tracker.add_category("Garden").unwrap();
    for name in ["Alpha", "Zeta"] {
        tracker.add_gift(&draft_for(&tracker, name, "1")).unwrap();
    }

    let names: Vec<&str> = tracker.gift_list("").iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);
}

#[test]
fn summary_totals_follow_status() {
    let mut tracker = seeded();
    let id = tracker.add_gift(&draft_for(&tracker, "Pots", "10.25")).unwrap();
    tracker.add_gift(&draft_for(&tracker, "Bulbs", "4.75")).unwrap();
    let mut draft = GiftDraft::from_gift(tracker.store().gift(id).unwrap());
    draft.status = GiftStatus::Purchased;
    tracker.edit_gift(id, &draft).unwrap();

    let summary = tracker.summary();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.purchased, 1);
    assert_eq!(summary.purchased_total, 10.25);
    assert_eq!(summary.total, 15.0);
}

#[test]
fn configured_log_filter_is_applied_on_open() {
    let root = common::temp_root();
    let mut config = common::config_in(&root);
    config.log_filter = Some("gift_core=debug".into());
    let tracker = GiftTracker::open(config).expect("open with log filter");
    assert_eq!(tracker.config().log_filter.as_deref(), Some("gift_core=debug"));

    let mut config = common::config_in(&common::temp_root());
    config.log_filter = Some("not a directive ===".into());
    assert!(GiftTracker::open(config).is_ok());
}

#[test]
fn malformed_config_file_is_a_config_error() {
    let root = common::temp_root();
    let manager = ConfigManager::with_base_dir(root).expect("manager");
    std::fs::write(manager.config_path(), "{ not json").unwrap();

    let err = GiftTracker::open_with_manager(&manager).err().expect("open must fail");
    assert!(matches!(err, TrackerError::ConfigError(_)), "{err}");
}
