//! Trailing-edge debounce behavior, driven with the paused tokio clock.

use std::time::Duration;

use formwork::config::Config;
use formwork::customer::{CustomerForm, EMAIL_PATH};

fn quiet_config(ms: u64) -> Config {
    Config {
        debounce_quiet_ms: ms,
        ..Config::default()
    }
}

/// Let spawned tasks run far enough to observe channel events and arm or
/// fire their timers, without advancing the clock.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn message_appears_only_after_the_quiet_period() {
    let form = CustomerForm::new(&quiet_config(1000));
    let _watcher = form.spawn_message_watcher();
    let mut message = form.message();

    form.mark_touched(EMAIL_PATH).unwrap();
    form.set_value(EMAIL_PATH, "not-an-email").unwrap();
    settle().await;

    tokio::time::advance(Duration::from_millis(999)).await;
    settle().await;
    assert!(!message.has_changed().unwrap(), "fired before the quiet period");

    tokio::time::advance(Duration::from_millis(2)).await;
    settle().await;
    assert!(message.has_changed().unwrap());
    assert_eq!(*message.borrow_and_update(), "Please enter a valid email address.");
}

#[tokio::test(start_paused = true)]
async fn rapid_changes_coalesce_into_one_derivation() {
    let form = CustomerForm::new(&quiet_config(1000));
    let _watcher = form.spawn_message_watcher();
    let mut message = form.message();

    form.mark_touched(EMAIL_PATH).unwrap();
    for partial in ["t", "te", "tes", "test@", "still-wrong"] {
        form.set_value(EMAIL_PATH, partial).unwrap();
        settle().await;
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        // Each change lands inside the previous window, so nothing fires.
        assert!(!message.has_changed().unwrap());
    }

    tokio::time::advance(Duration::from_millis(501)).await;
    settle().await;
    assert!(message.has_changed().unwrap());
    assert_eq!(*message.borrow_and_update(), "Please enter a valid email address.");

    // One derivation only; quiet time afterwards produces nothing new.
    tokio::time::advance(Duration::from_secs(5)).await;
    settle().await;
    assert!(!message.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn changes_to_other_fields_do_not_arm_the_debounce() {
    let form = CustomerForm::new(&quiet_config(1000));
    let _watcher = form.spawn_message_watcher();
    let mut message = form.message();

    form.set_value("firstName", "Jack").unwrap();
    form.set_value("emailGroup.confirmEmail", "x@y.z").unwrap();
    settle().await;
    tokio::time::advance(Duration::from_secs(3)).await;
    settle().await;
    assert!(!message.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn valid_email_clears_the_message() {
    let form = CustomerForm::new(&quiet_config(1000));
    let _watcher = form.spawn_message_watcher();
    let mut message = form.message();

    form.mark_touched(EMAIL_PATH).unwrap();
    form.set_value(EMAIL_PATH, "nope").unwrap();
    settle().await;
    tokio::time::advance(Duration::from_millis(1001)).await;
    settle().await;
    assert_eq!(*message.borrow_and_update(), "Please enter a valid email address.");

    form.set_value(EMAIL_PATH, "jack@torchwood.example").unwrap();
    settle().await;
    tokio::time::advance(Duration::from_millis(1001)).await;
    settle().await;
    assert_eq!(*message.borrow_and_update(), "");
}

#[tokio::test(start_paused = true)]
async fn required_and_email_messages_concatenate_in_catalog_order() {
    let form = CustomerForm::new(&quiet_config(1000));
    let _watcher = form.spawn_message_watcher();
    let mut message = form.message();

    // Empty value: only "required" is active (length/email rules skip empty).
    form.mark_touched(EMAIL_PATH).unwrap();
    form.set_value(EMAIL_PATH, "").unwrap();
    settle().await;
    tokio::time::advance(Duration::from_millis(1001)).await;
    settle().await;
    assert_eq!(*message.borrow_and_update(), "Please enter your email address.");
}

#[tokio::test(start_paused = true)]
async fn configured_messages_override_the_defaults() {
    let mut config = quiet_config(1000);
    config
        .messages
        .insert("email".to_string(), "That address looks wrong.".to_string());

    let form = CustomerForm::new(&config);
    let _watcher = form.spawn_message_watcher();
    let mut message = form.message();

    form.mark_touched(EMAIL_PATH).unwrap();
    form.set_value(EMAIL_PATH, "nope").unwrap();
    settle().await;
    tokio::time::advance(Duration::from_millis(1001)).await;
    settle().await;
    assert_eq!(*message.borrow_and_update(), "That address looks wrong.");
}
