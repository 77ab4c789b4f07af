//! The customer form: the concrete model this crate demonstrates.
//!
//! Identity fields, a nested email group with a cross-field match rule, a
//! notification-dependent phone requirement, a rating bounded to `[1, 5]`,
//! and a repeatable address list.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::form::{Control, Field, FormError, FormModel, Group, List, Value, ValueTree};
use crate::message::MessageCatalog;
use crate::notify::Debouncer;
use crate::validate::{ErrorKind, GroupRule, Rule};

/// Dotted path of the field whose changes drive the derived message.
pub const EMAIL_PATH: &str = "emailGroup.email";

/// Stateful facade over the customer form model.
///
/// The model lives behind a lock so the debounced message task can read it;
/// every mutation is synchronous and completes (including revalidation)
/// before the method returns.
pub struct CustomerForm {
    model: Arc<Mutex<FormModel>>,
    catalog: MessageCatalog,
    debouncer: Debouncer,
    message_tx: watch::Sender<String>,
}

impl CustomerForm {
    pub fn new(config: &Config) -> Self {
        let mut catalog = MessageCatalog::default();
        catalog.apply_overrides(&config.messages);
        let (message_tx, _) = watch::channel(String::new());
        Self {
            model: Arc::new(Mutex::new(FormModel::new(customer_group()))),
            catalog,
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_quiet_ms)),
            message_tx,
        }
    }

    /// Apply user input to a field.
    pub fn set_value(&self, path: &str, value: impl Into<Value>) -> Result<(), FormError> {
        self.model.lock().set_value(path, value)
    }

    /// Record a blur on a field.
    pub fn mark_touched(&self, path: &str) -> Result<(), FormError> {
        self.model.lock().mark_touched(path)
    }

    pub fn is_valid(&self) -> bool {
        self.model.lock().is_valid()
    }

    pub fn field_is_valid(&self, path: &str) -> bool {
        self.model
            .lock()
            .field(path)
            .map(Field::is_valid)
            .unwrap_or(false)
    }

    pub fn field_errors(&self, path: &str) -> Vec<ErrorKind> {
        self.model
            .lock()
            .field(path)
            .map(|f| f.errors().to_vec())
            .unwrap_or_default()
    }

    /// Errors from a group's own cross-field rules.
    pub fn group_errors(&self, path: &str) -> Vec<ErrorKind> {
        self.model
            .lock()
            .control(path)
            .and_then(Control::as_group)
            .map(|g| g.errors().to_vec())
            .unwrap_or_default()
    }

    /// Set the preferred notification channel. Choosing `"text"` makes the
    /// phone number required; any other choice clears the phone rules. The
    /// phone field is revalidated before this returns.
    pub fn set_notification(&self, via: &str) -> Result<(), FormError> {
        let mut model = self.model.lock();
        model.set_value("notification", via)?;
        if via == "text" {
            model.set_validators("phone", vec![Rule::Required])
        } else {
            model.clear_validators("phone")
        }
    }

    /// Append a default-valued address entry, returning the new list length.
    pub fn append_address(&self) -> Result<usize, FormError> {
        self.model.lock().push_entry("addresses", address_group())
    }

    pub fn address_count(&self) -> usize {
        self.model
            .lock()
            .control("addresses")
            .and_then(|c| c.as_list().map(List::len))
            .unwrap_or(0)
    }

    /// Serialize the current form value to JSON, log it, and return it.
    pub fn save(&self) -> String {
        let value = self.model.lock().value();
        let json = serde_json::to_string(&value).expect("form value serializes to JSON");
        tracing::info!(form = %json, "saved");
        json
    }

    /// Apply the fixed literal test data set: a full `set_all` over the
    /// current shape, then a `patch` of the first name.
    pub fn populate_test_data(&self) -> Result<(), FormError> {
        let mut model = self.model.lock();
        let mut tree = model.value();
        tree.set("firstName", ValueTree::text("Jack"));
        tree.set("lastName", ValueTree::text("Harkness"));
        tree.set(
            "emailGroup",
            ValueTree::group([
                ("email", ValueTree::text("test@test.com")),
                ("confirmEmail", ValueTree::text("test@test.com")),
            ]),
        );
        tree.set("sendCatalog", ValueTree::leaf(false));
        tree.set("rating", ValueTree::leaf(4.0));
        tree.set("notification", ValueTree::text("text"));
        tree.set("phone", ValueTree::text("0491230412"));
        model.set_all(&tree)?;
        model.patch(&ValueTree::group([("firstName", ValueTree::text("Nicolas"))]));
        Ok(())
    }

    /// Snapshot of the whole form value.
    pub fn value(&self) -> ValueTree {
        self.model.lock().value()
    }

    /// Receiver for the derived email message; starts empty and updates after
    /// each debounced quiet period once the watcher is running.
    pub fn message(&self) -> watch::Receiver<String> {
        self.message_tx.subscribe()
    }

    /// Spawn the debounced task deriving the email display message.
    pub fn spawn_message_watcher(&self) -> JoinHandle<()> {
        let rx = self.model.lock().subscribe();
        let model = Arc::clone(&self.model);
        let catalog = self.catalog.clone();
        let tx = self.message_tx.clone();
        self.debouncer.spawn(rx, EMAIL_PATH.to_string(), move || {
            let model = model.lock();
            let Some(field) = model.field(EMAIL_PATH) else {
                return;
            };
            let _ = tx.send(catalog.derive(field));
        })
    }
}

/// The customer form shape with its default values and rules.
fn customer_group() -> Group {
    Group::new()
        .with_field("firstName", Field::new("", vec![Rule::Required, Rule::MinLength(3)]))
        .with_field("lastName", Field::new("", vec![Rule::Required, Rule::MaxLength(50)]))
        .with_group(
            "emailGroup",
            Group::new()
                .with_field("email", Field::new("", vec![Rule::Required, Rule::Email]))
                .with_field("confirmEmail", Field::new("", vec![Rule::Required]))
                .with_rule(GroupRule::EmailMatch),
        )
        .with_field("phone", Field::new("", vec![]))
        .with_field("notification", Field::new("email", vec![]))
        .with_field("rating", Field::new(Value::Null, vec![Rule::Range { min: 1.0, max: 5.0 }]))
        .with_field("sendCatalog", Field::new(true, vec![]))
        .with_list("addresses", List::new(vec![address_group()]))
}

/// A default address entry: type "home", everything else blank.
fn address_group() -> Group {
    Group::new()
        .with_field("addressType", Field::new("home", vec![]))
        .with_field("street1", Field::new("", vec![]))
        .with_field("street2", Field::new("", vec![]))
        .with_field("city", Field::new("", vec![]))
        .with_field("state", Field::new("", vec![]))
        .with_field("zip", Field::new("", vec![]))
}
