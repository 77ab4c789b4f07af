use formwork::form::{Field, FormError, FormModel, Group, List, Value, ValueTree};
use formwork::validate::Rule;

fn sample_model() -> FormModel {
    FormModel::new(
        Group::new()
            .with_field("name", Field::new("", vec![Rule::Required]))
            .with_field("phone", Field::new("", vec![]))
            .with_group(
                "contact",
                Group::new().with_field("email", Field::new("", vec![Rule::Email])),
            )
            .with_list(
                "tags",
                List::new(vec![Group::new().with_field("label", Field::new("x", vec![]))]),
            ),
    )
}

fn full_tree() -> ValueTree {
    ValueTree::group([
        ("name", ValueTree::text("Gwen")),
        ("phone", ValueTree::text("555")),
        (
            "contact",
            ValueTree::group([("email", ValueTree::text("gwen@example.com"))]),
        ),
        (
            "tags",
            ValueTree::list([ValueTree::group([("label", ValueTree::text("vip"))])]),
        ),
    ])
}

#[test]
fn set_all_replaces_every_field() {
    let mut model = sample_model();
    model.set_all(&full_tree()).unwrap();
    assert_eq!(model.field("name").unwrap().value(), &Value::text("Gwen"));
    assert_eq!(
        model.field("contact.email").unwrap().value(),
        &Value::text("gwen@example.com")
    );
    assert_eq!(model.field("tags.0.label").unwrap().value(), &Value::text("vip"));
}

#[test]
fn set_all_with_missing_key_fails_and_leaves_model_unchanged() {
    let mut model = sample_model();
    model.set_value("phone", "before").unwrap();

    let mut tree = full_tree();
    let ValueTree::Group(entries) = &mut tree else { unreachable!() };
    entries.retain(|(k, _)| k != "phone");

    let err = model.set_all(&tree).unwrap_err();
    assert!(matches!(err, FormError::ShapeMismatch { .. }));
    // Nothing was applied, not even keys that were present.
    assert_eq!(model.field("name").unwrap().value(), &Value::text(""));
    assert_eq!(model.field("phone").unwrap().value(), &Value::text("before"));
}

#[test]
fn set_all_rejects_unknown_keys_and_list_length_mismatch() {
    let mut model = sample_model();

    let mut extra = full_tree();
    extra.set("nickname", ValueTree::text("gw"));
    assert!(matches!(
        model.set_all(&extra).unwrap_err(),
        FormError::ShapeMismatch { path, .. } if path == "nickname"
    ));

    let mut short_list = full_tree();
    short_list.set("tags", ValueTree::list([]));
    assert!(matches!(
        model.set_all(&short_list).unwrap_err(),
        FormError::ShapeMismatch { path, .. } if path == "tags"
    ));
}

#[test]
fn patch_merges_and_ignores_unknown_keys() {
    let mut model = sample_model();
    model.set_value("phone", "555").unwrap();

    // Same missing-key situation that fails set_all: patch succeeds and the
    // absent field keeps its value.
    model.patch(&ValueTree::group([
        ("name", ValueTree::text("Rhys")),
        ("nickname", ValueTree::text("ignored")),
    ]));
    assert_eq!(model.field("name").unwrap().value(), &Value::text("Rhys"));
    assert_eq!(model.field("phone").unwrap().value(), &Value::text("555"));
}

#[test]
fn patch_list_entries_by_index() {
    let mut model = sample_model();
    model.patch(&ValueTree::group([(
        "tags",
        ValueTree::list([
            ValueTree::group([("label", ValueTree::text("first"))]),
            // Beyond the current length: ignored.
            ValueTree::group([("label", ValueTree::text("second"))]),
        ]),
    )]));
    assert_eq!(model.field("tags.0.label").unwrap().value(), &Value::text("first"));
    let list = model.control("tags").unwrap().as_list().unwrap();
    assert_eq!(list.len(), 1);
}

#[test]
fn user_input_marks_dirty_but_bulk_ops_do_not() {
    let mut model = sample_model();
    assert!(model.field("name").unwrap().is_pristine());

    model.set_all(&full_tree()).unwrap();
    assert!(model.field("name").unwrap().is_pristine());
    assert!(model.field("name").unwrap().is_untouched());

    model.set_value("name", "Ianto").unwrap();
    assert!(model.field("name").unwrap().is_dirty());

    model.mark_touched("phone").unwrap();
    assert!(model.field("phone").unwrap().is_touched());
    assert!(model.field("phone").unwrap().is_pristine());
}

#[test]
fn errors_are_computed_even_on_untouched_fields() {
    let model = sample_model();
    let name = model.field("name").unwrap();
    assert!(name.is_untouched() && name.is_pristine());
    assert_eq!(name.errors().iter().map(|e| e.code()).collect::<Vec<_>>(), vec!["required"]);
    assert!(!model.is_valid());
}

#[test]
fn validator_swap_revalidates_immediately() {
    let mut model = sample_model();
    assert!(model.field("phone").unwrap().is_valid());

    model.set_validators("phone", vec![Rule::Required]).unwrap();
    assert!(!model.field("phone").unwrap().is_valid());

    model.clear_validators("phone").unwrap();
    assert!(model.field("phone").unwrap().is_valid());
}

#[test]
fn push_entry_appends_to_list() {
    let mut model = sample_model();
    let len = model
        .push_entry("tags", Group::new().with_field("label", Field::new("y", vec![])))
        .unwrap();
    assert_eq!(len, 2);
    assert_eq!(model.field("tags.1.label").unwrap().value(), &Value::text("y"));

    assert!(matches!(
        model.push_entry("name", Group::new()).unwrap_err(),
        FormError::ShapeMismatch { .. }
    ));
    assert!(matches!(
        model.push_entry("missing", Group::new()).unwrap_err(),
        FormError::UnknownPath { .. }
    ));
}

#[test]
fn unknown_paths_are_errors() {
    let mut model = sample_model();
    assert!(matches!(
        model.set_value("contact.missing", "x").unwrap_err(),
        FormError::UnknownPath { .. }
    ));
    assert!(model.field("tags.5.label").is_none());
}

#[test]
fn value_snapshot_round_trips_through_set_all() {
    let mut model = sample_model();
    model.set_all(&full_tree()).unwrap();
    assert_eq!(model.value(), full_tree());
}
