use colview_core::{ActionAvailabilityResolver, MultipleDeleteAvailability, PermissionEvaluator, RuleEvaluator};
use colview_model::{Actor, CollectionSettings, Grant, Permissions, Record};
use colview_types::{CollectionPath, RecordId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn record(id: &str, owner: &str) -> Record {
    Record::new(
        RecordId::parse(id).unwrap(),
        CollectionPath::parse("posts").unwrap(),
        json!({ "owner": owner }),
    )
}

fn owner_only_delete() -> Permissions {
    Permissions {
        create: Grant::Always,
        edit: Grant::Always,
        delete: Grant::Owner {
            field: "/owner".into(),
        },
    }
}

/// Evaluator with fixed answers, independent of the permission data.
struct Fixed {
    create: bool,
    edit: bool,
    delete: bool,
}

impl PermissionEvaluator for Fixed {
    fn can_create(&self, _: &Permissions, _: &Actor) -> bool {
        self.create
    }
    fn can_edit(&self, _: &Permissions, _: &Actor, _: &Record) -> bool {
        self.edit
    }
    fn can_delete(&self, _: &Permissions, _: &Actor, _: &Record) -> bool {
        self.delete
    }
}

// ── Single-record predicates ─────────────────────────────────────

#[test]
fn predicates_pass_through_evaluator() {
    let evaluator = Fixed {
        create: false,
        edit: true,
        delete: false,
    };
    let permissions = Permissions::default();
    let actor = Actor::new("alice");
    let settings = CollectionSettings::default();
    let resolver = ActionAvailabilityResolver::new(&evaluator, &permissions, &actor, &settings);
    let r = record("r1", "alice");

    assert!(!resolver.create_enabled());
    assert!(resolver.edit_enabled(&r));
    assert!(!resolver.delete_enabled(&r));
}

#[test]
fn inline_editing_needs_setting_and_edit_permission() {
    let permissions = Permissions::default();
    let actor = Actor::new("alice");
    let r = record("r1", "alice");

    let on = CollectionSettings::default();
    let off = CollectionSettings {
        inline_editing: false,
        ..CollectionSettings::default()
    };
    let can_edit = Fixed {
        create: true,
        edit: true,
        delete: true,
    };
    let cannot_edit = Fixed {
        create: true,
        edit: false,
        delete: true,
    };

    assert!(ActionAvailabilityResolver::new(&can_edit, &permissions, &actor, &on).inline_editing_enabled(&r));
    assert!(!ActionAvailabilityResolver::new(&can_edit, &permissions, &actor, &off).inline_editing_enabled(&r));
    assert!(!ActionAvailabilityResolver::new(&cannot_edit, &permissions, &actor, &on).inline_editing_enabled(&r));
}

// ── Multiple delete ──────────────────────────────────────────────

#[test]
fn empty_selection_is_never_deletable() {
    let evaluator = Fixed {
        create: true,
        edit: true,
        delete: true,
    };
    let permissions = Permissions::all();
    let actor = Actor::new("root");
    let settings = CollectionSettings::default();
    let resolver = ActionAvailabilityResolver::new(&evaluator, &permissions, &actor, &settings);

    let availability = resolver.multiple_delete(&[]);
    assert_eq!(availability, MultipleDeleteAvailability::NothingSelected);
    assert!(!availability.is_enabled());
    assert!(!resolver.multiple_delete_enabled(&[]));
}

#[test]
fn all_deletable_selection_is_allowed() {
    let permissions = owner_only_delete();
    let actor = Actor::new("alice");
    let settings = CollectionSettings::default();
    let resolver = ActionAvailabilityResolver::new(&RuleEvaluator, &permissions, &actor, &settings);
    let selection = vec![record("r1", "alice"), record("r2", "alice")];

    let availability = resolver.multiple_delete(&selection);
    assert_eq!(availability, MultipleDeleteAvailability::Allowed { count: 2 });
    assert_eq!(availability.reason(), None);
}

#[test]
fn protected_record_disables_bulk_delete_with_distinct_reason() {
    let permissions = owner_only_delete();
    let actor = Actor::new("alice");
    let settings = CollectionSettings::default();
    let resolver = ActionAvailabilityResolver::new(&RuleEvaluator, &permissions, &actor, &settings);
    let selection = vec![record("r1", "alice"), record("r2", "bob")];

    let availability = resolver.multiple_delete(&selection);
    assert_eq!(
        availability,
        MultipleDeleteAvailability::ContainsProtected {
            protected: vec![RecordId::parse("r2").unwrap()]
        }
    );
    assert!(!availability.is_enabled());

    let protected_reason = availability.reason().unwrap();
    let empty_reason = MultipleDeleteAvailability::NothingSelected.reason().unwrap();
    assert_ne!(protected_reason, empty_reason);
    assert!(protected_reason.contains("not allowed"));
    assert!(protected_reason.contains("r2"));
}

#[test]
fn reason_counts_several_protected_records() {
    let availability = MultipleDeleteAvailability::ContainsProtected {
        protected: vec![RecordId::parse("a").unwrap(), RecordId::parse("b").unwrap()],
    };
    assert_eq!(
        availability.reason().unwrap(),
        "The selection contains 2 records you are not allowed to delete"
    );
}

proptest! {
    #[test]
    fn singleton_selection_matches_can_delete(owner in "[a-c]", actor_id in "[a-c]") {
        let permissions = owner_only_delete();
        let actor = Actor::new(actor_id);
        let settings = CollectionSettings::default();
        let resolver = ActionAvailabilityResolver::new(&RuleEvaluator, &permissions, &actor, &settings);
        let r = record("r1", &owner);

        prop_assert_eq!(
            resolver.multiple_delete_enabled(std::slice::from_ref(&r)),
            RuleEvaluator.can_delete(&permissions, &actor, &r)
        );
    }

    #[test]
    fn empty_selection_disabled_for_any_permissions(create: bool, edit: bool, delete: bool) {
        let evaluator = Fixed { create, edit, delete };
        let permissions = Permissions::default();
        let actor = Actor::new("x");
        let settings = CollectionSettings::default();
        let resolver = ActionAvailabilityResolver::new(&evaluator, &permissions, &actor, &settings);
        prop_assert!(!resolver.multiple_delete_enabled(&[]));
    }
}
