//! Unit tests for named states and ascriptions

use attlog::{
    Attribute, AttributeStructure, AttributeSystem, ConstantAssignment, Error, NamedState,
    RelationSymbol, Value, ValueSet, Vocabulary,
};

fn clock_system() -> AttributeSystem {
    let hour = Attribute::new("hour", ValueSet::range(0, 23));
    let minute = Attribute::new("minute", ValueSet::range(0, 59));
    let structure = AttributeStructure::new(vec![hour, minute], vec![]).unwrap();
    AttributeSystem::new(structure, &["s1", "s2"]).unwrap()
}

fn clock_vocabulary() -> Vocabulary {
    Vocabulary::new(
        &["C1", "C2"],
        vec![RelationSymbol::new("PM", 1).unwrap()],
        &["V1"],
    )
    .unwrap()
}

fn clock_state() -> NamedState {
    let system = clock_system();
    let constants =
        ConstantAssignment::new(&clock_vocabulary(), &system, &[("C1", "s1"), ("C2", "s2")])
            .unwrap();
    NamedState::new(&system, &constants).unwrap()
}

#[test]
fn test_state_new() {
    let state = clock_state();
    assert_eq!(state.system(), &clock_system());
    assert_eq!(state.constants().get("C1"), Some("s1"));
    assert_eq!(state.ascriptions().count(), 0);
}

#[test]
fn test_state_rejects_foreign_assignment() {
    let system = clock_system();
    let other = system.without(attlog::Element::objects(&["s2"])).unwrap();
    let constants =
        ConstantAssignment::new(&clock_vocabulary(), &other, &[("C1", "s1")]).unwrap();

    assert!(matches!(
        NamedState::new(&system, &constants),
        Err(Error::SystemMismatch)
    ));
}

#[test]
fn test_set_ascription_and_lookup() {
    let mut state = clock_state();
    state
        .set_ascription("hour", "s1", vec![Value::Int(9), Value::Int(13)])
        .unwrap();

    assert_eq!(
        state.ascription("hour", "s1"),
        Some([Value::Int(9), Value::Int(13)].as_slice())
    );
    assert_eq!(state.ascription_or_empty("hour", "s1").len(), 2);
    assert_eq!(state.ascriptions().count(), 1);
}

#[test]
fn test_absent_is_not_empty() {
    let mut state = clock_state();

    // Never ascribed: unknown
    assert_eq!(state.ascription("hour", "s1"), None);
    assert!(state.ascription_or_empty("hour", "s1").is_empty());

    // Ascribed the empty list: known impossible
    state.set_ascription("hour", "s1", vec![]).unwrap();
    assert_eq!(state.ascription("hour", "s1"), Some([].as_slice()));
}

#[test]
fn test_set_ascription_replaces() {
    let mut state = clock_state();
    state
        .set_ascription("hour", "s1", vec![Value::Int(9)])
        .unwrap();
    state
        .set_ascription("hour", "s1", vec![Value::Int(13)])
        .unwrap();

    assert_eq!(
        state.ascription("hour", "s1"),
        Some([Value::Int(13)].as_slice())
    );
    assert_eq!(state.ascriptions().count(), 1);
}

#[test]
fn test_set_ascription_validates_pair() {
    let mut state = clock_state();

    assert!(matches!(
        state.set_ascription("second", "s1", vec![Value::Int(0)]),
        Err(Error::AttributeNotFound(_))
    ));
    assert!(matches!(
        state.set_ascription("hour", "s9", vec![Value::Int(0)]),
        Err(Error::ObjectNotFound(_))
    ));
}

#[test]
fn test_set_ascription_validates_values() {
    let mut state = clock_state();

    match state.set_ascription("hour", "s1", vec![Value::Int(9), Value::Int(99)]) {
        Err(Error::ValueNotAdmitted { label, value }) => {
            assert_eq!(label, "hour");
            assert_eq!(value, Value::Int(99));
        }
        other => panic!("Expected ValueNotAdmitted, found {:?}", other),
    }

    // A failed ascription leaves the state untouched
    assert_eq!(state.ascription("hour", "s1"), None);
}

#[test]
fn test_state_clone_is_independent() {
    let mut original = clock_state();
    original
        .set_ascription("hour", "s1", vec![Value::Int(9)])
        .unwrap();

    let mut copy = original.clone();
    copy.set_ascription("hour", "s1", vec![Value::Int(13)])
        .unwrap();

    assert_eq!(
        original.ascription("hour", "s1"),
        Some([Value::Int(9)].as_slice())
    );
    assert_ne!(original, copy);
}

#[test]
fn test_state_display() {
    let mut state = clock_state();
    state
        .set_ascription("hour", "s1", vec![Value::Int(9), Value::Int(13)])
        .unwrap();
    state
        .set_ascription("minute", "s2", vec![Value::Int(27)])
        .unwrap();

    assert_eq!(
        state.to_string(),
        "({s1, s2} ; (hour: {0..=23}, minute: {0..=59} ; ))\n\
         hour(s1): [9, 13]\n\
         minute(s2): [27]"
    );
}
