//! Tests for #[derive(Action)] macro

use priorities_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ListAction {
    #[command]
    Load,

    #[command]
    Add { text: String },

    #[command]
    Complete(String),

    #[event]
    Added { id: String, text: String },

    #[event]
    Expired(String),

    Tick,
}

#[test]
fn test_is_command() {
    let action = ListAction::Add {
        text: "Test".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = ListAction::Added {
        id: "todo-1".to_string(),
        text: "Test".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_unit_and_tuple_variants() {
    assert!(ListAction::Load.is_command());
    assert!(ListAction::Complete("todo-1".to_string()).is_command());
    assert!(ListAction::Expired("todo-1".to_string()).is_event());
}

#[test]
fn test_unmarked_variant_is_neither() {
    let action = ListAction::Tick;
    assert!(!action.is_command());
    assert!(!action.is_event());
    assert_eq!(action.kind(), "Tick");
}

#[test]
fn test_kind_names_every_variant() {
    let actions = vec![
        (ListAction::Load, "Load"),
        (
            ListAction::Add {
                text: "a".to_string(),
            },
            "Add",
        ),
        (ListAction::Complete("1".to_string()), "Complete"),
        (
            ListAction::Added {
                id: "1".to_string(),
                text: "a".to_string(),
            },
            "Added",
        ),
        (ListAction::Expired("1".to_string()), "Expired"),
    ];

    for (action, expected) in actions {
        assert_eq!(action.kind(), expected);
    }
}
