//! Integration tests for the keymap system

use super::*;

#[test]
fn test_embedded_yaml_parses() {
    let bindings = parse_keymap_yaml(DEFAULT_KEYMAP_YAML)
        .expect("Embedded keymap.yaml should parse successfully");

    assert!(bindings.iter().any(|b| b.command == Command::ForceHighlight));
    assert!(bindings
        .iter()
        .any(|b| b.command == Command::ToggleHighlighting));
    assert!(bindings.iter().any(|b| b.command == Command::Quit));
}

#[test]
fn test_embedded_yaml_matches_hardcoded_defaults() {
    let embedded = parse_keymap_yaml(DEFAULT_KEYMAP_YAML).unwrap();
    assert_eq!(embedded, default_bindings());
}

#[test]
fn test_ctrl_h_forces_highlight() {
    let keymap = Keymap::with_bindings(default_bindings());
    let stroke = parse_key_string("ctrl+h").unwrap();
    assert_eq!(keymap.lookup(&stroke), Some(Command::ForceHighlight));
}

#[test]
fn test_ctrl_shift_m_toggles_highlighting() {
    let keymap = Keymap::with_bindings(default_bindings());
    let stroke = parse_key_string("ctrl+shift+m").unwrap();
    assert_eq!(keymap.lookup(&stroke), Some(Command::ToggleHighlighting));

    // Without shift it's unbound
    let stroke = parse_key_string("ctrl+m").unwrap();
    assert_eq!(keymap.lookup(&stroke), None);
}

#[test]
fn test_load_default_keymap() {
    let bindings = load_default_keymap();
    assert!(!bindings.is_empty(), "Default keymap should not be empty");
}
