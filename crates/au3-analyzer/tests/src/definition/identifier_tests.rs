use super::*;

#[test]
fn sigil_marks_variables() {
    let identifier = Identifier::classify("$hGUI").unwrap();
    assert_eq!(identifier.kind(), IdentifierKind::Variable);
    assert!(identifier.is_variable());
    assert_eq!(identifier.text(), "$hGUI");
}

#[test]
fn bare_words_are_functions() {
    let identifier = Identifier::classify("_GUICtrlCreate").unwrap();
    assert_eq!(identifier.kind(), IdentifierKind::Function);
    assert_eq!(identifier.to_string(), "_GUICtrlCreate");
}

#[test]
fn empty_and_lone_sigil_are_rejected() {
    assert!(Identifier::classify("").is_none());
    assert!(Identifier::classify("  ").is_none());
    assert!(Identifier::classify("$").is_none());
}
