use crate::terminal::is_yes;
use crate::{Notifier, TerminalNotifier};

#[test]
fn given_yes_flag_when_confirm_then_accepted_without_prompt() {
    assert!(TerminalNotifier::new(true).confirm("Renew?"));
}

#[test]
fn test_is_yes() {
    assert!(is_yes("y\n"));
    assert!(is_yes(" YES "));
    assert!(!is_yes(""));
    assert!(!is_yes("n"));
    assert!(!is_yes("yep"));
}
