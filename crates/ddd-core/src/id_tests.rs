use super::*;

crate::define_id! {
    pub struct TestId;
}

#[test]
fn short_truncates_long_ids() {
    let id = TestId::new("abcdefghij");
    assert_eq!(id.short(4), "abcd");
}

#[test]
fn short_leaves_short_ids_untouched() {
    let id = TestId::new("abc");
    assert_eq!(id.short(10), "abc");
}

#[test]
fn display_matches_inner_string() {
    let id = TestId::new("xyz");
    assert_eq!(id.to_string(), "xyz");
}

#[test]
fn session_ids_have_expected_prefix_and_length() {
    let id = new_session_id();
    assert!(id.starts_with("sess-"));
    assert_eq!(id.len(), "sess-".len() + 8);
}

#[test]
fn checkpoint_ids_honor_prefix() {
    let id = new_checkpoint_id(Some("emergency"));
    assert!(id.starts_with("emergency_"));
}

#[test]
fn checkpoint_ids_default_prefix() {
    let id = new_checkpoint_id(None);
    assert!(id.starts_with("ckpt_"));
}
