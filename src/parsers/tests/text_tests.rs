use crate::parsers::text;

#[test]
fn test_normalize_whitespace() {
    assert_eq!(text::normalize_whitespace(""), "");
    assert_eq!(text::normalize_whitespace("   \n\t  "), "");
    assert_eq!(
        text::normalize_whitespace("  Line 1  \n\n  Line 2  \t\r\n  Line 3  "),
        "Line 1 Line 2 Line 3"
    );
    assert_eq!(
        text::normalize_whitespace("Hello    world!    This    is    a    test."),
        "Hello world! This is a test."
    );
}

#[test]
fn test_join_fragments() {
    assert_eq!(text::join_fragments(["Hello,", "world!"]), "Hello, world!");
    assert_eq!(text::join_fragments(["  a ", "", "\n b"]), "a b");
    assert_eq!(text::join_fragments(Vec::<&str>::new()), "");
}

#[test]
fn test_non_empty() {
    assert_eq!(text::non_empty("  en  "), Some("en".to_string()));
    assert_eq!(text::non_empty("   "), None);
    assert_eq!(text::non_empty(""), None);
}
