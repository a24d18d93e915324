//! Unit tests for error construction and classification.

use rstest::rstest;

use super::ContentError;

#[rstest]
#[case(ContentError::transport("https://store/doc", 500, "boom"), true)]
#[case(ContentError::invalid_value("title", "bad"), false)]
#[case(ContentError::missing_default("heroContent"), false)]
#[case(ContentError::invalid_defaults("not an object"), false)]
fn classifies_transport_errors(#[case] err: ContentError, #[case] expected: bool) {
    assert_eq!(err.is_transport(), expected, "unexpected class for {err}");
}

#[test]
fn transport_message_names_url_and_status() {
    let err = ContentError::transport("https://store/content/faq", 403, "permission denied");
    assert_eq!(
        err.to_string(),
        "document store request to 'https://store/content/faq' failed with status 403: permission denied"
    );
}

#[test]
fn figment_errors_become_config_errors() {
    let err = ContentError::from(figment::Error::from("missing field `project_id`"));
    match err {
        ContentError::Config(inner) => {
            assert!(inner.to_string().contains("project_id"));
        }
        other => panic!("expected Config, got {other:?}"),
    }
}

#[test]
fn malformed_keeps_decoding_source() {
    let source = serde_json::from_str::<u8>("\"x\"").expect_err("string is not a u8");
    let err = ContentError::malformed("projects/p/documents/content/hero", source);
    assert!(matches!(err, ContentError::MalformedDocument { .. }));
    assert!(std::error::Error::source(&err).is_some());
}
