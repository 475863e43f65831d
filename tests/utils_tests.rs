use nlp_showcase::utils::json_extractor::{extract_json, parse_json};
use nlp_showcase::utils::*;
use nlp_showcase::{sanitize_error_message, ProviderErrorKind, ShowcaseError, ShowcaseResult};

#[test]
fn test_json_extraction() {
    // Test extraction from JSON block
    let text = "Here is a result: ```json\n{\"name\": \"Ana\", \"version\": 3}\n```";
    let json = parse_json(text).unwrap();
    assert_eq!(json["name"], "Ana");
    assert_eq!(json["version"], 3);

    // Test extraction from non-block JSON
    let json = parse_json("The answer is {\"result\": 42}").unwrap();
    assert_eq!(json["result"], 42);

    // An array that precedes any object is taken whole
    let json = parse_json("Filas: [{\"a\": 1}, {\"a\": 2}] listo").unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));

    // Test with no JSON present
    let err = extract_json("This text has no JSON at all").unwrap_err();
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::MalformedResponse));
}

#[test]
fn test_broken_json_is_malformed() {
    let err = parse_json("{\"a\": ").unwrap_err();
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::MalformedResponse));
    assert_eq!(err.details(), Some("{\"a\":"));
}

#[test]
fn test_validate_range() {
    assert_eq!(validate_range(5u8, 1, 10, "El número de tweets").unwrap(), 5);

    let err: ShowcaseError = validate_range(11u8, 1, 10, "El número de tweets").unwrap_err();
    assert_eq!(
        err.user_message("generic"),
        "El número de tweets debe estar entre 1 y 10."
    );
}

#[test]
fn test_string_validator() {
    let ok: ShowcaseResult<String> = StringValidator::not_empty("hola", "prompt");
    assert_eq!(ok.unwrap(), "hola");
    assert!(StringValidator::not_empty("", "prompt").is_err());

    let err = StringValidator::not_blank("   ", "Por favor, ingresa un usuario de Twitter.").unwrap_err();
    assert_eq!(
        err.user_message("generic"),
        "Por favor, ingresa un usuario de Twitter."
    );
}

#[test]
fn test_sanitize_error_message() {
    let message = "invalid key: AIzaSyD-abcdefghijklmnopqrstuvwx_123 for project";
    let sanitized = sanitize_error_message(message);
    assert_eq!(sanitized, "invalid key: [REDACTED] for project");
}

#[test]
fn test_user_message_hides_provider_details() {
    let err = ShowcaseError::simple_transport_error("connection reset by peer");
    assert_eq!(err.user_message("Inténtalo de nuevo."), "Inténtalo de nuevo.");

    let err = ShowcaseError::validation("Por favor, ingresa un texto para analizar.");
    assert_eq!(
        err.user_message("Inténtalo de nuevo."),
        "Por favor, ingresa un texto para analizar."
    );
}
