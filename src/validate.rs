//! # Payload Validation
//!
//! This module enforces the field-level business rules for client form
//! payloads. All validators are pure (no I/O) and order-independent across
//! fields: every field is checked independently, each failing field
//! contributes exactly one violation, and the violations are aggregated into
//! a single [`ValidationError`] for caller-facing reporting.
//!
//! Successful validation also normalizes the payload: `full_name` is trimmed
//! and title-cased, `message` is trimmed.
//!
//! ## Usage Examples
//!
//! ```rust
//! use intake::{CreateFormRequest, validate_create};
//!
//! let request = CreateFormRequest {
//!     full_name: "ana gomez".to_string(),
//!     email: "ana@x.com".to_string(),
//!     phone: 3001234567,
//!     message: "hola".to_string(),
//! };
//!
//! let form = validate_create(&request).unwrap();
//! assert_eq!(form.full_name, "Ana Gomez");
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::{CreateFormRequest, FormChanges, NewForm, UpdateFormRequest};

/// Minimum number of characters allowed in `full_name` after trimming.
const FULL_NAME_MIN_CHARS: usize = 2;
/// Maximum number of characters allowed in `full_name` after trimming.
const FULL_NAME_MAX_CHARS: usize = 255;
/// Maximum number of characters allowed in `message` after trimming.
const MESSAGE_MAX_CHARS: usize = 500;
/// Maximum number of whitespace-separated words allowed in `message`.
const MESSAGE_MAX_WORDS: usize = 500;
/// Lower bound of the allowed digit count for `phone`.
const PHONE_MIN_DIGITS: usize = 7;
/// Upper bound of the allowed digit count for `phone`.
const PHONE_MAX_DIGITS: usize = 15;

fn full_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-ZáéíóúüñÁÉÍÓÚÜÑ\s\-'.]+$").expect("full name pattern compiles")
    })
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

////////////////////////////////////////////// Errors //////////////////////////////////////////////////

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// The name of the field that failed validation.
    pub field: &'static str,
    /// Human-readable description of the violated rule.
    pub rule: String,
}

impl FieldViolation {
    fn new(field: &'static str, rule: impl Into<String>) -> Self {
        FieldViolation {
            field,
            rule: rule.into(),
        }
    }

    /// Renders the violation as a caller-facing message.
    pub fn message(&self) -> String {
        self.rule.clone()
    }
}

/// Error produced when one or more payload fields violate a business rule.
///
/// Carries one violation per failing field; validation fails closed on the
/// first structural violation detected within each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// The individual field violations, in field order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Caller-facing messages, one per failing field.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(FieldViolation::message).collect()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules: Vec<&str> = self.violations.iter().map(|v| v.rule.as_str()).collect();
        write!(f, "Validation failed: {}", rules.join(" "))
    }
}

impl std::error::Error for ValidationError {}

////////////////////////////////////////// Field validators ////////////////////////////////////////////

/// Validates and normalizes a full name: trims, enforces the character class
/// and length limits, requires at least a first name and a surname, and
/// title-cases the result.
fn normalize_full_name(raw: &str) -> Result<String, FieldViolation> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();

    if chars < FULL_NAME_MIN_CHARS {
        return Err(FieldViolation::new(
            "full_name",
            format!(
                "full_name must be at least {} characters long.",
                FULL_NAME_MIN_CHARS
            ),
        ));
    }
    if chars > FULL_NAME_MAX_CHARS {
        return Err(FieldViolation::new(
            "full_name",
            format!("full_name must not exceed {} characters.", FULL_NAME_MAX_CHARS),
        ));
    }
    if !full_name_pattern().is_match(trimmed) {
        return Err(FieldViolation::new(
            "full_name",
            "full_name may only contain letters, spaces, hyphens, apostrophes, and periods.",
        ));
    }
    if trimmed.split_whitespace().count() < 2 {
        return Err(FieldViolation::new(
            "full_name",
            "full_name must include both a first name and a surname.",
        ));
    }

    Ok(title_case(trimmed))
}

/// Validates an email address: `local@domain` where the domain contains a dot.
fn validate_email(raw: &str) -> Result<String, FieldViolation> {
    if !email_pattern().is_match(raw) {
        return Err(FieldViolation::new(
            "email",
            "email must be a valid email address.",
        ));
    }
    Ok(raw.to_string())
}

/// Validates a phone number: its decimal rendering must be 7-15 digits.
/// Negative values render with a leading sign and therefore fail.
fn validate_phone(raw: i64) -> Result<i64, FieldViolation> {
    let rendered = raw.to_string();
    let digits = rendered.len();
    if !rendered.chars().all(|c| c.is_ascii_digit())
        || !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
    {
        return Err(FieldViolation::new(
            "phone",
            format!(
                "phone must contain between {} and {} digits.",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            ),
        ));
    }
    Ok(raw)
}

/// Validates and normalizes a message: trims, rejects empty, and enforces the
/// character and word budgets.
fn normalize_message(raw: &str) -> Result<String, FieldViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new("message", "message must not be empty."));
    }
    if trimmed.chars().count() > MESSAGE_MAX_CHARS {
        return Err(FieldViolation::new(
            "message",
            format!("message must not exceed {} characters.", MESSAGE_MAX_CHARS),
        ));
    }
    if trimmed.split_whitespace().count() > MESSAGE_MAX_WORDS {
        return Err(FieldViolation::new(
            "message",
            format!("message must not exceed {} words.", MESSAGE_MAX_WORDS),
        ));
    }
    Ok(trimmed.to_string())
}

/// Title-cases a name: a letter that follows a non-letter is uppercased, any
/// letter that follows a letter is lowercased. Hyphens, apostrophes, and
/// periods act as word boundaries, so "o'brien-garcía" becomes
/// "O'Brien-García".
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_letter = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

//////////////////////////////////////////// Entry points //////////////////////////////////////////////

/// Validates a create payload, returning the normalized form or an error
/// aggregating one violation per failing field.
pub fn validate_create(request: &CreateFormRequest) -> Result<NewForm, ValidationError> {
    let mut violations = Vec::new();

    let full_name = normalize_full_name(&request.full_name)
        .map_err(|v| violations.push(v))
        .ok();
    let email = validate_email(&request.email)
        .map_err(|v| violations.push(v))
        .ok();
    let phone = validate_phone(request.phone)
        .map_err(|v| violations.push(v))
        .ok();
    let message = normalize_message(&request.message)
        .map_err(|v| violations.push(v))
        .ok();

    match (full_name, email, phone, message) {
        (Some(full_name), Some(email), Some(phone), Some(message)) => Ok(NewForm {
            full_name,
            email,
            phone,
            message,
        }),
        _ => Err(ValidationError { violations }),
    }
}

/// Validates an update payload. Absent fields stay absent; present fields are
/// validated with the same rules as creation.
pub fn validate_update(request: &UpdateFormRequest) -> Result<FormChanges, ValidationError> {
    let mut violations = Vec::new();
    let mut changes = FormChanges::default();

    if let Some(full_name) = &request.full_name {
        match normalize_full_name(full_name) {
            Ok(normalized) => changes.full_name = Some(normalized),
            Err(v) => violations.push(v),
        }
    }
    if let Some(email) = &request.email {
        match validate_email(email) {
            Ok(validated) => changes.email = Some(validated),
            Err(v) => violations.push(v),
        }
    }
    if let Some(phone) = request.phone {
        match validate_phone(phone) {
            Ok(validated) => changes.phone = Some(validated),
            Err(v) => violations.push(v),
        }
    }
    if let Some(message) = &request.message {
        match normalize_message(message) {
            Ok(normalized) => changes.message = Some(normalized),
            Err(v) => violations.push(v),
        }
    }

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateFormRequest {
        CreateFormRequest {
            full_name: "ana gomez".to_string(),
            email: "ana@x.com".to_string(),
            phone: 3001234567,
            message: "hola".to_string(),
        }
    }

    #[test]
    fn valid_create_is_normalized() {
        let form = validate_create(&valid_request()).unwrap();
        assert_eq!(form.full_name, "Ana Gomez");
        assert_eq!(form.email, "ana@x.com");
        assert_eq!(form.phone, 3001234567);
        assert_eq!(form.message, "hola");
    }

    #[test]
    fn full_name_is_trimmed_and_title_cased() {
        let mut request = valid_request();
        request.full_name = "  maría del carmen lópez  ".to_string();
        let form = validate_create(&request).unwrap();
        assert_eq!(form.full_name, "María Del Carmen López");
    }

    #[test]
    fn full_name_preserves_word_boundaries() {
        let mut request = valid_request();
        request.full_name = "o'brien smith-jones".to_string();
        let form = validate_create(&request).unwrap();
        assert_eq!(form.full_name, "O'Brien Smith-Jones");
    }

    #[test]
    fn single_token_name_mentions_surname_rule() {
        let mut request = valid_request();
        request.full_name = "Ana".to_string();
        let err = validate_create(&request).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "full_name");
        assert!(err.violations()[0].rule.contains("surname"));
    }

    #[test]
    fn full_name_rejects_digits() {
        let mut request = valid_request();
        request.full_name = "Ana G0mez".to_string();
        let err = validate_create(&request).unwrap_err();
        assert_eq!(err.violations()[0].field, "full_name");
        assert!(err.violations()[0].rule.contains("letters"));
    }

    #[test]
    fn full_name_rejects_too_short() {
        let mut request = valid_request();
        request.full_name = "a".to_string();
        let err = validate_create(&request).unwrap_err();
        assert!(err.violations()[0].rule.contains("at least 2"));
    }

    #[test]
    fn full_name_rejects_too_long() {
        let mut request = valid_request();
        request.full_name = format!("{} {}", "a".repeat(200), "b".repeat(200));
        let err = validate_create(&request).unwrap_err();
        assert!(err.violations()[0].rule.contains("255"));
    }

    #[test]
    fn accented_names_are_accepted() {
        let mut request = valid_request();
        request.full_name = "ángel muñoz".to_string();
        let form = validate_create(&request).unwrap();
        assert_eq!(form.full_name, "Ángel Muñoz");
    }

    #[test]
    fn phone_with_three_digits_fails_length_rule() {
        let mut request = valid_request();
        request.phone = 123;
        let err = validate_create(&request).unwrap_err();
        assert_eq!(err.violations()[0].field, "phone");
        assert!(err.violations()[0].rule.contains("between 7 and 15 digits"));
    }

    #[test]
    fn phone_boundaries() {
        let mut request = valid_request();
        request.phone = 1_000_000; // 7 digits
        assert!(validate_create(&request).is_ok());
        request.phone = 999_999_999_999_999; // 15 digits
        assert!(validate_create(&request).is_ok());
        request.phone = 999_999; // 6 digits
        assert!(validate_create(&request).is_err());
        request.phone = 1_000_000_000_000_000; // 16 digits
        assert!(validate_create(&request).is_err());
    }

    #[test]
    fn negative_phone_fails() {
        let mut request = valid_request();
        request.phone = -3001234567;
        assert!(validate_create(&request).is_err());
    }

    #[test]
    fn message_is_trimmed() {
        let mut request = valid_request();
        request.message = "  hola  ".to_string();
        let form = validate_create(&request).unwrap();
        assert_eq!(form.message, "hola");
    }

    #[test]
    fn whitespace_only_message_fails_minimum_rule() {
        let mut request = valid_request();
        request.message = "   ".to_string();
        let err = validate_create(&request).unwrap_err();
        assert_eq!(err.violations()[0].field, "message");
        assert!(err.violations()[0].rule.contains("empty"));
    }

    #[test]
    fn message_over_char_budget_fails() {
        let mut request = valid_request();
        request.message = "x".repeat(501);
        let err = validate_create(&request).unwrap_err();
        assert!(err.violations()[0].rule.contains("500 characters"));
    }

    #[test]
    fn message_over_word_budget_fails() {
        // 501 one-character words need 1001 characters with separators, so
        // the character budget necessarily trips first; the violation still
        // lands on the message field.
        let mut request = valid_request();
        request.message = vec!["a"; 501].join(" ");
        let err = validate_create(&request).unwrap_err();
        assert_eq!(err.violations()[0].field, "message");
    }

    #[test]
    fn invalid_email_fails() {
        for bad in ["not-an-email", "missing@dot", "@nolocal.com", "spaces in@x.com"] {
            let mut request = valid_request();
            request.email = bad.to_string();
            let err = validate_create(&request).unwrap_err();
            assert_eq!(err.violations()[0].field, "email", "input: {}", bad);
        }
    }

    #[test]
    fn multiple_failures_aggregate_one_violation_per_field() {
        let request = CreateFormRequest {
            full_name: "Ana".to_string(),
            email: "broken".to_string(),
            phone: 123,
            message: "  ".to_string(),
        };
        let err = validate_create(&request).unwrap_err();
        assert_eq!(err.violations().len(), 4);
        assert_eq!(err.messages().len(), 4);
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["full_name", "email", "phone", "message"]);
    }

    #[test]
    fn update_with_no_fields_is_empty_changes() {
        let changes = validate_update(&UpdateFormRequest::default()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let request = UpdateFormRequest {
            message: Some("nuevo mensaje".to_string()),
            ..UpdateFormRequest::default()
        };
        let changes = validate_update(&request).unwrap();
        assert_eq!(changes.message.as_deref(), Some("nuevo mensaje"));
        assert!(changes.full_name.is_none());
        assert!(changes.email.is_none());
        assert!(changes.phone.is_none());
    }

    #[test]
    fn update_applies_same_rules_as_create() {
        let request = UpdateFormRequest {
            full_name: Some("solo".to_string()),
            ..UpdateFormRequest::default()
        };
        let err = validate_update(&request).unwrap_err();
        assert!(err.violations()[0].rule.contains("surname"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let form = validate_create(&valid_request()).unwrap();
        let request = CreateFormRequest {
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone: form.phone,
            message: form.message.clone(),
        };
        let again = validate_create(&request).unwrap();
        assert_eq!(form, again);
    }

    #[test]
    fn title_case_examples() {
        assert_eq!(title_case("ana gomez"), "Ana Gomez");
        assert_eq!(title_case("ANA GOMEZ"), "Ana Gomez");
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("garcía-lópez"), "García-López");
        assert_eq!(title_case("j. r. smith"), "J. R. Smith");
    }
}
