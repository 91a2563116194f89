use proptest::prelude::*;

use intake::{CreateFormRequest, UpdateFormRequest, validate_create, validate_update};

/// Property test strategies for generating payload fields.
mod strategies {
    use super::*;

    /// Two to four name tokens drawn from the allowed character class.
    pub fn valid_full_name() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-záéíóúüñ]{2,10}", 2..=4).prop_map(|tokens| tokens.join(" "))
    }

    /// A phone number whose decimal rendering has 7 to 15 digits.
    pub fn valid_phone() -> impl Strategy<Value = i64> {
        1_000_000i64..=999_999_999_999_999i64
    }

    /// A phone number with fewer than 7 digits.
    pub fn short_phone() -> impl Strategy<Value = i64> {
        0i64..=999_999i64
    }

    /// A non-empty message within the character budget.
    pub fn valid_message() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ]{1,200}".prop_filter("must survive trimming", |s| !s.trim().is_empty())
    }
}

fn request(full_name: String, phone: i64, message: String) -> CreateFormRequest {
    CreateFormRequest {
        full_name,
        email: "cliente@example.com".to_string(),
        phone,
        message,
    }
}

proptest! {
    #[test]
    fn valid_payloads_pass_validation(
        full_name in strategies::valid_full_name(),
        phone in strategies::valid_phone(),
        message in strategies::valid_message(),
    ) {
        let form = validate_create(&request(full_name, phone, message)).unwrap();
        prop_assert_eq!(form.phone, phone);
        prop_assert_eq!(form.message.as_str(), form.message.trim());
    }

    #[test]
    fn normalized_names_start_words_with_uppercase(
        full_name in strategies::valid_full_name(),
        phone in strategies::valid_phone(),
    ) {
        let form = validate_create(&request(full_name, phone, "hola".to_string())).unwrap();
        for word in form.full_name.split_whitespace() {
            let first = word.chars().next().unwrap();
            prop_assert!(first.is_uppercase(), "word {:?} in {:?}", word, form.full_name);
        }
    }

    #[test]
    fn normalization_is_idempotent(
        full_name in strategies::valid_full_name(),
        phone in strategies::valid_phone(),
        message in strategies::valid_message(),
    ) {
        let once = validate_create(&request(full_name, phone, message)).unwrap();
        let twice = validate_create(&request(
            once.full_name.clone(),
            once.phone,
            once.message.clone(),
        ))
        .unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn short_phones_always_fail(
        full_name in strategies::valid_full_name(),
        phone in strategies::short_phone(),
    ) {
        let err = validate_create(&request(full_name, phone, "hola".to_string())).unwrap_err();
        prop_assert!(err.violations().iter().any(|v| v.field == "phone"));
    }

    #[test]
    fn single_token_names_always_fail(
        token in "[a-z]{2,20}",
        phone in strategies::valid_phone(),
    ) {
        let err = validate_create(&request(token, phone, "hola".to_string())).unwrap_err();
        prop_assert!(err.violations().iter().any(|v| v.field == "full_name"));
    }

    #[test]
    fn update_with_valid_subset_passes(
        message in strategies::valid_message(),
    ) {
        let request = UpdateFormRequest {
            message: Some(message),
            ..UpdateFormRequest::default()
        };
        let changes = validate_update(&request).unwrap();
        prop_assert!(changes.message.is_some());
        prop_assert!(changes.full_name.is_none());
    }
}
