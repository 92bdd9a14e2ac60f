use kinde_domain::{normalize_phone, AccessToken, AuthToken, Response, User};
use proptest::prelude::*;

/// Property-based tests for Kinde domain entities

mod phone_properties {
    use super::*;

    proptest! {
        /// Property: a leading +1 is removed exactly once
        #[test]
        fn north_american_prefix_is_stripped(rest in "[0-9+]{0,15}") {
            let phone = format!("+1{}", rest);
            prop_assert_eq!(normalize_phone(&phone), rest);
        }

        /// Property: numbers without the prefix are left alone
        #[test]
        fn other_numbers_are_unchanged(phone in "[0-9+ -]{0,16}") {
            prop_assume!(!phone.starts_with("+1"));
            prop_assert_eq!(normalize_phone(&phone), phone);
        }

        /// Property: a user never stores a phone with the prefix
        #[test]
        fn user_phone_is_always_normalized(phone in "\\+?1?[0-9]{4,12}") {
            let expected = normalize_phone(&phone);
            let user = User::new("a@example.com").with_phone(phone);
            prop_assert_eq!(user.phone(), Some(expected.as_str()));
        }
    }
}

mod response_properties {
    use super::*;

    proptest! {
        /// Property: any code containing a success marker is successful, in any case
        #[test]
        fn success_markers_are_case_insensitive(
            prefix in "[A-Z_]{0,10}",
            marker in prop::sample::select(vec!["ok", "OK", "Updated", "ADDED", "added"]),
            suffix in "[a-z_]{0,10}",
        ) {
            let response = Response {
                code: Some(format!("{}{}{}", prefix, marker, suffix)),
                message: None,
            };
            prop_assert!(response.is_successful());
        }

        /// Property: codes built from letters that cannot spell a marker are failures
        #[test]
        fn codes_without_markers_fail(code in "[bcfghijlmnqrstvwxyz_]{0,20}") {
            let response = Response { code: Some(code), message: None };
            prop_assert!(!response.is_successful());
        }
    }
}

mod token_properties {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    fn jwt(exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("header.{}.signature", payload)
    }

    proptest! {
        /// Property: a token is served from cache strictly before exp - threshold
        #[test]
        fn freshness_boundary_is_exp_minus_threshold(
            exp in 1_000_000i64..2_000_000_000,
            threshold in 0i64..3_600,
            offset in -10_000i64..10_000,
        ) {
            let token = AuthToken::from_access_token(jwt(exp)).unwrap();
            let now = exp - threshold + offset;
            prop_assert_eq!(token.is_fresh_at(now, threshold), offset < 0);
        }

        /// Property: exp survives the JWT round trip regardless of padding
        #[test]
        fn exp_is_decoded_from_payload(exp in 0i64..4_000_000_000) {
            prop_assert_eq!(AccessToken::decode(&jwt(exp)).unwrap().exp, exp);
        }
    }
}
