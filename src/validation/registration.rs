use crate::core::error::{Field, ValidationError};
use crate::models::user::{Club, NewUser};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

pub const USERNAME_MIN_LEN: usize = 6;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 36;

static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{8,}$").expect("valid password charset pattern"));
static HAS_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]").expect("valid letter pattern"));
static HAS_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("valid digit pattern"));

/// Body of a registration request
///
/// Every field is kept as raw JSON so the rule chain decides what counts as
/// missing or malformed, rather than the deserializer. Fields are only ever
/// read by name: a body that is not a JSON object carries none of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Value")]
pub struct RegistrationPayload {
    pub username: Option<Value>,
    pub password: Option<Value>,
    pub favorite_club: Option<Value>,

    /// Accepted as-is, `false` when absent
    pub news_letter: Value,
}

fn default_news_letter() -> Value {
    Value::Bool(false)
}

impl Default for RegistrationPayload {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            favorite_club: None,
            news_letter: default_news_letter(),
        }
    }
}

impl From<Value> for RegistrationPayload {
    fn from(body: Value) -> Self {
        let Value::Object(mut fields) = body else {
            return Self::default();
        };

        Self {
            username: fields.remove(Field::Username.key()),
            password: fields.remove(Field::Password.key()),
            favorite_club: fields.remove(Field::FavoriteClub.key()),
            news_letter: fields.remove("newsLetter").unwrap_or_else(default_news_letter),
        }
    }
}

struct Rule {
    passes: fn(&RegistrationPayload) -> bool,
    error: ValidationError,
}

/// Checked top to bottom; the first failing rule is the one reported.
/// Club membership comes last, in `validate`, where the parsed club is kept.
const RULES: &[Rule] = &[
    Rule {
        passes: |p| is_present(p.get(Field::Username)),
        error: ValidationError::MissingField(Field::Username),
    },
    Rule {
        passes: |p| is_present(p.get(Field::Password)),
        error: ValidationError::MissingField(Field::Password),
    },
    Rule {
        passes: |p| is_present(p.get(Field::FavoriteClub)),
        error: ValidationError::MissingField(Field::FavoriteClub),
    },
    Rule {
        passes: |p| is_string(p.get(Field::Username)),
        error: ValidationError::InvalidType(Field::Username),
    },
    Rule {
        passes: |p| is_string(p.get(Field::Password)),
        error: ValidationError::InvalidType(Field::Password),
    },
    Rule {
        passes: |p| is_string(p.get(Field::FavoriteClub)),
        error: ValidationError::InvalidType(Field::FavoriteClub),
    },
    Rule {
        passes: |p| length_within(p.text(Field::Username), USERNAME_MIN_LEN, USERNAME_MAX_LEN),
        error: ValidationError::LengthOutOfRange {
            field: Field::Username,
            min: USERNAME_MIN_LEN,
            max: USERNAME_MAX_LEN,
        },
    },
    Rule {
        passes: |p| length_within(p.text(Field::Password), PASSWORD_MIN_LEN, PASSWORD_MAX_LEN),
        error: ValidationError::LengthOutOfRange {
            field: Field::Password,
            min: PASSWORD_MIN_LEN,
            max: PASSWORD_MAX_LEN,
        },
    },
    Rule {
        passes: |p| meets_password_policy(p.text(Field::Password)),
        error: ValidationError::PasswordPolicyViolation,
    },
];

impl RegistrationPayload {
    /// Run the rule chain and produce the record-to-be-created.
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        if let Some(rule) = RULES.iter().find(|rule| !(rule.passes)(&self)) {
            return Err(rule.error.clone());
        }

        let favorite_club = self
            .text(Field::FavoriteClub)
            .parse::<Club>()
            .map_err(|_| ValidationError::InvalidEnumValue(Field::FavoriteClub))?;

        Ok(NewUser {
            username: self.text(Field::Username).to_string(),
            password: self.text(Field::Password).to_string(),
            favorite_club,
            news_letter: self.news_letter,
        })
    }

    fn get(&self, field: Field) -> Option<&Value> {
        match field {
            Field::Username => self.username.as_ref(),
            Field::Password => self.password.as_ref(),
            Field::FavoriteClub => self.favorite_club.as_ref(),
        }
    }

    // Empty for absent or non-string values; the type rules run before anything reads text.
    fn text(&self, field: Field) -> &str {
        self.get(field).and_then(Value::as_str).unwrap_or_default()
    }
}

/// Absent, `null`, `""`, `false` and `0` all count as not provided
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn is_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)))
}

/// Length in Unicode scalar values, so `"é"` and `"😀"` each count as one
fn length_within(text: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&text.chars().count())
}

/// Letters and digits only, at least eight of them, with one of each kind
pub fn meets_password_policy(password: &str) -> bool {
    PASSWORD_CHARSET.is_match(password) && HAS_LETTER.is_match(password) && HAS_DIGIT.is_match(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> RegistrationPayload {
        serde_json::from_value(value).unwrap()
    }

    fn valid() -> Value {
        json!({
            "username": "sallyStudent2",
            "password": "abc12345",
            "favoriteClub": "Ogden Curling Club",
        })
    }

    fn with(field: &str, value: Value) -> RegistrationPayload {
        let mut body = valid();
        body[field] = value;
        payload(body)
    }

    #[test]
    fn test_valid_payload_defaults_news_letter() {
        let user = payload(valid()).validate().unwrap();

        assert_eq!(user.username, "sallyStudent2");
        assert_eq!(user.password, "abc12345");
        assert_eq!(user.favorite_club, Club::OgdenCurlingClub);
        assert_eq!(user.news_letter, json!(false));
    }

    #[test]
    fn test_news_letter_kept_as_submitted() {
        let user = with("newsLetter", json!("yes please")).validate().unwrap();
        assert_eq!(user.news_letter, json!("yes please"));

        let user = with("newsLetter", json!(true)).validate().unwrap();
        assert_eq!(user.news_letter, json!(true));

        let user = with("newsLetter", Value::Null).validate().unwrap();
        assert_eq!(user.news_letter, Value::Null);
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let err = payload(json!({})).validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Username));

        let err = payload(json!({ "username": "sallyStudent2" })).validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Password));

        let err = payload(json!({ "username": "sallyStudent2", "password": "abc12345" }))
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::FavoriteClub));

        // username wins even when it is the only one missing among bad values
        let err = payload(json!({ "password": "x", "favoriteClub": "Nowhere" }))
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Username));

        let err = payload(json!({ "username": "bob" })).validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Password));
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        for value in [json!(""), Value::Null, json!(false), json!(0)] {
            let err = with("username", value.clone()).validate().unwrap_err();
            assert_eq!(err, ValidationError::MissingField(Field::Username), "value {}", value);
        }
    }

    #[test]
    fn test_non_string_values_rejected() {
        let err = with("username", json!(12345678)).validate().unwrap_err();
        assert_eq!(err, ValidationError::InvalidType(Field::Username));

        let err = with("password", json!(["abc12345"])).validate().unwrap_err();
        assert_eq!(err, ValidationError::InvalidType(Field::Password));

        let err = with("favoriteClub", json!({ "name": "Ogden Curling Club" }))
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidType(Field::FavoriteClub));
    }

    #[test]
    fn test_username_length_bounds() {
        let expected = ValidationError::LengthOutOfRange {
            field: Field::Username,
            min: 6,
            max: 20,
        };

        for name in ["b", "bob", "sally"] {
            assert_eq!(with("username", json!(name)).validate().unwrap_err(), expected);
        }
        assert_eq!(
            with("username", json!("a".repeat(21))).validate().unwrap_err(),
            expected
        );

        assert!(with("username", json!("sallys")).validate().is_ok());
        assert!(with("username", json!("a".repeat(20))).validate().is_ok());
    }

    #[test]
    fn test_username_length_counts_characters() {
        // 11 characters in 22 bytes, then 4 characters in 8 bytes
        assert!(with("username", json!("é".repeat(11))).validate().is_ok());
        assert!(with("username", json!("é".repeat(4))).validate().is_err());

        // one count per character even outside the basic multilingual plane
        assert!(with("username", json!("😀".repeat(6))).validate().is_ok());
        assert!(with("username", json!("😀".repeat(3))).validate().is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        let expected = ValidationError::LengthOutOfRange {
            field: Field::Password,
            min: 8,
            max: 36,
        };

        assert_eq!(with("password", json!("abc1234")).validate().unwrap_err(), expected);
        let long = format!("{}1", "a".repeat(36));
        assert_eq!(with("password", json!(long)).validate().unwrap_err(), expected);

        let max = format!("{}1", "a".repeat(35));
        assert!(with("password", json!(max)).validate().is_ok());
    }

    #[test]
    fn test_password_policy() {
        for password in ["onlyletters", "ABCDEFGHIJ", "12345678", "0000000000000"] {
            assert_eq!(
                with("password", json!(password)).validate().unwrap_err(),
                ValidationError::PasswordPolicyViolation,
                "password {}",
                password
            );
        }

        // symbols and spaces are outside the allowed charset
        for password in ["abc12345!", "abc 12345", "pässw0rd1"] {
            assert_eq!(
                with("password", json!(password)).validate().unwrap_err(),
                ValidationError::PasswordPolicyViolation,
                "password {}",
                password
            );
        }

        for password in ["abc12345", "1abcdefg", "A1B2C3D4", "c00d1ng1sc00l"] {
            assert!(with("password", json!(password)).validate().is_ok(), "password {}", password);
        }
    }

    #[test]
    fn test_meets_password_policy() {
        assert!(meets_password_policy("veryg00dpassw0rd"));
        assert!(!meets_password_policy("abc1234"));
        assert!(!meets_password_policy("abcdefgh"));
        assert!(!meets_password_policy("١٢٣٤٥٦٧٨abc"));
    }

    #[test]
    fn test_club_must_be_listed() {
        for club in ["Ogden", "ogden curling club", "Provo Curling Club"] {
            assert_eq!(
                with("favoriteClub", json!(club)).validate().unwrap_err(),
                ValidationError::InvalidEnumValue(Field::FavoriteClub)
            );
        }

        for club in Club::ALL {
            let user = with("favoriteClub", json!(club.name())).validate().unwrap();
            assert_eq!(user.favorite_club, club);
        }
    }

    #[test]
    fn test_first_failure_wins() {
        // short username and bad password: username reported
        let err = payload(json!({
            "username": "bob",
            "password": "short",
            "favoriteClub": "Nowhere",
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, ValidationError::LengthOutOfRange { field: Field::Username, .. }));

        // password policy checked before club membership
        let err = payload(json!({
            "username": "sallyStudent2",
            "password": "onlyletters",
            "favoriteClub": "Nowhere",
        }))
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::PasswordPolicyViolation);
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        let from_array = payload(json!(["sallyStudent2", "abc12345", "Ogden Curling Club"]));
        assert!(from_array.username.is_none());
        assert_eq!(from_array.news_letter, json!(false));
        assert_eq!(
            from_array.validate().unwrap_err(),
            ValidationError::MissingField(Field::Username)
        );

        let from_string = payload(json!("sallyStudent2"));
        assert!(from_string.username.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut body = valid();
        body["favorite_club"] = json!("Provo Curling Club");
        body["role"] = json!("admin");
        assert!(payload(body).validate().is_ok());
    }

    #[test]
    fn test_default_payload_is_missing_username() {
        let err = RegistrationPayload::default().validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Username));
    }
}
