use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationErrors};

/// Identifier assigned by the store on insert.
pub type UserId = i64;

/// A user record as persisted by a [`UserStore`](crate::store::UserStore).
///
/// The `id` is assigned by the store and never changes. Every other field is
/// replaced wholesale by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Validated field set for an insert or a full-replacement update.
///
/// Only [`UserInput::into_new_user`] builds one from a request body, so a
/// `NewUser` that came from a request never has an empty `name` or `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl NewUser {
    /// Creates a new field set.
    ///
    /// # Arguments
    /// * `name` - User's display name
    /// * `email` - User's email address
    /// * `age` - User's age in years
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Attaches a store-assigned id.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// Request body for create and update.
///
/// Every field is optional at the decoding stage so a missing field shows up
/// as a validation failure listing *all* the missing fields, rather than as
/// a decode error naming only the first. An `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserInput {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email must not be empty")
    )]
    pub email: Option<String>,

    #[validate(required(message = "age is required"))]
    pub age: Option<i32>,
}

impl UserInput {
    /// Validates the body and returns the field set to persist.
    pub fn into_new_user(self) -> Result<NewUser, ValidationFailure> {
        self.validate()?;
        match (self.name, self.email, self.age) {
            (Some(name), Some(email), Some(age)) => Ok(NewUser { name, email, age }),
            // validate() rejects every None above
            _ => Err(ValidationFailure::default()),
        }
    }
}

/// Every field of a [`UserInput`] that failed validation, with the reasons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ValidationFailure {
    /// Names of the failing fields, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "Invalid request body");
        }
        write!(f, "Invalid request body: {}", self.field_names().join(", "))
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let reasons = errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                (field.to_string(), reasons)
            })
            .collect();
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> UserInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_input() {
        let input = decode(r#"{"name":"John","email":"email@email.com","age":33}"#);
        let user = input.into_new_user().unwrap();
        assert_eq!(user, NewUser::new("John", "email@email.com", 33));
    }

    #[test]
    fn test_client_supplied_id_is_ignored() {
        let input = decode(r#"{"id":99,"name":"John","email":"a@b.c","age":1}"#);
        let user = input.into_new_user().unwrap().with_id(7);
        assert_eq!(user.id, 7);
    }

    #[test]
    fn test_missing_email_is_reported() {
        let failure = decode(r#"{"name":"John","age":33}"#)
            .into_new_user()
            .unwrap_err();
        assert_eq!(failure.field_names(), vec!["email"]);
        assert_eq!(failure.fields["email"], vec!["email is required".to_string()]);
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let failure = decode(r#"{"name":""}"#).into_new_user().unwrap_err();
        assert_eq!(failure.field_names(), vec!["age", "email", "name"]);
        assert_eq!(failure.fields["name"], vec!["name must not be empty".to_string()]);
        assert_eq!(
            failure.to_string(),
            "Invalid request body: age, email, name"
        );
    }

    #[test]
    fn test_zero_age_is_accepted() {
        let input = decode(r#"{"name":"Baby","email":"b@b.b","age":0}"#);
        assert_eq!(input.into_new_user().unwrap().age, 0);
    }

    #[test]
    fn test_user_json_shape() {
        let user = NewUser::new("John", "email@email.com", 33).with_id(1);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "John", "email": "email@email.com", "age": 33})
        );
    }
}
