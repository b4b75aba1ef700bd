use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::validation::{validate_email, validate_username};

/// Stored user document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, stored as a BSON UUID in `_id`
    #[serde(
        rename = "_id",
        with = "::mongodb::bson::serde_helpers::uuid_1_as_binary"
    )]
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

impl User {
    /// New user with a time-ordered id
    pub fn new(input: UserInput) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: input.email,
            username: input.username,
        }
    }

    /// Replace the mutable fields, keeping the id
    pub fn apply(&mut self, input: UserInput) {
        self.email = input.email;
        self.username = input.username;
    }
}

/// Request body for creating or replacing a user
///
/// Accepted as JSON or `application/x-www-form-urlencoded`. Missing fields
/// become empty strings and are rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_username"))]
    #[schema(example = "jane")]
    pub username: String,
}

impl UserInput {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
        }
    }
}

/// A single user as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "jane")]
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

/// Body of `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// Join field messages in field order, e.g. `Invalid email address; Username is required`
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{INVALID_EMAIL, INVALID_USERNAME};

    #[test]
    fn test_valid_input_passes() {
        assert!(UserInput::new("a@b.com", "alice").validate().is_ok());
    }

    #[test]
    fn test_invalid_fields_are_reported_in_order() {
        let errors = UserInput::new("not-an-email", "").validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            format!("{}; {}", INVALID_EMAIL, INVALID_USERNAME)
        );
    }

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let input: UserInput = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(input.username, "");

        let errors = input.validate().unwrap_err();
        assert_eq!(validation_message(&errors), INVALID_USERNAME);
    }

    #[test]
    fn test_response_exposes_id_not_underscore_id() {
        let user = User::new(UserInput::new("a@b.com", "alice"));
        let id = user.id;
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["id"], id.to_string());
        assert!(json.get("_id").is_none());
        assert_eq!(json["email"], "a@b.com");
    }

    #[test]
    fn test_stored_document_keys_id_as_binary_uuid() {
        use mongodb::bson::{self, Bson, spec::BinarySubtype};

        let user = User::new(UserInput::new("a@b.com", "alice"));
        let doc = bson::to_document(&user).unwrap();

        assert!(doc.get("id").is_none());
        assert!(matches!(
            doc.get("_id"),
            Some(Bson::Binary(bin)) if bin.subtype == BinarySubtype::Uuid
        ));
        assert_eq!(bson::from_document::<User>(doc).unwrap(), user);

        // Only `_id` names the key
        let keyed_by_id = bson::doc! {
            "id": bson::Uuid::from(user.id),
            "email": "a@b.com",
            "username": "alice",
        };
        assert!(bson::from_document::<User>(keyed_by_id).is_err());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut user = User::new(UserInput::new("a@b.com", "alice"));
        let id = user.id;
        user.apply(UserInput::new("c@d.org", "carol"));

        assert_eq!(user.id, id);
        assert_eq!(user.email, "c@d.org");
        assert_eq!(user.username, "carol");
    }

    #[test]
    fn test_list_response_preserves_order() {
        let first = User::new(UserInput::new("a@b.com", "a"));
        let second = User::new(UserInput::new("c@d.com", "c"));
        let ids = [first.id, second.id];

        let list = UserListResponse::from(vec![first, second]);
        let listed: Vec<_> = list.users.iter().map(|u| u.id).collect();
        assert_eq!(listed, ids);
    }
}
