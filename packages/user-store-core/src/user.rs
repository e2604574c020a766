//! User record model.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A stored user record.
///
/// Field order here is the field order of the JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Store-assigned v4 UUID, never changed after creation
    pub id: String,
    /// Display name
    pub username: String,
    /// Age as given by the client (integer or fractional)
    pub age: Number,
    /// Ordered hobby list, possibly empty
    pub hobbies: Vec<String>,
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub age: Number,
    pub hobbies: Vec<String>,
}

/// Partial update. Absent fields are left untouched.
///
/// There is no `id` field: unknown keys, `id` included, are ignored when
/// deserializing, and `null` values deserialize as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub age: Option<Number>,
    #[serde(default)]
    pub hobbies: Option<Vec<String>>,
}

impl User {
    /// Builds a record from validated input and an assigned id.
    pub fn from_new(id: String, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            age: new_user.age,
            hobbies: new_user.hobbies,
        }
    }

    /// Overwrites the fields present in `patch`.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(hobbies) = patch.hobbies {
            self.hobbies = hobbies;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> User {
        User {
            id: "8c0d5b3e-2f4a-4c1e-9b7d-0a1b2c3d4e5f".to_string(),
            username: "alice".to_string(),
            age: Number::from(30),
            hobbies: vec!["chess".to_string()],
        }
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "8c0d5b3e-2f4a-4c1e-9b7d-0a1b2c3d4e5f",
                "username": "alice",
                "age": 30,
                "hobbies": ["chess"]
            })
        );
        // Integers must not pick up a fractional part
        let text = serde_json::to_string(&sample()).unwrap();
        assert!(text.contains("\"age\":30,"));
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut user = sample();
        let patch: UserPatch = serde_json::from_value(json!({ "age": 31 })).unwrap();
        user.apply(patch);

        assert_eq!(user.age, Number::from(31));
        assert_eq!(user.username, "alice");
        assert_eq!(user.hobbies, vec!["chess".to_string()]);
    }

    #[test]
    fn test_patch_ignores_id_and_unknown_keys() {
        let patch: UserPatch = serde_json::from_value(json!({
            "id": "00000000-0000-4000-8000-000000000000",
            "email": "a@example.com",
            "username": null
        }))
        .unwrap();
        assert_eq!(patch, UserPatch::default());

        let mut user = sample();
        user.apply(patch);
        assert_eq!(user, sample());
    }

    #[test]
    fn test_patch_rejects_mistyped_field() {
        let result = serde_json::from_value::<UserPatch>(json!({ "age": "old" }));
        assert!(result.is_err());

        let result = serde_json::from_value::<UserPatch>(json!({ "hobbies": [1, 2] }));
        assert!(result.is_err());
    }
}
