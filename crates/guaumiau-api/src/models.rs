// Wire models shared by the auth and pet endpoints.
//
// Field names follow the backend's JSON (camelCase, `type` for the pet
// kind). Optional ids are omitted from request bodies until the server
// assigns them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A pet as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Server-assigned id; `None` until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    /// Free-text kind. See [`PetKind`] for the well-known values.
    #[serde(rename = "type")]
    pub pet_type: String,
    #[serde(
        rename = "ownerId",
        alias = "userId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<i64>,
}

impl Pet {
    /// A pet that has not been persisted yet.
    pub fn new(name: impl Into<String>, pet_type: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            pet_type: pet_type.into(),
            owner_id: None,
        }
    }

    /// Builder-style id setter.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Copy of this pet with any client-side id removed.
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    /// Parse the free-text type into a well-known kind (unknown → `Other`).
    pub fn kind(&self) -> PetKind {
        self.pet_type.trim().parse().unwrap_or(PetKind::Other)
    }
}

/// Well-known pet kinds offered by the app. The backend stores free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum PetKind {
    #[strum(to_string = "Perro", serialize = "Dog")]
    Dog,
    #[strum(to_string = "Gato", serialize = "Cat")]
    Cat,
    #[strum(to_string = "Ave", serialize = "Bird")]
    Bird,
    #[strum(to_string = "Otro", serialize = "Other")]
    Other,
}

/// An account, as sent to `auth/register` and returned from `auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    /// Write-only: sent on registration, usually absent on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

/// Body of `POST auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_pet_serializes_without_id() {
        let pet = Pet::new("Firulais", "Perro");
        let value = serde_json::to_value(&pet).unwrap();
        assert_eq!(value, json!({ "name": "Firulais", "type": "Perro" }));
    }

    #[test]
    fn pet_accepts_legacy_owner_key() {
        let pet: Pet =
            serde_json::from_value(json!({ "id": 2, "name": "Misha", "type": "Gato", "userId": 456 }))
                .unwrap();
        assert_eq!(pet.id, Some(2));
        assert_eq!(pet.owner_id, Some(456));
        assert_eq!(pet.kind(), PetKind::Cat);
    }

    #[test]
    fn null_id_reads_as_none() {
        let pet: Pet =
            serde_json::from_value(json!({ "id": null, "name": "Piolín", "type": "Ave" })).unwrap();
        assert_eq!(pet.id, None);
        assert_eq!(pet.kind(), PetKind::Bird);
    }

    #[test]
    fn kind_parsing_is_lenient() {
        assert_eq!(Pet::new("a", "perro").kind(), PetKind::Dog);
        assert_eq!(Pet::new("a", "Cat").kind(), PetKind::Cat);
        assert_eq!(Pet::new("a", "Hurón").kind(), PetKind::Other);
        assert_eq!(PetKind::Dog.to_string(), "Perro");
    }

    #[test]
    fn user_password_is_omitted_when_absent() {
        let user = User {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            ..User::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("id").is_none());
        assert_eq!(value["pets"], json!([]));
    }
}
