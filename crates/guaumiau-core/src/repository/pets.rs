use std::sync::Arc;

use guaumiau_api::{ApiClient, Pet};

use crate::error::CoreError;
use crate::messages;

/// Pass-through CRUD over the pet gateway.
#[derive(Clone)]
pub struct PetRepository {
    api: Arc<ApiClient>,
}

impl PetRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Pet>, CoreError> {
        self.api
            .list_pets()
            .await
            .map_err(|e| CoreError::from_api(e, messages::LOAD_PETS_FAILED))
    }

    /// Create a pet; returns the server's copy with its assigned id.
    pub async fn add(&self, pet: &Pet) -> Result<Pet, CoreError> {
        self.api
            .create_pet(pet)
            .await
            .map_err(|e| CoreError::from_api(e, messages::ADD_PET_FAILED))?
            .ok_or_else(empty_reply)
    }

    pub async fn update(&self, id: i64, pet: &Pet) -> Result<Pet, CoreError> {
        self.api
            .update_pet(id, pet)
            .await
            .map_err(|e| CoreError::from_api(e, messages::UPDATE_PET_FAILED))?
            .ok_or_else(empty_reply)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, CoreError> {
        self.api
            .delete_pet(id)
            .await
            .map_err(|e| CoreError::from_api(e, messages::DELETE_PET_FAILED))?;
        Ok(true)
    }
}

fn empty_reply() -> CoreError {
    CoreError::EmptyResponse {
        message: messages::EMPTY_RESPONSE.into(),
    }
}
