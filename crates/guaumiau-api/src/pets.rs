// Pet endpoints
//
// Plain CRUD over `/pets`. The server scopes the list to the caller.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Pet;

impl ApiClient {
    /// List the caller's pets.
    ///
    /// `GET pets`. An empty 2xx body reads as an empty list.
    pub async fn list_pets(&self) -> Result<Vec<Pet>, Error> {
        debug!("listing pets");
        Ok(self.get("pets").await?.unwrap_or_default())
    }

    /// Create a pet. Returns the stored pet (with its new id) when echoed.
    ///
    /// `POST pets`
    pub async fn create_pet(&self, pet: &Pet) -> Result<Option<Pet>, Error> {
        debug!(name = %pet.name, "creating pet");
        self.post("pets", pet).await
    }

    /// Replace a pet's fields.
    ///
    /// `PUT pets/{id}`
    pub async fn update_pet(&self, id: i64, pet: &Pet) -> Result<Option<Pet>, Error> {
        debug!(id, "updating pet");
        self.put(&format!("pets/{id}"), pet).await
    }

    /// Delete a pet.
    ///
    /// `DELETE pets/{id}`
    pub async fn delete_pet(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting pet");
        self.delete(&format!("pets/{id}")).await
    }
}
