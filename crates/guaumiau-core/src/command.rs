// ── Command API ──
//
// UI commands as data. `dispatch` runs each one as its own task so the
// caller (a render loop) never waits on network I/O.

use guaumiau_api::Pet;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::AppController;

/// Every asynchronous operation the UI can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AppStart,
    Login,
    Logout,
    Register,
    LoadPets,
    AddPet(Pet),
    UpdatePet { id: i64, pet: Pet },
    DeletePet { id: i64 },
}

impl AppController {
    /// Run `cmd` to completion on the current task.
    pub async fn execute(&self, cmd: Command) {
        debug!(?cmd, "executing command");
        match cmd {
            Command::AppStart => self.on_app_start().await,
            Command::Login => self.login().await,
            Command::Logout => self.logout().await,
            Command::Register => self.register().await,
            Command::LoadPets => self.load_pets().await,
            Command::AddPet(pet) => self.add_pet(pet).await,
            Command::UpdatePet { id, pet } => self.update_pet(id, pet).await,
            Command::DeletePet { id } => self.delete_pet(id).await,
        }
    }

    /// Spawn `cmd` as an independent task on the tokio runtime.
    ///
    /// Concurrent commands are not sequenced: whichever finishes last
    /// writes the final state of a shared container.
    pub fn dispatch(&self, cmd: Command) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move { controller.execute(cmd).await })
    }
}
