// ── Repositories ──
//
// Stateless translators between domain calls and gateway calls. Every
// gateway failure leaves here as a `CoreError` with a displayable reason.

mod auth;
mod pets;

pub use auth::{AuthRepository, FALLBACK_SESSION_TOKEN};
pub use pets::PetRepository;
