// guaumiau-api: Async Rust client for the Guau&Miau REST backend

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod pets;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{LoginRequest, Pet, PetKind, User};
pub use transport::{TlsMode, TransportConfig};
