//! Collaborators around the DPR portal hero.
//!
//! Login against the portal's authentication service, the resulting session
//! and its change signal, the navigation bar, and map links. Browser concerns
//! (routing, scrolling, opening windows) are reached through the small
//! [`Navigator`] and [`Opener`] traits so hosts can plug in their own.

pub mod auth;
pub mod config;
pub mod error;
pub mod login;
pub mod maps;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod types;

pub use auth::AuthClient;
pub use config::PortalConfig;
pub use error::{ClientError, StorageError};
pub use login::{LoginForm, LoginOutcome};
pub use maps::{MapButton, MapTarget, Opener};
pub use navigation::{NavigationBar, Navigator};
pub use session::AuthState;
pub use storage::{ClientStorage, MemoryStorage, StorageEvent};
pub use types::{LoginRequest, LoginResponse, User};
