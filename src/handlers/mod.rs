// handlers/mod.rs - HTTP handlers
//
// users:  the users resource (public reads, guarded writes)
// system: service info and health
pub mod system;
pub mod users;

pub use system::{health, root};
