//! # System Lifecycle
//!
//! Starts the six collection actors, wires them together and stops them again.
//!
//! Actors are created first and get their dependencies when they are run. Only the Area
//! actor has one: it runs with a [`SchemeClient`](crate::clients::SchemeClient) as its
//! context so that deleting an area can purge its schemes. Nothing depends on the Area
//! actor in return, so the graph is acyclic and dropping the clients is enough to shut
//! everything down.
//!
//! ```rust,ignore
//! let system = StorefrontSystem::start(&config);
//! system.seed(&config.public_base_url, &config.seed_admin_password).await;
//! // ... serve requests through system.resolver / system.workflow / system.auth ...
//! system.shutdown().await?;
//! ```
//!
//! [`setup_tracing`] installs the log subscriber; see the [`tracing`] module.

pub mod system;
pub mod tracing;

pub use self::system::*;
pub use self::tracing::setup_tracing;
