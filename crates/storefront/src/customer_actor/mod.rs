//! # Customer Actor
//!
//! Keeps self-registered customers. The normalized email is the unique key, so the
//! actor itself is the final word on "email already registered".
//!
//! ## Usage
//!
//! ```rust
//! use storefront::customer_actor;
//! use storefront::model::{CustomerCreate, PasswordHash};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = customer_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let params = CustomerCreate {
//!         username: "Asha".into(),
//!         email: "Asha@Example.com ".into(),
//!         password_hash: PasswordHash("hash".into()),
//!         mobile: "9000000000".into(),
//!         address: "12 Mall Road".into(),
//!         area: None,
//!     };
//!     client.register(params.clone()).await.unwrap();
//!     assert!(client.register(params).await.is_err());
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use resource_actor::ResourceActor;

/// Creates the Customer actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CustomerClient::new(generic_client))
}
