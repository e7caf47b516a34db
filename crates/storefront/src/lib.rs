//! # Storefront
//!
//! A small storefront for dry fruit delivered by area. Administrators curate areas,
//! products and per-area price schemes and move orders through their statuses;
//! customers (or guests) browse the schemes for their area and order.
//!
//! Each collection is a [`ResourceActor`](resource_actor::ResourceActor) on its own task,
//! reached through the typed [`clients`]. On top of them sit three services:
//!
//! - [`auth::AuthGateway`]: sessions for both kinds of principal, and the guards.
//! - [`catalog::SchemeResolver`]: areas, products and schemes.
//! - [`orders::OrderWorkflow`]: single and bulk orders, order status.
//!
//! [`lifecycle::StorefrontSystem`] wires it all up and [`http`] exposes it.

pub mod admin_actor;
pub mod area_actor;
pub mod auth;
pub mod blob;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod orders;
pub mod product_actor;
pub mod scheme_actor;
pub mod seed;
pub mod session;
