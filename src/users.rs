//! Read and edit user profiles.
//!
//! You're probably looking for the [`Client`].
//!
//! # Examples
//! ```no_run
//! use ocs_rs::{Client, Error, users::{Field, Scope}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!
//!     let me = client.users().current().await?;
//!     let fields = client.users().editable_fields().await?;
//!
//!     if fields.data.iter().any(|f| f == Field::Website.as_str()) {
//!         client.users().set_field(&me.id, Field::Website, "https://example.com").await?;
//!         client.users().set_scope(&me.id, Field::Website, Scope::Published).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
mod client;
mod model;

pub use client::Client;
pub use model::{Field, ListOptions, Scope, UserProfile};
