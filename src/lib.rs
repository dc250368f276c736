//! A Rust SDK for the Nextcloud OCS user profile API.
//!
//! If you're just getting started, take a look at the [`Client`].
//! The response envelope and its payload types live in [`ocs`].
//!
//! # Examples
//! ```no_run
//! use ocs_rs::{Client, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!
//!     // The profile fields the current user may edit
//!     let fields = client.users().editable_fields().await?;
//!     dbg!(fields.data);
//!
//!     // The current user's profile
//!     let me = client.users().current().await?;
//!     dbg!(me.display_name);
//!
//!     Ok(())
//! }
//! ```
pub mod client;
pub mod error;
mod http;
pub mod ocs;
mod serde;

pub mod users;

pub use client::Client;
pub use error::Error;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

#[cfg(all(feature = "default-tls", feature = "native-tls"))]
compile_error!("Feature \"default-tls\" and \"native-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "native-tls", feature = "rustls-tls"))]
compile_error!("Feature \"native-tls\" and \"rustls-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "rustls-tls", feature = "default-tls"))]
compile_error!("Feature \"rustls-tls\" and \"default-tls\" cannot be enabled at the same time");
