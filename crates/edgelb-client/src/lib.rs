//! Edge-LB API Client
//!
//! A Rust client library for the Edge-LB pool management API.
//! The pool specification core only needs to look pools up by name, so the
//! client surface is intentionally small.
//!
//! # Example
//!
//! ```no_run
//! use edgelb_client::{EdgeLbClient, EdgeLbError};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EdgeLbClient::new(
//!     "https://leader.mesos/service/edgelb".to_string(),
//!     Some("your-acs-token".to_string()),
//! )?;
//!
//! match client.get_pool("dev--kubernetes01--a1b2c").await {
//!     Ok(pool) => println!("pool {} already exists", pool.name),
//!     Err(EdgeLbError::NotFound(_)) => println!("name is free"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod edgelb_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::EdgeLbClient;
pub use error::EdgeLbError;
pub use models::*;
pub use edgelb_trait::EdgeLbClientTrait;
#[cfg(feature = "test-util")]
pub use mock::MockEdgeLbClient;
