//! Async Rust client for the pfSense REST management API.
//!
//! Binds the pfSense-API package's endpoints (system, interfaces, DHCP,
//! firewall, routing, users, DNS resolver) to typed request/response
//! structures. Authentication, token refresh, and error translation are
//! handled by the client; everything else is one method per endpoint.
//!
//! ```no_run
//! use pfsense_api::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pfsense_api::Error> {
//!     let client = Client::with_jwt_auth(
//!         "https://192.168.1.1",
//!         "admin",
//!         "pfsense".to_string().into(),
//!     )?;
//!
//!     for lease in client.list_dhcp_leases().await? {
//!         println!("{} -> {}", lease.mac, lease.ip);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod dhcp;
pub mod error;
pub mod firewall;
pub mod interfaces;
pub mod json;
pub mod routing;
pub mod status;
pub mod system;
pub mod transport;
pub mod unbound;
pub mod users;

pub use auth::AuthMode;
pub use client::{Client, Config};
pub use error::{ApiErrorKind, Error};
pub use transport::{TlsMode, TransportConfig};
