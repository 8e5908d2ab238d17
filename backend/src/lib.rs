//! Geonotes backend: a shared map of user-owned points behind a JSON API.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, ports and
//! services; [`inbound`] adapts HTTP requests onto the driving ports;
//! [`outbound`] implements the driven ports over PostgreSQL, memory and
//! Argon2. [`server`] wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
