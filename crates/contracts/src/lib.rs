//! Shared types for the Licimar consignment front end.
//!
//! Everything here is plain Rust with no browser dependency: wire DTOs for the
//! REST backend, the validating decode step, and the pure business logic the
//! pages bind to (settlement calculation, order-out cart, debt summary,
//! history filtering).

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
