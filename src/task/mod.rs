//! Owner-scoped reminder tasks.
//!
//! A task is created by resolving chat date/time tokens into a timestamp and
//! inserting the result; it is listed while its due time lies in the future
//! and removed by an explicit, owner-checked delete. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
