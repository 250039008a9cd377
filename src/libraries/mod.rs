//! Shared modules used by the services
//!
//! Each sub-module focuses on a specific area like `resources` or `lifecycle`.

pub mod helpers;
pub mod lifecycle;
pub mod resources;
pub mod subscription;

#[cfg(test)]
pub mod testing;
