//! Core value types for the Firecracker Stand.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod point;
pub mod price;

pub use id::*;
pub use point::Point;
pub use price::Price;
