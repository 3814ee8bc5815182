//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard and expiring overview commands
pub mod dashboard;

/// General utility commands
pub mod general;

/// Product management commands
pub mod product;

/// Stock batch commands
pub mod stock;

// Export commands
pub use dashboard::*;
pub use general::*;
pub use product::*;
pub use stock::*;
