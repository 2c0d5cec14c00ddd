//! Safe SQL builder: identifiers are fixed columns, values are parameters.

mod builder;
pub mod params;
pub use builder::*;
