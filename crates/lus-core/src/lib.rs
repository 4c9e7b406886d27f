pub mod error;
pub mod lease;
pub mod types;

pub use error::*;
pub use lease::*;
pub use types::*;
