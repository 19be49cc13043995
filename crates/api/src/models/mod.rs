pub mod artifact;
pub mod filter;
pub mod repository;

pub use artifact::*;
pub use filter::*;
pub use repository::*;
