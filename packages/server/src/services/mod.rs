pub mod catalogue;
pub mod error;
