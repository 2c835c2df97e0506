mod error;
mod traits;

pub mod memory;

pub use error::StoreError;
pub use memory::InMemoryCheeseStore;
pub use traits::CheeseStore;
