pub mod cheese;
pub mod storage;

pub use cheese::{Cheese, CheeseId, Picture};
pub use storage::{CheeseStore, InMemoryCheeseStore, StoreError};
