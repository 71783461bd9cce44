pub mod engine;
pub mod export;
pub mod grid;
pub mod input;

pub use crate::domain::model::GridSnapshot;
pub use crate::domain::ports::{AmountSource, Storage};
pub use crate::utils::error::Result;
