pub mod credential;
pub mod item;

pub use credential::Credential;
pub use item::{Item, StockStatus};
