pub mod dao;
pub mod document;
pub mod error;
pub mod id;

pub use dao::EntityStore;
pub use document::{Document, Record, UniqueFields};
pub use error::StoreError;
pub use id::{EntityId, IdError};
