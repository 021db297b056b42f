pub mod backend;
pub mod value;
