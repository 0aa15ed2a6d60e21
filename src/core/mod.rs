pub mod convert;
pub mod document;
pub mod error;
pub mod extract;
pub mod registry;
pub mod resolve;
pub mod schema;
