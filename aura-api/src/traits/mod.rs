pub mod quote_source;
pub mod store;
