pub mod codec;
pub mod manager;
pub mod store;
