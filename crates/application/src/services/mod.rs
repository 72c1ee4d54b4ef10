pub mod config_store;
pub mod query_resolver;

pub use config_store::ConfigStore;
pub use query_resolver::QueryResolver;
