pub mod config;
pub mod health;
pub mod server;

pub use config::{get_config, reload_config, update_config};
pub use health::health_check;
pub use server::get_server_status;
