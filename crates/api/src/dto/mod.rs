pub mod rules;
pub mod server;

pub use rules::RulesDto;
pub use server::ServerStatusResponse;
