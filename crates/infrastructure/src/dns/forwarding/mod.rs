pub mod message_builder;
pub mod record_type_map;
pub mod request_parser;

pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use request_parser::{parse_query, ParsedQuery};
