use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use ruledns_domain::RuleSet;
use std::net::SocketAddr;
use std::str::FromStr;

/// Builds raw query datagrams for tests.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn message(id: u16, name: &str, record_type: RecordType) -> Message {
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
        message
    }

    pub fn query(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
        Self::message(id, name, record_type).to_vec().unwrap()
    }

    pub fn a(id: u16, name: &str) -> Vec<u8> {
        Self::query(id, name, RecordType::A)
    }

    /// Header only, zero questions.
    pub fn empty(id: u16) -> Vec<u8> {
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query);
        message.to_vec().unwrap()
    }
}

pub fn rules_with_upstream(upstream: SocketAddr) -> RuleSet {
    let mut rules = RuleSet::default();
    rules.port = 0;
    rules.upstream = upstream.to_string();
    rules
        .local_db
        .insert("myrouter.local".to_string(), "192.168.1.1".to_string());
    rules.blacklist.insert("ads.com".to_string());
    rules
}
