use super::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode};
use ruledns_domain::{DnsQuery, DomainError};

/// A decoded inbound query: the full message (needed to echo the id and
/// question back) plus the first question in domain form.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub message: Message,
    pub query: DnsQuery,
}

/// Decodes a datagram into a query. Anything that is not a standard query
/// with at least one question is rejected.
pub fn parse_query(buf: &[u8]) -> Result<ParsedQuery, DomainError> {
    let message = Message::from_vec(buf)
        .map_err(|e| DomainError::MalformedQuery(format!("decode failed: {}", e)))?;

    if message.message_type() != MessageType::Query {
        return Err(DomainError::MalformedQuery(
            "message is a response".to_string(),
        ));
    }
    if message.op_code() != OpCode::Query {
        return Err(DomainError::MalformedQuery(format!(
            "unsupported opcode {:?}",
            message.op_code()
        )));
    }

    let question = message
        .queries()
        .first()
        .ok_or_else(|| DomainError::MalformedQuery("no question section".to_string()))?;

    let query = DnsQuery::new(
        &question.name().to_ascii(),
        RecordTypeMapper::from_hickory(question.query_type()),
    );

    Ok(ParsedQuery { message, query })
}
