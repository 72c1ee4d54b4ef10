use hickory_proto::op::{Header, Message, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use ruledns_domain::{DomainError, LocalAnswer};

pub struct MessageBuilder;

impl MessageBuilder {
    /// REFUSED response echoing the request id and question.
    pub fn refused(request: &Message) -> Result<Vec<u8>, DomainError> {
        let mut response = Self::response_to(request);
        response.set_response_code(ResponseCode::Refused);
        Self::encode(&response)
    }

    /// Single A record answering the request's first question.
    pub fn local_answer(request: &Message, answer: &LocalAnswer) -> Result<Vec<u8>, DomainError> {
        let mut response = Self::response_to(request);
        if let Some(question) = request.queries().first() {
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                answer.ttl,
                RData::A(A(answer.address)),
            ));
        }
        response.set_response_code(ResponseCode::NoError);
        Self::encode(&response)
    }

    fn response_to(request: &Message) -> Message {
        let mut response = Message::new();
        let mut header = Header::response_from_request(request.header());
        header.set_recursion_available(true);
        response.set_header(header);
        for query in request.queries() {
            response.add_query(query.clone());
        }
        response
    }

    fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
        message
            .to_vec()
            .map_err(|e| DomainError::IoError(format!("failed to encode response: {}", e)))
    }
}
