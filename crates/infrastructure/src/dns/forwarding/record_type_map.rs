use hickory_proto::rr::RecordType as HickoryRecordType;
use ruledns_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Hickory RecordType -> domain RecordType (for incoming queries).
    /// Types without a named variant map to `RecordType::Unknown(code)`.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_code(u16::from(hickory_type))
    }
}
