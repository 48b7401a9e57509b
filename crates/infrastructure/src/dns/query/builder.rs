//! TXT query construction
//!
//! Builds the one query shape this tool sends: a recursive TXT/IN question
//! with the AD bit set and an EDNS(0) OPT record advertising the largest
//! possible UDP payload.

use dnsblast_domain::{DomainError, DomainName};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// UDP payload size advertised in the OPT record (carried in its CLASS field).
pub const EDNS_MAX_PAYLOAD: u16 = 65535;

const MAX_NAME_WIRE_LEN: usize = 255;

/// A fully built, unsent TXT query.
#[derive(Debug, Clone)]
pub struct QueryMessage {
    name: DomainName,
    message: Message,
}

impl QueryMessage {
    pub fn id(&self) -> u16 {
        self.message.id()
    }

    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn authentic_data(&self) -> bool {
        self.message.authentic_data()
    }

    pub fn recursion_desired(&self) -> bool {
        self.message.recursion_desired()
    }

    /// OPT pseudo-records that will be written to the additional section.
    pub fn opt_record_count(&self) -> usize {
        let raw = self
            .message
            .additionals()
            .iter()
            .filter(|r| r.record_type() == RecordType::OPT)
            .count();
        raw + usize::from(self.message.extensions().is_some())
    }

    pub fn max_payload(&self) -> Option<u16> {
        self.message.extensions().as_ref().map(Edns::max_payload)
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Serialize to wire format bytes
    pub fn to_wire(&self) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        self.message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!(
                "Failed to serialize query for '{}': {}",
                self.name, e
            ))
        })?;

        Ok(buf)
    }
}

/// Locate the OPT record of `message`, creating it when absent, and set its
/// advertised payload. Running it again on the same message only rewrites
/// the payload; the message never carries more than one OPT record.
pub fn ensure_opt_record(message: &mut Message) -> &mut Edns {
    let edns = message.extensions_mut().get_or_insert_with(Edns::new);
    edns.set_max_payload(EDNS_MAX_PAYLOAD);
    edns
}

/// Builds TXT queries in wire format
pub struct TxtQueryBuilder;

impl TxtQueryBuilder {
    /// Normalize `name` and build a query for it.
    ///
    /// Relative names are made absolute first, so `"google"` and `"google."`
    /// produce the same question.
    pub fn build(name: &str) -> Result<QueryMessage, DomainError> {
        let name = DomainName::parse(name)?;
        Self::build_for(&name)
    }

    /// Build a query for an already normalized name.
    ///
    /// The message starts as a standard recursive query (random ID, RD set,
    /// one question). AD is then OR'ed into the header and the OPT record is
    /// added.
    pub fn build_for(name: &DomainName) -> Result<QueryMessage, DomainError> {
        let qname = Self::to_wire_name(name)?;

        let mut query = Query::new();
        query
            .set_name(qname)
            .set_query_type(RecordType::TXT)
            .set_query_class(DNSClass::IN);

        let mut message = Message::new();
        message
            .set_id(fastrand::u16(..))
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(query);

        message.set_authentic_data(true);
        ensure_opt_record(&mut message);

        Ok(QueryMessage {
            name: name.clone(),
            message,
        })
    }

    /// Build a query and return its ID together with the serialized bytes.
    pub fn build_wire(name: &str) -> Result<(u16, Vec<u8>), DomainError> {
        let query = Self::build(name)?;
        let bytes = query.to_wire()?;
        Ok((query.id(), bytes))
    }

    fn to_wire_name(name: &DomainName) -> Result<Name, DomainError> {
        // ASCII names go out exactly as given; only IDNs are case-folded
        // by the IDNA mapping.
        let parsed = if name.as_str().is_ascii() {
            Name::from_ascii(name.as_str())
        } else {
            Name::from_utf8(name.as_str())
        };
        let mut parsed = parsed.map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
        })?;
        parsed.set_fqdn(true);

        // Internationalized labels are only measurable once encoded.
        let wire_len = 1 + parsed.iter().map(|label| label.len() + 1).sum::<usize>();
        if wire_len > MAX_NAME_WIRE_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "Domain '{}' is {} octets on the wire (max {})",
                name, wire_len, MAX_NAME_WIRE_LEN
            )));
        }

        Ok(parsed)
    }
}
