use dnsblast_domain::{DomainError, QueryResponse};
use hickory_proto::op::{Edns, Message, ResponseCode};
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::RData;
use std::time::Duration;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decode a reply into the summary surfaced to the caller.
    ///
    /// Only decoding failures are errors; the reply is not checked against
    /// the query that produced it.
    pub fn parse(response_bytes: &[u8], latency: Duration) -> Result<QueryResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let answers: Vec<String> = message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                Some(RData::TXT(txt)) => Some(Self::txt_to_string(txt)),
                _ => None,
            })
            .collect();

        let rcode = Self::rcode_to_status(message.response_code());

        debug!(
            id = message.id(),
            rcode = rcode,
            answers = answers.len(),
            bytes = response_bytes.len(),
            "DNS response parsed"
        );

        Ok(QueryResponse {
            id: message.id(),
            rcode,
            authentic_data: message.authentic_data(),
            answers,
            edns_payload: message.extensions().as_ref().map(Edns::max_payload),
            size: response_bytes.len(),
            latency,
        })
    }

    /// Character-strings of one TXT record, concatenated.
    fn txt_to_string(txt: &TXT) -> String {
        txt.txt_data()
            .iter()
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect()
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
