//! DNS message parsing and construction.
//!
//! Parses untrusted query packets and builds synthetic responses. Only the
//! single-question UDP queries produced by stub resolvers are supported; there
//! is no TCP framing, EDNS0, or DNSSEC handling here.

const HEADER_LEN: usize = 12;

/// QR bit in the flags field: 0 = query, 1 = response.
const FLAG_RESPONSE: u16 = 0x8000;

pub const TYPE_A: u16 = 1;
pub const TYPE_AAAA: u16 = 28;
pub const CLASS_IN: u16 = 1;

/// TTL for synthesized answer records.
const ANSWER_TTL: u32 = 300;

/// Responses carry a single question and at most one answer, which always
/// fits a classic 512-byte DNS message unless the name itself is oversized.
const MAX_RESPONSE_SIZE: usize = 512;

const MAX_NAME_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// A parsed DNS query.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub id: u16,
    pub domain: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl DnsQuery {
    /// Parse a DNS query from raw bytes.
    ///
    /// Returns `None` for anything that is not a well-formed query: short
    /// packets, responses (QR bit set), zero-question packets, or packets
    /// whose question name cannot be decoded.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < HEADER_LEN {
            return None;
        }

        let id = u16::from_be_bytes([data[0], data[1]]);
        let flags = u16::from_be_bytes([data[2], data[3]]);
        let qdcount = u16::from_be_bytes([data[4], data[5]]);

        if flags & FLAG_RESPONSE != 0 {
            return None;
        }
        if qdcount == 0 {
            return None;
        }

        let (domain, name_len) = decode_name(data, HEADER_LEN)?;

        // QTYPE and QCLASS immediately follow the name
        let pos = HEADER_LEN + name_len;
        if pos + 4 > data.len() {
            return None;
        }
        let qtype = u16::from_be_bytes([data[pos], data[pos + 1]]);
        let qclass = u16::from_be_bytes([data[pos + 2], data[pos + 3]]);

        Some(Self {
            id,
            domain,
            qtype,
            qclass,
        })
    }
}

/// Build a response packet for `original`, answering with a sinkhole address
/// when `blocked` is true and an empty NOERROR response otherwise.
///
/// Re-parses the original packet to recover the transaction id and the query
/// type. The question section is re-encoded from `domain` rather than copied,
/// so the response is always an uncompressed single-question message. Blocked
/// A queries get `127.0.0.1`, blocked AAAA queries get an all-zero address,
/// and any other blocked type gets an answer with empty RDATA.
///
/// Returns `None` if the original packet is malformed or the encoded response
/// would not fit `MAX_RESPONSE_SIZE`.
pub fn build_response(original: &[u8], domain: &str, blocked: bool) -> Option<Vec<u8>> {
    if original.len() < HEADER_LEN {
        return None;
    }

    let id = u16::from_be_bytes([original[0], original[1]]);

    let (_, name_len) = decode_name(original, HEADER_LEN)?;
    let pos = HEADER_LEN + name_len;
    if pos + 4 > original.len() {
        return None;
    }
    let qtype = u16::from_be_bytes([original[pos], original[pos + 1]]);

    let mut data = Vec::with_capacity(MAX_RESPONSE_SIZE);

    // Header
    data.extend_from_slice(&id.to_be_bytes());
    data.extend_from_slice(&FLAG_RESPONSE.to_be_bytes()); // standard response, no error
    data.extend_from_slice(&1u16.to_be_bytes()); // QDCOUNT
    data.extend_from_slice(&(blocked as u16).to_be_bytes()); // ANCOUNT
    data.extend_from_slice(&[0x00, 0x00]); // NSCOUNT
    data.extend_from_slice(&[0x00, 0x00]); // ARCOUNT

    // Question
    encode_name(&mut data, domain)?;
    data.extend_from_slice(&qtype.to_be_bytes());
    data.extend_from_slice(&CLASS_IN.to_be_bytes());

    // Answer, only when blocked
    if blocked {
        encode_name(&mut data, domain)?;
        data.extend_from_slice(&qtype.to_be_bytes());
        data.extend_from_slice(&CLASS_IN.to_be_bytes());
        data.extend_from_slice(&ANSWER_TTL.to_be_bytes());

        match qtype {
            TYPE_A => {
                data.extend_from_slice(&4u16.to_be_bytes());
                data.extend_from_slice(&[127, 0, 0, 1]);
            }
            TYPE_AAAA => {
                data.extend_from_slice(&16u16.to_be_bytes());
                data.extend_from_slice(&[0u8; 16]);
            }
            _ => {
                data.extend_from_slice(&0u16.to_be_bytes());
            }
        }
    }

    if data.len() > MAX_RESPONSE_SIZE {
        return None;
    }

    Some(data)
}

/// Decode the name starting at `offset`, returning the lowercase dot-joined
/// domain and the number of wire bytes consumed.
///
/// A length byte with the top two bits set is a compression pointer; we
/// consume its two bytes and stop without dereferencing. That is only correct
/// for the uncompressed single-question queries stub resolvers send, and is a
/// known limitation rather than general pointer support.
fn decode_name(data: &[u8], offset: usize) -> Option<(String, usize)> {
    let mut pos = offset;
    let mut labels: Vec<String> = Vec::new();

    loop {
        if pos >= data.len() {
            return None;
        }
        let len = data[pos] as usize;

        if len == 0 {
            pos += 1;
            break;
        }
        if len & 0xC0 == 0xC0 {
            // Compression pointer: consume both bytes, stop.
            if pos + 2 > data.len() {
                return None;
            }
            pos += 2;
            break;
        }

        pos += 1;
        if pos + len > data.len() {
            return None;
        }
        let label = std::str::from_utf8(&data[pos..pos + len]).ok()?;
        labels.push(label.to_string());
        pos += len;
    }

    if labels.is_empty() {
        return None;
    }

    let domain = labels.join(".").to_lowercase();
    if domain.len() > MAX_NAME_LEN {
        return None;
    }

    Some((domain, pos - offset))
}

/// Encode `domain` as a length-prefixed label sequence with a terminating
/// zero label. Fails on empty or oversized labels and oversized names rather
/// than emitting a truncated or self-terminating wire name.
fn encode_name(buf: &mut Vec<u8>, domain: &str) -> Option<()> {
    if domain.len() > MAX_NAME_LEN {
        return None;
    }
    for label in domain.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return None;
        }
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
    Some(())
}
