use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::common::cluster::{NodeAddress, NodeAnnouncement};

/// Protocol version written into every announcement. The decoder ignores the
/// version field so that older nodes keep parsing records written by newer
/// ones as long as the field layout is compatible.
pub const SCHEMA_VERSION: &str = "1";

/// Field delimiter, chosen so it cannot occur in hostnames, cluster ids or
/// numeric fields.
const SEPARATOR: &str = "||||";

/// Outcome of decoding one directory object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Valid(NodeAnnouncement),
    /// Announcement older than the expiration window. The caller deletes the
    /// backing object.
    Stale,
    /// Not a parseable announcement. The backing object is left untouched,
    /// it may belong to an incompatible newer protocol version.
    Malformed,
}

/// Builds the wire payload for one announcement:
/// base64 of `"1" SEP millis SEP clusterId SEP host SEP port SEP`.
/// The trailing separator is part of the wire format.
pub fn encode(cluster_id: &str, address: &NodeAddress, now_ms: i64) -> String {
    let content = format!(
        "{SCHEMA_VERSION}{SEPARATOR}{now_ms}{SEPARATOR}{cluster_id}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}",
        address.host, address.port,
    );
    STANDARD.encode(content.as_bytes())
}

/// Reverses [`encode`]. `expiration_minutes <= 0` disables staleness, an
/// announcement whose age reaches the window is `Stale`.
pub fn decode(payload: &[u8], expiration_minutes: i64, now_ms: i64) -> Decoded {
    let text = match std::str::from_utf8(payload) {
        Ok(text) => text.trim_end(),
        Err(_) => return Decoded::Malformed,
    };
    let raw = match STANDARD.decode(text) {
        Ok(raw) => raw,
        Err(_) => return Decoded::Malformed,
    };
    let content = match String::from_utf8(raw) {
        Ok(content) => content,
        Err(_) => return Decoded::Malformed,
    };

    // Minimum of 5 fields: version, timestamp, cluster id, host, port.
    let fields: Vec<&str> = content.split(SEPARATOR).collect();
    if fields.len() < 5 {
        return Decoded::Malformed;
    }

    let published_at_ms: i64 = match fields[1].parse() {
        Ok(millis) => millis,
        Err(_) => return Decoded::Malformed,
    };

    // saturating arithmetic keeps a corrupt extreme timestamp from wrapping
    let window_ms = expiration_minutes.saturating_mul(60_000);
    if expiration_minutes > 0 && now_ms.saturating_sub(published_at_ms) >= window_ms {
        return Decoded::Stale;
    }

    let host = fields[3];
    if host.is_empty() {
        return Decoded::Malformed;
    }
    let port: u16 = match fields[4].parse() {
        Ok(port) => port,
        Err(_) => return Decoded::Malformed,
    };

    Decoded::Valid(NodeAnnouncement {
        published_at_ms,
        cluster_id: fields[2].to_string(),
        address: NodeAddress::new(host, port),
    })
}
