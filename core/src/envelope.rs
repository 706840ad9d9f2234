//! The uniform result of every network operation.

/// Status code used when the request never reached the server.
pub const UNREACHED: i32 = -1;

/// Raw response body and status code of one operation.
///
/// Returned for every completed exchange, whatever the status. `body` is
/// `None` when the body was not read (delete) or nothing was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub body: Option<Vec<u8>>,
    pub status_code: i32,
}

impl Envelope {
    pub fn new(status_code: u16, body: Option<Vec<u8>>) -> Self {
        Self {
            body,
            status_code: i32::from(status_code),
        }
    }

    /// Envelope for a request that got no response.
    pub fn unreached() -> Self {
        Self {
            body: None,
            status_code: UNREACHED,
        }
    }

    /// Body bytes, or an empty slice when no body was read.
    pub fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
