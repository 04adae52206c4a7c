//! Success envelopes for API handlers.
//!
//! Every JSON success body carries `"success": true` next to its payload.

use serde::Serialize;

/// `{ "success": true, ...T }` envelope.
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Payload of the plain acknowledgement responses.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// `{ "success": true, "message": ... }`.
pub fn message(message: &'static str) -> Success<Message> {
    Success::new(Message { message })
}
