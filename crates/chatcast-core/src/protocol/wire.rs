use serde::{Deserialize, Serialize};

use crate::error::{ChatcastError, Result};
use crate::model::{Message, User};

/// Parameters of a `CreateStream` call.
///
/// Missing fields deserialize as empty and are rejected by [`StreamRequest::into_user`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl StreamRequest {
    /// Validate and turn into the registering user.
    pub fn into_user(self) -> Result<User> {
        if self.id.trim().is_empty() {
            return Err(ChatcastError::BadRequest("stream id must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(ChatcastError::BadRequest("stream name must not be empty".into()));
        }
        Ok(User::new(self.id, self.name))
    }
}

impl From<&User> for StreamRequest {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

/// Reply to `BroadcastMessage`.
///
/// `failed` lists the connection ids whose push failed during the pass. It is
/// informational: the publish itself succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub failed: Vec<String>,
}

/// JSON error body returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub msg: String,
}

impl From<&ChatcastError> for ErrorBody {
    fn from(e: &ChatcastError) -> Self {
        Self {
            code: e.client_code().as_str().to_string(),
            msg: e.to_string(),
        }
    }
}

/// Serialize a message into one text frame.
pub fn encode_message(msg: &Message) -> Result<String> {
    serde_json::to_string(msg)
        .map_err(|e| ChatcastError::Internal(format!("message encode failed: {e}")))
}

/// Parse one text frame (or request body) into a message.
pub fn decode_message(s: &str) -> Result<Message> {
    let msg: Message = serde_json::from_str(s)
        .map_err(|e| ChatcastError::BadRequest(format!("invalid message json: {e}")))?;
    if msg.user.id.is_empty() {
        return Err(ChatcastError::BadRequest("message user.id must not be empty".into()));
    }
    Ok(msg)
}
