//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use parley_service::SendMessage;

/// Body of `POST /api/messages/send/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Text body.
    #[validate(length(max = 5000, message = "Message text is too long"))]
    pub text: Option<String>,
    /// Image URL.
    #[validate(length(min = 1, max = 2048))]
    pub image: Option<String>,
}

impl From<SendMessageRequest> for SendMessage {
    fn from(req: SendMessageRequest) -> Self {
        Self {
            text: req.text,
            image: req.image,
        }
    }
}
