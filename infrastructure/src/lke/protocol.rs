//! Wire format of the chat request body

use serde::Serialize;
use xuanji_application::ChatRequest;

/// Value of the `stream` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    Enable,
    Disable,
}

/// JSON body POSTed to the endpoint
#[derive(Debug, Serialize)]
pub struct LkeChatRequest<'a> {
    pub session_id: &'a str,
    pub bot_app_key: &'a str,
    pub visitor_biz_id: &'a str,
    pub content: &'a str,
    pub stream: StreamMode,
    pub system_role: &'a str,
    pub model_name: &'a str,
}

impl<'a> LkeChatRequest<'a> {
    /// Borrow a wire body from a port-level request; streaming stays off.
    pub fn new(request: &'a ChatRequest, bot_app_key: &'a str) -> Self {
        Self {
            session_id: request.session_id.as_str(),
            bot_app_key,
            visitor_biz_id: request.visitor_id.as_str(),
            content: &request.content,
            stream: StreamMode::Disable,
            system_role: &request.system_role,
            model_name: request.model.as_str(),
        }
    }
}
