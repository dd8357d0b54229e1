//! Structured logging helpers for the chat hub
//!
//! Provides consistent, contextual logging across the data layer.
//! Operations are tagged so log lines can be filtered per concern.

/// Logical operations emitting structured logs
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    SessionList,
    SessionCreate,
    SessionUpdate,
    SessionDelete,
    MessageList,
    MessageSend,
    Generate,
    StoreAppend,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::SessionList => "session_list",
            LogOperation::SessionCreate => "session_create",
            LogOperation::SessionUpdate => "session_update",
            LogOperation::SessionDelete => "session_delete",
            LogOperation::MessageList => "message_list",
            LogOperation::MessageSend => "message_send",
            LogOperation::Generate => "generate",
            LogOperation::StoreAppend => "store_append",
        }
    }
}

/// Log a remote-path failure that is about to be served from the fallback store
pub fn log_fallback(operation: LogOperation, error: &str) {
    tracing::warn!(
        operation = operation.as_str(),
        error = error,
        "Remote call failed, falling back to local store"
    );
}

/// Log a corrupt message blob (treated as empty, never surfaced)
pub fn log_blob_corruption(session_id: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::MessageList.as_str(),
        session_id = session_id,
        error = error,
        "Stored message data failed to parse"
    );
}

/// Log a swallowed upstream forward error for a user message
pub fn log_forward_failure(chat_id: &str, error: &str) {
    tracing::warn!(
        operation = LogOperation::MessageSend.as_str(),
        chat_id = chat_id,
        error = error,
        "Failed to forward message upstream, keeping local copy"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_operation_as_str() {
        assert_eq!(LogOperation::SessionList.as_str(), "session_list");
        assert_eq!(LogOperation::MessageSend.as_str(), "message_send");
        assert_eq!(LogOperation::Generate.as_str(), "generate");
        assert_eq!(LogOperation::StoreAppend.as_str(), "store_append");
    }
}
