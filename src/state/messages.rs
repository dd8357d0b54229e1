//! Message list state
//!
//! Client-side holder for one session's messages, with the optimistic send
//! flow: a temporary entry becomes visible immediately, is replaced in
//! place by the confirmed entry, and the generated reply is appended once
//! it arrives. Each send is an explicit little state machine keyed by the
//! temporary correlation id.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::models::{Feedback, Message, MessageType, next_temp_id};
use crate::gateway::{ChatGateway, GenerateRequest, ListMessagesOptions, NewMessage};
use crate::i18n::Language;
use crate::shared::errors::Result;

/// Lifecycle of one optimistic send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    /// Temporary entry visible, confirmation outstanding
    Pending,
    /// Temporary entry replaced by the server-confirmed one
    Confirmed,
    /// Confirmation failed; the temporary entry stays visible
    Failed,
}

#[derive(Debug, Clone)]
pub struct PendingSend {
    pub correlation_id: String,
    pub phase: SendPhase,
}

/// Both halves of a fully successful send
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub user_message: Message,
    pub ai_response: Message,
}

#[derive(Default)]
struct MessagesInner {
    messages: Vec<Message>,
    loading: bool,
    error: Option<String>,
    sends: Vec<PendingSend>,
}

pub struct MessageState {
    gateway: Arc<dyn ChatGateway>,
    chat_id: String,
    language: Language,
    inner: RwLock<MessagesInner>,
    /// One send in flight at a time; overlapping calls queue here.
    send_queue: Mutex<()>,
}

impl MessageState {
    pub fn new(gateway: Arc<dyn ChatGateway>, chat_id: impl Into<String>, language: Language) -> Self {
        Self {
            gateway,
            chat_id: chat_id.into(),
            language,
            inner: RwLock::new(MessagesInner::default()),
            send_queue: Mutex::new(()),
        }
    }

    /// Fetches the session's messages and replaces local state.
    pub async fn load(&self) -> Result<()> {
        {
            let mut inner = self.inner.write().await;
            inner.loading = true;
            inner.error = None;
        }

        let result = self
            .gateway
            .list_messages(&self.chat_id, ListMessagesOptions::default())
            .await;

        let mut inner = self.inner.write().await;
        inner.loading = false;
        match result {
            Ok(page) => {
                inner.messages = page.items;
                Ok(())
            }
            Err(e) => {
                inner.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Sends a user message with an optimistic temporary entry, then asks
    /// for the AI reply. On confirmation failure the temporary entry is
    /// left in place; on generation failure the confirmed user message
    /// stays without a reply.
    pub async fn send(&self, content: &str, user_id: &str) -> Result<SendOutcome> {
        let _turn = self.send_queue.lock().await;

        let correlation_id = next_temp_id();
        let temporary = Message::user(&correlation_id, &self.chat_id, content, user_id);
        {
            let mut inner = self.inner.write().await;
            inner.messages.push(temporary);
            inner.sends.push(PendingSend {
                correlation_id: correlation_id.clone(),
                phase: SendPhase::Pending,
            });
        }

        let confirmed = match self
            .gateway
            .send_message(NewMessage {
                chat_id: self.chat_id.clone(),
                kind: MessageType::User,
                content: content.to_string(),
                user_id: user_id.to_string(),
                suggestions: None,
                references: None,
                metadata: None,
            })
            .await
        {
            Ok(message) => {
                let mut inner = self.inner.write().await;
                if let Some(slot) = inner.messages.iter_mut().find(|m| m.id == correlation_id) {
                    *slot = message.clone();
                }
                set_phase(&mut inner.sends, &correlation_id, SendPhase::Confirmed);
                message
            }
            Err(e) => {
                let mut inner = self.inner.write().await;
                set_phase(&mut inner.sends, &correlation_id, SendPhase::Failed);
                inner.error = Some(e.to_string());
                return Err(e);
            }
        };

        let ai_response = match self
            .gateway
            .generate_response(GenerateRequest {
                prompt: content.to_string(),
                chat_id: self.chat_id.clone(),
                user_id: user_id.to_string(),
                language: Some(self.language),
            })
            .await
        {
            Ok(message) => {
                let mut inner = self.inner.write().await;
                inner.messages.push(message.clone());
                inner.sends.retain(|send| send.correlation_id != correlation_id);
                message
            }
            Err(e) => {
                let mut inner = self.inner.write().await;
                inner.error = Some(e.to_string());
                return Err(e);
            }
        };

        Ok(SendOutcome {
            user_message: confirmed,
            ai_response,
        })
    }

    /// Rates a suggestion on a local message copy. Never synced anywhere.
    pub async fn set_suggestion_feedback(
        &self,
        message_id: &str,
        suggestion_id: &str,
        feedback: Feedback,
    ) -> bool {
        let mut inner = self.inner.write().await;
        let Some(message) = inner.messages.iter_mut().find(|m| m.id == message_id) else {
            return false;
        };
        let Some(suggestions) = message.suggestions.as_mut() else {
            return false;
        };
        match suggestions.iter_mut().find(|s| s.id == suggestion_id) {
            Some(suggestion) => {
                suggestion.feedback = Some(feedback);
                true
            }
            None => false,
        }
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.inner.read().await.messages.clone()
    }

    pub async fn pending_sends(&self) -> Vec<PendingSend> {
        self.inner.read().await.sends.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }
}

fn set_phase(sends: &mut [PendingSend], correlation_id: &str, phase: SendPhase) {
    if let Some(send) = sends.iter_mut().find(|s| s.correlation_id == correlation_id) {
        send.phase = phase;
    }
}
