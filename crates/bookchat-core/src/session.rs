//! Session orchestration: one conversation driven against one transport.

use log::warn;

use crate::client::ChatClient;
use crate::conversation::Conversation;

/// What a [`ChatSession::submit`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint answered; the reply was appended.
    Answered,
    /// The transport failed; the fallback reply was appended instead.
    Failed,
    /// Blank input: nothing was appended and no request was sent.
    Ignored,
}

/// Drives a [`Conversation`] against a [`ChatClient`], one question at a
/// time.
///
/// The session, not the transport, decides what the user sees when a request
/// fails: the `fallback_reply` text is appended in place of an answer and the
/// raw error only goes to the log.
pub struct ChatSession {
    conversation: Conversation,
    client: ChatClient,
    fallback_reply: String,
}

impl ChatSession {
    pub fn new(client: ChatClient, fallback_reply: impl Into<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            client,
            fallback_reply: fallback_reply.into(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Submit one question and wait for its resolution.
    ///
    /// Appends the user message, sends it with the history snapshot, then
    /// appends exactly one assistant message: the reply on success, the
    /// session's fallback text on failure.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let Some(history) = self.conversation.begin_exchange(text) else {
            return SubmitOutcome::Ignored;
        };

        match self.client.ask(text, &history).await {
            Ok(reply) => {
                self.conversation.complete_exchange(reply);
                SubmitOutcome::Answered
            }
            Err(err) => {
                warn!("chat request failed: {:#}", err);
                self.conversation.complete_exchange(self.fallback_reply.clone());
                SubmitOutcome::Failed
            }
        }
    }
}
