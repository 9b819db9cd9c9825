//! The conversation store: an ordered message thread plus its in-flight flag.

use crate::state::ChatMessage;

/// Append-only message sequence for one session.
///
/// Insertion order is display order is chronological order. The store lives
/// in memory only and is discarded with the process; there is no identifier
/// and no persistence. The `pending` flag is raised between a question being
/// recorded and its reply (or fallback) arriving, and frontends use it to
/// disable input and show a loading indicator.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages, in chronological order.
    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a reply is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message without touching the in-flight flag.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Start an exchange: record the user's question and raise the in-flight
    /// flag.
    ///
    /// Returns the history snapshot to send to the endpoint, including the
    /// just-appended user message. Returns `None` without mutating anything
    /// when the input trims to empty, or when a reply is already pending
    /// (one question at a time, so replies can never arrive out of order).
    ///
    /// The appended content is the input as typed; trimming is only used for
    /// the emptiness check.
    pub fn begin_exchange(&mut self, text: &str) -> Option<Vec<ChatMessage>> {
        if self.pending || text.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.pending = true;
        Some(self.messages.clone())
    }

    /// Finish the exchange begun by [`Conversation::begin_exchange`]: append
    /// exactly one assistant message and drop the in-flight flag.
    ///
    /// The reply is either the endpoint's answer or the caller's fixed
    /// fallback text; the store doesn't distinguish. A completion arriving
    /// with no exchange pending is ignored, so a reply that outlives its
    /// frontend can't corrupt the thread.
    pub fn complete_exchange(&mut self, reply: impl Into<String>) {
        if !self.pending {
            return;
        }

        self.messages.push(ChatMessage::assistant(reply));
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChatRole;

    #[test]
    fn test_begin_appends_one_user_message() {
        let mut convo = Conversation::new();

        let history = convo.begin_exchange("What is the capital of France?");

        let history = history.expect("non-blank input should start an exchange");
        assert_eq!(convo.len(), 1);
        assert_eq!(convo.all()[0].role, ChatRole::User);
        assert_eq!(convo.all()[0].content, "What is the capital of France?");
        assert!(convo.is_pending());
        // The snapshot counts the just-appended question
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "What is the capital of France?");
    }

    #[test]
    fn test_blank_input_is_rejected_without_mutation() {
        let mut convo = Conversation::new();

        assert!(convo.begin_exchange("").is_none());
        assert!(convo.begin_exchange("   ").is_none());
        assert!(convo.begin_exchange("\t\n").is_none());

        assert!(convo.is_empty());
        assert!(!convo.is_pending());
    }

    #[test]
    fn test_content_is_kept_as_typed() {
        let mut convo = Conversation::new();

        convo.begin_exchange("  padded question  ").unwrap();

        assert_eq!(convo.all()[0].content, "  padded question  ");
    }

    #[test]
    fn test_second_begin_while_pending_is_rejected() {
        let mut convo = Conversation::new();

        assert!(convo.begin_exchange("first").is_some());
        assert!(convo.begin_exchange("second").is_none());

        assert_eq!(convo.len(), 1);
        assert!(convo.is_pending());
    }

    #[test]
    fn test_complete_appends_assistant_after_user() {
        let mut convo = Conversation::new();

        convo.begin_exchange("hello").unwrap();
        convo.complete_exchange("hi there");

        assert_eq!(convo.len(), 2);
        assert_eq!(convo.all()[0].role, ChatRole::User);
        assert_eq!(convo.all()[1].role, ChatRole::Assistant);
        assert_eq!(convo.all()[1].content, "hi there");
        assert!(!convo.is_pending());
    }

    #[test]
    fn test_stray_completion_is_ignored() {
        let mut convo = Conversation::new();

        convo.complete_exchange("stray reply");

        assert!(convo.is_empty());
        assert!(!convo.is_pending());
    }

    #[test]
    fn test_snapshot_grows_with_each_exchange() {
        let mut convo = Conversation::new();

        let first = convo.begin_exchange("q1").unwrap();
        assert_eq!(first.len(), 1);
        convo.complete_exchange("a1");

        // One prior exchange: the next snapshot holds 2 + 1 entries
        let second = convo.begin_exchange("q2").unwrap();
        assert_eq!(second.len(), 3);
        assert_eq!(second[1].role, ChatRole::Assistant);
        assert_eq!(second[2].content, "q2");

        convo.complete_exchange("a2");
        assert_eq!(convo.len(), 4);
    }
}
