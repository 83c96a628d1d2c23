//! Conversation history sent with each request.

use crate::provider::{ChatMessage, Role};

/// Ordered chat turns.
///
/// An assistant turn is recorded only once its reply completed; empty
/// replies are dropped.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        let content = content.into();
        if !content.is_empty() {
            self.messages.push(ChatMessage::assistant(content));
        }
    }

    /// Drop the trailing user turn when its exchange failed.
    ///
    /// Keeps user and assistant turns alternating on the next request.
    pub fn discard_unanswered(&mut self) -> Option<ChatMessage> {
        match self.messages.last() {
            Some(message) if message.role == Role::User => self.messages.pop(),
            _ => None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Most recent assistant reply
    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_and_empty_reply() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");
        conversation.push_assistant("");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.last_reply(), None);

        conversation.push_assistant("hello");
        assert_eq!(conversation.last_reply(), Some("hello"));

        conversation.clear();
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_failed_turn_is_discarded() {
        let mut conversation = Conversation::new();
        conversation.push_user("first");
        conversation.push_assistant("answer");
        conversation.push_user("second");

        let dropped = conversation.discard_unanswered().unwrap();
        assert_eq!(dropped.content, "second");
        // Answered turns are left alone
        assert!(conversation.discard_unanswered().is_none());

        conversation.push_user("retry");
        let roles: Vec<_> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    }
}
