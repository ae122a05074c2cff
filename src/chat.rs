//! Scripted contact conversation: name, then email, then message, then a
//! mail draft. Timers live with the caller; this module only says what to
//! schedule and what to show.

use crate::contact::MailDraft;
use std::fmt;

pub const GREETING: &str = "Hi there! 👋 I'm Saran's AI Assistant.";
pub const ASK_NAME: &str =
    "I can help you get in touch with him directly. First, what's your name?";
pub const ASK_MESSAGE: &str = "Got it. What message would you like to send to Saran?";
pub const PREPARING: &str = "Perfect! I'm preparing your email now...";
pub const CLOSING: &str =
    "I've opened your email client to send the message. Thanks for reaching out!";

/// Delay before the bot answers a submitted line.
pub const REPLY_DELAY_MS: u32 = 600;
/// Delay between the final answer and opening the mail draft.
pub const DRAFT_DELAY_MS: u32 = 1500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatStep {
    Name,
    Email,
    Message,
    Complete,
}

impl ChatStep {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message | Self::Complete => Self::Complete,
        }
    }

    /// Input placeholder; `None` once the input is hidden.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Name => Some("Enter your name..."),
            Self::Email => Some("Enter your email..."),
            Self::Message => Some("Type your message..."),
            Self::Complete => None,
        }
    }

    pub fn accepts_input(self) -> bool {
        self != Self::Complete
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    Bot,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatError {
    Blank,
    Finished,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("message is empty"),
            Self::Finished => f.write_str("conversation already finished"),
        }
    }
}

impl std::error::Error for ChatError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEvent {
    Reply(String),
    OpenDraft,
}

/// An event the caller should feed back through [`ChatScript::fire`] after
/// `delay_ms`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub delay_ms: u32,
    pub event: ChatEvent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fired {
    Shown,
    Then(Scheduled),
    Draft(MailDraft),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatScript {
    messages: Vec<Message>,
    step: ChatStep,
    name: String,
    email: String,
    message: String,
    next_id: u64,
}

impl Default for ChatScript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatScript {
    pub fn new() -> Self {
        let mut script = Self {
            messages: Vec::new(),
            step: ChatStep::Name,
            name: String::new(),
            email: String::new(),
            message: String::new(),
            next_id: 1,
        };
        script.push(Sender::Bot, GREETING);
        script.push(Sender::Bot, ASK_NAME);
        script
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn step(&self) -> ChatStep {
        self.step
    }

    fn push(&mut self, sender: Sender, text: impl Into<String>) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            sender,
            text: text.into(),
        });
    }

    /// Records the visitor's line and returns the reply to schedule. Blank
    /// input leaves the script untouched.
    pub fn submit(&mut self, input: &str) -> Result<Scheduled, ChatError> {
        if !self.step.accepts_input() {
            return Err(ChatError::Finished);
        }
        if input.trim().is_empty() {
            return Err(ChatError::Blank);
        }

        let reply = match self.step {
            ChatStep::Name => {
                self.name = input.to_string();
                format!("Nice to meet you, {input}! What's your email address?")
            }
            ChatStep::Email => {
                self.email = input.to_string();
                ASK_MESSAGE.to_string()
            }
            ChatStep::Message => {
                self.message = input.to_string();
                PREPARING.to_string()
            }
            ChatStep::Complete => return Err(ChatError::Finished),
        };

        self.push(Sender::User, input);
        let answered = self.step;
        self.step = self.step.next();
        log::debug!("chat step {answered:?} -> {:?}", self.step);

        Ok(Scheduled {
            delay_ms: REPLY_DELAY_MS,
            event: ChatEvent::Reply(reply),
        })
    }

    pub fn fire(&mut self, event: ChatEvent) -> Fired {
        match event {
            ChatEvent::Reply(text) => {
                self.push(Sender::Bot, text);
                if self.step == ChatStep::Complete {
                    Fired::Then(Scheduled {
                        delay_ms: DRAFT_DELAY_MS,
                        event: ChatEvent::OpenDraft,
                    })
                } else {
                    Fired::Shown
                }
            }
            ChatEvent::OpenDraft => {
                self.push(Sender::Bot, CLOSING);
                log::info!("chat finished, opening mail draft");
                Fired::Draft(self.draft())
            }
        }
    }

    pub fn draft(&self) -> MailDraft {
        MailDraft::new(&self.name, &self.email, &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_of(scheduled: Scheduled) -> ChatEvent {
        assert_eq!(scheduled.delay_ms, REPLY_DELAY_MS);
        scheduled.event
    }

    #[test]
    fn opens_with_greeting_and_name_prompt() {
        let script = ChatScript::new();
        let texts: Vec<&str> = script.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec![GREETING, ASK_NAME]);
        assert_eq!(script.step(), ChatStep::Name);
        assert_eq!(script.step().placeholder(), Some("Enter your name..."));
    }

    #[test]
    fn blank_input_is_rejected_without_side_effects() {
        let mut script = ChatScript::new();
        let before = script.clone();
        assert_eq!(script.submit("   \t"), Err(ChatError::Blank));
        assert_eq!(script.submit(""), Err(ChatError::Blank));
        assert_eq!(script, before);
    }

    #[test]
    fn full_conversation_ends_in_a_draft() {
        let mut script = ChatScript::new();

        let reply = reply_of(script.submit("Ada").expect("name accepted"));
        assert_eq!(
            reply,
            ChatEvent::Reply("Nice to meet you, Ada! What's your email address?".into())
        );
        assert_eq!(script.fire(reply), Fired::Shown);
        assert_eq!(script.step(), ChatStep::Email);

        let reply = reply_of(script.submit("ada@example.com").expect("email accepted"));
        assert_eq!(script.fire(reply), Fired::Shown);
        assert_eq!(script.step().placeholder(), Some("Type your message..."));

        let reply = reply_of(script.submit("Let's talk").expect("message accepted"));
        assert_eq!(reply, ChatEvent::Reply(PREPARING.into()));
        assert_eq!(script.step(), ChatStep::Complete);
        assert_eq!(script.step().placeholder(), None);

        let Fired::Then(next) = script.fire(reply) else {
            panic!("expected the draft to be scheduled");
        };
        assert_eq!(next.delay_ms, DRAFT_DELAY_MS);

        let Fired::Draft(draft) = script.fire(next.event) else {
            panic!("expected a draft");
        };
        assert_eq!(draft.subject, "Portfolio Contact from Ada");
        assert!(draft.body.ends_with("Message:\nLet's talk"));
        assert_eq!(
            script.messages().last().map(|m| m.text.as_str()),
            Some(CLOSING)
        );
        assert_eq!(script.submit("more"), Err(ChatError::Finished));
    }

    #[test]
    fn message_ids_only_increase() {
        let mut script = ChatScript::new();
        let reply = reply_of(script.submit("Ada").expect("name accepted"));
        script.fire(reply);
        let ids: Vec<u64> = script.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
