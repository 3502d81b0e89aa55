//! Canned-response assistant: a pure keyword lookup over the user's message
//! plus a conversation history. No state beyond the transcript.

const GREETING: &str =
    "Hi there! I'm your costcraft assistant. How can I help you today?";
const FALLBACK: &str =
    "Would you like me to suggest some industries based on your interests?";

/// Keyword table, checked in order; the first matching row wins.
const RESPONSES: &[(&[&str], &str)] = &[
    (
        &["industr", "manufactur", "partner", "factory"],
        "I can help you connect with manufacturing industries that match your product needs.",
    ),
    (
        &["material", "supplier"],
        "Looking for specific materials? I can help you find suppliers.",
    ),
    (
        &["cost", "price", "pricing", "estimat", "product"],
        "You can check the Products section to analyze costs for your product idea.",
    ),
    (
        &["finance", "fund", "budget", "invest"],
        "The Finance section offers tools for budgeting and funding your project.",
    ),
];

/// Picks the canned response for `input` by case-insensitive keyword match.
pub fn reply(input: &str) -> &'static str {
    let input = input.to_lowercase();

    // Greetings match on whole words; "hi" as a substring would also hit
    // "which", "shipping", and the like.
    let is_greeting = input
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| matches!(word, "hello" | "hi" | "hey"));
    if is_greeting {
        return GREETING;
    }

    for (keywords, response) in RESPONSES {
        if keywords.iter().any(|k| input.contains(k)) {
            return response;
        }
    }
    FALLBACK
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// A conversation transcript. Opens with the assistant's greeting.
#[derive(Debug)]
pub struct Assistant {
    history: Vec<ChatMessage>,
}

impl Assistant {
    pub fn new() -> Self {
        Self {
            history: vec![ChatMessage {
                sender: Sender::Assistant,
                text: GREETING.to_string(),
            }],
        }
    }

    /// Records the user's message and the assistant's reply; returns the
    /// reply. Blank messages are ignored.
    pub fn send(&mut self, message: &str) -> Option<&'static str> {
        if message.trim().is_empty() {
            return None;
        }
        self.history.push(ChatMessage {
            sender: Sender::User,
            text: message.to_string(),
        });
        let response = reply(message);
        self.history.push(ChatMessage {
            sender: Sender::Assistant,
            text: response.to_string(),
        });
        Some(response)
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}
