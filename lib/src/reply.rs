//! Replies handed back to the conversation and the sink that delivers them

use crate::ascii::AsciiArt;
use crate::processor::TransformChoice;
use crate::session::ConversationId;

pub const WELCOME_TEXT: &str = "Send me an image, and I'll provide options for you!";
pub const PHOTO_RECEIVED_TEXT: &str =
    "I got your photo! Please choose what you'd like to do with it.";
pub const CHARSET_PROMPT_TEXT: &str =
    "Enter a set of characters for the ASCII art, or \"0\" to use the default set";
pub const CHOOSE_FIRST_TEXT: &str = "Please choose what you'd like to do with your photo first.";

/// Output channel of the surrounding transport
pub trait OutputSink {
    type Error;

    fn deliver_text(&mut self, conversation: &ConversationId, text: &str)
    -> Result<(), Self::Error>;

    fn deliver_image(
        &mut self,
        conversation: &ConversationId,
        bytes: &[u8],
    ) -> Result<(), Self::Error>;
}

/// One outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain informational text
    Text(String),
    /// Question whose answer arrives as the next text input
    Prompt(String),
    /// Text plus the transforms the user can pick from
    Menu {
        text: String,
        choices: Vec<TransformChoice>,
    },
    /// Rendered text art
    AsciiArt(AsciiArt),
    /// Encoded JPEG
    Image {
        bytes: Vec<u8>,
        width: u32,
        height: u32,
    },
}

impl Reply {
    /// Acknowledgement for a fresh image submission
    pub fn photo_received() -> Self {
        Reply::Menu {
            text: PHOTO_RECEIVED_TEXT.to_string(),
            choices: TransformChoice::ALL.to_vec(),
        }
    }

    pub fn charset_prompt() -> Self {
        Reply::Prompt(CHARSET_PROMPT_TEXT.to_string())
    }

    pub fn welcome() -> Self {
        Reply::Text(WELCOME_TEXT.to_string())
    }

    /// Text as it should appear in the conversation, `None` for images
    pub fn render_text(&self) -> Option<String> {
        match self {
            Reply::Text(text) | Reply::Prompt(text) => Some(text.clone()),
            Reply::Menu { text, choices } => Some(format_menu(text, choices)),
            Reply::AsciiArt(art) => Some(code_block(&art.text)),
            Reply::Image { .. } => None,
        }
    }

    /// Route this reply to the matching sink method
    pub fn deliver<S: OutputSink>(
        &self,
        conversation: &ConversationId,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        match self {
            Reply::Image { bytes, .. } => sink.deliver_image(conversation, bytes),
            other => {
                let text = other.render_text().unwrap_or_default();
                sink.deliver_text(conversation, &text)
            }
        }
    }
}

/// Wrap text art in a Markdown code fence so chat clients keep it monospace
pub fn code_block(text: &str) -> String {
    format!("```\n{}\n```", text)
}

/// Text followed by one `[label] /command` line per choice
pub fn format_menu(text: &str, choices: &[TransformChoice]) -> String {
    let mut out = String::from(text);
    for choice in choices {
        out.push_str(&format!("\n  [{}] /{}", choice.label(), choice.command()));
    }
    out
}
