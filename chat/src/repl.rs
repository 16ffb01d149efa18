//! Line-oriented conversation loop
//!
//! Slash commands stand in for chat-platform actions; anything else is free
//! text from the user.

use pixmorph::{
    ConversationId, ImageRef, ImageSource, OutputSink, Reply, SessionMachine, SessionStore,
    TransformChoice,
};
use std::io::{self, BufRead};

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `/start` or `/help`
    Welcome,
    /// `/photo <path>`
    Photo(String),
    /// `/pixelate`, `/ascii`, `/invert`
    Choose(TransformChoice),
    /// `/quit` or `/exit`
    Quit,
    /// Unrecognized slash command, or `/photo` without a path
    Unknown(String),
    /// Free text, passed through verbatim
    Text(String),
}

impl Input {
    /// Parse one line. Only the line terminator is stripped: spaces are glyphs too.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\n', '\r']);
        let Some(command) = line.strip_prefix('/') else {
            return Input::Text(line.to_string());
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .unwrap_or((command, ""));
        match name.to_ascii_lowercase().as_str() {
            "start" | "help" => Input::Welcome,
            "quit" | "exit" => Input::Quit,
            "photo" => {
                let path = rest.trim();
                if path.is_empty() {
                    Input::Unknown("/photo needs a path, e.g. /photo cat.jpg".to_string())
                } else {
                    Input::Photo(path.to_string())
                }
            }
            other => match other.parse::<TransformChoice>() {
                Ok(choice) => Input::Choose(choice),
                Err(message) => Input::Unknown(message),
            },
        }
    }
}

/// Read lines until EOF or `/quit`, delivering every reply through `sink`
///
/// Session errors are reported to the user as text; only sink and input I/O
/// errors end the loop.
pub fn run_conversation<S, F, R, O>(
    machine: &SessionMachine<S, F>,
    conversation: &ConversationId,
    input: R,
    sink: &mut O,
) -> io::Result<()>
where
    S: SessionStore,
    F: ImageSource,
    R: BufRead,
    O: OutputSink<Error = io::Error>,
{
    for line in input.lines() {
        let line = line?;
        let replies = match Input::parse(&line) {
            Input::Quit => break,
            Input::Welcome => Ok(vec![Reply::welcome()]),
            Input::Unknown(message) => Ok(vec![Reply::Text(message)]),
            Input::Photo(path) => Ok(machine.submit_image(conversation, ImageRef::new(path))),
            Input::Choose(choice) => machine.choose(conversation, choice),
            Input::Text(text) => machine.supply_text(conversation, &text),
        };

        match replies {
            Ok(replies) => {
                for reply in &replies {
                    reply.deliver(conversation, sink)?;
                }
            }
            Err(e) => {
                log::warn!("conversation {}: {}", conversation, e);
                sink.deliver_text(conversation, &format!("Sorry, {}", e))?;
            }
        }
    }
    Ok(())
}
