//! Conversation state machine
//!
//! ```text
//! Idle --ImageSubmitted--> AwaitingChoice --ChoiceMade(ascii)--> AwaitingCharsetInput
//!   ^                          |                                        |
//!   +----ChoiceMade(pixelate|invert)----+----TextInputReceived----------+
//! ```
//!
//! `ImageSubmitted` is accepted in every stage and always lands in
//! `AwaitingChoice`. Choices and text need an image on file, otherwise the
//! action is rejected with [`SessionError::NoImageAvailable`] and nothing
//! changes. A choice made from `Idle` with an image still on file is accepted.

use crate::config::TransformConfig;
use crate::error::{SessionError, SessionResult};
use crate::palette::{CharsetPalette, PaletteInput};
use crate::processor::{TransformChoice, decode, process_image};
use crate::reply::{CHOOSE_FIRST_TEXT, Reply};
use crate::session::{ConversationId, ImageRef, Session, SessionStage};
use crate::source::ImageSource;
use crate::store::SessionStore;
use log::{debug, info, warn};

/// Externally triggered action for one conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ImageSubmitted {
        conversation: ConversationId,
        image_ref: ImageRef,
    },
    ChoiceMade {
        conversation: ConversationId,
        choice: TransformChoice,
    },
    TextInputReceived {
        conversation: ConversationId,
        text: String,
    },
}

impl SessionEvent {
    pub fn conversation(&self) -> &ConversationId {
        match self {
            SessionEvent::ImageSubmitted { conversation, .. }
            | SessionEvent::ChoiceMade { conversation, .. }
            | SessionEvent::TextInputReceived { conversation, .. } => conversation,
        }
    }
}

/// Drives sessions through the submit -> choose -> render flow
///
/// Each event runs as one critical section on its conversation's session,
/// transform included.
pub struct SessionMachine<S, F> {
    store: S,
    source: F,
    config: TransformConfig,
}

impl<S: SessionStore, F: ImageSource> SessionMachine<S, F> {
    /// Build a machine over an injected store and image source
    ///
    /// Fails when `config` does not validate.
    pub fn new(store: S, source: F, config: TransformConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            store,
            source,
            config,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current stage of a conversation; unknown conversations are `Idle`
    pub fn stage(&self, conversation: &ConversationId) -> SessionStage {
        self.store
            .snapshot(conversation)
            .map(|session| session.stage)
            .unwrap_or_default()
    }

    /// Apply one event and return the replies for its conversation, in order
    pub fn handle(&self, event: SessionEvent) -> SessionResult<Vec<Reply>> {
        match event {
            SessionEvent::ImageSubmitted {
                conversation,
                image_ref,
            } => Ok(self.submit_image(&conversation, image_ref)),
            SessionEvent::ChoiceMade {
                conversation,
                choice,
            } => self.choose(&conversation, choice),
            SessionEvent::TextInputReceived { conversation, text } => {
                self.supply_text(&conversation, &text)
            }
        }
    }

    /// New image: always supersedes the previous one and asks for a choice
    pub fn submit_image(&self, conversation: &ConversationId, image_ref: ImageRef) -> Vec<Reply> {
        self.store.with_session(conversation, |session| {
            info!(
                "conversation {}: image {} submitted (was {:?})",
                conversation, image_ref, session.stage
            );
            session.image_ref = Some(image_ref);
            session.stage = SessionStage::AwaitingChoice;
        });
        vec![Reply::photo_received()]
    }

    /// Transform picked for the current image
    ///
    /// Pixelate and invert run immediately and return the session to `Idle`.
    /// ASCII art asks for a palette first. If an immediate transform fails the
    /// stage is left as it was so the choice can be retried.
    pub fn choose(
        &self,
        conversation: &ConversationId,
        choice: TransformChoice,
    ) -> SessionResult<Vec<Reply>> {
        self.store.with_session(conversation, |session| -> SessionResult<Vec<Reply>> {
            let image_ref = require_image(session)?;
            info!("conversation {}: chose {}", conversation, choice);

            match choice {
                TransformChoice::AsciiArt => {
                    session.stage = SessionStage::AwaitingCharsetInput;
                    Ok(vec![Reply::charset_prompt()])
                }
                TransformChoice::Pixelate | TransformChoice::Invert => {
                    let output = self.run(&image_ref, choice, &session.palette)?;
                    session.stage = SessionStage::Idle;

                    let mut replies = Vec::with_capacity(2);
                    if let Some(notice) = choice.progress_notice() {
                        replies.push(Reply::Text(notice.to_string()));
                    }
                    replies.push(output);
                    Ok(replies)
                }
            }
        })
    }

    /// Free text from the user
    ///
    /// Consumed only while awaiting a palette: `"0"` restores the default,
    /// other non-empty text replaces the palette, empty text keeps it. The
    /// pending input is cleared before rendering, so it is consumed exactly
    /// once even if the render fails. Outside that stage the text is ignored
    /// and the user is pointed back at the menu.
    pub fn supply_text(&self, conversation: &ConversationId, text: &str) -> SessionResult<Vec<Reply>> {
        self.store.with_session(conversation, |session| -> SessionResult<Vec<Reply>> {
            let image_ref = require_image(session)?;

            if session.stage != SessionStage::AwaitingCharsetInput {
                debug!(
                    "conversation {}: text ignored in stage {:?}",
                    conversation, session.stage
                );
                return Ok(vec![Reply::Menu {
                    text: CHOOSE_FIRST_TEXT.to_string(),
                    choices: TransformChoice::ALL.to_vec(),
                }]);
            }

            let input = PaletteInput::parse(text);
            match &input {
                PaletteInput::Reset => info!("conversation {}: palette reset to default", conversation),
                PaletteInput::Replace(palette) => info!(
                    "conversation {}: palette set to {} glyphs",
                    conversation,
                    palette.len()
                ),
                PaletteInput::Empty => warn!(
                    "conversation {}: empty palette input, keeping previous palette",
                    conversation
                ),
            }
            session.palette = input.apply(&session.palette);
            session.stage = SessionStage::Idle;

            let output = self.run(&image_ref, TransformChoice::AsciiArt, &session.palette)?;
            Ok(vec![output])
        })
    }

    /// Fetch, decode and transform the image behind `image_ref`
    fn run(
        &self,
        image_ref: &ImageRef,
        choice: TransformChoice,
        palette: &CharsetPalette,
    ) -> SessionResult<Reply> {
        let bytes = self.source.fetch(image_ref)?;
        let image = decode(&bytes)?;
        debug!(
            "running {} on {} ({}x{})",
            choice,
            image_ref,
            image.width(),
            image.height()
        );
        process_image(&image, choice, palette, &self.config)
    }
}

fn require_image(session: &Session) -> SessionResult<ImageRef> {
    session.image_ref.clone().ok_or_else(|| {
        debug!("conversation {}: rejected, no image on file", session.id);
        SessionError::NoImageAvailable
    })
}
