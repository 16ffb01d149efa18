//! Per-conversation session state

use crate::palette::CharsetPalette;
use std::fmt;

/// Opaque key identifying an independent conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for ConversationId {
    fn from(chat_id: i64) -> Self {
        Self::new(chat_id.to_string())
    }
}

/// Opaque handle to a submitted raw image (a file id, storage key or path)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

/// Where a conversation is in the submit -> choose -> (charset) flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStage {
    /// Nothing pending
    #[default]
    Idle,
    /// Image received, no transform chosen yet
    AwaitingChoice,
    /// Text rendering chosen; the next text input is the palette
    AwaitingCharsetInput,
}

/// Multi-step action a session is in the middle of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    None,
    AwaitingCharsetInput,
}

/// State of one conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: ConversationId,
    pub image_ref: Option<ImageRef>,
    pub stage: SessionStage,
    pub palette: CharsetPalette,
}

impl Session {
    pub fn new(id: ConversationId) -> Self {
        Self {
            id,
            image_ref: None,
            stage: SessionStage::Idle,
            palette: CharsetPalette::default(),
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_ref.is_some()
    }

    pub fn pending_action(&self) -> PendingAction {
        match self.stage {
            SessionStage::AwaitingCharsetInput => PendingAction::AwaitingCharsetInput,
            SessionStage::Idle | SessionStage::AwaitingChoice => PendingAction::None,
        }
    }
}
