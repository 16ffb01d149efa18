//! pixmorph - conversational image transform pipeline
//!
//! A user submits one image per conversation and picks a transform:
//! luminance-bucketed ASCII art (with a per-conversation glyph palette),
//! block pixelation, or color inversion. [`SessionMachine`] tracks where each
//! conversation is in that flow; the transforms themselves are plain functions
//! over `image` buffers.
//!
//! # Example
//! ```no_run
//! use pixmorph::{
//!     ConversationId, ImageRef, InMemorySessionStore, MemoryImageSource, SessionMachine,
//!     TransformChoice, TransformConfig,
//! };
//!
//! let source = MemoryImageSource::new();
//! source.insert(ImageRef::from("photo"), std::fs::read("photo.jpg").unwrap());
//!
//! let machine =
//!     SessionMachine::new(InMemorySessionStore::new(), source, TransformConfig::default()).unwrap();
//! let chat = ConversationId::from("chat-1");
//!
//! machine.submit_image(&chat, ImageRef::from("photo"));
//! machine.choose(&chat, TransformChoice::AsciiArt).unwrap();
//! let replies = machine.supply_text(&chat, "0").unwrap();
//! println!("{}", replies[0].render_text().unwrap());
//! ```

pub mod ascii;
pub mod config;
pub mod error;
pub mod filters;
pub mod machine;
pub mod palette;
pub mod processor;
pub mod reply;
pub mod session;
pub mod source;
pub mod store;

// Re-export main types for convenience
pub use ascii::{AsciiArt, render_ascii};
pub use config::TransformConfig;
pub use error::{SessionError, SessionResult};
pub use filters::{invert, pixelate};
pub use machine::{SessionEvent, SessionMachine};
pub use palette::{CharsetPalette, DEFAULT_GLYPHS, PaletteInput};
pub use processor::{TransformChoice, process_image};
pub use reply::{OutputSink, Reply};
pub use session::{ConversationId, ImageRef, PendingAction, Session, SessionStage};
pub use source::{ImageSource, MemoryImageSource};
pub use store::{InMemorySessionStore, SessionStore};
