//! # Copista - Transcription Typing Engine
//!
//! Copista is the UI-independent core of a transcription typing trainer: the learner copies a
//! sequence of reference texts character by character, and may only move on to the next text
//! once the current one has been typed out exactly.
//!
//! The crate decides, per keystroke, whether input is accepted, computes correctness
//! highlighting, detects completion and derives timing and throughput metrics. It never talks
//! to a terminal, a filesystem or a clock of its own; timestamps are passed in by the caller.
//!
//! ## Modules
//!
//! - [`text`]: Exercises and line ending normalization
//! - [`buffer`]: The typed buffer and its caret
//! - [`validator`]: Per-keystroke accept/suppress decisions
//! - [`render`]: Correct/incorrect highlighting of the typed buffer
//! - [`completion`]: Completion results, totals and throughput
//! - [`session`]: The session state machine tying everything together
//!
//! ## Quick Start
//!
//! ```rust
//! use copista::session::{Effect, Event, Session};
//! use copista::validator::Key;
//! use web_time::Instant;
//!
//! let mut session = Session::new(vec!["hello.txt".to_string()]).unwrap();
//!
//! // The caller loads the file for the ticket and hands the text back
//! let ticket = session.load_exercise(0).unwrap();
//! assert!(session.finish_load(&ticket, "hi"));
//! session.focus();
//!
//! let start = Instant::now();
//! session.apply(Event::Key { key: Key::Char('h'), at: start });
//! let effects = session.apply(Event::Key { key: Key::Char('i'), at: start + web_time::Duration::from_secs(1) });
//!
//! assert!(session.is_completed(0));
//! assert!(effects.contains(&Effect::PlaySound));
//! ```

pub mod buffer;
pub mod completion;
pub mod render;
pub mod session;
pub mod text;
pub mod validator;

pub use buffer::TypedBuffer;
pub use completion::{ExerciseResult, Notification, Progress, Summary, Totals};
pub use render::Token;
pub use session::{Effect, Event, LoadTicket, Session, SessionError};
pub use text::Exercise;
pub use validator::{Key, Verdict};

// Types for more general type-safety
pub type Timestamp = web_time::Instant;
pub type Seconds = f64;
