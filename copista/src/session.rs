//! # Session Module - Transcription Session State Machine
//!
//! A [`Session`] is the single source of truth for where the learner is: the ordered exercises,
//! the active one, which ones are completed, what has been typed, the timing markers and the
//! running totals.
//!
//! ## Exercise Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/exercise_lifecycle.mmd")]
//!
//! ## Driving a Session
//!
//! The session is a set of transitions `(state, event) -> state'`. Every transition is reachable
//! through [`Session::apply`], which returns the [`Effect`]s the caller has to carry out:
//! loading a file, playing the completion cue, or showing a notification. The caller owns all
//! I/O; the session only ever sees text and timestamps.
//!
//! Loading is split in two halves. [`Session::load_exercise`] switches the active exercise and
//! hands out a [`LoadTicket`]; the caller reads the file and returns the text through
//! [`Session::finish_load`]. Every new load supersedes the previous ticket, so a slow load that
//! finishes after the learner navigated elsewhere is discarded.
//!
//! ```rust
//! use copista::session::{Effect, Event, Session};
//!
//! let mut session = Session::new(vec!["a.txt".into(), "b.txt".into()]).unwrap();
//! let first = session.load_exercise(0).unwrap();
//!
//! // Forward navigation is gated on completion
//! assert!(session.apply(Event::Advance).is_empty());
//! assert_eq!(session.current_index(), 0);
//!
//! // A superseded ticket is discarded
//! let second = session.load_exercise(0).unwrap();
//! assert!(!session.finish_load(&first, "old"));
//! assert!(session.finish_load(&second, "new"));
//! ```

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, trace, warn};
use web_time::Duration;

use crate::buffer::TypedBuffer;
use crate::completion::{ExerciseResult, Notification, Progress, Totals};
use crate::render::{Token, render};
use crate::text::Exercise;
use crate::validator::{Key, Verdict, validate, validate_paste};
use crate::Timestamp;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("A session needs at least one exercise")]
    NoExercises,
}

/// Handed out for every load request, and handed back together with the loaded text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub index: usize,
    pub name: String,
    generation: u64,
}

impl LoadTicket {
    /// Load generation. Higher generations supersede lower ones
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Everything that can happen to a session
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keystroke in the text area
    Key { key: Key, at: Timestamp },
    /// Text was pasted into the text area
    Paste,
    /// The text area was clicked/focused
    Focus,
    /// The text area lost focus
    Blur,
    /// Go to the next exercise
    Advance,
    /// Go to the previous exercise
    Retreat,
    /// The per-exercise notification was dismissed
    Continue,
    /// A requested load finished
    Loaded { ticket: LoadTicket, text: String },
    /// A requested load failed
    LoadFailed { ticket: LoadTicket, reason: String },
}

/// Work the caller has to carry out after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read the exercise file for the ticket and report back with [`Event::Loaded`]
    Load(LoadTicket),
    /// Play the completion cue
    PlaySound,
    /// Show a notification to the learner
    Notify(Notification),
}

/// A transcription session over an ordered list of exercises
#[derive(Debug, Clone)]
pub struct Session {
    /// Exercise identifiers in presentation order. Never empty
    exercises: Vec<String>,
    current_index: usize,
    /// Only ever grows
    completed: BTreeSet<usize>,
    /// `None` while the active exercise is loading
    exercise: Option<Exercise>,
    typed: TypedBuffer,
    started_at: Option<Timestamp>,
    finished_at: Option<Timestamp>,
    totals: Totals,
    typing_enabled: bool,
    generation: u64,
    load_error: Option<String>,
}

impl Session {
    /// Create a session over `exercises`, in order
    ///
    /// Nothing is loaded yet, call [`Session::load_exercise`] to load the first exercise.
    pub fn new(exercises: Vec<String>) -> Result<Self, SessionError> {
        if exercises.is_empty() {
            return Err(SessionError::NoExercises);
        }

        Ok(Self {
            exercises,
            current_index: 0,
            completed: BTreeSet::new(),
            exercise: None,
            typed: TypedBuffer::new(),
            started_at: None,
            finished_at: None,
            totals: Totals::default(),
            typing_enabled: false,
            generation: 0,
            load_error: None,
        })
    }

    /// Apply an event and return the effects the caller has to carry out
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Key { key, at } => self.press(key, at),
            Event::Paste => {
                self.paste();
                Vec::new()
            }
            Event::Focus => {
                self.focus();
                Vec::new()
            }
            Event::Blur => {
                self.blur();
                Vec::new()
            }
            Event::Advance => self.advance().map(Effect::Load).into_iter().collect(),
            Event::Retreat => self.retreat().map(Effect::Load).into_iter().collect(),
            Event::Continue => self.continue_after_result(),
            Event::Loaded { ticket, text } => {
                self.finish_load(&ticket, &text);
                Vec::new()
            }
            Event::LoadFailed { ticket, reason } => {
                self.fail_load(&ticket, reason);
                Vec::new()
            }
        }
    }
}

// Loading and navigation
impl Session {
    /// Switch to the exercise at `index`
    ///
    /// Out of range indices are ignored. The previous reference text is dropped right away, the
    /// session stays in its loading state until [`Session::finish_load`] gets the new text.
    pub fn load_exercise(&mut self, index: usize) -> Option<LoadTicket> {
        let name = self.exercises.get(index)?.clone();

        self.current_index = index;
        self.started_at = None;
        self.finished_at = None;
        self.exercise = None;
        self.typed = TypedBuffer::new();
        self.typing_enabled = false;
        self.load_error = None;
        self.generation += 1;

        debug!(index, %name, generation = self.generation, "exercise load requested");

        Some(LoadTicket {
            index,
            name,
            generation: self.generation,
        })
    }

    /// Install the text of a finished load
    ///
    /// Returns false if the ticket was superseded by a newer load, in which case nothing
    /// changes. An already completed exercise is shown fully typed and read-only.
    pub fn finish_load(&mut self, ticket: &LoadTicket, text: &str) -> bool {
        if !self.is_current(ticket) {
            debug!(index = ticket.index, generation = ticket.generation, "discarding stale load");
            return false;
        }

        let exercise = Exercise::new(ticket.name.clone(), text);
        self.typed = if self.is_completed(ticket.index) {
            TypedBuffer::from_chars(exercise.reference())
        } else {
            TypedBuffer::new()
        };
        self.typing_enabled = false;
        self.exercise = Some(exercise);

        debug!(index = ticket.index, "exercise loaded");
        true
    }

    /// Record a failed load
    ///
    /// The session stays in its loading state; there is no retry.
    pub fn fail_load(&mut self, ticket: &LoadTicket, reason: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        let reason = reason.into();
        warn!(index = ticket.index, name = %ticket.name, %reason, "exercise load failed");
        self.load_error = Some(reason);
        true
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// True if the current exercise is completed and isn't the last one
    pub fn can_advance(&self) -> bool {
        !self.is_last() && self.is_completed(self.current_index)
    }

    pub const fn can_retreat(&self) -> bool {
        self.current_index > 0
    }

    /// Go to the next exercise, if allowed
    pub fn advance(&mut self) -> Option<LoadTicket> {
        if !self.can_advance() {
            return None;
        }

        self.load_exercise(self.current_index + 1)
    }

    /// Go to the previous exercise, if there is one
    pub fn retreat(&mut self) -> Option<LoadTicket> {
        if !self.can_retreat() {
            return None;
        }

        self.load_exercise(self.current_index - 1)
    }

    /// Called once the per-exercise notification is dismissed
    ///
    /// Chains into the final summary after the last exercise, otherwise moves on.
    pub fn continue_after_result(&mut self) -> Vec<Effect> {
        if !self.is_completed(self.current_index) {
            return Vec::new();
        }

        if self.is_last() {
            return vec![Effect::Notify(Notification::Summary(self.totals.summary()))];
        }

        self.advance().map(Effect::Load).into_iter().collect()
    }
}

// Typing
impl Session {
    /// Enable typing, unless the exercise is still loading or already completed
    pub fn focus(&mut self) {
        if self.exercise.is_some() && !self.is_completed(self.current_index) {
            self.typing_enabled = true;
        }
    }

    pub fn blur(&mut self) {
        self.typing_enabled = false;
    }

    /// Pasting is never allowed
    pub fn paste(&self) -> Verdict {
        trace!("paste suppressed");
        validate_paste()
    }

    /// Process a keystroke typed at `at`
    pub fn press(&mut self, key: Key, at: Timestamp) -> Vec<Effect> {
        if !self.typing_enabled {
            return Vec::new();
        }

        let Some(exercise) = &self.exercise else {
            return Vec::new();
        };

        let limit = exercise.len();
        match validate(key, &self.typed, exercise.reference()) {
            Verdict::Suppress => {
                trace!(?key, "keystroke suppressed");
                return Vec::new();
            }
            Verdict::Accept => self.apply_key(key, limit),
            Verdict::Insert(text) => self.insert(&text, limit),
        }

        self.start_clock(at);
        self.check_completion(at)
    }

    fn apply_key(&mut self, key: Key, limit: usize) {
        match key {
            Key::Char(char) => self.insert(&char.to_string(), limit),
            Key::Enter => self.insert("\n", limit),
            Key::Backspace => {
                self.typed.delete_backward();
            }
            Key::Delete => {
                self.typed.delete_forward();
            }
            Key::Left => self.typed.move_left(),
            Key::Right => self.typed.move_right(),
            Key::Up => self.typed.move_up(),
            Key::Down => self.typed.move_down(),
            Key::Tab | Key::Other => {}
        }
    }

    /// Insert at the caret, unless the buffer would outgrow the reference
    fn insert(&mut self, text: &str, limit: usize) {
        if self.typed.len() + text.chars().count() > limit {
            trace!(len = self.typed.len(), limit, "insertion past reference length suppressed");
            return;
        }

        self.typed.insert(text);
    }

    /// Start the clock once the buffer begins with the first reference character
    fn start_clock(&mut self, at: Timestamp) {
        if self.started_at.is_some() {
            return;
        }

        let Some(exercise) = &self.exercise else {
            return;
        };

        if let Some(first) = self.typed.as_chars().first()
            && exercise.reference().first() == Some(first)
        {
            self.started_at = Some(at);
        }
    }

    /// Complete the active exercise if the typed buffer matches its reference exactly
    ///
    /// Does nothing for an exercise that is already completed, so calling this repeatedly never
    /// counts an exercise twice. The notification and the statistics update are skipped when
    /// there is no measurable time; the completion cue is always emitted.
    pub fn check_completion(&mut self, at: Timestamp) -> Vec<Effect> {
        let index = self.current_index;
        if self.is_completed(index) {
            return Vec::new();
        }

        let Some(characters) = self
            .exercise
            .as_ref()
            .filter(|exercise| !exercise.is_empty() && self.typed.matches(exercise.reference()))
            .map(Exercise::len)
        else {
            return Vec::new();
        };

        self.typing_enabled = false;
        self.completed.insert(index);
        self.finished_at = Some(at);

        let mut effects = Vec::with_capacity(2);

        let elapsed = self
            .started_at
            .map(|started| at.saturating_duration_since(started));
        let result = elapsed
            .and_then(|elapsed| ExerciseResult::new(index, characters, elapsed, self.is_last()));

        if let Some(result) = result {
            info!(
                index,
                characters,
                seconds = result.elapsed_seconds(),
                throughput = result.throughput,
                "exercise completed"
            );
            self.totals.record(&result);
            effects.push(Effect::Notify(Notification::ExerciseComplete(result)));
        } else {
            info!(index, characters, "exercise completed without measurable time");
        }

        effects.push(Effect::PlaySound);
        effects
    }
}

// Accessors
impl Session {
    pub fn exercises(&self) -> &[String] {
        &self.exercises
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn exercise_name(&self, index: usize) -> Option<&str> {
        self.exercises.get(index).map(String::as_str)
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// The loaded active exercise, `None` while loading
    pub const fn exercise(&self) -> Option<&Exercise> {
        self.exercise.as_ref()
    }

    pub const fn is_loading(&self) -> bool {
        self.exercise.is_none()
    }

    /// The reason the last load failed, if it did
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub const fn typed(&self) -> &TypedBuffer {
        &self.typed
    }

    pub const fn typing_enabled(&self) -> bool {
        self.typing_enabled
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// True if the active exercise is the last one
    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.exercises.len()
    }

    /// Fraction of completed exercises, between 0.0 and 1.0
    pub fn progress(&self) -> f64 {
        self.completed.len() as f64 / self.exercises.len() as f64
    }

    pub fn progress_state(&self) -> Progress {
        if self.is_completed(self.current_index) {
            Progress::Completed
        } else if self.started_at.is_some() {
            Progress::InProgress
        } else {
            Progress::NotStarted
        }
    }

    pub const fn totals(&self) -> &Totals {
        &self.totals
    }

    pub const fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub const fn finished_at(&self) -> Option<Timestamp> {
        self.finished_at
    }

    /// Time spent on the current attempt, frozen once it is completed
    pub fn elapsed(&self, now: Timestamp) -> Duration {
        self.started_at.map_or(Duration::ZERO, |started| {
            self.finished_at
                .unwrap_or(now)
                .saturating_duration_since(started)
        })
    }

    /// Render the typed overlay of the active exercise
    pub fn render(&self) -> Vec<Token> {
        self.exercise.as_ref().map_or_else(Vec::new, |exercise| {
            render(
                self.typed.as_chars(),
                exercise.reference(),
                self.typing_enabled,
            )
        })
    }
}
