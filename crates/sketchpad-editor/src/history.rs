//! The bounded, serializable undo/redo stack.
//!
//! History records commands; it never applies them. The editor applies a
//! command's forward patch before (or as part of) pushing it, and applies
//! the patches handed back by [`History::undo`] and [`History::redo`].

use serde::{Deserialize, Serialize};
use sketchpad_core::Patch;

/// One atomic, undoable unit: a forward patch and the inverse patch that
/// restores the prior state. Commands are self-contained; replaying one
/// needs no context beyond the document it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// The operation name ("duplicate", "translate", ...). Useful for
    /// display and tracing; not required to be unique.
    pub id: String,
    /// Applied to restore the state before this command.
    pub before: Patch,
    /// Applied to reach the state after this command.
    pub after: Patch,
}

impl Command {
    pub fn new(id: impl Into<String>, before: Patch, after: Patch) -> Self {
        Self {
            id: id.into(),
            before,
            after,
        }
    }
}

fn default_max_depth() -> usize {
    History::DEFAULT_MAX_DEPTH
}

/// A linear undo stack with a pointer.
///
/// Invariant: `0 <= pointer <= stack.len()`. Commands below the pointer
/// have been applied forward; redo is possible while the pointer is below
/// the top. Pushing while the pointer sits mid-stack discards the branch
/// above it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pointer: usize,
    stack: Vec<Command>,
    #[serde(skip, default = "default_max_depth")]
    max_depth: usize,
}

impl History {
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    pub fn new() -> Self {
        Self::with_depth(Self::DEFAULT_MAX_DEPTH)
    }

    /// Creates a history bounded to the given number of commands.
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            pointer: 0,
            stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Records a command. Truncates any redoable branch first, then
    /// appends and moves the pointer to the top. Oldest commands fall off
    /// the front once the depth limit is reached.
    pub fn push(&mut self, command: Command) {
        self.stack.truncate(self.pointer);
        self.stack.push(command);
        self.pointer = self.stack.len();
        if self.stack.len() > self.max_depth {
            self.stack.remove(0);
            self.pointer -= 1;
        }
    }

    /// Steps the pointer back and returns the command whose `before` patch
    /// the caller must apply. `None` at the bottom of the stack.
    pub fn undo(&mut self) -> Option<&Command> {
        if self.pointer == 0 {
            return None;
        }
        self.pointer -= 1;
        Some(&self.stack[self.pointer])
    }

    /// Returns the command whose `after` patch the caller must apply and
    /// steps the pointer forward. `None` at the top of the stack.
    pub fn redo(&mut self) -> Option<&Command> {
        if self.pointer == self.stack.len() {
            return None;
        }
        self.pointer += 1;
        Some(&self.stack[self.pointer - 1])
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer < self.stack.len()
    }

    /// Number of commands available to undo.
    pub fn undo_depth(&self) -> usize {
        self.pointer
    }

    /// Number of commands available to redo.
    pub fn redo_depth(&self) -> usize {
        self.stack.len() - self.pointer
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.pointer = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
