//! Interactive editing over a `sketchpad-core` document.
//!
//! This crate layers the stateful editing machinery on top of the document
//! model: patch-pair commands with a bounded undo history, gesture
//! sessions that turn continuous pointer input into single commands,
//! atomic actions (duplicate, delete, align, ...), and the binding
//! resolver that keeps arrow attachments consistent through all of them.
//!
//! The entry point is [`Editor`]. A typical gesture:
//!
//! ```
//! use sketchpad_core::Point;
//! use sketchpad_editor::{Editor, PointerInfo, SessionInput};
//!
//! let mut editor = Editor::new();
//! let style = Default::default();
//! editor.begin_draw(Point::new(10.0, 10.0), style).unwrap();
//! editor
//!     .update_session(SessionInput::Pointer(PointerInfo::at(Point::new(20.0, 25.0))))
//!     .unwrap();
//! editor.complete_session().unwrap();
//! assert!(editor.can_undo());
//! ```

pub mod actions;
pub mod bindings;
pub mod editor;
pub mod error;
pub mod history;
pub mod session;

pub use actions::{
    AlignType, Clipboard, DistributeType, FlipType, MoveType, StretchType, DUPLICATE_OFFSET,
};
pub use bindings::{resolve_bindings, Resolution};
pub use editor::Editor;
pub use error::EditorError;
pub use history::{Command, History};
pub use session::{
    BrushSession, DrawSession, EditTextSession, EditorSession, HandleSession, PointerInfo,
    RotateSession, SessionCompletion, SessionInput, TransformCorner, TransformSession,
    TranslateSession,
};
