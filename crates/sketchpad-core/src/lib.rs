//! # Sketchpad Core
//!
//! The document model and patch engine for the sketchpad shape editor.
//!
//! This crate is pure data and algorithms: shapes, bindings, pages and the
//! document aggregate, plus the partial-deep-update machinery ("patches")
//! that every state transition in the editor flows through. It knows
//! nothing about sessions, history or input; those live in
//! `sketchpad-editor`.
//!
//! ## Core pieces
//!
//! - **Shapes**: a closed set of variants (rectangle, ellipse, freehand
//!   draw, arrow, text) with shared style and z-order attributes.
//! - **Bindings**: directed anchors from an arrow's handle to a target
//!   shape.
//! - **Patches**: composable, invertible partial updates with an explicit
//!   absent / set / removed distinction per field.

pub mod binding;
pub mod document;
pub mod error;
pub mod geometry;
pub mod id;
pub mod page;
pub mod patch;
pub mod shape;
pub mod style;

pub use binding::Binding;
pub use document::Document;
pub use error::PatchError;
pub use geometry::{Bounds, Point};
pub use id::{new_id, BindingId, PageId, ShapeId};
pub use page::{Camera, Page, PageState};
pub use patch::{diff_documents, Patch, Touched};
pub use shape::{ArrowDecorations, ArrowHandles, Decoration, Handle, HandleId, Shape, ShapeKind};
pub use style::{ColorStyle, DashStyle, ShapeStyle, SizeStyle};
