//! The document aggregate: all pages plus their view state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::PatchError;
use crate::id::{new_id, PageId, ShapeId};
use crate::page::{Page, PageState};
use crate::patch::Patch;
use crate::shape::Shape;

/// The unit over which patches are computed: every page and every page's
/// view state, addressable by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub pages: HashMap<PageId, Page>,
    pub page_states: HashMap<PageId, PageState>,
}

impl Document {
    /// Creates a document with a single empty page.
    pub fn new(name: impl Into<String>) -> Self {
        let page = Page::new("Page 1");
        let mut doc = Self {
            id: new_id(),
            name: name.into(),
            pages: HashMap::new(),
            page_states: HashMap::new(),
        };
        doc.page_states
            .insert(page.id.clone(), PageState::new(page.id.clone()));
        doc.pages.insert(page.id.clone(), page);
        doc
    }

    /// Adds a page along with a fresh page state for it.
    pub fn add_page(&mut self, page: Page) {
        self.page_states
            .insert(page.id.clone(), PageState::new(page.id.clone()));
        self.pages.insert(page.id.clone(), page);
    }

    /// The lowest page id, for a deterministic default page.
    pub fn first_page_id(&self) -> Option<PageId> {
        self.pages.keys().min().cloned()
    }

    pub fn page(&self, page_id: &PageId) -> Option<&Page> {
        self.pages.get(page_id)
    }

    pub fn page_mut(&mut self, page_id: &PageId) -> Option<&mut Page> {
        self.pages.get_mut(page_id)
    }

    pub fn page_state(&self, page_id: &PageId) -> Option<&PageState> {
        self.page_states.get(page_id)
    }

    pub fn page_state_mut(&mut self, page_id: &PageId) -> Option<&mut PageState> {
        self.page_states.get_mut(page_id)
    }

    pub fn shape(&self, page_id: &PageId, shape_id: &ShapeId) -> Option<&Shape> {
        self.page(page_id).and_then(|p| p.shapes.get(shape_id))
    }

    /// The sole mutation primitive: merges a patch into this document and
    /// returns the result. Pure; the caller swaps the new document in, so a
    /// failing patch can never leave state half-applied.
    pub fn patched(&self, patch: &Patch) -> Result<Document, PatchError> {
        let mut value = serde_json::to_value(self)?;
        patch.apply_to(&mut value);
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, PatchError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Document, PatchError> {
        Ok(serde_json::from_str(json)?)
    }
}
