//! # Product List
//!
//! The ordered list of products a session has entered or uploaded.
//!
//! The list is a plain value owned by the caller. Nothing in this crate
//! keeps a global copy, and results are never cached: every render pass
//! calls [`ProductList::compute`] on the stored inputs.
//!
//! ## List Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product List Operations                              │
//! │                                                                         │
//! │  Session Action           Method                  List Change           │
//! │  ──────────────           ──────                  ───────────           │
//! │                                                                         │
//! │  Manual entry ───────────► push() ──────────────► entries.push(e)      │
//! │                                                                         │
//! │  File upload ────────────► extend() ────────────► entries.extend(..)   │
//! │                                                                         │
//! │  Edit row ───────────────► update_at() ─────────► entries[i].input = x │
//! │                                                                         │
//! │  Delete row(s) ──────────► remove_at() ─────────► entries.remove(i)    │
//! │                            remove_many()                                │
//! │                                                                         │
//! │  Render / export ────────► compute() ───────────► (read only)          │
//! │                                                                         │
//! │  NOTE: Failed operations leave the list exactly as it was.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::pricing;
use crate::types::{CalculationOptions, PricingSummary, ProductInput, ProductResult};

/// Where a list entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EntrySource {
    /// Typed in by the user.
    Manual,
    /// Read from an uploaded file.
    Upload,
}

impl EntrySource {
    pub fn label(self) -> &'static str {
        match self {
            EntrySource::Manual => "manual",
            EntrySource::Upload => "upload",
        }
    }
}

/// One product in the list.
///
/// ## Design Notes
/// - `id`: stable identity. Survives edits and deletes of other rows.
/// - `input`: the raw record as entered. Defaults are applied at compute
///   time, never written back.
/// - `added_at`: when the row joined the list. Edits keep it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListEntry {
    #[ts(as = "String")]
    pub id: Uuid,
    pub source: EntrySource,
    pub input: ProductInput,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl ListEntry {
    fn new(input: ProductInput, source: EntrySource) -> Self {
        ListEntry {
            id: Uuid::new_v4(),
            source,
            input,
            added_at: Utc::now(),
        }
    }
}

/// Ordered, caller-owned product list.
///
/// ## Invariants
/// - Entry order is insertion order; only deletes change relative order.
/// - Entry ids are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductList {
    entries: Vec<ListEntry>,
}

impl ProductList {
    /// Creates an empty list.
    pub fn new() -> Self {
        ProductList {
            entries: Vec::new(),
        }
    }

    /// Appends one product and returns its id.
    pub fn push(&mut self, input: ProductInput, source: EntrySource) -> Uuid {
        let entry = ListEntry::new(input, source);
        let id = entry.id;
        debug!(%id, ?source, index = self.entries.len(), "product added");
        self.entries.push(entry);
        id
    }

    /// Appends a whole batch in order and returns the new ids.
    pub fn extend<I>(&mut self, inputs: I, source: EntrySource) -> Vec<Uuid>
    where
        I: IntoIterator<Item = ProductInput>,
    {
        let start = self.entries.len();
        self.entries
            .extend(inputs.into_iter().map(|input| ListEntry::new(input, source)));
        let ids: Vec<Uuid> = self.entries[start..].iter().map(|e| e.id).collect();
        debug!(count = ids.len(), ?source, "product batch added");
        ids
    }

    /// Replaces the input of the entry at `index`, keeping its id.
    pub fn update_at(&mut self, index: usize, input: ProductInput) -> CoreResult<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;
        entry.input = input;
        debug!(index, id = %entry.id, "product updated");
        Ok(())
    }

    /// Removes the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> CoreResult<ListEntry> {
        if index >= self.entries.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let entry = self.entries.remove(index);
        debug!(index, id = %entry.id, "product removed");
        Ok(entry)
    }

    /// Removes the entry with the given id.
    pub fn remove(&mut self, id: Uuid) -> CoreResult<ListEntry> {
        let index = self
            .position(id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;
        self.remove_at(index)
    }

    /// Removes several entries addressed by their indices in the current list.
    ///
    /// All indices refer to the list as it is before the call, so
    /// `remove_many(&[0, 1])` removes the first two rows rather than the
    /// first and third. Duplicates are ignored. If any index is out of range
    /// nothing is removed.
    pub fn remove_many(&mut self, indices: &[usize]) -> CoreResult<Vec<ListEntry>> {
        let len = self.entries.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(CoreError::IndexOutOfRange { index, len });
        }

        let doomed: BTreeSet<usize> = indices.iter().copied().collect();
        let mut removed = Vec::with_capacity(doomed.len());
        let mut kept = Vec::with_capacity(len - doomed.len());
        for (i, entry) in std::mem::take(&mut self.entries).into_iter().enumerate() {
            if doomed.contains(&i) {
                removed.push(entry);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        debug!(count = removed.len(), "products removed");
        Ok(removed)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Index of the entry with the given id.
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// The stored inputs, in list order.
    pub fn inputs(&self) -> Vec<ProductInput> {
        self.entries.iter().map(|e| e.input.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recomputes every entry from its stored input.
    pub fn compute(&self, options: &CalculationOptions) -> Vec<ProductResult> {
        self.entries
            .iter()
            .map(|e| pricing::compute_one(&e.input, options))
            .collect()
    }

    /// Totals for the current list.
    pub fn summary(&self, options: &CalculationOptions) -> PricingSummary {
        pricing::summarize(&self.compute(options))
    }
}

impl Default for ProductList {
    fn default() -> Self {
        Self::new()
    }
}
