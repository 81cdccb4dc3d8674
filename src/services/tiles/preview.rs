//! Import preview: what an import would do, computed without writing.

use serde::Serialize;
use std::collections::HashSet;

use super::batch::batch_find_refs;
use super::key::create_key;
use super::store::TileStore;
use super::validator::validate_tile_for_matching;
use crate::types::{MatchKey, MatchOutcome, TileCandidate};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind", content = "errors")]
pub enum ImportAction {
    /// No stored tile has this key.
    Insert,
    /// A stored tile has this key; the import should update it.
    Update,
    /// An earlier candidate in the same import already has this key.
    DuplicateInBatch,
    /// Validation failed; the candidate was not sent to storage.
    Invalid(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreviewItem {
    /// Position of the candidate in the import.
    pub index: usize,
    pub match_key: Option<MatchKey>,
    pub existing_id: Option<i64>,
    pub action: ImportAction,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub total: usize,
    pub inserts: usize,
    pub updates: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub items: Vec<ImportPreviewItem>,
}

impl ImportPreview {
    fn push(&mut self, item: ImportPreviewItem) {
        match item.action {
            ImportAction::Insert => self.inserts += 1,
            ImportAction::Update => self.updates += 1,
            ImportAction::DuplicateInBatch => self.duplicates += 1,
            ImportAction::Invalid(_) => self.invalid += 1,
        }
        self.items.push(item);
    }
}

/// Phase 1 of an import: classify each candidate without writing to the store.
///
/// Only candidates that pass validation are matched, through a single batch call.
pub async fn preview_import<S: TileStore>(
    store: &S,
    tiles: &[TileCandidate],
    partition_concurrency: usize,
) -> MatchOutcome<ImportPreview> {
    let validations: Vec<_> = tiles.iter().map(validate_tile_for_matching).collect();
    let matchable: Vec<&TileCandidate> = tiles
        .iter()
        .zip(&validations)
        .filter(|(_, validation)| validation.valid)
        .map(|(tile, _)| tile)
        .collect();

    let results = batch_find_refs(store, &matchable, partition_concurrency).await?;

    let mut preview = ImportPreview {
        total: tiles.len(),
        ..Default::default()
    };
    let mut seen: HashSet<MatchKey> = HashSet::new();

    for (index, (tile, validation)) in tiles.iter().zip(validations).enumerate() {
        if !validation.valid {
            preview.push(ImportPreviewItem {
                index,
                match_key: None,
                existing_id: None,
                action: ImportAction::Invalid(validation.errors),
            });
            continue;
        }

        let match_key = create_key(tile)?;
        let existing_id = results
            .get(&match_key)
            .and_then(|result| result.existing_tile.as_ref())
            .map(|existing| existing.id);

        let action = if !seen.insert(match_key.clone()) {
            ImportAction::DuplicateInBatch
        } else if existing_id.is_some() {
            ImportAction::Update
        } else {
            ImportAction::Insert
        };

        preview.push(ImportPreviewItem {
            index,
            match_key: Some(match_key),
            existing_id,
            action,
        });
    }

    log::debug!(
        "Import preview: {} inserts, {} updates, {} duplicates, {} invalid",
        preview.inserts,
        preview.updates,
        preview.duplicates,
        preview.invalid
    );

    Ok(preview)
}

#[cfg(test)]
#[path = "tests/preview_tests.rs"]
mod tests;
