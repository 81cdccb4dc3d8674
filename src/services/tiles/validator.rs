use crate::types::{TileCandidate, ValidationResult};

pub const MISSING_GROUP_ID: &str = "Missing group_id";
pub const MISSING_GROUP_NAME: &str = "Missing group name";
pub const MISSING_ACTION: &str = "Missing action";
pub const MISSING_INTENSITY: &str = "Missing intensity";

/// Checks the minimum fields needed to match a tile.
///
/// Every rule runs; failures are collected rather than short-circuited.
pub fn validate_tile_for_matching(tile: &TileCandidate) -> ValidationResult {
    let mut errors = Vec::new();

    if !tile.has_group_id() {
        errors.push(MISSING_GROUP_ID.to_string());
    }
    if tile.group.is_empty() {
        errors.push(MISSING_GROUP_NAME.to_string());
    }
    if tile.action.is_empty() {
        errors.push(MISSING_ACTION.to_string());
    }
    if tile.intensity.is_none() {
        errors.push(MISSING_INTENSITY.to_string());
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
