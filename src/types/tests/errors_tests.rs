use crate::types::errors::{MatchError, StorageError};
use sqlx::Error as SqlxError;

#[test]
fn test_storage_error_from_sqlx() {
    let sqlx_err = SqlxError::RowNotFound;
    let storage_err = StorageError::from(sqlx_err);

    match storage_err {
        StorageError::Database(msg) => {
            assert!(msg.contains("no rows returned"));
        }
        _ => panic!("Expected StorageError::Database"),
    }
}

#[test]
fn test_storage_error_passes_through_match_error() {
    let err = MatchError::from(StorageError::Unavailable("offline".to_string()));

    assert!(matches!(err, MatchError::Storage(StorageError::Unavailable(_))));
    assert_eq!(err.to_string(), "Storage unavailable: offline");
    assert!(!err.is_missing_group_id());
}

#[test]
fn test_missing_group_id_keeps_layer_message() {
    let err = MatchError::MissingGroupId("Tile missing group_id".to_string());

    assert!(err.is_missing_group_id());
    assert_eq!(err.to_string(), "Tile missing group_id");
}

#[test]
fn test_match_error_serialization() {
    let err = MatchError::CompareWithoutGroupId;

    // MatchError serializes as just its Display string
    let serialized = serde_json::to_string(&err).unwrap();
    assert_eq!(serialized, "\"Cannot compare tiles without group_id\"");
}
