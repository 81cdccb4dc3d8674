use super::*;
use crate::test_utils::{candidate, with_mode};

#[test]
fn test_key_layout_and_determinism() {
    let tile = with_mode(candidate("warmup", 2, "Dance"), GameMode::Local, "de");

    let first = create_key(&tile).unwrap();
    let second = create_key(&tile).unwrap();

    assert_eq!(first.as_str(), "warmup|2|Dance|local|de");
    assert_eq!(first, second);
}

#[test]
fn test_key_defaults_match_explicit_values() {
    let implicit = candidate("warmup", 1, "Dance");
    let explicit = with_mode(candidate("warmup", 1, "Dance"), GameMode::Online, "en");

    let key = create_key(&implicit).unwrap();
    assert_eq!(key.as_str(), "warmup|1|Dance|online|en");
    assert_eq!(key, create_key(&explicit).unwrap());
}

#[test]
fn test_key_rejects_missing_or_empty_group_id() {
    let mut tile = candidate("warmup", 1, "Dance");

    tile.group_id = None;
    let err = create_key(&tile).unwrap_err();
    assert!(err.is_missing_group_id());
    assert!(err.to_string().contains("group_id"));

    tile.group_id = Some(String::new());
    assert!(create_key(&tile).unwrap_err().is_missing_group_id());
}

#[test]
fn test_key_ignores_group_label() {
    let mut a = candidate("warmup", 1, "Dance");
    let mut b = candidate("warmup", 1, "Dance");
    a.group = "Warm-up".into();
    b.group = "Warm up (renamed)".into();

    assert_eq!(create_key(&a).unwrap(), create_key(&b).unwrap());
}

#[test]
fn test_key_with_missing_intensity_leaves_segment_empty() {
    let mut tile = candidate("warmup", 1, "Dance");
    tile.intensity = None;

    assert_eq!(create_key(&tile).unwrap().as_str(), "warmup||Dance|online|en");
}

#[test]
fn test_exact_filter_applies_defaults() {
    let filter = exact_filter(&candidate("warmup", 3, "Jump")).unwrap();

    assert_eq!(
        filter,
        TileFilter {
            group_id: Some("warmup".into()),
            intensity: Some(3),
            action: Some("Jump".into()),
            game_mode: Some(GameMode::Online),
            locale: Some("en".into()),
        }
    );
}

#[test]
fn test_exact_filter_requires_group_id_and_intensity() {
    let mut no_intensity = candidate("warmup", 3, "Jump");
    no_intensity.intensity = None;
    assert!(exact_filter(&no_intensity).is_none());

    let mut no_group = candidate("warmup", 3, "Jump");
    no_group.group_id = None;
    assert!(exact_filter(&no_group).is_none());
}

#[test]
fn test_tiles_equal_ignores_label() {
    let mut a = candidate("warmup", 1, "Dance");
    let mut b = candidate("warmup", 1, "Dance");
    a.group = "A".into();
    b.group = "B".into();

    assert!(tiles_equal(&a, &b).unwrap());
}

#[test]
fn test_tiles_equal_detects_identity_difference() {
    let a = candidate("warmup", 1, "Dance");
    let b = with_mode(candidate("warmup", 1, "Dance"), GameMode::Local, "en");

    assert!(!tiles_equal(&a, &b).unwrap());
}

#[test]
fn test_tiles_equal_fails_when_both_lack_group_id() {
    let mut a = candidate("warmup", 1, "Dance");
    let mut b = candidate("warmup", 1, "Dance");
    a.group_id = None;
    b.group_id = Some(String::new());

    let err = tiles_equal(&a, &b).unwrap_err();
    assert!(matches!(err, MatchError::CompareWithoutGroupId));
    assert_eq!(err.to_string(), "Cannot compare tiles without group_id");
}

#[test]
fn test_tiles_equal_one_sided_missing_group_id_is_unequal() {
    let a = candidate("warmup", 1, "Dance");
    let mut b = candidate("warmup", 1, "Dance");
    b.group_id = None;

    assert!(!tiles_equal(&a, &b).unwrap());
    assert!(!tiles_equal(&b, &a).unwrap());
}
