use gameshelf_catalog::{CategoryKind, GameMode, load_entries};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_yaml(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn load_entry_from_yaml() {
    let tmp = TempDir::new().unwrap();
    let catalog_dir = tmp.path().join("catalog");
    fs::create_dir(&catalog_dir).unwrap();

    write_yaml(
        &catalog_dir,
        "moonfall.yaml",
        r#"
id: moonfall
title: "Moonfall Chronicles"
description: "A tactical RPG set on a shattered moon."
categories:
  - id: rpg
    name: RPG
    kind: genre
  - id: godot
    name: Godot
    kind: engine
tags:
  - tactics
  - pixel-art
avg_rating: 4.3
rating_count: 87
downloads: 1520
views: 9104
released_at: "2024-11-02T10:30:00Z"
modes:
  - single-player
  - coop
new_release: true
uploader:
  id: u-301
  name: "LunarForge"
success_rate: 61.5
"#,
    );

    let games = load_entries(&catalog_dir).unwrap();
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert_eq!(game.id, "moonfall");
    assert_eq!(game.title, "Moonfall Chronicles");
    assert!(game.has_category(CategoryKind::Genre, "rpg"));
    assert!(game.has_category(CategoryKind::Engine, "godot"));
    assert_eq!(game.tags.len(), 2);
    assert_eq!(game.rating_count, 87);
    assert_eq!(game.downloads, 1520);
    assert!(game.has_mode(GameMode::SinglePlayer));
    assert!(game.has_mode(GameMode::Coop));
    assert!(game.new_release);
    assert_eq!(game.uploader.name, "LunarForge");
    assert_eq!(game.success_rate, Some(61.5));
}

#[test]
fn optional_fields_default() {
    let tmp = TempDir::new().unwrap();
    let catalog_dir = tmp.path().join("catalog");
    fs::create_dir(&catalog_dir).unwrap();

    write_yaml(
        &catalog_dir,
        "bare.yaml",
        r#"
id: bare
title: "Bare Minimum"
released_at: "2023-01-15T00:00:00Z"
uploader:
  id: u-1
  name: "Someone"
"#,
    );

    let games = load_entries(&catalog_dir).unwrap();
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert!(game.description.is_empty());
    assert!(game.categories.is_empty());
    assert!(game.tags.is_empty());
    assert_eq!(game.avg_rating, 0.0);
    assert_eq!(game.downloads, 0);
    assert!(!game.new_release);
    assert_eq!(game.success_rate, None);
}

#[test]
fn entries_load_in_file_name_order() {
    let tmp = TempDir::new().unwrap();
    let catalog_dir = tmp.path().join("catalog");
    fs::create_dir(&catalog_dir).unwrap();

    for name in ["b.yaml", "a.yaml", "c.yaml"] {
        let id = name.trim_end_matches(".yaml");
        write_yaml(
            &catalog_dir,
            name,
            &format!(
                r#"
id: {id}
title: "{id}"
released_at: "2023-01-01T00:00:00Z"
uploader:
  id: u-1
  name: "Someone"
"#
            ),
        );
    }

    let games = load_entries(&catalog_dir).unwrap();
    let ids: Vec<_> = games.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn missing_dir_returns_empty() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nonexistent");
    let result = load_entries(&missing).unwrap();
    assert!(result.is_empty());
}

#[test]
fn malformed_yaml_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let catalog_dir = tmp.path().join("catalog");
    fs::create_dir(&catalog_dir).unwrap();

    write_yaml(&catalog_dir, "broken.yaml", "title: [unclosed");

    assert!(load_entries(&catalog_dir).is_err());
}
