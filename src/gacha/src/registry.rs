//! Collection of built games, keyed by game id

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::GameConfig;
use crate::error::{GachaError, Result};
use crate::model::GameModel;

/// Outcome of loading a games directory
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub failed: Vec<(PathBuf, String)>,
}

impl LoadReport {
    pub fn has_errors(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct GameRegistry {
    games: BTreeMap<String, GameModel>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and build a game, then store it under its id
    pub fn insert(&mut self, config: &GameConfig) -> Result<&GameModel> {
        if self.games.contains_key(&config.id) {
            return Err(GachaError::DuplicateGame(config.id.clone()));
        }
        config.validate()?;

        let model = GameModel::build(config);
        Ok(self.games.entry(config.id.clone()).or_insert(model))
    }

    /// Load every `*.json` game file under `dir`.
    ///
    /// A file that fails to parse or validate is logged and recorded in the
    /// report; the remaining files still load.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<(Self, LoadReport)> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(GachaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("games directory not found: {}", dir.display()),
            )));
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut registry = Self::new();
        let mut report = LoadReport::default();

        for path in paths {
            let loaded = GameConfig::load(&path).and_then(|config| {
                registry.insert(&config)?;
                Ok(config.id)
            });

            match loaded {
                Ok(id) => report.loaded.push(id),
                Err(e) => {
                    tracing::error!(path = %path.display(), "{}", e);
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        if report.has_errors() {
            tracing::error!(
                failed = report.failed.len(),
                "Failed to load some gacha games"
            );
        } else {
            tracing::info!(count = report.loaded.len(), "Successfully loaded gacha games");
        }

        Ok((registry, report))
    }

    pub fn get(&self, id: &str) -> Option<&GameModel> {
        self.games.get(id)
    }

    /// Look a game up by id, falling back to a case-insensitive name match
    pub fn find(&self, query: &str) -> Option<&GameModel> {
        if let Some(game) = self.games.get(query) {
            return Some(game);
        }
        let query_lower = query.to_lowercase();
        self.games
            .values()
            .find(|g| g.id.to_lowercase() == query_lower || g.name.to_lowercase() == query_lower)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.games.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameModel> {
        self.games.values()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_json(id: &str, name: &str, last_rate: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "name": "{name}",
                "rules": {{ "guaranteeEvery": 10, "guaranteeGroup": "SR", "sessionSize": 10 }},
                "groups": [
                    {{ "name": "SSR", "tier": 1, "rates": 0.03 }},
                    {{ "name": "SR", "tier": 2, "rates": 0.18 }},
                    {{ "name": "R", "tier": 3, "rates": {last_rate} }}
                ],
                "membersByGroup": {{
                    "SSR": [{{ "name": "A" }}],
                    "SR": [{{ "name": "B" }}],
                    "R": [{{ "name": "C" }}]
                }}
            }}"#
        )
    }

    #[test]
    fn test_insert_and_find() {
        let mut registry = GameRegistry::new();
        let config =
            GameConfig::from_json(&game_json("uma-character", "Character", "0.79")).unwrap();
        registry.insert(&config).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.get("uma-character").is_some());
        assert_eq!(registry.find("CHARACTER").unwrap().id, "uma-character");
        assert!(registry.find("support").is_none());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut registry = GameRegistry::new();
        let config = GameConfig::from_json(&game_json("a", "A", "0.79")).unwrap();
        registry.insert(&config).unwrap();
        assert!(matches!(
            registry.insert(&config),
            Err(GachaError::DuplicateGame(_))
        ));
    }

    #[test]
    fn test_insert_rejects_invalid() {
        let mut registry = GameRegistry::new();
        let config = GameConfig::from_json(&game_json("a", "A", "0.5")).unwrap();
        assert!(registry.insert(&config).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_dir_skips_broken_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("a.json"), game_json("a", "A", "0.79")).unwrap();
        std::fs::write(temp_dir.path().join("b.json"), game_json("b", "B", "0.5")).unwrap();
        std::fs::write(temp_dir.path().join("c.json"), "{ not json").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let (registry, report) = GameRegistry::load_dir(temp_dir.path()).unwrap();

        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(report.loaded, vec!["a".to_string()]);
        assert_eq!(report.failed.len(), 2);
        assert!(report.has_errors());
    }

    #[test]
    fn test_load_dir_missing() {
        assert!(GameRegistry::load_dir("/nonexistent/games").is_err());
    }
}
