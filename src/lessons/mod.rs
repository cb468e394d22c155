//! Lesson catalog.
//!
//! The curriculum is embedded in the binary as `lessons.json` and validated
//! when loaded, so every card can be turned into a counting session.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::Lesson;

/// Catalog schema from lessons.json.
#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[allow(dead_code)]
    version: String,
    lessons: Vec<Lesson>,
}

/// All lessons of the curriculum, in curriculum order.
#[derive(Debug, Clone)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
    lookup: HashMap<String, usize>,
}

impl LessonCatalog {
    /// Loads the embedded catalog.
    pub fn load() -> Result<Self> {
        Self::from_json(include_str!("lessons.json"))
            .context("Failed to load embedded lessons.json")
    }

    /// Parses and validates a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).context("Failed to parse lesson catalog")?;

        let mut lookup = HashMap::new();
        for (idx, lesson) in file.lessons.iter().enumerate() {
            if lesson.cards.is_empty() {
                anyhow::bail!("Lesson '{}' has no cards", lesson.slug);
            }
            for (card_idx, card) in lesson.cards.iter().enumerate() {
                card.validate().with_context(|| {
                    format!("Lesson '{}' card {} is invalid", lesson.slug, card_idx)
                })?;
            }
            if lookup.insert(lesson.slug.clone(), idx).is_some() {
                anyhow::bail!("Duplicate lesson slug '{}'", lesson.slug);
            }
        }

        Ok(Self {
            lessons: file.lessons,
            lookup,
        })
    }

    /// All lessons in curriculum order.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Looks up a lesson by slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Lesson> {
        self.lookup.get(slug).map(|&idx| &self.lessons[idx])
    }

    /// Slugs in curriculum order.
    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        self.lessons.iter().map(|l| l.slug.as_str()).collect()
    }

    /// Number of lessons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}
