use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;
use log::info;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("word source not found: {0}")]
    Missing(String),
    #[error("word source has no content")]
    Empty,
    #[error("failed to read word source: {0}")]
    Io(#[from] io::Error),
}

/// A word drawn from the catalog together with the category it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnWord {
    pub word: String,
    pub category: String,
}

/// Categorized word list, immutable once parsed.
#[derive(Debug, Default, Clone)]
pub struct WordCatalog {
    categories: IndexMap<String, Vec<String>>,
}

impl WordCatalog {
    /// Load a catalog from a text file of `[Category]` headers followed by one word per line.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::Missing(path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let catalog = Self::parse(&content)?;
        info!(
            "Loaded {} categories ({} words) from {}",
            catalog.categories.len(),
            catalog.word_count(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a word source held in memory.
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        if content.trim().is_empty() {
            return Err(LoadError::Empty);
        }

        let mut categories: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim().to_string();
                // Reopening a category discards its earlier words but keeps its position.
                categories.insert(name.clone(), Vec::new());
                current = Some(name);
            } else if let Some(name) = &current {
                // Checked after uppercasing: some letters expand into combining marks.
                let word = line.to_uppercase();
                if !word.chars().all(char::is_alphabetic) {
                    continue;
                }
                if let Some(words) = categories.get_mut(name) {
                    words.push(word);
                }
            }
        }

        Ok(Self { categories })
    }

    /// Category names in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn words_of(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn word_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn random_word(&self, category: Option<&str>) -> Option<String> {
        self.draw(category).map(|drawn| drawn.word)
    }

    pub fn draw(&self, category: Option<&str>) -> Option<DrawnWord> {
        self.draw_with(category, &mut rand::thread_rng())
    }

    /// Pick a word uniformly from `category`, or from every word in the catalog when the
    /// category is omitted or unknown. Larger categories are proportionally more likely
    /// in the second case.
    pub fn draw_with<R: Rng + ?Sized>(
        &self,
        category: Option<&str>,
        rng: &mut R,
    ) -> Option<DrawnWord> {
        if let Some((name, words)) = category.and_then(|c| self.categories.get_key_value(c)) {
            if words.is_empty() {
                return None;
            }
            let word = words[rng.gen_range(0..words.len())].clone();
            return Some(DrawnWord {
                word,
                category: name.clone(),
            });
        }

        let total = self.word_count();
        if total == 0 {
            return None;
        }

        let mut index = rng.gen_range(0..total);
        for (name, words) in &self.categories {
            if index < words.len() {
                return Some(DrawnWord {
                    word: words[index].clone(),
                    category: name.clone(),
                });
            }
            index -= words.len();
        }
        None
    }
}
