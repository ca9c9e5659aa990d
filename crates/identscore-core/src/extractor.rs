use std::collections::HashSet;

use crate::types::{Entity, EntityKind, Language};

/// Identifiers that are never reported, such as loop counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedIdentifiers(HashSet<String>);

impl ExcludedIdentifiers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

impl Default for ExcludedIdentifiers {
    fn default() -> Self {
        Self::new(["i", "j"])
    }
}

/// Collects the entities of one file in order of appearance.
///
/// Empty and excluded names are dropped here, so every extractor shares the
/// same post-filter.
pub struct EntitySink<'a> {
    excluded: &'a ExcludedIdentifiers,
    line: usize,
    entities: Vec<Entity>,
}

impl<'a> EntitySink<'a> {
    pub fn new(excluded: &'a ExcludedIdentifiers) -> Self {
        Self {
            excluded,
            line: 0,
            entities: Vec::new(),
        }
    }

    /// Move to the next physical line (1-based).
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    pub fn push(&mut self, name: &str, kind: EntityKind) {
        let name = name.trim();
        if name.is_empty() || self.excluded.contains(name) {
            return;
        }
        self.entities.push(Entity {
            name: name.to_string(),
            kind,
            line: self.line,
        });
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }
}

/// Trait that each language extractor must implement.
///
/// Extraction is line oriented: every physical line is matched against the
/// language's patterns independently, so multi-line declarations are missed
/// and some non-declarations are accepted.
pub trait LanguageExtractor: Send + Sync {
    /// Language handled by this extractor.
    fn language(&self) -> Language;

    /// File extensions this extractor handles (e.g., &["java"])
    fn file_extensions(&self) -> &'static [&'static str] {
        self.language().file_extensions()
    }

    /// Prefixes (after leading whitespace) that mark a whole-line comment.
    fn comment_prefixes(&self) -> &'static [&'static str] {
        &["//", "/*", "*/", "* "]
    }

    /// Match one line and push every captured name into `sink`.
    fn extract_line(&self, line: &str, sink: &mut EntitySink<'_>);

    /// Extract all entities from a file's content.
    fn extract(&self, content: &str, excluded: &ExcludedIdentifiers) -> Vec<Entity> {
        let mut sink = EntitySink::new(excluded);
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || self.is_comment(trimmed) {
                continue;
            }
            sink.set_line(idx + 1);
            self.extract_line(line, &mut sink);
        }
        sink.into_entities()
    }

    fn is_comment(&self, trimmed: &str) -> bool {
        trimmed == "*"
            || self
                .comment_prefixes()
                .iter()
                .any(|prefix| trimmed.starts_with(prefix))
    }
}
