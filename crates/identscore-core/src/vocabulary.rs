use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Short tokens that read fine in code even though a dictionary would reject
/// them (too short, or abbreviations).
pub const DEFAULT_ALLOWLIST: &[&str] = &[
    "id", "ids", "url", "uri", "cfg", "api", "db", "io", "ui", "os", "ip", "ok", "is", "to",
    "of", "on", "in", "at", "by", "up", "no", "fs", "js", "py", "xml", "html", "css", "json",
    "http", "https", "sql", "csv", "utf", "std", "str", "int", "len", "max", "min", "num",
    "idx", "tmp", "src", "dst", "msg", "err", "args", "arg", "argv", "argc", "env", "ctx",
    "obj", "val", "var", "ptr", "ref", "buf", "app", "config", "init", "util", "utils", "impl",
    "dto", "dao", "uid", "uuid", "gui", "cli", "cpu", "gpu", "ram", "tcp", "udp", "ssl", "tls",
    "dir", "pwd", "auth", "async", "sync", "exe", "dll", "lib", "pkg", "repo", "regex", "stdin",
    "stdout", "stderr", "main", "todo",
];

/// Reference word set used for matching identifier sub-words.
///
/// Holds the lowercase dictionary words, the allowlist, and every 3-character
/// window of every dictionary word so that partial matching is a set lookup.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: HashSet<String>,
    trigrams: HashSet<[char; 3]>,
    allowlist: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from words, with the default allowlist.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self {
            words: HashSet::new(),
            trigrams: HashSet::new(),
            allowlist: DEFAULT_ALLOWLIST.iter().map(|s| s.to_string()).collect(),
        };
        for word in words {
            vocabulary.insert(word.as_ref());
        }
        vocabulary
    }

    /// A vocabulary with no dictionary words; only the allowlist matches.
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<&str>())
    }

    /// Extend the allowlist with extra tokens (lowercased).
    pub fn with_allowlist<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowlist.extend(
            extra
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty()),
        );
        self
    }

    /// Parse a newline-delimited word list.
    pub fn from_word_list(content: &str) -> Self {
        Self::new(content.lines())
    }

    /// Read a newline-delimited word list from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read dictionary '{}'", path.display()))?;
        Ok(Self::from_word_list(&String::from_utf8_lossy(&bytes)))
    }

    /// Read a word list, falling back to an empty vocabulary when the file
    /// cannot be read.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(vocabulary) => {
                tracing::debug!(
                    path = %path.display(),
                    words = vocabulary.len(),
                    "loaded dictionary"
                );
                vocabulary
            }
            Err(e) => {
                tracing::warn!(
                    "{e:#}. Continuing with an empty dictionary; only allowlisted tokens will match."
                );
                Self::empty()
            }
        }
    }

    fn insert(&mut self, raw: &str) {
        let word = raw.trim().to_lowercase();
        if word.is_empty() {
            return;
        }
        let chars: Vec<char> = word.chars().collect();
        for window in chars.windows(3) {
            self.trigrams.insert([window[0], window[1], window[2]]);
        }
        self.words.insert(word);
    }

    /// Exact membership of an already-lowercased word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Allowlist membership of an already-lowercased token.
    pub fn is_allowlisted(&self, token: &str) -> bool {
        self.allowlist.contains(token)
    }

    /// True when some dictionary word of three or more characters contains one
    /// of `word`'s contiguous 3-character substrings.
    pub fn shares_trigram(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        chars
            .windows(3)
            .any(|w| self.trigrams.contains(&[w[0], w[1], w[2]]))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
