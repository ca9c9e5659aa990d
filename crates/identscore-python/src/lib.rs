use anyhow::{Context, Result};
use regex::Regex;

use identscore_core::extractor::{EntitySink, LanguageExtractor};
use identscore_core::types::{EntityKind, Language};

/// Keywords that can open a line followed by `:` and then an assignment,
/// e.g. `else: x = 1`.
const KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "try", "except", "finally", "with", "lambda",
    "return", "yield", "match", "case",
];

/// Python entity extractor using per-line regular expressions.
pub struct PythonExtractor {
    class_re: Regex,
    def_re: Regex,
    from_import_re: Regex,
    import_re: Regex,
    variable_re: Regex,
}

impl PythonExtractor {
    pub fn new() -> Result<Self> {
        let class_re =
            Regex::new(r"^\s*class\s+(\w+)").context("failed to compile class pattern")?;

        let def_re = Regex::new(r"^\s*(?:async\s+)?def\s+(\w+)\s*\(")
            .context("failed to compile def pattern")?;

        let from_import_re = Regex::new(r"^\s*from\s+([\w.]+)\s+import\s+(.+)$")
            .context("failed to compile from-import pattern")?;

        let import_re =
            Regex::new(r"^\s*import\s+(.+)$").context("failed to compile import pattern")?;

        // `name = ...` or `name: annotation = ...`, but not `==`.
        let variable_re = Regex::new(r"^\s*(\w+)\s*(?::[^=]*)?=(?:[^=]|$)")
            .context("failed to compile variable pattern")?;

        Ok(Self {
            class_re,
            def_re,
            from_import_re,
            import_re,
            variable_re,
        })
    }
}

/// Split an import list into `(name, alias)` pairs. Wildcards, parentheses,
/// line continuations and trailing comments are dropped.
fn import_items(list: &str) -> Vec<(&str, Option<&str>)> {
    let list = list.split('#').next().unwrap_or_default();
    list.split(',')
        .filter_map(|item| {
            let item = item.trim_matches(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '\\'));
            let mut parts = item.split_whitespace();
            let name = parts.next()?;
            if name == "*" {
                return None;
            }
            let alias = match (parts.next(), parts.next()) {
                (Some("as"), Some(alias)) => Some(alias),
                _ => None,
            };
            Some((name, alias))
        })
        .collect()
}

impl LanguageExtractor for PythonExtractor {
    fn language(&self) -> Language {
        Language::Python
    }

    fn comment_prefixes(&self) -> &'static [&'static str] {
        &["#"]
    }

    fn extract_line(&self, line: &str, sink: &mut EntitySink<'_>) {
        if let Some(caps) = self.from_import_re.captures(line) {
            // Relative imports (`from . import x`, `from ..pkg import y`) drop their dots.
            let module = caps[1].trim_start_matches('.');
            if !module.is_empty() {
                sink.push(module, EntityKind::Module);
            }
            for (symbol, alias) in import_items(&caps[2]) {
                sink.push(symbol, EntityKind::ImportedSymbol);
                if let Some(alias) = alias {
                    sink.push(alias, EntityKind::Alias);
                }
            }
            return;
        }

        if let Some(caps) = self.import_re.captures(line) {
            for (module, alias) in import_items(&caps[1]) {
                sink.push(module, EntityKind::Module);
                if let Some(alias) = alias {
                    sink.push(alias, EntityKind::Alias);
                }
            }
            return;
        }

        if let Some(caps) = self.class_re.captures(line) {
            sink.push(&caps[1], EntityKind::Class);
        }

        if let Some(caps) = self.def_re.captures(line) {
            sink.push(&caps[1], EntityKind::Method);
        }

        if let Some(caps) = self.variable_re.captures(line) {
            let name = &caps[1];
            if !KEYWORDS.contains(&name) {
                sink.push(name, EntityKind::Variable);
            }
        }
    }
}
