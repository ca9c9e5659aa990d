use anyhow::{Context, Result};
use regex::Regex;

use identscore_core::extractor::{EntitySink, LanguageExtractor};
use identscore_core::types::{EntityKind, Language};

/// JavaScript entity extractor using per-line regular expressions.
pub struct JavaScriptExtractor {
    import_re: Regex,
    class_re: Regex,
    function_re: Regex,
    arrow_re: Regex,
    declaration_re: Regex,
}

impl JavaScriptExtractor {
    pub fn new() -> Result<Self> {
        let import_re = Regex::new(r#"^\s*import\s+(?:[^'"]*?\s+from\s*)?['"]([^'"]+)['"]"#)
            .context("failed to compile import pattern")?;

        let class_re =
            Regex::new(r"\bclass\s+([\w$]+)").context("failed to compile class pattern")?;

        let function_re = Regex::new(r"\bfunction\s*\*?\s*([\w$]+)\s*\(")
            .context("failed to compile function pattern")?;

        let arrow_re = Regex::new(
            r"^\s*(?:export\s+)?(?:const|let|var)\s+([\w$]+)\s*=\s*(?:async\s+)?(?:\([^)]*\)|[\w$]+)\s*=>",
        )
        .context("failed to compile arrow function pattern")?;

        let declaration_re = Regex::new(r"^\s*(?:export\s+)?(?:const|let|var)\s+([\w$]+)")
            .context("failed to compile declaration pattern")?;

        Ok(Self {
            import_re,
            class_re,
            function_re,
            arrow_re,
            declaration_re,
        })
    }
}

/// Name reported for a module specifier: its last path component without
/// the file extension (`./utils/string-helpers.js` → `string-helpers`).
fn module_name(specifier: &str) -> &str {
    let last = specifier
        .rsplit('/')
        .find(|part| !part.is_empty() && *part != "." && *part != "..")
        .unwrap_or(specifier);
    match last.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => last,
    }
}

impl LanguageExtractor for JavaScriptExtractor {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn extract_line(&self, line: &str, sink: &mut EntitySink<'_>) {
        if let Some(caps) = self.import_re.captures(line) {
            sink.push(module_name(&caps[1]), EntityKind::Package);
            return;
        }

        for caps in self.class_re.captures_iter(line) {
            sink.push(&caps[1], EntityKind::Class);
        }

        for caps in self.function_re.captures_iter(line) {
            sink.push(&caps[1], EntityKind::Method);
        }

        if let Some(caps) = self.arrow_re.captures(line) {
            sink.push(&caps[1], EntityKind::Method);
        } else if let Some(caps) = self.declaration_re.captures(line) {
            sink.push(&caps[1], EntityKind::Variable);
        }
    }
}
