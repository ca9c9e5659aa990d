use anyhow::{Context, Result};
use regex::Regex;

use identscore_core::extractor::{EntitySink, LanguageExtractor};
use identscore_core::types::{EntityKind, Language};

const MODIFIERS: &str =
    r"(?:(?:public|private|protected|static|final|abstract|synchronized|native|default|strictfp)\s+)";

/// Words that can sit in the "type" position of a statement without it being
/// a declaration.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "throw", "new", "else", "case", "goto", "package", "import", "assert", "yield",
    "break", "continue",
];

/// Words that look like a method name when followed by `(`.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "synchronized", "return", "new", "throw",
];

/// Java entity extractor using per-line regular expressions.
pub struct JavaExtractor {
    package_re: Regex,
    import_re: Regex,
    type_re: Regex,
    method_re: Regex,
    void_method_re: Regex,
    variable_re: Regex,
}

impl JavaExtractor {
    pub fn new() -> Result<Self> {
        let package_re =
            Regex::new(r"^\s*package\s+([\w.]+)\s*;").context("failed to compile package pattern")?;

        let import_re = Regex::new(r"^\s*import\s+(?:static\s+)?([\w.]+)")
            .context("failed to compile import pattern")?;

        let type_re = Regex::new(r"\b(class|interface|record|enum)\s+(\w+)")
            .context("failed to compile type declaration pattern")?;

        // Constructors have no return type, so the type group is optional.
        let method_re = Regex::new(&format!(
            r"^\s*(?:@\w+\s+)*{MODIFIERS}+(?:<[^()]*>\s+)?(?:([\w.]+(?:<[^()]*>)?(?:\[\])*)\s+)?(\w+)\s*\("
        ))
        .context("failed to compile method pattern")?;

        let void_method_re =
            Regex::new(r"^\s*void\s+(\w+)\s*\(").context("failed to compile void method pattern")?;

        let variable_re = Regex::new(
            r"^\s*(?:(?:public|private|protected|static|final|transient|volatile)\s+)*([\w.]+(?:<[^()=;]*>)?(?:\[\])*)\s+(\w+)\s*(?:=[^;]*)?;",
        )
        .context("failed to compile variable pattern")?;

        Ok(Self {
            package_re,
            import_re,
            type_re,
            method_re,
            void_method_re,
            variable_re,
        })
    }

    fn extract_method(&self, line: &str, sink: &mut EntitySink<'_>) {
        if let Some(caps) = self.method_re.captures(line) {
            let return_type = caps.get(1).map(|m| m.as_str());
            let name = &caps[2];
            let bad_type =
                return_type.is_some_and(|t| STATEMENT_KEYWORDS.contains(&t) || is_type_keyword(t));
            if !bad_type && !CONTROL_KEYWORDS.contains(&name) {
                sink.push(name, EntityKind::Method);
            }
        } else if let Some(caps) = self.void_method_re.captures(line) {
            sink.push(&caps[1], EntityKind::Method);
        }
    }
}

fn is_type_keyword(word: &str) -> bool {
    matches!(word, "class" | "interface" | "record" | "enum")
}

impl LanguageExtractor for JavaExtractor {
    fn language(&self) -> Language {
        Language::Java
    }

    fn extract_line(&self, line: &str, sink: &mut EntitySink<'_>) {
        if let Some(caps) = self.package_re.captures(line) {
            sink.push(&caps[1], EntityKind::Package);
            return;
        }

        if let Some(caps) = self.import_re.captures(line) {
            // `import java.util.*;` captures `java.util.`
            sink.push(caps[1].trim_end_matches('.'), EntityKind::Import);
            return;
        }

        for caps in self.type_re.captures_iter(line) {
            let kind = if &caps[1] == "enum" {
                EntityKind::Enum
            } else {
                EntityKind::Class
            };
            sink.push(&caps[2], kind);
        }

        self.extract_method(line, sink);

        if let Some(caps) = self.variable_re.captures(line) {
            let var_type = &caps[1];
            if !STATEMENT_KEYWORDS.contains(&var_type) && !is_type_keyword(var_type) {
                sink.push(&caps[2], EntityKind::Variable);
            }
        }
    }
}
