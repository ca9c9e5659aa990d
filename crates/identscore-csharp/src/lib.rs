use anyhow::{Context, Result};
use regex::Regex;

use identscore_core::extractor::{EntitySink, LanguageExtractor};
use identscore_core::types::{EntityKind, Language};

const METHOD_MODIFIERS: &str = r"(?:(?:public|private|protected|internal|static|virtual|override|abstract|sealed|async|extern|unsafe|new|partial|readonly|implicit|explicit|delegate)\s+)";

const FIELD_MODIFIERS: &str =
    r"(?:(?:public|private|protected|internal|static|readonly|const|volatile|new|required)\s+)";

const PRIMITIVE_TYPES: &str = "bool|byte|sbyte|char|decimal|double|float|int|uint|long|ulong|short|ushort|object|string|var|dynamic|nint|nuint";

const NON_TYPES: &[&str] = &[
    "return", "throw", "new", "await", "else", "case", "goto", "class", "struct", "interface",
    "enum", "record", "namespace", "using",
];

const NON_METHOD_NAMES: &[&str] = &[
    "if", "for", "foreach", "while", "switch", "catch", "using", "lock", "return", "new",
    "typeof", "nameof", "sizeof", "base", "this",
];

/// C# entity extractor using per-line regular expressions.
pub struct CSharpExtractor {
    namespace_re: Regex,
    using_re: Regex,
    type_re: Regex,
    method_re: Regex,
    variable_re: Regex,
}

impl CSharpExtractor {
    pub fn new() -> Result<Self> {
        let namespace_re = Regex::new(r"^\s*namespace\s+([\w.]+)")
            .context("failed to compile namespace pattern")?;

        // `using Alias = Some.Namespace;` reports the namespace.
        let using_re = Regex::new(r"^\s*using\s+(?:static\s+)?(?:\w+\s*=\s*)?([\w.]+)\s*;")
            .context("failed to compile using pattern")?;

        let type_re = Regex::new(
            r"\b(class|interface|record|struct|enum)\s+(?:(?:class|struct)\s+)?(\w+)",
        )
        .context("failed to compile type declaration pattern")?;

        // Group 3 is an operator symbol, only valid after `operator`.
        let method_re = Regex::new(&format!(
            r"^\s*(?:\[[^\]]*\]\s*)*{METHOD_MODIFIERS}+(?:([\w.]+(?:<[^()]*>)?(?:\[\])?\??)\s+)?(\w+)\s*(?:<[^()]*>)?\s*([^\w\s()]{{1,3}}\s*)?\("
        ))
        .context("failed to compile method pattern")?;

        let variable_re = Regex::new(&format!(
            r"^\s*{FIELD_MODIFIERS}*(?:{PRIMITIVE_TYPES}|[A-Z][\w.]*)(?:<[^()=;]*>)?(?:\[,*\])?\??\s+(\w+)\s*[=;,]"
        ))
        .context("failed to compile variable pattern")?;

        Ok(Self {
            namespace_re,
            using_re,
            type_re,
            method_re,
            variable_re,
        })
    }

    fn extract_method(&self, line: &str, sink: &mut EntitySink<'_>) {
        let Some(caps) = self.method_re.captures(line) else {
            return;
        };
        let return_type = caps.get(1).map(|m| m.as_str());
        let mut name = caps.get(2).map_or("", |m| m.as_str());

        // `implicit operator int(` reads `operator` as the return type.
        if return_type == Some("operator") {
            name = "operator";
        } else if caps.get(3).is_some() && name != "operator" {
            return;
        }

        if return_type.is_some_and(|t| NON_TYPES.contains(&t)) || NON_METHOD_NAMES.contains(&name)
        {
            return;
        }
        sink.push(name, EntityKind::Method);
    }
}

impl LanguageExtractor for CSharpExtractor {
    fn language(&self) -> Language {
        Language::CSharp
    }

    fn extract_line(&self, line: &str, sink: &mut EntitySink<'_>) {
        if let Some(caps) = self.namespace_re.captures(line) {
            sink.push(&caps[1], EntityKind::Package);
            return;
        }

        if let Some(caps) = self.using_re.captures(line) {
            sink.push(&caps[1], EntityKind::Import);
            return;
        }

        for caps in self.type_re.captures_iter(line) {
            let kind = match &caps[1] {
                "struct" => EntityKind::Struct,
                "enum" => EntityKind::Enum,
                _ => EntityKind::Class,
            };
            sink.push(&caps[2], kind);
        }

        self.extract_method(line, sink);

        if let Some(caps) = self.variable_re.captures(line) {
            sink.push(&caps[1], EntityKind::Variable);
        }
    }
}
