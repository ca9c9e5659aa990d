use anyhow::{Context, Result};
use regex::Regex;

use identscore_core::extractor::{EntitySink, LanguageExtractor};
use identscore_core::types::{EntityKind, Language};

/// One or more type tokens (`const std::vector<int> &`) before a declared name.
const TYPE_PREFIX: &str = r"((?:[\w:]+(?:<[^()]*>)?[\s*&]+)+)";

/// Words that start a statement rather than a declaration.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "delete", "throw", "using", "typedef", "goto", "else", "case", "new", "sizeof",
    "co_return", "co_yield", "co_await", "if", "while", "for", "switch", "do", "break",
    "continue",
];

const TAG_KEYWORDS: &[&str] = &["class", "struct", "union", "enum", "namespace"];

/// Reported for a template whose declared name is not on the same line.
const TEMPLATE_PLACEHOLDER: &str = "T";

/// C and C++ entity extractor using per-line regular expressions.
pub struct CppExtractor {
    include_re: Regex,
    define_re: Regex,
    typedef_re: Regex,
    function_pointer_re: Regex,
    trailing_name_re: Regex,
    template_re: Regex,
    type_re: Regex,
    attribute_re: Regex,
    function_re: Regex,
    variable_re: Regex,
}

impl CppExtractor {
    pub fn new() -> Result<Self> {
        let include_re = Regex::new(r#"^\s*#\s*include\s*[<"]([^>"]+)[>"]"#)
            .context("failed to compile include pattern")?;

        let define_re =
            Regex::new(r"^\s*#\s*define\s+(\w+)").context("failed to compile define pattern")?;

        let typedef_re =
            Regex::new(r"^\s*typedef\b(.*);").context("failed to compile typedef pattern")?;

        let function_pointer_re = Regex::new(r"\(\s*\*\s*(\w+)\s*\)")
            .context("failed to compile function pointer pattern")?;

        let trailing_name_re = Regex::new(r"(\w+)\s*(?:\[[^\]]*\]\s*)*$")
            .context("failed to compile trailing name pattern")?;

        let template_re =
            Regex::new(r"^\s*template\s*<").context("failed to compile template pattern")?;

        let type_re = Regex::new(
            r"\b(struct|class|enum|union|namespace)\s+(?:(?:class|struct)\s+)?(\w+)",
        )
        .context("failed to compile type declaration pattern")?;

        let attribute_re =
            Regex::new(r"^\s*(?:\[\[[^\]]*\]\]\s*)+").context("failed to compile attribute pattern")?;

        let function_re = Regex::new(&format!(r"^\s*{TYPE_PREFIX}(?:\w+::)*(\w+)\s*\("))
            .context("failed to compile function pattern")?;

        let variable_re = Regex::new(&format!(
            r"^\s*{TYPE_PREFIX}(?:\w+::)*(\w+)\s*(?:\[[^\]]*\]\s*)*[=;,]"
        ))
        .context("failed to compile variable pattern")?;

        Ok(Self {
            include_re,
            define_re,
            typedef_re,
            function_pointer_re,
            trailing_name_re,
            template_re,
            type_re,
            attribute_re,
            function_re,
            variable_re,
        })
    }

    fn typedef_name<'l>(&self, body: &'l str) -> Option<&'l str> {
        if let Some(caps) = self.function_pointer_re.captures(body) {
            return caps.get(1).map(|m| m.as_str());
        }
        self.trailing_name_re
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Name declared after a template parameter list: the identifier before
    /// `(` for function templates, otherwise the tagged type name.
    fn template_name<'l>(&self, decl: &'l str) -> &'l str {
        if let Some((before, _)) = decl.split_once('(') {
            let name = before
                .rsplit(|c: char| !(c.is_alphanumeric() || c == '_'))
                .find(|word| !word.is_empty());
            if let Some(name) = name {
                return name;
            }
        }
        self.type_re
            .captures(decl)
            .and_then(|caps| caps.get(2))
            .map_or(TEMPLATE_PLACEHOLDER, |m| m.as_str())
    }
}

/// Name reported for an include target: directories become path segments and
/// the header extension is dropped (`sys/types.h` → `sys.types`).
fn include_name(target: &str) -> String {
    let target = target.trim();
    let stem = match target.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') && !stem.is_empty() => stem,
        _ => target,
    };
    stem.replace('/', ".")
}

/// Text after the `>` closing a template parameter list that opens at the
/// start of `rest`, or `None` when the list continues on a later line.
fn after_template_params(rest: &str) -> Option<&str> {
    let mut depth = 1usize;
    for (idx, c) in rest.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[idx + 1..]);
                }
            }
            _ => {}
        }
    }
    None
}

/// A declaration prefix that is really a statement or a bare tag keyword.
fn is_statement(type_prefix: &str) -> bool {
    let trimmed = type_prefix.trim_end_matches(|c: char| c.is_whitespace() || c == '*' || c == '&');
    let first = trimmed.split_whitespace().next().unwrap_or_default();
    STATEMENT_KEYWORDS.contains(&first) || TAG_KEYWORDS.contains(&trimmed)
}

impl LanguageExtractor for CppExtractor {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn extract_line(&self, line: &str, sink: &mut EntitySink<'_>) {
        if let Some(caps) = self.include_re.captures(line) {
            sink.push(&include_name(&caps[1]), EntityKind::Import);
            return;
        }
        if let Some(caps) = self.define_re.captures(line) {
            sink.push(&caps[1], EntityKind::Macro);
            return;
        }
        if line.trim_start().starts_with('#') {
            return;
        }

        if let Some(caps) = self.typedef_re.captures(line) {
            if let Some(name) = self.typedef_name(&caps[1]) {
                sink.push(name, EntityKind::Typedef);
            }
            return;
        }

        // Template parameters (`class K`) are not declarations of their own.
        let decl = match self.template_re.find(line) {
            Some(m) => {
                let Some(decl) = after_template_params(&line[m.end()..]) else {
                    return;
                };
                sink.push(self.template_name(decl), EntityKind::Template);
                decl
            }
            None => line,
        };

        if !decl.trim_start().starts_with("using ") {
            for caps in self.type_re.captures_iter(decl) {
                let kind = match &caps[1] {
                    "struct" => EntityKind::Struct,
                    "enum" => EntityKind::Enum,
                    "union" => EntityKind::Union,
                    "namespace" => EntityKind::Package,
                    _ => EntityKind::Class,
                };
                sink.push(&caps[2], kind);
            }
        }

        let body = match self.attribute_re.find(decl) {
            Some(m) => &decl[m.end()..],
            None => decl,
        };

        if let Some(caps) = self.function_re.captures(body) {
            if !is_statement(&caps[1]) && !STATEMENT_KEYWORDS.contains(&&caps[2]) {
                sink.push(&caps[2], EntityKind::Method);
            }
            return;
        }

        if let Some(caps) = self.variable_re.captures(body) {
            // `friend void f(...)` declares a function, `friend class X;` declares nothing.
            let friend = caps[1].trim_start().starts_with("friend ");
            if !is_statement(&caps[1]) && !friend {
                sink.push(&caps[2], EntityKind::Variable);
            }
        }
    }
}
