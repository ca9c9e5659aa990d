use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Source language handled by one of the extractor crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    CSharp,
    Python,
    JavaScript,
    Cpp,
}

impl Language {
    /// File extensions (without the dot) searched for this language.
    pub fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Java => &["java"],
            Language::CSharp => &["cs"],
            Language::Python => &["py"],
            Language::JavaScript => &["js"],
            Language::Cpp => &["c", "cpp"],
        }
    }

    /// Name used as the prefix of report file names.
    pub fn report_name(&self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::CSharp => "CSharp",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Cpp => "Cpp",
        }
    }

    /// Whether `path` has one of this language's extensions.
    pub fn matches_path(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.file_extensions().contains(&ext))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Java => write!(f, "java"),
            Language::CSharp => write!(f, "csharp"),
            Language::Python => write!(f, "python"),
            Language::JavaScript => write!(f, "javascript"),
            Language::Cpp => write!(f, "cpp"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "csharp" | "c#" | "cs" => Ok(Language::CSharp),
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "cpp" | "c++" | "c" => Ok(Language::Cpp),
            _ => Err(anyhow::anyhow!("unknown language: {s}")),
        }
    }
}

/// Syntactic kind of an extracted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Package or namespace declaration.
    Package,
    /// Import, include or using directive.
    Import,
    Class,
    Struct,
    Enum,
    Union,
    Typedef,
    Template,
    /// Function or method.
    Method,
    Variable,
    Macro,
    Module,
    ImportedSymbol,
    Alias,
}

impl EntityKind {
    /// Label shown in reports. A few kinds read differently per language
    /// (`#include` vs `import`, function vs method).
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (EntityKind::Package, Language::CSharp | Language::Cpp) => "Namespace",
            (EntityKind::Package, _) => "Package",
            (EntityKind::Import, Language::Cpp) => "Include",
            (EntityKind::Import, Language::CSharp) => "Using",
            (EntityKind::Import, _) => "Import",
            (EntityKind::Method, Language::Cpp | Language::JavaScript) => "Function",
            (EntityKind::Method, _) => "Method",
            (EntityKind::Class, _) => "Class",
            (EntityKind::Struct, _) => "Struct",
            (EntityKind::Enum, _) => "Enum",
            (EntityKind::Union, _) => "Union",
            (EntityKind::Typedef, _) => "Typedef",
            (EntityKind::Template, _) => "Template",
            (EntityKind::Variable, _) => "Variable",
            (EntityKind::Macro, _) => "Macro",
            (EntityKind::Module, _) => "Module",
            (EntityKind::ImportedSymbol, _) => "Imported Symbol",
            (EntityKind::Alias, _) => "Alias",
        }
    }

    /// Import-like names are scored per `.`-separated path segment.
    pub fn is_qualified_path(&self) -> bool {
        matches!(self, EntityKind::Import)
    }
}

/// A name extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    /// 1-based line of appearance.
    pub line: usize,
}

/// Readability bucket derived from an entity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Readability {
    WellReadable,
    ModerateReadable,
    NonReadable,
}

impl Readability {
    /// Bucket a score: exactly 1.0, at least 0.5, or below.
    pub fn from_score(score: f64) -> Self {
        if score == 1.0 {
            Readability::WellReadable
        } else if score >= 0.5 {
            Readability::ModerateReadable
        } else {
            Readability::NonReadable
        }
    }
}

impl fmt::Display for Readability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readability::WellReadable => write!(f, "Well Readable"),
            Readability::ModerateReadable => write!(f, "Moderate Readable"),
            Readability::NonReadable => write!(f, "Non Readable"),
        }
    }
}

/// An entity together with its comprehensibility score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    #[serde(flatten)]
    pub entity: Entity,
    pub score: f64,
    pub category: Readability,
}

/// Scores for every entity of one analyzed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub entities: Vec<ScoredEntity>,
    pub average_score: f64,
}

impl FileResult {
    pub fn new(path: PathBuf, entities: Vec<ScoredEntity>) -> Self {
        let average_score = mean(entities.iter().map(|e| e.score));
        Self {
            path,
            entities,
            average_score,
        }
    }
}

/// Count of entities per readability bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub well_readable: usize,
    pub moderate_readable: usize,
    pub non_readable: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.well_readable + self.moderate_readable + self.non_readable
    }
}

/// Outcome of scoring a whole file set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub language: Language,
    pub file_results: Vec<FileResult>,
    /// Mean of the per-file averages, not of all entities.
    pub overall_average: f64,
}

impl RunResult {
    pub fn new(language: Language, file_results: Vec<FileResult>) -> Self {
        let overall_average = mean(file_results.iter().map(|f| f.average_score));
        Self {
            language,
            file_results,
            overall_average,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.file_results.iter().map(|f| f.entities.len()).sum()
    }

    pub fn category_counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for entity in self.file_results.iter().flat_map(|f| &f.entities) {
            match entity.category {
                Readability::WellReadable => counts.well_readable += 1,
                Readability::ModerateReadable => counts.moderate_readable += 1,
                Readability::NonReadable => counts.non_readable += 1,
            }
        }
        counts
    }
}

/// Arithmetic mean, 0.0 for an empty sequence.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
