use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use thiserror::Error;
use walkdir::WalkDir;

use crate::extractor::{ExcludedIdentifiers, LanguageExtractor};
use crate::scorer::EntityScorer;
use crate::types::{FileResult, Language, RunResult};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("path '{0}' does not exist")]
    PathNotFound(PathBuf),

    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The file set was empty. This is a normal outcome, not a failure.
    #[error("no valid {language} files found")]
    NothingToAnalyze { language: Language },
}

/// Extraction and scoring over a file set for one language.
pub struct ScoringPipeline {
    extractor: Box<dyn LanguageExtractor>,
    scorer: EntityScorer,
    excluded: ExcludedIdentifiers,
}

impl ScoringPipeline {
    pub fn new(
        extractor: Box<dyn LanguageExtractor>,
        scorer: EntityScorer,
        excluded: ExcludedIdentifiers,
    ) -> Self {
        Self {
            extractor,
            scorer,
            excluded,
        }
    }

    pub fn language(&self) -> Language {
        self.extractor.language()
    }

    /// Score files in order. Unreadable files contribute no entities.
    pub fn run(&self, files: &[PathBuf]) -> Result<RunResult, PipelineError> {
        if files.is_empty() {
            return Err(PipelineError::NothingToAnalyze {
                language: self.language(),
            });
        }

        let file_results = files.iter().map(|path| self.score_file(path)).collect();
        Ok(RunResult::new(self.language(), file_results))
    }

    pub fn score_file(&self, path: &Path) -> FileResult {
        match std::fs::read(path) {
            Ok(bytes) => self.score_content(path, &String::from_utf8_lossy(&bytes)),
            Err(e) => {
                tracing::warn!("failed to read {}: {e}", path.display());
                FileResult::new(path.to_path_buf(), Vec::new())
            }
        }
    }

    pub fn score_content(&self, path: &Path, content: &str) -> FileResult {
        let entities = self.extractor.extract(content, &self.excluded);
        tracing::debug!(
            path = %path.display(),
            entities = entities.len(),
            "extracted entities"
        );
        let scored = entities
            .into_iter()
            .map(|entity| self.scorer.score(entity))
            .collect();
        FileResult::new(path.to_path_buf(), scored)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, PipelineError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| PipelineError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|source| PipelineError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })
}

/// Collect the files to analyze: `path` itself when it is a source file of
/// `language`, or every matching file below it when it is a directory.
/// Results are sorted by path.
pub fn discover_files(
    path: &Path,
    language: Language,
    exclude_patterns: &[String],
) -> Result<Vec<PathBuf>, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::PathNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return Ok(if language.matches_path(path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let excluded = build_globset(exclude_patterns)?;

    let files = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && language.matches_path(e.path()))
        .filter(|e| {
            let rel_path = e
                .path()
                .strip_prefix(path)
                .unwrap_or(e.path())
                .to_string_lossy()
                .replace('\\', "/");
            !excluded.is_match(&rel_path)
        })
        .map(|e| e.into_path())
        .collect();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::EntitySink;
    use crate::types::EntityKind;
    use crate::vocabulary::Vocabulary;

    /// Reports the first word of every line as a variable.
    struct FirstWordExtractor;

    impl LanguageExtractor for FirstWordExtractor {
        fn language(&self) -> Language {
            Language::Python
        }

        fn extract_line(&self, line: &str, sink: &mut EntitySink<'_>) {
            if let Some(word) = line.split_whitespace().next() {
                sink.push(word, EntityKind::Variable);
            }
        }
    }

    fn pipeline(words: &[&str]) -> ScoringPipeline {
        ScoringPipeline::new(
            Box::new(FirstWordExtractor),
            EntityScorer::new(Vocabulary::new(words.iter().copied())),
            ExcludedIdentifiers::default(),
        )
    }

    #[test]
    fn test_empty_file_set_is_nothing_to_analyze() {
        let result = pipeline(&[]).run(&[]);
        assert!(matches!(
            result,
            Err(PipelineError::NothingToAnalyze {
                language: Language::Python
            })
        ));
    }

    #[test]
    fn test_run_averages_per_file() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.py");
        let b = tmp.path().join("b.py");
        std::fs::write(&a, "user = 1\n").unwrap();
        std::fs::write(&b, "user = 1\nzq = 2\nqx = 3\n").unwrap();

        let run = pipeline(&["user"]).run(&[a, b]).unwrap();
        assert_eq!(run.file_results.len(), 2);
        assert_eq!(run.file_results[0].average_score, 1.0);
        assert!((run.file_results[1].average_score - 1.0 / 3.0).abs() < 1e-12);
        // Mean of file averages (1.0 and 1/3), not of the four entities.
        assert!((run.overall_average - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unreadable_file_contributes_no_entities() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good.py");
        std::fs::write(&good, "user = 1\n").unwrap();
        let missing = tmp.path().join("missing.py");

        let run = pipeline(&["user"]).run(&[missing, good]).unwrap();
        assert_eq!(run.file_results.len(), 2);
        assert!(run.file_results[0].entities.is_empty());
        assert_eq!(run.file_results[0].average_score, 0.0);
        assert_eq!(run.overall_average, 0.5);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.py");
        std::fs::write(&file, "userName = 1\nhttpCfg = 2\ni = 0\n").unwrap();
        let p = pipeline(&["user", "name"]);
        let first = p.run(std::slice::from_ref(&file)).unwrap();
        let second = p.run(std::slice::from_ref(&file)).unwrap();
        assert_eq!(first, second);
        assert!(first.file_results[0]
            .entities
            .iter()
            .all(|e| e.entity.name != "i"));
    }

    #[test]
    fn test_discover_files_recursive_and_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        std::fs::create_dir_all(base.join("pkg/sub")).unwrap();
        std::fs::write(base.join("pkg/sub/z.py"), "").unwrap();
        std::fs::write(base.join("pkg/a.py"), "").unwrap();
        std::fs::write(base.join("pkg/readme.md"), "").unwrap();

        let files = discover_files(base, Language::Python, &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(base).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["pkg/a.py", "pkg/sub/z.py"]);
    }

    #[test]
    fn test_discover_files_cpp_matches_c_and_cpp() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.c"), "").unwrap();
        std::fs::write(tmp.path().join("b.cpp"), "").unwrap();
        std::fs::write(tmp.path().join("c.h"), "").unwrap();
        std::fs::write(tmp.path().join("d.hpp"), "").unwrap();
        std::fs::write(tmp.path().join("e.cc"), "").unwrap();
        std::fs::write(tmp.path().join("f.java"), "").unwrap();
        let files = discover_files(tmp.path(), Language::Cpp, &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|f| f.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.c", "b.cpp"]);
    }

    #[test]
    fn test_discover_files_respects_excludes() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("node_modules/lib")).unwrap();
        std::fs::write(tmp.path().join("node_modules/lib/index.js"), "").unwrap();
        std::fs::write(tmp.path().join("app.js"), "").unwrap();

        let files = discover_files(
            tmp.path(),
            Language::JavaScript,
            &["**/node_modules/**".to_string()],
        )
        .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn test_discover_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let java = tmp.path().join("Main.java");
        std::fs::write(&java, "").unwrap();

        assert_eq!(
            discover_files(&java, Language::Java, &[]).unwrap(),
            vec![java.clone()]
        );
        assert!(discover_files(&java, Language::Python, &[])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_discover_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let result = discover_files(&tmp.path().join("nope"), Language::Java, &[]);
        assert!(matches!(result, Err(PipelineError::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let tmp = tempfile::tempdir().unwrap();
        let result = discover_files(tmp.path(), Language::Java, &["a[".to_string()]);
        assert!(matches!(result, Err(PipelineError::InvalidPattern { .. })));
    }
}
