use crate::matcher::DictionaryMatcher;
use crate::segmenter;
use crate::types::{mean, Entity, EntityKind, Readability, ScoredEntity};
use crate::vocabulary::Vocabulary;

/// Breakdown of how one identifier was scored, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Sub-words per path segment, with their individual scores.
    pub segments: Vec<Vec<(String, f64)>>,
    pub score: f64,
    pub category: Readability,
}

/// Scores entities by averaging the match scores of their sub-words.
#[derive(Debug, Clone)]
pub struct EntityScorer {
    matcher: DictionaryMatcher,
}

impl EntityScorer {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            matcher: DictionaryMatcher::new(vocabulary),
        }
    }

    pub fn score(&self, entity: Entity) -> ScoredEntity {
        let score = self.score_name(&entity.name, entity.kind);
        ScoredEntity {
            entity,
            score,
            category: Readability::from_score(score),
        }
    }

    /// Score a bare name as if it were an entity of `kind`.
    pub fn score_name(&self, name: &str, kind: EntityKind) -> f64 {
        self.breakdown(name, kind).score
    }

    /// Only `Import` names are split on `.`. A dotted name of any other kind
    /// (a Java package, a Python module such as `os.path`) stays one sub-word,
    /// never full-matches, and so scores at most 0.5.
    pub fn breakdown(&self, name: &str, kind: EntityKind) -> ScoreBreakdown {
        let raw_segments = if kind.is_qualified_path() {
            segmenter::segment_path(name)
        } else {
            vec![segmenter::segment(name)]
        };

        let segments: Vec<Vec<(String, f64)>> = raw_segments
            .into_iter()
            .filter(|tokens| !tokens.is_empty())
            .map(|tokens| {
                tokens
                    .into_iter()
                    .map(|t| {
                        let s = self.matcher.match_score(&t);
                        (t, s)
                    })
                    .collect()
            })
            .collect();

        // Segment averages first, then the mean of those; a plain name is a
        // single segment so this reduces to the sub-word mean.
        let score = mean(
            segments
                .iter()
                .map(|seg| mean(seg.iter().map(|(_, s)| *s))),
        );

        ScoreBreakdown {
            segments,
            score,
            category: Readability::from_score(score),
        }
    }
}
