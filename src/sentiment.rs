//! Sentiment scoring: the scorer contract plus a small lexicon-based default.
//!
//! The pipeline only relies on the contract: one call per text, returning a
//! polarity in `[-1, 1]` and a subjectivity in `[0, 1]`. Scores outside those
//! ranges (or NaN) are rejected as scorer failures.

use crate::error::{ExtractError, ExtractResult, ScorerError};
use ahash::AHashMap;
use regex::Regex;
use std::sync::OnceLock;

/// A (polarity, subjectivity) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment { polarity: 0.0, subjectivity: 0.0 };

    /// Build a score, enforcing the output ranges.
    pub fn new(polarity: f64, subjectivity: f64) -> Result<Self, ScorerError> {
        Sentiment { polarity, subjectivity }.checked()
    }

    pub fn checked(self) -> Result<Self, ScorerError> {
        if !self.polarity.is_finite() || !(-1.0..=1.0).contains(&self.polarity) {
            return Err(ScorerError(format!("polarity {} outside [-1, 1]", self.polarity)));
        }
        if !self.subjectivity.is_finite() || !(0.0..=1.0).contains(&self.subjectivity) {
            return Err(ScorerError(format!("subjectivity {} outside [0, 1]", self.subjectivity)));
        }
        Ok(self)
    }

    /// Coarse label used by the extended schema.
    pub fn label(polarity: f64) -> &'static str {
        if polarity > 0.0 {
            "positive"
        } else if polarity < 0.0 {
            "negative"
        } else {
            "neutral"
        }
    }
}

/// Text → sentiment. Implementations must be pure.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<Sentiment, ScorerError>;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> Result<Sentiment, ScorerError> + Send + Sync,
{
    fn score(&self, text: &str) -> Result<Sentiment, ScorerError> {
        self(text)
    }
}

/// Score every text once, in order, returning parallel polarity and
/// subjectivity sequences of the same length as `texts`.
pub fn find_sentiments<S: AsRef<str>>(
    scorer: &dyn SentimentScorer,
    texts: &[S],
) -> ExtractResult<(Vec<f64>, Vec<f64>)> {
    let mut polarity = Vec::with_capacity(texts.len());
    let mut subjectivity = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        let s = scorer
            .score(text.as_ref())
            .and_then(Sentiment::checked)
            .map_err(|source| ExtractError::Scorer { column: "polarity", index, source })?;
        polarity.push(s.polarity);
        subjectivity.push(s.subjectivity);
    }
    Ok((polarity, subjectivity))
}

// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("happy", 0.8, 1.0),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("nice", 0.6, 1.0),
    ("beautiful", 0.85, 1.0),
    ("perfect", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("glad", 0.5, 1.0),
    ("thank", 0.2, 0.2),
    ("thanks", 0.2, 0.2),
    ("safe", 0.5, 0.5),
    ("hope", 0.3, 0.4),
    ("strong", 0.43, 0.73),
    ("fun", 0.3, 0.2),
    ("interesting", 0.5, 0.5),
    ("positive", 0.23, 0.55),
    ("free", 0.4, 0.8),
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("sad", -0.5, 1.0),
    ("hate", -0.8, 0.9),
    ("angry", -0.5, 1.0),
    ("poor", -0.4, 0.6),
    ("wrong", -0.5, 0.9),
    ("sick", -0.71, 0.86),
    ("dead", -0.2, 0.4),
    ("deadly", -0.2, 0.4),
    ("scary", -0.5, 1.0),
    ("crazy", -0.6, 0.9),
    ("stupid", -0.8, 1.0),
    ("negative", -0.3, 0.4),
    ("serious", -0.33, 0.67),
    ("difficult", -0.5, 1.0),
    ("fake", -0.5, 1.0),
    ("severe", -0.5, 0.6),
    ("dangerous", -0.6, 0.9),
    ("new", 0.14, 0.45),
    ("old", 0.1, 0.2),
    ("high", 0.16, 0.54),
    ("low", 0.0, 0.3),
    ("important", 0.4, 1.0),
    ("real", 0.2, 0.3),
    ("true", 0.35, 0.65),
    ("false", -0.4, 0.6),
    ("only", 0.0, 1.0),
];

// (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.4),
    ("so", 1.3),
    ("too", 1.2),
    ("quite", 1.1),
    ("most", 1.2),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nor", "cannot"];

/// Lexicon-based scorer: averages the per-word scores of known words,
/// modified by a preceding intensifier and negation.
pub struct LexiconScorer {
    words: AHashMap<&'static str, (f64, f64)>,
    intensifiers: AHashMap<&'static str, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self {
            words: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap())
}

fn is_negation(tok: &str) -> bool {
    NEGATIONS.contains(&tok) || tok.ends_with("n't")
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override a lexicon entry.
    pub fn with_word(mut self, word: &'static str, polarity: f64, subjectivity: f64) -> Self {
        self.words.insert(word, (polarity, subjectivity));
        self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<Sentiment, ScorerError> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = token_re().find_iter(&lower).map(|m| m.as_str()).collect();

        let mut hits = 0usize;
        let (mut p_sum, mut s_sum) = (0.0f64, 0.0f64);
        for (i, tok) in tokens.iter().enumerate() {
            let Some(&(mut p, mut s)) = self.words.get(*tok) else { continue };
            if let Some(m) = i.checked_sub(1).and_then(|j| self.intensifiers.get(tokens[j])) {
                p *= m;
                s *= m;
            }
            if tokens[i.saturating_sub(2)..i].iter().any(|t| is_negation(t)) {
                p *= -0.5;
            }
            p_sum += p.clamp(-1.0, 1.0);
            s_sum += s.clamp(0.0, 1.0);
            hits += 1;
        }

        if hits == 0 {
            return Ok(Sentiment::NEUTRAL);
        }
        let n = hits as f64;
        Sentiment::new((p_sum / n).clamp(-1.0, 1.0), (s_sum / n).clamp(0.0, 1.0))
    }
}
