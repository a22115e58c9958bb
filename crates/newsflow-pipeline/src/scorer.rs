//! Two-lexicon sentiment scorer.
//!
//! The pipeline consumes any [`SentimentScorer`]; this default runs two
//! independent word-weight lexicons — one tuned for financial tone, one for
//! social/general tone — and reports each model's verdict separately, so an
//! analysis record always carries two (label, confidence) pairs.

use crate::traits::{ScoreError, SentimentScorer};
use crate::types::{ModelScore, SentimentLabel, SentimentOutcome};

/// Financial-tone word weights. Values in `(0.0, 1.0]` are positive,
/// `[-1.0, 0.0)` negative.
const FINANCIAL_LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("rises", 0.4),
    ("rise", 0.4),
    ("rally", 0.5),
    ("rallies", 0.5),
    ("surge", 0.5),
    ("surges", 0.5),
    ("gains", 0.4),
    ("profit", 0.4),
    ("profits", 0.4),
    ("growth", 0.4),
    ("record", 0.3),
    ("beats", 0.4),
    ("bullish", 0.5),
    ("recovery", 0.4),
    ("upgrade", 0.4),
    ("dividend", 0.2),
    // Negative signals
    ("falls", -0.4),
    ("fall", -0.4),
    ("crash", -0.7),
    ("crashes", -0.7),
    ("plunge", -0.6),
    ("plunges", -0.6),
    ("loss", -0.4),
    ("losses", -0.4),
    ("default", -0.6),
    ("recession", -0.6),
    ("bearish", -0.5),
    ("downgrade", -0.4),
    ("bankruptcy", -0.7),
    ("fraud", -0.7),
    ("selloff", -0.5),
    ("inflation", -0.3),
];

/// Social/general-tone word weights.
const SOCIAL_LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("love", 0.5),
    ("best", 0.5),
    ("win", 0.4),
    ("victory", 0.5),
    ("popular", 0.3),
    ("celebrates", 0.4),
    ("breakthrough", 0.5),
    ("success", 0.4),
    ("cheer", 0.4),
    ("cheers", 0.4),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("hate", -0.6),
    ("fail", -0.4),
    ("failed", -0.4),
    ("failure", -0.4),
    ("scandal", -0.6),
    ("crisis", -0.5),
    ("fear", -0.4),
    ("fears", -0.4),
    ("outrage", -0.6),
    ("warning", -0.4),
];

fn lexicon_score(text: &str, lexicon: &[(&str, f64)]) -> f64 {
    let mut score = 0.0_f64;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        for &(lex_word, weight) in lexicon {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Labels near zero are Neutral rather than a coin-flip between the poles.
const NEUTRAL_BAND: f64 = 0.05;

fn to_model_score(score: f64) -> ModelScore {
    let label = if score > NEUTRAL_BAND {
        SentimentLabel::Positive
    } else if score < -NEUTRAL_BAND {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };
    // A zero lexicon sum is a maximally-uncertain verdict, a saturated one
    // is maximally confident.
    let confidence = 0.5 + score.abs() / 2.0;
    ModelScore { label, confidence }
}

/// Default two-model scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<SentimentOutcome, ScoreError> {
        Ok(SentimentOutcome {
            financial: to_model_score(lexicon_score(text, FINANCIAL_LEXICON)),
            social: to_model_score(lexicon_score(text, SOCIAL_LEXICON)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral_for_both_models() {
        let outcome = LexiconScorer.score("").unwrap();
        assert_eq!(outcome.financial.label, SentimentLabel::Neutral);
        assert_eq!(outcome.social.label, SentimentLabel::Neutral);
        assert!((outcome.financial.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn financial_vocabulary_moves_the_financial_model() {
        let outcome = LexiconScorer
            .score("Markets surge as profits beat expectations")
            .unwrap();
        assert_eq!(outcome.financial.label, SentimentLabel::Positive);
        assert!(outcome.financial.confidence > 0.5);
    }

    #[test]
    fn the_two_models_are_independent() {
        // "crash" is financial-negative; "cheers" is social-positive.
        let outcome = LexiconScorer.score("Fans cheers despite the crash").unwrap();
        assert_eq!(outcome.financial.label, SentimentLabel::Negative);
        assert_eq!(outcome.social.label, SentimentLabel::Positive);
    }

    #[test]
    fn negative_financial_text_scores_negative() {
        let outcome = LexiconScorer
            .score("Bankruptcy fears trigger selloff and losses")
            .unwrap();
        assert_eq!(outcome.financial.label, SentimentLabel::Negative);
    }

    #[test]
    fn confidence_stays_within_bounds() {
        let outcome = LexiconScorer
            .score("crash crash crash plunge default bankruptcy fraud")
            .unwrap();
        assert!(outcome.financial.confidence <= 1.0);
        assert!(outcome.financial.confidence >= 0.5);
    }

    #[test]
    fn punctuation_is_stripped_before_lookup() {
        let outcome = LexiconScorer.score("Profits! Gains!").unwrap();
        assert_eq!(outcome.financial.label, SentimentLabel::Positive);
    }
}
