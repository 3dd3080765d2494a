//! The quality scorer and its six metric rubrics.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

use crate::lexicon;
use crate::metrics::QualityMetrics;

/// Suggestion thresholds (part of the observed contract).
const UNIQUENESS_THRESHOLD: u32 = 70;
const READABILITY_THRESHOLD: u32 = 60;
const SEO_THRESHOLD: u32 = 70;
const DENSITY_THRESHOLD: u32 = 50;
const SENTIMENT_THRESHOLD: u32 = 60;
const STRUCTURE_THRESHOLD: u32 = 70;

static NUMBERED_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s").unwrap());

/// Randomness policy for the scores that simulate external-service variance
/// (uniqueness, keyword density, sentiment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jitter {
    /// No perturbation; density bands resolve to their midpoints.
    Off,
    /// Reproducible bounded jitter derived from the seed. A fresh RNG is
    /// built per `score()` call, so identical text and seed always produce
    /// identical metrics.
    Seeded(u64),
}

/// Computes [`QualityMetrics`] for a text. Stateless and safe to share
/// across concurrent workers.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    jitter: Jitter,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityScorer {
    pub fn new() -> Self {
        Self { jitter: Jitter::Off }
    }

    pub fn with_jitter(jitter: Jitter) -> Self {
        Self { jitter }
    }

    /// Score a text. Never fails; whitespace-only input scores 0 on every
    /// metric (defined boundary behavior).
    pub fn score(&self, text: &str) -> QualityMetrics {
        let mut rng = match self.jitter {
            Jitter::Off => None,
            Jitter::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
        };

        let (uniqueness, readability, seo, keyword_density, sentiment, structure) =
            if text.trim().is_empty() {
                (0, 0, 0, 0, 0, 0)
            } else {
                (
                    uniqueness_score(text, rng.as_mut()),
                    readability_score(text),
                    seo_score(text),
                    keyword_density_score(text, rng.as_mut()),
                    sentiment_score(text, rng.as_mut()),
                    structure_score(text),
                )
            };

        let sum = uniqueness + readability + seo + keyword_density + sentiment + structure;
        let overall = (sum as f64 / 6.0).round() as u32;

        let suggestions = build_suggestions(
            uniqueness,
            readability,
            seo,
            keyword_density,
            sentiment,
            structure,
        );

        QualityMetrics {
            uniqueness,
            readability,
            seo,
            keyword_density,
            sentiment,
            structure,
            overall,
            suggestions,
        }
    }
}

// ---------------------------------------------------------------
// Tokenization helpers
// ---------------------------------------------------------------

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn sentence_count(text: &str) -> usize {
    let count = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    count.max(1)
}

/// Blank-line-separated paragraphs.
fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn has_heading(text: &str) -> bool {
    text.lines().any(|line| line.trim_start().starts_with('#'))
}

fn clamp_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

// ---------------------------------------------------------------
// Metric rubrics
// ---------------------------------------------------------------

/// Distinct-to-total word ratio, scaled to 0–100, ±5 jitter when seeded.
fn uniqueness_score(text: &str, rng: Option<&mut StdRng>) -> u32 {
    let words = words(text);
    if words.is_empty() {
        return 0;
    }
    let distinct: std::collections::HashSet<&String> = words.iter().collect();
    let mut score = distinct.len() as f64 / words.len() as f64 * 100.0;
    if let Some(rng) = rng {
        score += rng.gen_range(-5.0..=5.0);
    }
    clamp_score(score)
}

/// Flesch reading-ease approximation with vowel-count syllables,
/// clamped to [0, 100].
fn readability_score(text: &str) -> u32 {
    let words = words(text);
    if words.is_empty() {
        return 0;
    }
    let sentences = sentence_count(text) as f64;
    let word_count = words.len() as f64;
    let syllables: usize = words
        .iter()
        .map(|w| w.chars().filter(|c| lexicon::VOWELS.contains(*c)).count())
        .sum();

    let score =
        206.835 - 1.015 * (word_count / sentences) - 84.6 * (syllables as f64 / word_count);
    clamp_score(score)
}

/// Additive SEO rubric, capped at 100.
fn seo_score(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let char_count = text.chars().count();
    let mut score = 0u32;

    if has_heading(text) {
        score += 20;
    }
    if char_count > 300 {
        score += 20;
        if char_count > 1000 {
            score += 10;
        }
    }
    if paragraphs(text).len() > 2 {
        score += 15;
    }

    let importance_hits = lexicon::IMPORTANCE_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count()
        .min(4);
    score += importance_hits as u32 * 5;

    let cta_hits = lexicon::CTA_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count()
        .min(4);
    score += cta_hits as u32 * 10;

    score.min(100)
}

/// Density band of the most frequent non-stop-word token.
///
/// Bands: 2–5% ⇒ 90–100, 1–2% ⇒ 70–85, 5–8% ⇒ 60–80, else 40–70. Band
/// midpoint when jitter is off, uniform within the band when seeded.
fn keyword_density_score(text: &str, rng: Option<&mut StdRng>) -> u32 {
    let tokens: Vec<String> = words(text)
        .into_iter()
        .filter(|w| w.chars().count() > 2 && !lexicon::STOP_WORDS.contains(w.as_str()))
        .collect();
    if tokens.is_empty() {
        return 0;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    let top = counts.values().copied().max().unwrap_or(0);
    let density = top as f64 / tokens.len() as f64 * 100.0;

    let (lo, hi) = if (2.0..=5.0).contains(&density) {
        (90.0, 100.0)
    } else if (1.0..2.0).contains(&density) {
        (70.0, 85.0)
    } else if (5.0..=8.0).contains(&density) {
        (60.0, 80.0)
    } else {
        (40.0, 70.0)
    };

    let score = match rng {
        Some(rng) => rng.gen_range(lo..=hi),
        None => (lo + hi) / 2.0,
    };
    clamp_score(score)
}

/// `75 + 5·(positive − negative)` over the fixed lexicons, ±3 jitter when
/// seeded, clamped to [0, 100].
fn sentiment_score(text: &str, rng: Option<&mut StdRng>) -> u32 {
    let lower = text.to_lowercase();
    let positive = lexicon::POSITIVE_WORDS
        .iter()
        .filter(|w| lower.contains(*w))
        .count() as f64;
    let negative = lexicon::NEGATIVE_WORDS
        .iter()
        .filter(|w| lower.contains(*w))
        .count() as f64;

    let mut score = 75.0 + 5.0 * (positive - negative);
    if let Some(rng) = rng {
        score += rng.gen_range(-3.0..=3.0);
    }
    clamp_score(score)
}

/// Additive structure rubric, capped at 100.
fn structure_score(text: &str) -> u32 {
    let paragraphs = paragraphs(text);
    let mut score = 0u32;

    if has_heading(text) {
        score += 25;
    }
    if paragraphs.len() >= 3 {
        score += 25;
    }

    let has_list = text.lines().any(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("• ")
    }) || NUMBERED_LIST_RE.is_match(text);
    if has_list {
        score += 20;
    }

    if !paragraphs.is_empty() {
        let avg_len = paragraphs
            .iter()
            .map(|p| p.chars().count())
            .sum::<usize>() as f64
            / paragraphs.len() as f64;
        if (100.0..=500.0).contains(&avg_len) {
            score += 20;
        }
    }

    if let Some(last) = paragraphs.last() {
        let lower = last.to_lowercase();
        if lexicon::SUMMARY_MARKERS.iter().any(|m| lower.contains(m)) {
            score += 10;
        }
    }

    score.min(100)
}

// ---------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------

fn build_suggestions(
    uniqueness: u32,
    readability: u32,
    seo: u32,
    keyword_density: u32,
    sentiment: u32,
    structure: u32,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if uniqueness < UNIQUENESS_THRESHOLD {
        suggestions.push(
            "Повысьте уникальность текста: перефразируйте повторяющиеся формулировки.".into(),
        );
    }
    if readability < READABILITY_THRESHOLD {
        suggestions
            .push("Упростите текст: сократите длинные предложения и слова.".into());
    }
    if seo < SEO_THRESHOLD {
        suggestions.push(
            "Добавьте заголовки, ключевые слова и призывы к действию для SEO.".into(),
        );
    }
    if keyword_density < DENSITY_THRESHOLD {
        suggestions
            .push("Скорректируйте плотность ключевых слов: оптимум 2-5%.".into());
    }
    if sentiment < SENTIMENT_THRESHOLD {
        suggestions.push("Добавьте позитивных формулировок о продукте.".into());
    }
    if structure < STRUCTURE_THRESHOLD {
        suggestions.push(
            "Улучшите структуру: заголовки, абзацы, списки и итоговый абзац.".into(),
        );
    }

    if suggestions.is_empty() {
        suggestions.push("Текст соответствует требованиям качества.".into());
    }

    suggestions
}
