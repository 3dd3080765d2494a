//! Word lists used by the scoring rubrics.
//!
//! Closed, swappable lexicon resources. The exact contents and thresholds are
//! part of the observed scoring contract; do not expand without product
//! guidance.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Vowel set for syllable approximation (Russian + Latin).
pub const VOWELS: &str = "аеёиоуыэюяaeiouy";

/// Functional words excluded from keyword-density counting.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "и", "в", "на", "с", "по", "для", "как", "что", "это", "или", "но",
        "а", "же", "бы", "не", "да", "у", "о", "от", "до", "за", "при",
        "так", "вот", "только", "еще", "ещё", "уже", "чтобы", "если", "все",
        "всё", "этот", "тот", "его", "она", "они", "мы", "вы", "the", "and",
        "for", "with",
    ]
    .into_iter()
    .collect()
});

/// Positive sentiment lexicon.
pub static POSITIVE_WORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "отличный", "лучший", "качественный", "профессиональный", "надежный",
        "выгодный", "уникальный", "эффективный", "успешный", "идеальный",
        "превосходный", "удобный", "быстрый", "гарантия", "преимущество",
    ]
});

/// Negative sentiment lexicon.
pub static NEGATIVE_WORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "плохой", "ужасный", "проблема", "сложный", "дорогой", "невозможно",
        "ошибка", "недостаток", "медленный", "неудобный",
    ]
});

/// Importance keywords for the SEO rubric (+5 each, up to 4 matches).
pub static IMPORTANCE_KEYWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "качество", "преимущества", "выгода", "гарантия", "опыт", "решение",
        "результат", "профессионал",
    ]
});

/// Call-to-action keywords for the SEO rubric (+10 each, up to 4 matches).
pub static CTA_KEYWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "закажите", "купите", "позвоните", "свяжитесь", "оставьте заявку",
        "узнайте", "получите", "попробуйте",
    ]
});

/// Markers of a closing/summary paragraph for the structure rubric.
pub static SUMMARY_MARKERS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "итог", "итоге", "вывод", "заключени", "резюм", "таким образом",
        "подводя",
    ]
});
