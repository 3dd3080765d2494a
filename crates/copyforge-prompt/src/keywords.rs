//! Keyword extraction from free-text requirements.
//!
//! A relevance-free filter: no frequency ranking, just stop-word and length
//! filtering with first-seen order. Known limitation, kept as the observed
//! contract.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Maximum number of keywords returned.
pub const MAX_KEYWORDS: usize = 10;

/// Closed list of common Russian functional words. A swappable lexicon
/// resource; do not expand without product guidance.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "и", "в", "на", "с", "по", "для", "как", "что", "это", "или", "но",
        "а", "же", "бы", "был", "была", "было", "быть", "его", "её", "их",
        "она", "оно", "они", "мы", "вы", "не", "нет", "да", "у", "о", "об",
        "от", "до", "за", "под", "над", "при", "про", "так", "вот", "тоже",
        "также", "только", "ещё", "еще", "уже", "чтобы", "если", "когда",
        "где", "куда", "какой", "какая", "какие", "который", "которая",
        "которые", "весь", "вся", "все", "всё", "этот", "эта", "эти", "тот",
        "та", "те", "свой", "своя", "свои", "наш", "ваш", "меня", "тебя",
        "него", "себя", "очень", "можно", "нужно", "надо", "есть", "будет",
    ]
    .into_iter()
    .collect()
});

/// Extract up to [`MAX_KEYWORDS`] candidate keywords from free text.
///
/// Lowercases, strips punctuation to whitespace, drops tokens of length ≤ 3
/// and stop-words, de-duplicates preserving first-seen order. Never fails;
/// may return an empty list.
pub fn extract(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut keywords = Vec::new();

    for token in lowered.split(|c: char| !c.is_alphanumeric()) {
        if token.chars().count() <= 3 {
            continue;
        }
        if STOP_WORDS.contains(token) {
            continue;
        }
        if seen.insert(token) {
            keywords.push(token.to_string());
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let keywords = extract("Нужна статья про кофеварки для интернет-магазина");
        assert_eq!(
            keywords,
            vec!["нужна", "статья", "кофеварки", "интернет", "магазина"]
        );
    }

    #[test]
    fn test_short_and_stop_words_dropped() {
        let keywords = extract("это текст для SEO и про наши сайты");
        // "это"/"для"/"и"/"про"/"seo" are ≤ 3 chars or stop words; "наши" is 4 chars
        assert_eq!(keywords, vec!["текст", "наши", "сайты"]);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let keywords = extract("статья статья кофеварки статья кофеварки турки");
        assert_eq!(keywords, vec!["статья", "кофеварки", "турки"]);
    }

    #[test]
    fn test_cap_at_ten() {
        let long: String = (0..50).map(|i| format!("слово{:02} ", i)).collect();
        let keywords = extract(&long);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert!(keywords.iter().all(|k| k.chars().count() > 3));
        let unique: std::collections::HashSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
        assert!(extract("и в на с по").is_empty());
    }

    #[test]
    fn test_punctuation_split() {
        let keywords = extract("кофеварки,турки;гейзерные!");
        assert_eq!(keywords, vec!["кофеварки", "турки", "гейзерные"]);
    }
}
