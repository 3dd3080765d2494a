//! Lenient parsing of backend keyword responses.

use copyforge_core::{KeywordCategory, LsiKeyword};

/// Extract LSI keywords from a backend reply.
///
/// The backend is asked for a bare JSON array but often wraps it in prose or
/// a code fence, so parsing starts at the first `[` and ends at the last `]`.
/// Entries missing a keyword are dropped; a missing or unknown category
/// defaults to related; relevance is clamped to [0.5, 1.0]. Returns `None`
/// when no valid entry survives.
pub fn parse_keywords(reply: &str) -> Option<Vec<LsiKeyword>> {
    let start = reply.find('[')?;
    let end = reply.rfind(']')?;
    if end <= start {
        return None;
    }

    let parsed: serde_json::Value = serde_json::from_str(&reply[start..=end]).ok()?;
    let entries = parsed.as_array()?;

    let keywords: Vec<LsiKeyword> = entries.iter().filter_map(entry_to_keyword).collect();
    if keywords.is_empty() {
        None
    } else {
        Some(keywords)
    }
}

fn entry_to_keyword(entry: &serde_json::Value) -> Option<LsiKeyword> {
    let keyword = entry["keyword"].as_str()?.trim();
    if keyword.is_empty() {
        return None;
    }

    let relevance = entry["relevance"].as_f64().unwrap_or(0.7).clamp(0.5, 1.0);
    let category = entry["category"]
        .as_str()
        .and_then(parse_category)
        .unwrap_or(KeywordCategory::Related);

    Some(LsiKeyword {
        keyword: keyword.to_string(),
        relevance,
        category,
    })
}

fn parse_category(label: &str) -> Option<KeywordCategory> {
    match label {
        "основные" => Some(KeywordCategory::Core),
        "синонимы" => Some(KeywordCategory::Synonyms),
        "смежные" => Some(KeywordCategory::Related),
        "технические" => Some(KeywordCategory::Technical),
        "коммерческие" => Some(KeywordCategory::Commercial),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let reply = r#"[
            {"keyword": "кофеварка рожковая", "relevance": 0.9, "category": "основные"},
            {"keyword": "эспрессо дома", "relevance": 0.8, "category": "смежные"}
        ]"#;
        let keywords = parse_keywords(reply).unwrap();
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].keyword, "кофеварка рожковая");
        assert_eq!(keywords[0].category, KeywordCategory::Core);
    }

    #[test]
    fn test_parse_array_wrapped_in_prose() {
        let reply = "Вот ключевые слова:\n```json\n[{\"keyword\": \"помол кофе\", \
                     \"relevance\": 0.7, \"category\": \"технические\"}]\n```\nГотово.";
        let keywords = parse_keywords(reply).unwrap();
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].category, KeywordCategory::Technical);
    }

    #[test]
    fn test_relevance_clamped() {
        let reply = r#"[
            {"keyword": "а", "relevance": 1.7, "category": "основные"},
            {"keyword": "б", "relevance": 0.1, "category": "основные"}
        ]"#;
        let keywords = parse_keywords(reply).unwrap();
        assert_eq!(keywords[0].relevance, 1.0);
        assert_eq!(keywords[1].relevance, 0.5);
    }

    #[test]
    fn test_unknown_category_defaults_to_related() {
        let reply = r#"[{"keyword": "кофе", "relevance": 0.6, "category": "прочее"}]"#;
        let keywords = parse_keywords(reply).unwrap();
        assert_eq!(keywords[0].category, KeywordCategory::Related);
    }

    #[test]
    fn test_entries_without_keyword_dropped() {
        let reply = r#"[{"relevance": 0.9}, {"keyword": "  "}, {"keyword": "зерно"}]"#;
        let keywords = parse_keywords(reply).unwrap();
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].keyword, "зерно");
        // defaults applied
        assert_eq!(keywords[0].relevance, 0.7);
    }

    #[test]
    fn test_unparseable_reply_is_none() {
        assert!(parse_keywords("не могу помочь").is_none());
        assert!(parse_keywords("[]").is_none());
        assert!(parse_keywords("] оборвано [").is_none());
        assert!(parse_keywords(r#"[{"keyword": 5}]"#).is_none());
    }
}
