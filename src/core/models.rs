use chrono::{
    DateTime,
    Utc,
};

use super::errors::TangochoError;

/// One vocabulary entry with its study statistics. The id is assigned by the
/// backend on creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WordRecord {
    pub id: String,
    pub word: String,
    pub meaning: String,
    pub example: Option<String>,
    pub memo: Option<String>,
    pub tags: Vec<String>,             // no empty strings, insertion order
    pub mistake_count: u32,
    pub last_correct_date: Option<DateTime<Utc>>, // absent until first correct answer
    pub created_at: Option<DateTime<Utc>>,
    pub owner: Option<String>,
}

impl WordRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Raw form input for a new or edited word. Tags are kept as the user typed
/// them (comma separated) until submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordDraft {
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub memo: String,
    pub tags: String,
}

impl WordDraft {
    pub fn from_record(record: &WordRecord) -> Self {
        Self {
            word: record.word.clone(),
            meaning: record.meaning.clone(),
            example: record.example.clone().unwrap_or_default(),
            memo: record.memo.clone().unwrap_or_default(),
            tags: record.tags.join(", "),
        }
    }

    /// Word and meaning are mandatory; checked before any backend call.
    pub fn validate(&self) -> Result<(), TangochoError> {
        if self.word.trim().is_empty() || self.meaning.trim().is_empty() {
            return Err(TangochoError::Validation(
                "Word and meaning are both required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tag_list(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }

    pub fn example_opt(&self) -> Option<String> {
        non_empty(&self.example)
    }

    pub fn memo_opt(&self) -> Option<String> {
        non_empty(&self.memo)
    }
}

pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Comma-split, trimmed, empties dropped, duplicates dropped keeping the
/// first occurrence.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',') {
        let tag = tag.trim();
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Tag vocabulary across all loaded words, first-seen order. Recomputed from
/// the records, never stored independently.
pub fn collect_tags(records: &[WordRecord]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for record in records {
        for tag in &record.tags {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_tags(id: &str, tags: &[&str]) -> WordRecord {
        WordRecord {
            id: id.to_string(),
            word: "cat".to_string(),
            meaning: "猫".to_string(),
            example: None,
            memo: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            mistake_count: 0,
            last_correct_date: None,
            created_at: None,
            owner: None,
        }
    }

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        assert_eq!(parse_tags(" animals , , toeic ,"), vec!["animals", "toeic"]);
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags(" , ,,"), Vec::<String>::new());
    }

    #[test]
    fn parse_tags_keeps_first_occurrence() {
        assert_eq!(parse_tags("a, b, a, c, b"), vec!["a", "b", "c"]);
    }

    #[test]
    fn collect_tags_is_first_seen_order() {
        let records = vec![
            record_with_tags("1", &["verbs", "toeic"]),
            record_with_tags("2", &["toeic", "animals"]),
        ];
        assert_eq!(collect_tags(&records), vec!["verbs", "toeic", "animals"]);
    }

    #[test]
    fn draft_requires_word_and_meaning() {
        let mut draft = WordDraft { word: "dog".to_string(), ..Default::default() };
        assert!(draft.validate().is_err());

        draft.meaning = "犬".to_string();
        assert!(draft.validate().is_ok());

        draft.word = "   ".to_string();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn draft_round_trips_optional_fields() {
        let mut record = record_with_tags("1", &["animals"]);
        record.example = Some("The cat sleeps.".to_string());

        let draft = WordDraft::from_record(&record);
        assert_eq!(draft.example, "The cat sleeps.");
        assert_eq!(draft.memo, "");
        assert_eq!(draft.example_opt(), Some("The cat sleeps.".to_string()));
        assert_eq!(draft.memo_opt(), None);
        assert_eq!(draft.tag_list(), vec!["animals"]);
    }
}
