use super::models::WordRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    MistakeCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// View parameters for the library list. Absent filters behave as identity.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub tag_filter: Option<String>,
    pub search_text: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            tag_filter: None,
            search_text: String::new(),
            sort_field: SortField::CreatedAt,
            sort_order: SortOrder::Ascending,
        }
    }
}

/// Filter and order the word list for display. Returns indices into
/// `records`; equal sort keys keep their relative input order. Pure function
/// of its inputs, re-invoked by the caller whenever a parameter changes.
pub fn project(records: &[WordRecord], params: &QueryParams) -> Vec<usize> {
    let query = params.search_text.trim().to_lowercase();

    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            if let Some(tag) = &params.tag_filter {
                if !record.has_tag(tag) {
                    return false;
                }
            }

            if !query.is_empty()
                && !record.word.to_lowercase().contains(&query)
                && !record.meaning.to_lowercase().contains(&query)
            {
                return false;
            }

            true
        })
        .map(|(idx, _)| idx)
        .collect();

    // sort_by is stable, so ties fall back to input order.
    indices.sort_by(|&lhs, &rhs| {
        let ordering = sort_key(&records[lhs], params.sort_field)
            .cmp(&sort_key(&records[rhs], params.sort_field));

        match params.sort_order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    indices
}

/// Numeric projection of the sort field; missing timestamps compare as the
/// epoch.
fn sort_key(record: &WordRecord, field: SortField) -> i64 {
    match field {
        SortField::CreatedAt => {
            record.created_at.map(|t| t.timestamp_millis()).unwrap_or(0)
        }
        SortField::MistakeCount => record.mistake_count as i64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{
        DateTime,
        TimeZone,
        Utc,
    };

    use super::*;
    use crate::core::models::WordRecord;

    fn timestamp(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn record(
        id: &str,
        word: &str,
        meaning: &str,
        tags: &[&str],
        mistake_count: u32,
        created_secs: Option<i64>,
    ) -> WordRecord {
        WordRecord {
            id: id.to_string(),
            word: word.to_string(),
            meaning: meaning.to_string(),
            example: None,
            memo: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            mistake_count,
            last_correct_date: None,
            created_at: created_secs.map(timestamp),
            owner: None,
        }
    }

    fn ids<'a>(records: &'a [WordRecord], indices: &[usize]) -> Vec<&'a str> {
        indices.iter().map(|&idx| records[idx].id.as_str()).collect()
    }

    #[test]
    fn no_filters_returns_all_by_created_at_ascending() {
        let records = vec![
            record("b", "banana", "バナナ", &[], 0, Some(200)),
            record("a", "apple", "林檎", &[], 0, Some(100)),
            record("c", "cherry", "桜桃", &[], 0, Some(300)),
        ];

        let result = project(&records, &QueryParams::default());
        assert_eq!(ids(&records, &result), vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_created_at_sorts_as_epoch() {
        let records = vec![
            record("late", "walk", "歩く", &[], 0, Some(100)),
            record("none", "run", "走る", &[], 0, None),
        ];

        let result = project(&records, &QueryParams::default());
        assert_eq!(ids(&records, &result), vec!["none", "late"]);
    }

    #[test]
    fn created_at_ties_keep_input_order() {
        let records = vec![
            record("first", "left", "左", &[], 0, Some(100)),
            record("second", "right", "右", &[], 0, Some(100)),
        ];

        let ascending = project(&records, &QueryParams::default());
        assert_eq!(ids(&records, &ascending), vec!["first", "second"]);

        let descending = project(
            &records,
            &QueryParams { sort_order: SortOrder::Descending, ..Default::default() },
        );
        assert_eq!(ids(&records, &descending), vec!["first", "second"]);
    }

    #[test]
    fn tag_filter_is_exact_and_case_sensitive() {
        let records = vec![
            record("1", "cat", "猫", &["animals"], 0, Some(1)),
            record("2", "dog", "犬", &["Animals"], 0, Some(2)),
            record("3", "run", "走る", &["verbs"], 0, Some(3)),
        ];

        let params = QueryParams {
            tag_filter: Some("animals".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&records, &project(&records, &params)), vec!["1"]);
    }

    #[test]
    fn search_matches_word_or_meaning_case_insensitively() {
        let records = vec![
            record("1", "Library", "図書館", &[], 0, Some(1)),
            record("2", "dog", "a LIBrary animal", &[], 0, Some(2)),
            record("3", "cat", "猫", &[], 0, Some(3)),
        ];

        let params = QueryParams { search_text: "library".to_string(), ..Default::default() };
        assert_eq!(ids(&records, &project(&records, &params)), vec!["1", "2"]);
    }

    #[test]
    fn blank_search_is_identity() {
        let records = vec![
            record("1", "cat", "猫", &[], 0, Some(1)),
            record("2", "dog", "犬", &[], 0, Some(2)),
        ];

        let params = QueryParams { search_text: "   ".to_string(), ..Default::default() };
        assert_eq!(project(&records, &params).len(), 2);
    }

    #[test]
    fn tag_and_search_predicates_are_conjunctive() {
        let records = vec![
            record("1", "cat", "猫", &["animals"], 0, Some(1)),
            record("2", "dog", "犬", &["animals"], 0, Some(2)),
            record("3", "catalog", "目録", &["office"], 0, Some(3)),
        ];

        let params = QueryParams {
            tag_filter: Some("animals".to_string()),
            search_text: "cat".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&records, &project(&records, &params)), vec!["1"]);
    }

    #[test]
    fn mistake_count_descending_places_highest_first() {
        let records = vec![
            record("1", "cat", "猫", &[], 3, Some(100)),
            record("2", "dog", "犬", &[], 0, Some(200)),
        ];

        let params = QueryParams {
            sort_field: SortField::MistakeCount,
            sort_order: SortOrder::Descending,
            ..Default::default()
        };
        assert_eq!(ids(&records, &project(&records, &params)), vec!["1", "2"]);
    }

    #[test]
    fn equal_mistake_counts_preserve_input_order() {
        let records = vec![
            record("x", "ant", "蟻", &[], 2, Some(300)),
            record("y", "bee", "蜂", &[], 2, Some(100)),
            record("z", "fly", "蠅", &[], 5, Some(200)),
        ];

        let params = QueryParams {
            sort_field: SortField::MistakeCount,
            sort_order: SortOrder::Descending,
            ..Default::default()
        };
        assert_eq!(ids(&records, &project(&records, &params)), vec!["z", "x", "y"]);
    }

    #[test]
    fn search_for_do_matches_only_dog() {
        let records = vec![
            record("1", "cat", "猫", &[], 3, Some(100)),
            record("2", "dog", "犬", &[], 0, Some(200)),
        ];

        let params = QueryParams { search_text: "do".to_string(), ..Default::default() };
        assert_eq!(ids(&records, &project(&records, &params)), vec!["2"]);
    }

    #[test]
    fn empty_result_is_valid_output() {
        let records = vec![record("1", "cat", "猫", &[], 0, Some(1))];

        let params = QueryParams { search_text: "zebra".to_string(), ..Default::default() };
        assert!(project(&records, &params).is_empty());
    }
}
