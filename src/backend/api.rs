use std::time::Duration;

use chrono::{
    DateTime,
    TimeZone,
    Utc,
};
use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    models::WordRecord,
    TangochoError,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8787";

const PROTOCOL_VERSION: u32 = 1;

/// Response envelope used by every backend action.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, TangochoError> {
        if let Some(error) = self.error {
            return Err(TangochoError::Backend(error));
        }

        self.result
            .ok_or_else(|| TangochoError::Backend("empty response from backend".to_string()))
    }
}

/// Stored form of a word document. Timestamps travel as epoch milliseconds
/// and are converted to chrono at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWord {
    pub id: String,
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub mistake_count: u32,
    #[serde(default)]
    pub last_correct_date: Option<i64>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl StoredWord {
    pub fn into_record(self) -> WordRecord {
        WordRecord {
            id: self.id,
            word: self.word,
            meaning: self.meaning,
            example: self.example,
            memo: self.memo,
            tags: self.tags,
            mistake_count: self.mistake_count,
            last_correct_date: self.last_correct_date.and_then(from_millis),
            created_at: self.created_at.and_then(from_millis),
            owner: self.owner,
        }
    }
}

/// Fields of a brand-new word; the backend assigns id and creation time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub word: String,
    pub meaning: String,
    pub example: Option<String>,
    pub memo: Option<String>,
    pub tags: Vec<String>,
    pub mistake_count: u32,
    pub last_correct_date: Option<i64>,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedWord {
    pub id: String,
    pub created_at: i64,
}

/// Partial update merged into the stored document. Absent fields are left
/// untouched; an empty string clears an optional text field.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mistake_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_correct_date: Option<i64>,
}

impl WordPatch {
    /// Mirror the merge the backend performs, so the local list can be
    /// updated in place without a refetch.
    pub fn apply_to(&self, record: &mut WordRecord) {
        if let Some(word) = &self.word {
            record.word = word.clone();
        }
        if let Some(meaning) = &self.meaning {
            record.meaning = meaning.clone();
        }
        if let Some(example) = &self.example {
            record.example = crate::core::models::non_empty(example);
        }
        if let Some(memo) = &self.memo {
            record.memo = crate::core::models::non_empty(memo);
        }
        if let Some(tags) = &self.tags {
            record.tags = tags.clone();
        }
        if let Some(count) = self.mistake_count {
            record.mistake_count = count;
        }
        if let Some(millis) = self.last_correct_date {
            record.last_correct_date = from_millis(millis);
        }
    }
}

pub fn to_millis(date: DateTime<Utc>) -> i64 {
    date.timestamp_millis()
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

fn client() -> Result<Client, TangochoError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| TangochoError::Custom(format!("HTTP client build failed: {e}")))
}

pub(crate) async fn make_request<T: for<'de> Deserialize<'de>>(
    base_url: &str,
    action: &str,
    params: Option<serde_json::Value>,
) -> Result<ApiResponse<T>, TangochoError> {
    let mut body = serde_json::Map::new();
    body.insert("action".to_string(), serde_json::Value::String(action.to_string()));
    body.insert("version".to_string(), serde_json::Value::Number(PROTOCOL_VERSION.into()));

    if let Some(params) = params {
        body.insert("params".to_string(), params);
    }

    let url = format!("{}/api", base_url.trim_end_matches('/'));
    let response: ApiResponse<T> =
        client()?.post(url).json(&body).send().await?.json().await?;

    Ok(response)
}

//Used to check whether the backend is reachable
pub async fn get_version(base_url: &str) -> Result<u32, TangochoError> {
    let response: ApiResponse<u32> = make_request(base_url, "version", None).await?;
    response.into_result()
}

pub async fn insert_word(
    base_url: &str,
    new_word: &NewWord,
) -> Result<InsertedWord, TangochoError> {
    let params = serde_json::json!({ "word": new_word });
    let response: ApiResponse<InsertedWord> =
        make_request(base_url, "insertWord", Some(params)).await?;
    response.into_result()
}

pub async fn fetch_words(base_url: &str) -> Result<Vec<WordRecord>, TangochoError> {
    let response: ApiResponse<Vec<StoredWord>> =
        make_request(base_url, "fetchWords", None).await?;

    Ok(response.into_result()?.into_iter().map(StoredWord::into_record).collect())
}

pub async fn update_word(
    base_url: &str,
    id: &str,
    patch: &WordPatch,
) -> Result<(), TangochoError> {
    let params = serde_json::json!({ "id": id, "fields": patch });
    let response: ApiResponse<bool> =
        make_request(base_url, "updateWord", Some(params)).await?;
    response.into_result().map(|_| ())
}

pub async fn delete_word(base_url: &str, id: &str) -> Result<(), TangochoError> {
    let params = serde_json::json!({ "id": id });
    let response: ApiResponse<bool> =
        make_request(base_url, "deleteWord", Some(params)).await?;
    response.into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_word_converts_timestamps() {
        let stored: StoredWord = serde_json::from_str(
            r#"{
                "id": "w1",
                "word": "cat",
                "meaning": "猫",
                "tags": ["animals"],
                "mistakeCount": 3,
                "lastCorrectDate": 1700000000000,
                "createdAt": 1600000000000
            }"#,
        )
        .unwrap();

        let record = stored.into_record();
        assert_eq!(record.id, "w1");
        assert_eq!(record.mistake_count, 3);
        assert_eq!(record.last_correct_date.unwrap().timestamp_millis(), 1_700_000_000_000);
        assert_eq!(record.created_at.unwrap().timestamp_millis(), 1_600_000_000_000);
        assert_eq!(record.example, None);
        assert_eq!(record.owner, None);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = WordPatch { mistake_count: Some(4), ..Default::default() };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "mistakeCount": 4 }));
    }

    #[test]
    fn patch_merge_matches_backend_merge() {
        let mut record = StoredWord {
            id: "w1".to_string(),
            word: "cat".to_string(),
            meaning: "猫".to_string(),
            example: Some("old".to_string()),
            memo: None,
            tags: vec!["animals".to_string()],
            mistake_count: 1,
            last_correct_date: None,
            created_at: Some(1_600_000_000_000),
            owner: None,
        }
        .into_record();

        let patch = WordPatch {
            meaning: Some("ネコ".to_string()),
            example: Some(String::new()),
            tags: Some(vec!["animals".to_string(), "pets".to_string()]),
            ..Default::default()
        };
        patch.apply_to(&mut record);

        assert_eq!(record.word, "cat");
        assert_eq!(record.meaning, "ネコ");
        assert_eq!(record.example, None);
        assert_eq!(record.tags, vec!["animals", "pets"]);
        assert_eq!(record.mistake_count, 1);
    }
}
