use chrono::{
    DateTime,
    Utc,
};

use super::models::WordRecord;

/// Which side of the card is shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    WordToMeaning,
    MeaningToWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Front,
    Back,
}

impl CardFace {
    pub fn flipped(self) -> Self {
        match self {
            CardFace::Front => CardFace::Back,
            CardFace::Back => CardFace::Front,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyPhase {
    SelectingSet,
    Loading,
    Presenting { index: usize, face: CardFace },
    Complete,
}

/// An ordered traversal of a chosen subset of words. `Complete` is terminal;
/// starting over requires selecting a set again.
#[derive(Debug, Clone)]
pub struct StudySession {
    mode: StudyMode,
    tag: Option<String>,
    ids: Vec<String>,
    phase: StudyPhase,
}

impl StudySession {
    pub fn new() -> Self {
        Self {
            mode: StudyMode::WordToMeaning,
            tag: None,
            ids: Vec::new(),
            phase: StudyPhase::SelectingSet,
        }
    }

    /// Lock in scope and direction; the word set is fetched next.
    pub fn select_set(&mut self, mode: StudyMode, tag: Option<String>) {
        self.mode = mode;
        self.tag = tag;
        self.ids.clear();
        self.phase = StudyPhase::Loading;
    }

    /// The fetched sequence has arrived. An empty set completes immediately.
    pub fn begin(&mut self, ids: Vec<String>) {
        if self.phase != StudyPhase::Loading {
            return;
        }

        self.ids = ids;
        self.phase = if self.ids.is_empty() {
            StudyPhase::Complete
        } else {
            StudyPhase::Presenting { index: 0, face: CardFace::Front }
        };
    }

    pub fn flip(&mut self) {
        if let StudyPhase::Presenting { face, .. } = &mut self.phase {
            *face = face.flipped();
        }
    }

    /// Move to the next card, face reset to the front. Past the last card the
    /// session completes rather than wrapping.
    pub fn advance(&mut self) {
        if let StudyPhase::Presenting { index, .. } = self.phase {
            self.phase = if index + 1 < self.ids.len() {
                StudyPhase::Presenting { index: index + 1, face: CardFace::Front }
            } else {
                StudyPhase::Complete
            };
        }
    }

    /// Leave the study view without finishing.
    pub fn abandon(&mut self) {
        self.ids.clear();
        self.phase = StudyPhase::SelectingSet;
    }

    pub fn current_id(&self) -> Option<&str> {
        match &self.phase {
            StudyPhase::Presenting { index, .. } => self.ids.get(*index).map(String::as_str),
            _ => None,
        }
    }

    pub fn phase(&self) -> &StudyPhase {
        &self.phase
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Correct,
    Incorrect,
}

/// Record one answer event. Exactly one field changes: a correct answer
/// stamps the last-correct date, a wrong one increments the mistake count.
pub fn apply_answer(record: &mut WordRecord, answer: Answer, now: DateTime<Utc>) {
    match answer {
        Answer::Correct => record.last_correct_date = Some(now),
        Answer::Incorrect => record.mistake_count += 1,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn presenting(index: usize, face: CardFace) -> StudyPhase {
        StudyPhase::Presenting { index, face }
    }

    #[test]
    fn session_walks_the_sequence_then_completes() {
        let mut session = StudySession::new();
        assert_eq!(*session.phase(), StudyPhase::SelectingSet);

        session.select_set(StudyMode::WordToMeaning, None);
        assert_eq!(*session.phase(), StudyPhase::Loading);

        session.begin(ids(&["a", "b"]));
        assert_eq!(*session.phase(), presenting(0, CardFace::Front));
        assert_eq!(session.current_id(), Some("a"));

        session.advance();
        assert_eq!(*session.phase(), presenting(1, CardFace::Front));
        assert_eq!(session.current_id(), Some("b"));

        session.advance();
        assert_eq!(*session.phase(), StudyPhase::Complete);
        assert_eq!(session.current_id(), None);

        // Terminal: answering past the end never wraps back.
        session.advance();
        assert_eq!(*session.phase(), StudyPhase::Complete);
    }

    #[test]
    fn empty_set_completes_immediately() {
        let mut session = StudySession::new();
        session.select_set(StudyMode::MeaningToWord, Some("animals".to_string()));
        session.begin(Vec::new());
        assert_eq!(*session.phase(), StudyPhase::Complete);
    }

    #[test]
    fn flip_toggles_and_advance_resets_to_front() {
        let mut session = StudySession::new();
        session.select_set(StudyMode::WordToMeaning, None);
        session.begin(ids(&["a", "b"]));

        session.flip();
        assert_eq!(*session.phase(), presenting(0, CardFace::Back));
        session.flip();
        assert_eq!(*session.phase(), presenting(0, CardFace::Front));

        session.flip();
        session.advance();
        assert_eq!(*session.phase(), presenting(1, CardFace::Front));
    }

    #[test]
    fn begin_is_ignored_outside_loading() {
        let mut session = StudySession::new();
        session.begin(ids(&["a"]));
        assert_eq!(*session.phase(), StudyPhase::SelectingSet);
    }

    #[test]
    fn correct_answer_only_touches_last_correct_date() {
        let mut record = WordRecord {
            id: "1".to_string(),
            word: "cat".to_string(),
            meaning: "猫".to_string(),
            example: None,
            memo: None,
            tags: Vec::new(),
            mistake_count: 2,
            last_correct_date: None,
            created_at: None,
            owner: None,
        };

        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        apply_answer(&mut record, Answer::Correct, now);

        assert_eq!(record.mistake_count, 2);
        assert_eq!(record.last_correct_date, Some(now));
    }

    #[test]
    fn incorrect_answer_only_touches_mistake_count() {
        let earlier = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
        let mut record = WordRecord {
            id: "1".to_string(),
            word: "dog".to_string(),
            meaning: "犬".to_string(),
            example: None,
            memo: None,
            tags: Vec::new(),
            mistake_count: 0,
            last_correct_date: Some(earlier),
            created_at: None,
            owner: None,
        };

        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        apply_answer(&mut record, Answer::Incorrect, now);
        apply_answer(&mut record, Answer::Incorrect, now);

        assert_eq!(record.mistake_count, 2);
        assert_eq!(record.last_correct_date, Some(earlier));
    }
}
