//! Quiz data models — questions, answers, demographics, and the analysis
//! result.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GenAiError, SessionError};

/// Every generated question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 5;

/// A single multiple-choice question. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text (wire key `question`).
    #[serde(rename = "question")]
    pub text: String,
    /// Ordered option strings, exactly [`OPTIONS_PER_QUESTION`] of them.
    pub options: Vec<String>,
}

impl Question {
    /// Check that the question is well-formed.
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("empty question text".to_string());
        }
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(format!(
                "expected {} options, got {}",
                OPTIONS_PER_QUESTION,
                self.options.len()
            ));
        }
        if self.options.iter().any(|o| o.trim().is_empty()) {
            return Err("empty option text".to_string());
        }
        Ok(())
    }

    /// Parse and validate a generated question list payload.
    ///
    /// The whole payload is rejected if any single question is malformed — a
    /// partially usable list is still a failed generation attempt.
    pub fn parse_list(value: serde_json::Value) -> Result<Vec<Question>, GenAiError> {
        let questions: Vec<Question> = serde_json::from_value(value)?;
        if questions.is_empty() {
            return Err(GenAiError::InvalidResponse {
                operation: "questions".to_string(),
                reason: "empty question list".to_string(),
            });
        }
        for (i, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|reason| GenAiError::InvalidResponse {
                    operation: "questions".to_string(),
                    reason: format!("question {i}: {reason}"),
                })?;
        }
        Ok(questions)
    }
}

/// Per-question record of which option the user picked.
///
/// Same length as the question list; `None` means unanswered. Mutated one
/// entry at a time as the user answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet(Vec<Option<usize>>);

impl AnswerSet {
    /// All-unanswered set for `count` questions.
    pub fn for_questions(count: usize) -> Self {
        Self(vec![None; count])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The selected option for a question, if answered.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied().flatten()
    }

    /// Record the selected option for one question, leaving all other
    /// entries untouched.
    pub fn record(&mut self, index: usize, option: usize) -> Result<(), SessionError> {
        if option >= OPTIONS_PER_QUESTION {
            return Err(SessionError::OptionOutOfRange {
                option,
                max: OPTIONS_PER_QUESTION,
            });
        }
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(SessionError::AnswerIndexOutOfRange { index, len })?;
        *slot = Some(option);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(Option::is_some)
    }
}

/// The structured output of the analysis call. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharmReport {
    pub title: String,
    pub strengths: String,
    pub weaknesses: String,
    pub main_weakness: String,
    pub summary: String,
    /// 0–100; out-of-range numbers are clamped on parse.
    #[serde(deserialize_with = "clamp_score")]
    pub score: u8,
    pub emoji: String,
    pub animal: String,
}

fn clamp_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.clamp(0.0, 100.0).round() as u8)
}

/// Chosen gender demographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Korean label used in prompts and on screen.
    pub fn label_ko(&self) -> &'static str {
        match self {
            Self::Male => "남성",
            Self::Female => "여성",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Chosen age band demographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Teens,
    Twenties,
    Thirties,
    Forties,
    Fifties,
    SixtiesPlus,
}

impl AgeBand {
    /// All bands, in on-screen order.
    pub const ALL: [AgeBand; 6] = [
        Self::Teens,
        Self::Twenties,
        Self::Thirties,
        Self::Forties,
        Self::Fifties,
        Self::SixtiesPlus,
    ];

    /// Korean label used in prompts and on screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Teens => "10대",
            Self::Twenties => "20대",
            Self::Thirties => "30대",
            Self::Forties => "40대",
            Self::Fifties => "50대",
            Self::SixtiesPlus => "60대 이상",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.label() == label)
    }

    /// Whether the band starts at 40 — flips the image art style.
    pub fn is_forty_or_older(&self) -> bool {
        matches!(self, Self::Forties | Self::Fifties | Self::SixtiesPlus)
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n_options: usize) -> Question {
        Question {
            text: "주말에 주로 무엇을 하나요?".to_string(),
            options: (0..n_options).map(|i| format!("선택지 {i}")).collect(),
        }
    }

    #[test]
    fn valid_question() {
        assert!(question(5).validate().is_ok());
    }

    #[test]
    fn wrong_option_count_rejected() {
        assert!(question(4).validate().is_err());
        assert!(question(6).validate().is_err());
    }

    #[test]
    fn empty_text_rejected() {
        let mut q = question(5);
        q.text = "  ".to_string();
        assert!(q.validate().is_err());
        let mut q = question(5);
        q.options[2] = String::new();
        assert!(q.validate().is_err());
    }

    #[test]
    fn parse_list_accepts_wire_shape() {
        let payload = serde_json::json!([
            {"question": "첫 질문?", "options": ["a", "b", "c", "d", "e"]},
            {"question": "둘째 질문?", "options": ["a", "b", "c", "d", "e"]}
        ]);
        let questions = Question::parse_list(payload).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "첫 질문?");
    }

    #[test]
    fn parse_list_rejects_empty_and_malformed() {
        assert!(Question::parse_list(serde_json::json!([])).is_err());
        assert!(Question::parse_list(serde_json::json!({"question": "?"})).is_err());
        let four_options = serde_json::json!([
            {"question": "?", "options": ["a", "b", "c", "d"]}
        ]);
        assert!(Question::parse_list(four_options).is_err());
    }

    #[test]
    fn answer_set_starts_unanswered() {
        let answers = AnswerSet::for_questions(10);
        assert_eq!(answers.len(), 10);
        assert!(!answers.is_complete());
        assert!((0..10).all(|i| answers.get(i).is_none()));
    }

    #[test]
    fn record_leaves_other_entries_unchanged() {
        let mut answers = AnswerSet::for_questions(3);
        answers.record(1, 4).unwrap();
        assert_eq!(answers.get(1), Some(4));
        assert_eq!(answers.get(0), None);
        assert_eq!(answers.get(2), None);
    }

    #[test]
    fn record_bounds_checked() {
        let mut answers = AnswerSet::for_questions(3);
        assert!(matches!(
            answers.record(3, 0),
            Err(SessionError::AnswerIndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            answers.record(0, 5),
            Err(SessionError::OptionOutOfRange { option: 5, max: 5 })
        ));
    }

    #[test]
    fn complete_only_when_all_answered() {
        let mut answers = AnswerSet::for_questions(2);
        answers.record(0, 0).unwrap();
        assert!(!answers.is_complete());
        answers.record(1, 1).unwrap();
        assert!(answers.is_complete());
        assert!(!AnswerSet::for_questions(0).is_complete());
    }

    #[test]
    fn report_parses_camel_case_wire() {
        let payload = serde_json::json!({
            "title": "신중한 로맨티스트",
            "strengths": "장점",
            "weaknesses": "단점",
            "mainWeakness": "결정장애",
            "summary": "총평",
            "score": 87,
            "emoji": "🦊",
            "animal": "여우"
        });
        let report: CharmReport = serde_json::from_value(payload).unwrap();
        assert_eq!(report.main_weakness, "결정장애");
        assert_eq!(report.score, 87);
    }

    #[test]
    fn score_clamped_on_parse() {
        let over = serde_json::json!({
            "title": "t", "strengths": "s", "weaknesses": "w",
            "mainWeakness": "m", "summary": "s", "score": 140,
            "emoji": "🐯", "animal": "호랑이"
        });
        let report: CharmReport = serde_json::from_value(over).unwrap();
        assert_eq!(report.score, 100);
    }

    #[test]
    fn age_band_labels_round_trip() {
        for band in AgeBand::ALL {
            assert_eq!(AgeBand::from_label(band.label()), Some(band));
        }
        assert_eq!(AgeBand::from_label("70대"), None);
    }

    #[test]
    fn forty_boundary() {
        assert!(!AgeBand::Thirties.is_forty_or_older());
        assert!(AgeBand::Forties.is_forty_or_older());
        assert!(AgeBand::SixtiesPlus.is_forty_or_older());
    }
}
