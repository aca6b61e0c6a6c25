//! End-to-end quiz flow tests against a scripted provider.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use neon_quiz::config::AppConfig;
use neon_quiz::error::GenAiError;
use neon_quiz::genai::GenAiProvider;
use neon_quiz::quiz::{AgeBand, Gender, QuizController, Screen};

type JsonReply = Result<serde_json::Value, String>;
type ImageReply = Result<Vec<u8>, String>;

/// Provider that pops queued replies and records every prompt it receives.
#[derive(Default)]
struct ScriptedProvider {
    json_replies: Mutex<VecDeque<JsonReply>>,
    image_replies: Mutex<VecDeque<ImageReply>>,
    json_prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn push_json(&self, reply: JsonReply) {
        self.json_replies.lock().unwrap().push_back(reply);
    }

    fn push_image(&self, reply: ImageReply) {
        self.image_replies.lock().unwrap().push_back(reply);
    }

    fn json_prompts(&self) -> Vec<String> {
        self.json_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenAiProvider for ScriptedProvider {
    async fn generate_json(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GenAiError> {
        self.json_prompts.lock().unwrap().push(prompt.to_string());
        match self.json_replies.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(reason)) => Err(GenAiError::RequestFailed {
                operation: "text generation".to_string(),
                reason,
            }),
            None => panic!("unexpected generate_json call"),
        }
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Vec<u8>, GenAiError> {
        match self.image_replies.lock().unwrap().pop_front() {
            Some(Ok(bytes)) => Ok(bytes),
            Some(Err(reason)) => Err(GenAiError::RequestFailed {
                operation: "image generation".to_string(),
                reason,
            }),
            None => panic!("unexpected generate_image call"),
        }
    }
}

fn questions_payload(count: usize) -> serde_json::Value {
    let questions: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "question": format!("질문 {i}"),
                "options": (0..5).map(|o| format!("q{i} 답 {o}")).collect::<Vec<_>>()
            })
        })
        .collect();
    serde_json::Value::Array(questions)
}

fn report_payload() -> serde_json::Value {
    serde_json::json!({
        "title": "용감한 몽상가",
        "strengths": "넘치는 상상력",
        "weaknesses": "약속 시간",
        "mainWeakness": "지각 대장",
        "summary": "총평입니다",
        "score": 91,
        "emoji": "🐶",
        "animal": "강아지"
    })
}

fn controller(provider: Arc<ScriptedProvider>) -> QuizController {
    let config = AppConfig {
        answer_feedback_delay: Duration::ZERO,
        ..AppConfig::default()
    };
    QuizController::new(provider, &config)
}

/// Happy path: female / 20대 / 10 questions / option 2 everywhere →
/// exactly one analysis call embedding all 10 pairs in order.
#[tokio::test]
async fn full_flow_female_twenties_option_two() {
    let provider = Arc::new(ScriptedProvider::default());
    let mut ctl = controller(provider.clone());

    provider.push_json(Ok(questions_payload(10)));
    ctl.confirm_onboarding().unwrap();
    ctl.choose_gender(Gender::Female).unwrap();
    ctl.choose_age(AgeBand::from_label("20대").unwrap()).unwrap();
    ctl.start_quiz().await.unwrap();

    assert_eq!(ctl.screen(), Screen::Quiz);
    assert_eq!(ctl.session().answers.len(), 10);
    assert_eq!(ctl.session().current_index, 0);

    provider.push_json(Ok(report_payload()));
    for _ in 0..10 {
        ctl.select_option(2).await.unwrap();
    }

    assert_eq!(ctl.screen(), Screen::Results);
    let prompts = provider.json_prompts();
    assert_eq!(prompts.len(), 2, "exactly one question + one analysis call");

    let question_prompt = &prompts[0];
    assert!(question_prompt.contains("20대"));
    assert!(question_prompt.contains("여성"));

    let analysis = &prompts[1];
    let mut last_pos = 0;
    for i in 0..10 {
        let pos = analysis
            .find(&format!("질문 {i}"))
            .unwrap_or_else(|| panic!("question {i} missing from analysis prompt"));
        assert!(pos > last_pos || i == 0, "pairs must appear in order");
        last_pos = pos;
        assert!(analysis.contains(&format!("q{i} 답 2")));
    }

    let report = ctl.session().report.as_ref().unwrap();
    assert_eq!(report.score, 91);
    assert_eq!(report.animal, "강아지");
}

/// Question generation rejects → Error with the questions-specific
/// message; Quiz is never entered.
#[tokio::test]
async fn question_rejection_never_enters_quiz() {
    let provider = Arc::new(ScriptedProvider::default());
    let mut ctl = controller(provider.clone());

    provider.push_json(Err("network unreachable".to_string()));
    ctl.confirm_onboarding().unwrap();
    ctl.choose_gender(Gender::Male).unwrap();
    ctl.choose_age(AgeBand::Thirties).unwrap();
    ctl.start_quiz().await.unwrap();

    assert_eq!(ctl.screen(), Screen::Error);
    assert!(!ctl.session().error_message.is_empty());
    assert!(ctl.session().error_message.contains("질문"));
    assert!(ctl.session().questions.is_empty());
    assert!(ctl.session().answers.is_empty());
    assert!(ctl.session().report.is_none());
}

/// Image generation failure routes back to Results, not Error; the rest of
/// the result state survives intact.
#[tokio::test]
async fn image_failure_keeps_results() {
    let provider = Arc::new(ScriptedProvider::default());
    let mut ctl = controller(provider.clone());

    provider.push_json(Ok(questions_payload(1)));
    ctl.confirm_onboarding().unwrap();
    ctl.choose_gender(Gender::Female).unwrap();
    ctl.choose_age(AgeBand::Fifties).unwrap();
    ctl.start_quiz().await.unwrap();

    provider.push_json(Ok(report_payload()));
    ctl.select_option(0).await.unwrap();
    assert_eq!(ctl.screen(), Screen::Results);

    ctl.reveal_image_prompt().unwrap();
    provider.push_image(Err("image quota".to_string()));
    ctl.accept_image().await.unwrap();

    assert_eq!(ctl.screen(), Screen::Results);
    assert!(ctl.session().report.is_some());
    assert!(ctl.session().image_data_uri.is_none());
    assert!(!ctl.session().error_message.is_empty());
}

/// Restart mid-quiz wipes the whole session and a fresh run works.
#[tokio::test]
async fn restart_then_fresh_run() {
    let provider = Arc::new(ScriptedProvider::default());
    let mut ctl = controller(provider.clone());

    provider.push_json(Ok(questions_payload(3)));
    ctl.confirm_onboarding().unwrap();
    ctl.choose_gender(Gender::Male).unwrap();
    ctl.choose_age(AgeBand::Teens).unwrap();
    ctl.start_quiz().await.unwrap();
    ctl.select_option(4).await.unwrap();

    ctl.restart();
    assert_eq!(ctl.screen(), Screen::Onboarding);
    assert!(ctl.session().questions.is_empty());
    assert_eq!(ctl.session().gender, None);

    // The flow works again from scratch after the reset.
    provider.push_json(Ok(questions_payload(2)));
    ctl.confirm_onboarding().unwrap();
    ctl.choose_gender(Gender::Female).unwrap();
    ctl.choose_age(AgeBand::SixtiesPlus).unwrap();
    ctl.start_quiz().await.unwrap();
    assert_eq!(ctl.screen(), Screen::Quiz);
    assert_eq!(ctl.session().answers.len(), 2);
}

/// A syntactically valid payload with the wrong shape is a failure.
#[tokio::test]
async fn malformed_analysis_payload_is_an_error() {
    let provider = Arc::new(ScriptedProvider::default());
    let mut ctl = controller(provider.clone());

    provider.push_json(Ok(questions_payload(1)));
    ctl.confirm_onboarding().unwrap();
    ctl.choose_gender(Gender::Male).unwrap();
    ctl.choose_age(AgeBand::Forties).unwrap();
    ctl.start_quiz().await.unwrap();

    // Missing most of the eight required fields.
    provider.push_json(Ok(serde_json::json!({"title": "???"})));
    ctl.select_option(1).await.unwrap();

    assert_eq!(ctl.screen(), Screen::Error);
    assert!(ctl.session().report.is_none());
}
