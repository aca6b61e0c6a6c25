//! Prompt builders, response schemas, and the cosmetic loading/error texts.

use rand::seq::SliceRandom;

use crate::quiz::model::{AgeBand, AnswerSet, CharmReport, Gender, Question};

/// Shown while the question call is in flight.
pub const QUESTION_LOADING_MESSAGE: &str = "당신을 위한 질문을 만들고 있어요...";

/// Ad-flavored filler shown while the analysis call is in flight. Which one
/// appears is random and has no semantic effect.
pub const ANALYSIS_LOADING_MESSAGES: [&str; 3] = [
    "AI가 당신의 매력을 분석하는 중... 이 시간은 우주적 지혜와 (가상의) 광고주가 함께 제공합니다! 🚀",
    "결과를 계산하는 중... 잠깐! 이 멋진 (상상속의) 광고 보고 가실게요! 😉",
    "당신의 미래를 예측하고 있습니다... 잠시 후 가상의 광고가 끝나면 결과가 표시됩니다. 채널 고정! 📺",
];

/// Filler for the image call, same deal.
pub const IMAGE_LOADING_MESSAGES: [&str; 3] = [
    "당신의 영혼 동물을 화폭에 담는 중... 광고주가 물감을 협찬했습니다. (아마도) 🎨",
    "AI 화가가 초상화를 그리고 있어요. 이 광고가 끝나면 멋진 작품이 탄생할 거예요! 🖼️",
    "신비한 동물사전에서 당신과 닮은 동물을 찾는 중... (광고주의 도움으로 더 빨리 찾고 있습니다.)",
];

pub fn analysis_loading_message() -> &'static str {
    ANALYSIS_LOADING_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(ANALYSIS_LOADING_MESSAGES[0])
}

pub fn image_loading_message() -> &'static str {
    IMAGE_LOADING_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(IMAGE_LOADING_MESSAGES[0])
}

/// User-facing failure messages, one per generation step.
pub mod messages {
    pub const QUESTIONS_FAILED: &str =
        "질문을 생성하는 데 실패했습니다. 잠시 후 다시 시도해 주세요.";
    pub const ANALYSIS_FAILED: &str =
        "결과를 분석하는 데 실패했습니다. 잠시 후 다시 시도해 주세요.";
    pub const IMAGE_FAILED: &str =
        "동물 이미지를 생성하는 데 실패했습니다. 결과 페이지로 돌아갑니다.";
}

/// Instruction for the question-generation call.
pub fn question_prompt(gender: Gender, age: AgeBand) -> String {
    format!(
        "당신은 심리학 박사입니다. {} {}의 연애 스타일에 맞춰진, 그들의 공감을 살 수 있는 \
         10개의 짧은 객관식 질문을 만들어 주세요. 질문은 해당 연령대와 성별의 관심사와 고민을 \
         현실적으로 반영해야 합니다. 각 질문에는 5개의 선택지가 있어야 합니다. 질문은 한국어로 \
         하고, JSON 형식의 문자열 배열로 반환해 주세요. 각 객체는 \"question\"과 5개의 문자열을 \
         담은 \"options\" 배열을 포함해야 합니다. \
         예: [{{\"question\": \"...\", \"options\": [\"...\", \"...\", \"...\",\"...\",\"...\"]}}, ...]",
        age.label(),
        gender.label_ko()
    )
}

/// Response schema for the question call: array of {question, options}.
pub fn question_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["question", "options"]
        }
    })
}

/// Instruction for the analysis call, embedding every question text and the
/// selected option text for each, in order.
pub fn analysis_prompt(
    gender: Gender,
    age: AgeBand,
    questions: &[Question],
    answers: &AnswerSet,
) -> String {
    let qa_pairs = questions
        .iter()
        .enumerate()
        .filter_map(|(i, q)| {
            let option = answers.get(i).and_then(|a| q.options.get(a))?;
            Some(format!("질문: {}\n선택한 답변: {}", q.text, option))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "당신은 유머러스하고 재치있는 심리학 박사이자, 때로는 뼈아픈 조언을 하는 코미디언입니다. \
         {} {} 사용자가 다음 질문에 이렇게 답했습니다:\n\n{}\n\n\
         이 답변들을 바탕으로, 사용자의 연애 매력을 분석해 주세요. 분석 내용은 다음과 같은 JSON \
         형식으로 반환해야 합니다:\n\
         - \"title\": 사용자의 성격 유형에 대한 재치있는 제목\n\
         - \"strengths\": 장점을 매우 유머러스하고 과장되게 칭찬하는 내용 (100자 내외)\n\
         - \"weaknesses\": 단점을 코미디언이 청중에게 말하듯, 웃기면서도 정곡을 찌르는 말투로 \
         지적하는 내용. 예를 들어, '그렇게 해서 연애를 할 수 있겠어요?' 같은 느낌으로 작성 (100자 내외)\n\
         - \"mainWeakness\": 단점의 핵심을 나타내는 한두 단어의 키워드 (예: '결정장애', '짠돌이 기질')\n\
         - \"summary\": 전체적인 연애 스타일에 대한 코믹하고 유쾌한 총평 (300자 내외)\n\
         - \"score\": '이성에게 사랑받는 정도'를 100점 만점의 점수로 평가\n\
         - \"emoji\": 사용자의 분위기를 나타내는 이모지 하나\n\
         - \"animal\": 사용자의 성격과 가장 닮은 동물 하나\n\n\
         전체 결과를 {{\"title\": \"...\", \"strengths\": \"...\", \"weaknesses\": \"...\", \
         \"mainWeakness\": \"...\", \"summary\": \"...\", \"score\": ..., \"emoji\": \"...\", \
         \"animal\": \"...\"}} 형식의 JSON 객체로 반환해 주세요.",
        age.label(),
        gender.label_ko(),
        qa_pairs
    )
}

/// Response schema for the analysis call: object with 8 named fields.
pub fn report_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "strengths": { "type": "STRING" },
            "weaknesses": { "type": "STRING" },
            "mainWeakness": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "score": { "type": "INTEGER" },
            "emoji": { "type": "STRING" },
            "animal": { "type": "STRING" }
        },
        "required": [
            "title", "strengths", "weaknesses", "mainWeakness",
            "summary", "score", "emoji", "animal"
        ]
    })
}

/// Scene description for the portrait image. The art style depends on the
/// user's demographics, matching the look each group responds to best.
pub fn image_prompt(report: &CharmReport, gender: Gender, age: AgeBand) -> String {
    let style = match gender {
        Gender::Male => {
            if age.is_forty_or_older() {
                "in a dynamic and expressive Korean webtoon art style"
            } else {
                "in a bold and action-packed American comic book art style"
            }
        }
        Gender::Female => {
            if age.is_forty_or_older() {
                "in a beautiful and gentle Studio Ghibli animation style"
            } else {
                "in a cute and expressive Pixar/Dreamworks 3D animation style"
            }
        }
    };

    format!(
        "A full body portrait of a charismatic and funny {} character, \
         with a friendly and expressive face. {}.",
        report.animal, style
    )
}
