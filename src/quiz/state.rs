//! Screen state machine and the session state record.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::quiz::model::{AgeBand, AnswerSet, CharmReport, Gender, Question};

/// The screens of the quiz flow.
///
/// Progresses Onboarding → GenderSelect → AgeSelect → Quiz → Loading →
/// Results → ImageResult, with Error reachable from Loading and restart
/// returning to Onboarding from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Onboarding,
    GenderSelect,
    AgeSelect,
    Quiz,
    Loading,
    Results,
    ImageResult,
    Error,
}

impl Screen {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Restart (any screen → Onboarding) is always allowed. Loading fans out
    /// to Quiz, Results, ImageResult, or Error depending on which call was in
    /// flight and whether it succeeded; an image failure also falls back from
    /// Loading to Results.
    pub fn can_transition_to(&self, target: Screen) -> bool {
        use Screen::*;
        matches!(
            (self, target),
            (_, Onboarding)
                | (Onboarding, GenderSelect)
                | (GenderSelect, AgeSelect)
                | (AgeSelect, Loading)
                | (Loading, Quiz)
                | (Loading, Results)
                | (Loading, ImageResult)
                | (Loading, Error)
                | (Quiz, Loading)
                | (Results, Loading)
        )
    }

    /// Whether this screen waits on an external call (no interactive controls).
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::Onboarding
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Onboarding => "onboarding",
            Self::GenderSelect => "gender_select",
            Self::AgeSelect => "age_select",
            Self::Quiz => "quiz",
            Self::Loading => "loading",
            Self::Results => "results",
            Self::ImageResult => "image_result",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// The full set of fields the controller holds for one run of the quiz.
///
/// All fields reset together on restart.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Current screen.
    pub screen: Screen,
    /// Chosen gender, once picked.
    pub gender: Option<Gender>,
    /// Chosen age band; re-selectable any number of times before the quiz.
    pub age_band: Option<AgeBand>,
    /// Generated questions. Empty until the question call succeeds.
    pub questions: Vec<Question>,
    /// Per-question selected options, same length as `questions`.
    pub answers: AnswerSet,
    /// Index of the question currently shown.
    pub current_index: usize,
    /// Analysis result, once received.
    pub report: Option<CharmReport>,
    /// Generated portrait as a `data:image/png;base64,…` URI.
    pub image_data_uri: Option<String>,
    /// Cosmetic message shown while a call is in flight.
    pub loading_message: String,
    /// User-facing message for the Error screen (or an image-failure note on
    /// Results).
    pub error_message: String,
    /// Whether the delayed image offer is currently showing.
    pub image_prompt_visible: bool,
    /// Whether the user has answered the image offer (either way).
    pub image_prompt_answered: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `target`, rejecting transitions the flow does not allow.
    pub fn transition(&mut self, target: Screen) -> Result<(), SessionError> {
        if !self.screen.can_transition_to(target) {
            return Err(SessionError::InvalidTransition {
                from: self.screen.to_string(),
                to: target.to_string(),
            });
        }
        self.screen = target;
        Ok(())
    }

    /// Return every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The question currently shown, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }
}
