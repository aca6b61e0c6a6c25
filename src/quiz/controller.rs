//! Quiz controller — coordinates the session record, screen transitions, and
//! the external generation calls.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{GenAiError, Result, SessionError};
use crate::genai::prompts::{self, messages};
use crate::genai::{self, GenAiProvider};
use crate::quiz::model::{AgeBand, AnswerSet, CharmReport, Gender, Question};
use crate::quiz::state::{Screen, Session};

/// Owns the session and drives every transition of the quiz flow.
///
/// All mutation happens through `&mut self` on one task, so no locking is
/// involved; the generation calls are awaited inline while the session sits
/// on the Loading screen.
pub struct QuizController {
    session: Session,
    provider: Arc<dyn GenAiProvider>,
    answer_feedback_delay: Duration,
}

impl QuizController {
    pub fn new(provider: Arc<dyn GenAiProvider>, config: &AppConfig) -> Self {
        Self {
            session: Session::new(),
            provider,
            answer_feedback_delay: config.answer_feedback_delay,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.session.screen
    }

    fn require_screen(&self, expected: Screen) -> Result<()> {
        if self.session.screen == expected {
            Ok(())
        } else {
            Err(SessionError::WrongScreen {
                expected: expected.to_string(),
                actual: self.session.screen.to_string(),
            }
            .into())
        }
    }

    /// Route a generation failure to the Error screen.
    fn fail(&mut self, message: &str, cause: &GenAiError) -> Result<()> {
        tracing::warn!("generation failed: {cause}");
        self.session.error_message = message.to_string();
        self.session.loading_message.clear();
        self.session.transition(Screen::Error)?;
        Ok(())
    }

    /// Onboarding → GenderSelect on user confirmation.
    pub fn confirm_onboarding(&mut self) -> Result<()> {
        self.require_screen(Screen::Onboarding)?;
        self.session.transition(Screen::GenderSelect)?;
        Ok(())
    }

    /// GenderSelect → AgeSelect, storing the pick.
    pub fn choose_gender(&mut self, gender: Gender) -> Result<()> {
        self.require_screen(Screen::GenderSelect)?;
        self.session.gender = Some(gender);
        self.session.transition(Screen::AgeSelect)?;
        Ok(())
    }

    /// Store (or replace) the age band. The user may change their mind any
    /// number of times before confirming.
    pub fn choose_age(&mut self, age: AgeBand) -> Result<()> {
        self.require_screen(Screen::AgeSelect)?;
        self.session.age_band = Some(age);
        Ok(())
    }

    /// AgeSelect → Loading → Quiz (or Error). Fires the question call.
    pub async fn start_quiz(&mut self) -> Result<()> {
        self.require_screen(Screen::AgeSelect)?;
        let gender = self.session.gender.ok_or(SessionError::NoGenderSelected)?;
        let age = self.session.age_band.ok_or(SessionError::NoAgeSelected)?;

        self.session.loading_message = prompts::QUESTION_LOADING_MESSAGE.to_string();
        self.session.transition(Screen::Loading)?;

        let prompt = prompts::question_prompt(gender, age);
        let outcome = self
            .provider
            .generate_json(&prompt, &prompts::question_schema())
            .await
            .and_then(Question::parse_list);

        match outcome {
            Ok(questions) => {
                self.session.answers = AnswerSet::for_questions(questions.len());
                self.session.current_index = 0;
                self.session.questions = questions;
                self.session.loading_message.clear();
                self.session.transition(Screen::Quiz)?;
                Ok(())
            }
            Err(e) => self.fail(messages::QUESTIONS_FAILED, &e),
        }
    }

    /// Record the selected option for the current question. After the visual
    /// feedback delay, advance to the next question — or, on the last one,
    /// move to Loading and fire the analysis call.
    pub async fn select_option(&mut self, option: usize) -> Result<()> {
        self.require_screen(Screen::Quiz)?;
        let index = self.session.current_index;
        self.session.answers.record(index, option)?;

        if !self.answer_feedback_delay.is_zero() {
            tokio::time::sleep(self.answer_feedback_delay).await;
        }

        if index + 1 < self.session.questions.len() {
            self.session.current_index = index + 1;
            Ok(())
        } else {
            self.analyze().await
        }
    }

    /// Quiz → Loading → Results (or Error). Fires the analysis call with a
    /// prompt embedding every question/answer pair.
    async fn analyze(&mut self) -> Result<()> {
        let gender = self.session.gender.ok_or(SessionError::NoGenderSelected)?;
        let age = self.session.age_band.ok_or(SessionError::NoAgeSelected)?;

        self.session.loading_message = prompts::analysis_loading_message().to_string();
        self.session.transition(Screen::Loading)?;

        let prompt = prompts::analysis_prompt(
            gender,
            age,
            &self.session.questions,
            &self.session.answers,
        );
        let outcome = self
            .provider
            .generate_json(&prompt, &prompts::report_schema())
            .await
            .and_then(|value| {
                serde_json::from_value::<CharmReport>(value).map_err(GenAiError::from)
            });

        match outcome {
            Ok(report) => {
                self.session.report = Some(report);
                self.session.loading_message.clear();
                self.session.transition(Screen::Results)?;
                Ok(())
            }
            Err(e) => self.fail(messages::ANALYSIS_FAILED, &e),
        }
    }

    /// Show the image offer (called by the front end after the results dwell
    /// elapses without navigation). A no-op once the offer has been answered.
    pub fn reveal_image_prompt(&mut self) -> Result<()> {
        self.require_screen(Screen::Results)?;
        if !self.session.image_prompt_answered {
            self.session.image_prompt_visible = true;
        }
        Ok(())
    }

    /// Decline the image offer; the restart control takes its place.
    pub fn decline_image(&mut self) -> Result<()> {
        self.require_screen(Screen::Results)?;
        self.session.image_prompt_visible = false;
        self.session.image_prompt_answered = true;
        Ok(())
    }

    /// Accept the image offer: Results → Loading → ImageResult, or back to
    /// Results with a message on failure.
    pub async fn accept_image(&mut self) -> Result<()> {
        self.require_screen(Screen::Results)?;
        let report = self.session.report.clone().ok_or(SessionError::NoReport)?;
        let gender = self.session.gender.ok_or(SessionError::NoGenderSelected)?;
        let age = self.session.age_band.ok_or(SessionError::NoAgeSelected)?;

        self.session.image_prompt_visible = false;
        self.session.image_prompt_answered = true;
        self.session.loading_message = prompts::image_loading_message().to_string();
        self.session.transition(Screen::Loading)?;

        let prompt = prompts::image_prompt(&report, gender, age);
        match self.provider.generate_image(&prompt).await {
            Ok(bytes) => {
                self.session.image_data_uri = Some(genai::png_data_uri(&bytes));
                self.session.loading_message.clear();
                self.session.transition(Screen::ImageResult)?;
                Ok(())
            }
            Err(e) => {
                // Image failure is not terminal: surface the message and
                // return to the results screen.
                tracing::warn!("image generation failed: {e}");
                self.session.error_message = messages::IMAGE_FAILED.to_string();
                self.session.loading_message.clear();
                self.session.transition(Screen::Results)?;
                Ok(())
            }
        }
    }

    /// Return every field to its initial value and go back to Onboarding.
    ///
    /// Valid from any screen. A restart can only run once no generation call
    /// is borrowing the controller, so a late resolution from a prior run can
    /// never touch the reset state — dropping the in-flight future is how
    /// stale resolutions are ignored.
    pub fn restart(&mut self) {
        self.session.reset();
    }
}
