//! Quiz core — data models, the screen state machine, and the controller.

pub mod controller;
pub mod model;
pub mod state;

pub use controller::QuizController;
pub use model::{AgeBand, AnswerSet, CharmReport, Gender, OPTIONS_PER_QUESTION, Question};
pub use state::{Screen, Session};
