//! Terminal front end — renders each screen and maps key input to
//! controller operations.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::config::AppConfig;
use crate::error::Result;
use crate::genai::prompts;
use crate::quiz::QuizController;
use crate::quiz::model::{AgeBand, Gender};
use crate::quiz::state::Screen;

/// Where the portrait data URI is written for viewing.
const PORTRAIT_PATH: &str = "animal-portrait.uri.txt";

/// Stdin/stdout front end for the quiz.
pub struct Ui {
    controller: QuizController,
    image_prompt_delay: Duration,
}

enum Flow {
    Continue,
    Quit,
}

impl Ui {
    pub fn new(controller: QuizController, config: &AppConfig) -> Self {
        Self {
            controller,
            image_prompt_delay: config.image_prompt_delay,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            let flow = match self.controller.screen() {
                Screen::Onboarding => self.onboarding(&mut lines).await?,
                Screen::GenderSelect => self.gender_select(&mut lines).await?,
                Screen::AgeSelect => self.age_select(&mut lines).await?,
                Screen::Quiz => self.quiz(&mut lines).await?,
                Screen::Results => self.results(&mut lines).await?,
                Screen::ImageResult => self.image_result(&mut lines).await?,
                Screen::Error => self.error(&mut lines).await?,
                // The controller never parks on Loading between operations.
                Screen::Loading => Flow::Quit,
            };
            if matches!(flow, Flow::Quit) {
                break;
            }
        }
        Ok(())
    }

    async fn onboarding(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<Flow> {
        println!("\n당신의 매력도는 몇점?");
        println!("=== 네온 러브 테스트 ===");
        println!("10가지 질문으로 당신의 숨겨진 연애 매력을 알려드려요.");
        println!("주의: 이 테스트는 재미를 위한 것이며, 과학적인 근거는 없습니다.\n");
        eprint!("[Enter] 테스트 시작 (q 종료) > ");

        match lines.next_line().await? {
            None => Ok(Flow::Quit),
            Some(line) if line.trim() == "q" => Ok(Flow::Quit),
            Some(_) => {
                self.controller.confirm_onboarding()?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn gender_select(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<Flow> {
        println!("\n당신의 성별은?");
        println!("  1) 남성");
        println!("  2) 여성");
        eprint!("> ");

        match lines.next_line().await? {
            None => Ok(Flow::Quit),
            Some(line) => {
                match line.trim() {
                    "1" => self.controller.choose_gender(Gender::Male)?,
                    "2" => self.controller.choose_gender(Gender::Female)?,
                    "q" => return Ok(Flow::Quit),
                    other => eprintln!("1 또는 2를 입력해 주세요 ({other:?})"),
                }
                Ok(Flow::Continue)
            }
        }
    }

    async fn age_select(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<Flow> {
        let session = self.controller.session();
        println!("\n당신의 나이대는?");
        if let Some(gender) = session.gender {
            println!("  선택: {}", gender.label_ko());
        }
        for (i, band) in AgeBand::ALL.iter().enumerate() {
            let marker = if session.age_band == Some(*band) { "●" } else { " " };
            println!("  {} {}) {}", marker, i + 1, band.label());
        }
        eprint!("번호 선택, [Enter] 퀴즈 시작하기 > ");

        match lines.next_line().await? {
            None => Ok(Flow::Quit),
            Some(line) => {
                let input = line.trim();
                if input == "q" {
                    return Ok(Flow::Quit);
                }
                if input.is_empty() {
                    if self.controller.session().age_band.is_none() {
                        eprintln!("나이대를 먼저 선택해 주세요.");
                        return Ok(Flow::Continue);
                    }
                    eprintln!("⏳ {}", prompts::QUESTION_LOADING_MESSAGE);
                    self.controller.start_quiz().await?;
                    return Ok(Flow::Continue);
                }
                match input.parse::<usize>().ok().and_then(|n| {
                    AgeBand::ALL.get(n.wrapping_sub(1)).copied()
                }) {
                    Some(band) => self.controller.choose_age(band)?,
                    None => eprintln!("1부터 6 사이의 번호를 입력해 주세요."),
                }
                Ok(Flow::Continue)
            }
        }
    }

    async fn quiz(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<Flow> {
        let session = self.controller.session();
        let total = session.questions.len();
        let index = session.current_index;
        let Some(question) = session.current_question() else {
            return Ok(Flow::Quit);
        };

        println!("\n질문 {} / {}", index + 1, total);
        println!("{}\n", question.text);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }
        eprint!("> ");

        match lines.next_line().await? {
            None => Ok(Flow::Quit),
            Some(line) => {
                let input = line.trim();
                if input == "q" {
                    return Ok(Flow::Quit);
                }
                let choice = input
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=question.options.len()).contains(n));
                match choice {
                    Some(n) => {
                        if index + 1 == total {
                            eprintln!("⏳ {}", prompts::analysis_loading_message());
                        }
                        self.controller.select_option(n - 1).await?;
                    }
                    None => eprintln!("1부터 5 사이의 번호를 입력해 주세요."),
                }
                Ok(Flow::Continue)
            }
        }
    }

    async fn results(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<Flow> {
        let session = self.controller.session();
        let Some(report) = session.report.as_ref() else {
            return Ok(Flow::Quit);
        };

        println!("\n=== 분석 결과 ===");
        println!("⭐ 당신의 장점\n{}\n", report.strengths);
        println!("🤔 당신의 단점\n{}\n", report.weaknesses);
        println!("✍️ 총평\n{}", report.summary);
        if !session.error_message.is_empty() {
            println!("\nℹ️  {}", session.error_message);
        }

        if session.image_prompt_visible {
            println!("\n이성이 당신에게 느끼는 호감도와 동물상을 확인하시겠습니까?");
            eprint!("(y/n) > ");
            return match lines.next_line().await? {
                None => Ok(Flow::Quit),
                Some(line) => {
                    match line.trim() {
                        "y" | "Y" => {
                            eprintln!("⏳ {}", prompts::image_loading_message());
                            self.controller.accept_image().await?;
                        }
                        _ => self.controller.decline_image()?,
                    }
                    Ok(Flow::Continue)
                }
            };
        }

        if session.image_prompt_answered {
            eprint!("[Enter] 다시하기 (q 종료) > ");
            return match lines.next_line().await? {
                None => Ok(Flow::Quit),
                Some(line) if line.trim() == "q" => Ok(Flow::Quit),
                Some(_) => {
                    self.controller.restart();
                    Ok(Flow::Continue)
                }
            };
        }

        // Dwell: the image offer appears after a pause with no navigation.
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    None => Ok(Flow::Quit),
                    Some(line) if line.trim() == "q" => Ok(Flow::Quit),
                    Some(_) => Ok(Flow::Continue),
                }
            }
            _ = tokio::time::sleep(self.image_prompt_delay) => {
                self.controller.reveal_image_prompt()?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn image_result(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<Flow> {
        let session = self.controller.session();
        let Some(report) = session.report.as_ref() else {
            return Ok(Flow::Quit);
        };

        println!("\n{}", report.emoji);
        println!("=== {} ===", report.title);
        println!("당신과 닮은 동물은 바로... {}!", report.animal);
        println!("\n이성에게 사랑받는 정도: {}점", report.score);

        if let Some(uri) = session.image_data_uri.as_deref() {
            tokio::fs::write(PORTRAIT_PATH, uri).await?;
            println!("초상화 데이터 URI 저장됨: {PORTRAIT_PATH}");
        }

        eprint!("[Enter] 다시하기 (q 종료) > ");
        match lines.next_line().await? {
            None => Ok(Flow::Quit),
            Some(line) if line.trim() == "q" => Ok(Flow::Quit),
            Some(_) => {
                self.controller.restart();
                Ok(Flow::Continue)
            }
        }
    }

    async fn error(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> Result<Flow> {
        println!("\n오류 발생");
        println!("{}", self.controller.session().error_message);
        eprint!("[Enter] 다시 시도하기 (q 종료) > ");

        match lines.next_line().await? {
            None => Ok(Flow::Quit),
            Some(line) if line.trim() == "q" => Ok(Flow::Quit),
            Some(_) => {
                self.controller.restart();
                Ok(Flow::Continue)
            }
        }
    }
}
