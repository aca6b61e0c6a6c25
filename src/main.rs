use neon_quiz::config::AppConfig;
use neon_quiz::genai;
use neon_quiz::quiz::QuizController;
use neon_quiz::ui::Ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export GEMINI_API_KEY=AIza...");
        e
    })?;

    eprintln!("💘 네온 러브 테스트 v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Text model:  {}", config.text_model);
    eprintln!("   Image model: {}", config.image_model);

    let provider = genai::create_provider(&config)?;
    let controller = QuizController::new(provider, &config);

    Ui::new(controller, &config).run().await?;
    Ok(())
}
