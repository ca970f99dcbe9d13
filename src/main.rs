use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use quiz_master::{load_catalog_from_json, Catalog, QuizApp, QuizError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the quizzes from instead of the built-in ones
    #[arg(short, long, env = "QUIZ_CATALOG")]
    catalog: Option<PathBuf>,

    /// Start this quiz right away
    #[arg(short, long)]
    quiz: Option<String>,

    /// Print the available quizzes and exit
    #[arg(short, long)]
    list: bool,

    /// Write logs to this file
    #[arg(long, env = "QUIZ_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = 1000, hide = true)]
    tick_millis: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), QuizError> {
    // The terminal belongs to the UI, so logs only go to a file.
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let catalog = match &args.catalog {
        Some(path) => load_catalog_from_json(path)?,
        None => Catalog::builtin()?,
    };

    if args.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let mut quiz = QuizApp::new(catalog)
        .with_tick_period(Duration::from_millis(args.tick_millis.max(1)));
    if let Some(id) = &args.quiz {
        quiz.start(id)?;
    }

    tracing::info!("starting quiz-master");
    quiz.run().await
}

fn init_logging(path: &Path) -> Result<(), QuizError> {
    let file = File::create(path).map_err(|source| QuizError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "quiz_master=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    for quiz in catalog.quizzes() {
        println!(
            "{:<12} {:<32} {:>2} questions  {:>3} min",
            quiz.id,
            quiz.title,
            quiz.question_count(),
            quiz.minutes()
        );
    }
}
