use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{DEFAULT_SECONDS_PER_QUESTION, QuizSettings};
use services::{Clock, QuizLoopService};
use storage::{BundledQuestions, JsonQuestionFile, QuestionSource};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const APP_NAME: &str = "Sentence Construction";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeconds { raw: String },
    InvalidQuestionsPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeconds { raw } => write!(f, "invalid --seconds value: {raw}"),
            ArgsError::InvalidQuestionsPath { raw } => {
                write!(f, "invalid --questions value: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn app_name(&self) -> String {
        APP_NAME.to_string()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Debug)]
struct Args {
    questions: Option<PathBuf>,
    seconds: u32,
    shuffle: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <path>] [--seconds <n>] [--shuffle]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  bundled sample questions");
    eprintln!("  --seconds {DEFAULT_SECONDS_PER_QUESTION}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS_PATH, QUIZ_SECONDS_PER_QUESTION, QUIZ_SHUFFLE=1");
    eprintln!("  RUST_LOG (default: info)");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut questions = std::env::var("QUIZ_QUESTIONS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut seconds = match std::env::var("QUIZ_SECONDS_PER_QUESTION") {
            Ok(raw) => parse_seconds(raw)?,
            Err(_) => DEFAULT_SECONDS_PER_QUESTION,
        };
        let mut shuffle = std::env::var("QUIZ_SHUFFLE")
            .ok()
            .is_some_and(|value| is_truthy(&value));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidQuestionsPath { raw: value });
                    }
                    questions = Some(PathBuf::from(value));
                }
                "--seconds" => {
                    seconds = parse_seconds(require_value(args, "--seconds")?)?;
                }
                "--shuffle" => shuffle = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            questions,
            seconds,
            shuffle,
        })
    }
}

fn parse_seconds(raw: String) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeconds { raw })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let settings = QuizSettings::new(parsed.seconds).map_err(quiz_core::Error::from)?;
    let source: Arc<dyn QuestionSource> = match parsed.questions {
        Some(path) => {
            let file = JsonQuestionFile::new(path);
            tracing::info!(path = %file.path().display(), "loading questions from file");
            Arc::new(file)
        }
        None => {
            tracing::info!("using bundled sample questions");
            Arc::new(BundledQuestions)
        }
    };

    let quiz_loop = Arc::new(
        QuizLoopService::new(Clock::default(), source)
            .with_settings(settings)
            .with_shuffle(parsed.shuffle),
    );
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(APP_NAME)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(ToString::to_string);
        Args::parse(&mut iter)
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["--questions", "q.json", "--seconds", "45", "--shuffle"]).unwrap();
        assert_eq!(args.questions, Some(PathBuf::from("q.json")));
        assert_eq!(args.seconds, 45);
        assert!(args.shuffle);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse(&["--seconds", "soon"]),
            Err(ArgsError::InvalidSeconds { .. })
        ));
        assert!(matches!(
            parse(&["--seconds"]),
            Err(ArgsError::MissingValue { flag: "--seconds" })
        ));
        assert!(matches!(
            parse(&["--questions", "  "]),
            Err(ArgsError::InvalidQuestionsPath { .. })
        ));
        assert!(matches!(parse(&["--deck"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
