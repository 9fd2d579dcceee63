use std::fmt;
use std::path::PathBuf;

use storage::{BundledQuestions, JsonQuestionFile, QuestionSource};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone)]
struct Args {
    path: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut path = std::env::var("QUIZ_QUESTIONS_PATH").ok().map(PathBuf::from);

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    let value = args.next().ok_or(ArgsError::MissingValue {
                        flag: "--questions",
                    })?;
                    path = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { path })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin check_questions -- [--questions <path>]");
    eprintln!();
    eprintln!("Checks that every question has one correct answer per blank.");
    eprintln!("Without --questions the bundled sample set is checked.");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  QUIZ_QUESTIONS_PATH");
}

async fn run() -> Result<usize, Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let questions = match &args.path {
        Some(path) => JsonQuestionFile::new(path).load_questions().await?,
        None => BundledQuestions.load_questions().await?,
    };

    let mut invalid = 0;
    for question in &questions {
        if let Err(err) = question.validate() {
            eprintln!("{err}");
            invalid += 1;
        }
    }

    println!(
        "Checked {} questions: {} ok, {} malformed",
        questions.len(),
        questions.len() - invalid,
        invalid
    );
    Ok(invalid)
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
}
