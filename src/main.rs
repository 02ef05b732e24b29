use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use pwd_guess::{
    report, DictionaryLoadError, EvaluationError, Evaluator, EvaluatorConfig, HashingError,
    HashingService, ReferenceData, Score,
};

/// Evaluated when no password is given on the command line or stdin.
const SAMPLE_PASSWORDS: [&str; 8] = [
    "abc",
    "123456",
    "Pass@123",
    "Admin",
    "Shrut@298",
    "123@abc",
    "1234@acbd",
    "Shrut,jain.com@298",
];

const HASH_PREVIEW_LEN: usize = 20;

/// Password guessability estimator.
#[derive(Debug, Parser)]
#[command(
    name = "pwd-guess",
    author,
    version,
    about = "Estimate how many guesses a password takes and check it against a composition policy"
)]
struct Cli {
    /// Passwords to evaluate (built-in samples when none are given).
    #[arg(value_name = "PASSWORD")]
    passwords: Vec<String>,

    /// Also read passwords from stdin, one per line.
    #[arg(long)]
    stdin: bool,

    /// Hash each password with Argon2id and log a preview at debug level.
    #[arg(long)]
    hash: bool,

    /// Load every *.txt file in DIR as a ranked dictionary.
    #[arg(long, value_name = "DIR")]
    dictionary_dir: Option<PathBuf>,

    /// Minimum score (0-4) for a password to pass.
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=4))]
    min_score: Option<u8>,

    /// Reject passwords longer than this many characters.
    #[arg(long, value_name = "CHARS")]
    max_length: Option<usize>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryLoadError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error("Failed to read passwords from stdin: {0}")]
    Stdin(#[from] io::Error),
}

impl CliError {
    fn code(&self) -> u8 {
        match self {
            CliError::Dictionary(_) => 2,
            CliError::Evaluation(_) | CliError::Hashing(_) | CliError::Stdin(_) => 1,
        }
    }

    fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli, io::stdin().lock()) {
        Ok(table) => {
            print!("{}", table);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            e.exit_code()
        }
    }
}

fn run(cli: Cli, input: impl BufRead) -> Result<String, CliError> {
    let reference = match &cli.dictionary_dir {
        Some(dir) => ReferenceData::from_dir(dir)?,
        None => ReferenceData::from_env()?,
    };

    let mut config = EvaluatorConfig::from_env();
    if let Some(score) = cli.min_score.and_then(Score::new) {
        config.min_score = score;
    }
    if let Some(max_length) = cli.max_length {
        config.max_length = max_length;
    }
    let evaluator = Evaluator::new(reference, config);

    let passwords = collect_passwords(&cli, input)?;
    let hasher = cli.hash.then(HashingService::new);

    let mut results = Vec::with_capacity(passwords.len());
    for (index, password) in passwords.iter().enumerate() {
        tracing::info!("Evaluating password {} of {}", index + 1, passwords.len());
        let result = evaluator.evaluate_bytes(password)?;

        if let Some(hasher) = &hasher {
            let hash = hasher.hash(&result.password)?;
            let preview: String = hash.chars().take(HASH_PREVIEW_LEN).collect();
            tracing::debug!("Hashed preview: {}", preview);
        }
        results.push(result);
    }

    Ok(report::render_table(&results))
}

/// Raw password bytes; UTF-8 validation happens during evaluation.
///
/// `input` is only read with `--stdin`.
fn collect_passwords(cli: &Cli, mut input: impl BufRead) -> Result<Vec<Vec<u8>>, io::Error> {
    let mut passwords: Vec<Vec<u8>> = cli
        .passwords
        .iter()
        .map(|p| p.as_bytes().to_vec())
        .collect();

    if cli.stdin {
        let mut line = Vec::new();
        while input.read_until(b'\n', &mut line)? > 0 {
            while matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            passwords.push(std::mem::take(&mut line));
        }
    } else if passwords.is_empty() {
        passwords = SAMPLE_PASSWORDS
            .iter()
            .map(|p| p.as_bytes().to_vec())
            .collect();
    }
    Ok(passwords)
}
