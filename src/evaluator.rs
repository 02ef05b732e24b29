//! Password evaluator - orchestrates matching, decomposition, classification
//! and the policy check.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::classify::{classify, AttackScenario, CrackTime, CrackTimes, Score, Strength};
use crate::config::EvaluatorConfig;
use crate::error::{DictionaryLoadError, EvaluationError};
use crate::matching::{omnimatch_until, Match, MatchContext};
use crate::policy::{self, PolicyIssue};
use crate::reference::{RankedDictionary, ReferenceData};
use crate::scoring::most_guessable_match_sequence;

const USER_INPUTS_DICTIONARY: &str = "user_inputs";

/// Everything known about one evaluated password.
pub struct EvaluationResult {
    pub password: SecretString,
    /// Estimated guesses, clamped to `f64::MAX`.
    pub total_guesses: f64,
    pub guesses_log10: f64,
    pub score: Score,
    pub crack_times: CrackTimes,
    /// Violated composition rules, in rule order.
    pub policy_issues: Vec<PolicyIssue>,
    /// No policy issues and a score at or above the configured minimum.
    pub valid: bool,
    /// The decomposition behind `total_guesses`.
    pub sequence: Vec<Match>,
}

impl EvaluationResult {
    pub fn strength(&self) -> Strength {
        self.score.strength()
    }

    /// Score on a 0-100 scale.
    pub fn normalized_score(&self) -> u8 {
        self.score.normalized()
    }

    pub fn crack_time(&self, scenario: AttackScenario) -> Option<&CrackTime> {
        self.crack_times.get(&scenario)
    }
}

impl fmt::Debug for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationResult")
            .field("password", &self.password)
            .field("total_guesses", &self.total_guesses)
            .field("guesses_log10", &self.guesses_log10)
            .field("score", &self.score)
            .field("policy_issues", &self.policy_issues)
            .field("valid", &self.valid)
            .field("sequence", &self.sequence.len())
            .finish_non_exhaustive()
    }
}

impl PartialEq for EvaluationResult {
    fn eq(&self, other: &Self) -> bool {
        self.password.expose_secret() == other.password.expose_secret()
            && self.total_guesses == other.total_guesses
            && self.guesses_log10 == other.guesses_log10
            && self.score == other.score
            && self.crack_times == other.crack_times
            && self.policy_issues == other.policy_issues
            && self.valid == other.valid
            && self.sequence == other.sequence
    }
}

/// Evaluates passwords against shared reference data.
///
/// Cloning is cheap: the reference data sits behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Evaluator {
    reference: Arc<ReferenceData>,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(reference: ReferenceData, config: EvaluatorConfig) -> Self {
        Self::with_shared(Arc::new(reference), config)
    }

    pub fn with_shared(reference: Arc<ReferenceData>, config: EvaluatorConfig) -> Self {
        Self { reference, config }
    }

    /// Built-in dictionaries with the default configuration.
    pub fn builtin() -> Result<Self, DictionaryLoadError> {
        Ok(Self::new(ReferenceData::builtin()?, EvaluatorConfig::default()))
    }

    /// Reference data and configuration from the environment.
    ///
    /// See [`ReferenceData::from_env`] and [`EvaluatorConfig::from_env`].
    pub fn from_env() -> Result<Self, DictionaryLoadError> {
        Ok(Self::new(ReferenceData::from_env()?, EvaluatorConfig::from_env()))
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Evaluates a password.
    ///
    /// # Errors
    /// - [`EvaluationError::InvalidInput`] if the password contains a NUL
    ///   character
    /// - [`EvaluationError::InputTooLong`] above `config.max_length`
    ///   characters
    pub fn evaluate(&self, password: &SecretString) -> Result<EvaluationResult, EvaluationError> {
        self.run(password, &[], || true)
    }

    /// Like [`evaluate`](Self::evaluate), with extra words (user name, e-mail,
    /// site name) treated as a dictionary ranked in the given order.
    pub fn evaluate_with_user_inputs(
        &self,
        password: &SecretString,
        user_inputs: &[&str],
    ) -> Result<EvaluationResult, EvaluationError> {
        self.run(password, user_inputs, || true)
    }

    /// Evaluates raw bytes, rejecting anything that is not UTF-8.
    pub fn evaluate_bytes(&self, bytes: &[u8]) -> Result<EvaluationResult, EvaluationError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            EvaluationError::InvalidInput(format!("password is not valid UTF-8: {}", e))
        })?;
        self.evaluate(&SecretString::new(text.to_string().into()))
    }

    /// Like [`evaluate`](Self::evaluate), checking `token` before each
    /// matcher.
    ///
    /// # Errors
    /// [`EvaluationError::Cancelled`] once the token is cancelled.
    #[cfg(feature = "async")]
    pub fn evaluate_cancellable(
        &self,
        password: &SecretString,
        token: &CancellationToken,
    ) -> Result<EvaluationResult, EvaluationError> {
        self.run(password, &[], || !token.is_cancelled())
    }

    fn run(
        &self,
        password: &SecretString,
        user_inputs: &[&str],
        keep_going: impl FnMut() -> bool,
    ) -> Result<EvaluationResult, EvaluationError> {
        let pwd = password.expose_secret();
        let chars = self.check_input(pwd)?;

        let user_dictionary = (!user_inputs.is_empty())
            .then(|| RankedDictionary::from_words(USER_INPUTS_DICTIONARY, user_inputs));
        let mut ctx = MatchContext::new(&self.reference);
        if let Some(dictionary) = &user_dictionary {
            ctx = ctx.with_user_inputs(dictionary);
        }

        let Some(matches) = omnimatch_until(&ctx, &chars, keep_going) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("Evaluation cancelled");
            return Err(EvaluationError::Cancelled);
        };
        let decomposition = most_guessable_match_sequence(&chars, &matches);
        let classification = classify(decomposition.guesses, &self.config.score_thresholds);
        let policy_issues = policy::validate(password, &self.config.policy);
        let valid = policy_issues.is_empty() && classification.score >= self.config.min_score;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            length = chars.len(),
            candidates = matches.len(),
            guesses_log10 = decomposition.guesses_log10,
            score = classification.score.value(),
            valid,
            "Password evaluated"
        );

        Ok(EvaluationResult {
            password: SecretString::new(pwd.to_string().into()),
            total_guesses: decomposition.guesses,
            guesses_log10: decomposition.guesses_log10,
            score: classification.score,
            crack_times: classification.crack_times,
            policy_issues,
            valid,
            sequence: decomposition.sequence,
        })
    }

    fn check_input(&self, pwd: &str) -> Result<Vec<char>, EvaluationError> {
        if pwd.contains('\0') {
            return Err(EvaluationError::InvalidInput(
                "password contains a NUL character".to_string(),
            ));
        }
        let chars: Vec<char> = pwd.chars().collect();
        if chars.len() > self.config.max_length {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Rejecting password of {} characters (max {})",
                chars.len(),
                self.config.max_length
            );
            return Err(EvaluationError::InputTooLong {
                length: chars.len(),
                max: self.config.max_length,
            });
        }
        Ok(chars)
    }
}

/// Async version that sends the evaluation result via channel.
///
/// Nothing is sent when `token` is cancelled before or during evaluation.
#[cfg(feature = "async")]
pub async fn evaluate_tx(
    evaluator: &Evaluator,
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<Result<EvaluationResult, EvaluationError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("evaluation is about to start...");

    if token.is_cancelled() {
        return;
    }
    let result = evaluator.evaluate_cancellable(password, &token);
    if matches!(result, Err(EvaluationError::Cancelled)) {
        return;
    }

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    fn secret(password: &str) -> SecretString {
        SecretString::new(password.to_string().into())
    }

    #[tokio::test]
    async fn test_evaluate_with_cancellation() {
        let evaluator = Evaluator::builtin().expect("builtin");
        let token = CancellationToken::new();
        token.cancel();

        let result = evaluator.evaluate_cancellable(&secret("SomePassword123!"), &token);
        assert_eq!(result.unwrap_err(), EvaluationError::Cancelled);
    }

    #[tokio::test]
    async fn test_evaluate_without_cancellation() {
        let evaluator = Evaluator::builtin().expect("builtin");
        let token = CancellationToken::new();

        let result = evaluator.evaluate_cancellable(&secret("TestPass123!"), &token);
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_evaluate_tx() {
        let evaluator = Evaluator::builtin().expect("builtin");
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        evaluate_tx(&evaluator, &secret("TestPass123!"), token, tx).await;

        let result = rx.recv().await.expect("Should receive evaluation");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_evaluate_tx_cancelled_sends_nothing() {
        let evaluator = Evaluator::builtin().expect("builtin");
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();

        evaluate_tx(&evaluator, &secret("TestPass123!"), token, tx).await;

        assert!(rx.recv().await.is_none());
    }
}
