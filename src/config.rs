use thiserror::Error;

/// Prompt printed before every read.
pub const DEFAULT_PROMPT: &str = "osh> ";
/// Number of command lines kept by the `history` builtin.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
/// Largest number of tokens a single command line may produce.
pub const DEFAULT_MAX_TOKENS: usize = 100;

/// Errors raised while validating a [`ShellConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The history must be able to hold at least one entry.
    #[error("history size must be at least 1")]
    ZeroHistoryCapacity,
    /// A command needs at least its program name.
    #[error("token limit must be at least 1")]
    ZeroTokenLimit,
}

/// Tunables of an interactive session.
///
/// Everything here is fixed at startup; the interpreter never mutates its config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Text written before each line is read.
    pub prompt: String,
    /// Capacity of the history ring buffer.
    pub history_capacity: usize,
    /// Maximum tokens accepted per line; longer lines are rejected.
    pub max_tokens: usize,
}

impl ShellConfig {
    /// Build a config and check it in one go.
    pub fn new(
        prompt: impl Into<String>,
        history_capacity: usize,
        max_tokens: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            prompt: prompt.into(),
            history_capacity,
            max_tokens,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ZeroTokenLimit);
        }
        Ok(())
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}
