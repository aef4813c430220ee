use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChoreError {
    #[error("Root directory does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("This command must be run with administrator privileges")]
    NotElevated,

    #[error("git {command} failed in {}: {message}", dir.display())]
    GitCommand {
        command: String,
        dir: PathBuf,
        message: String,
    },

    #[error("Scheduled task operation '{operation}' failed: {message}")]
    Scheduler { operation: String, message: String },

    #[error("Could not read confirmation: {message}")]
    Prompt { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ChoreError {
    /// 對應到程序的退出碼
    pub fn exit_code(&self) -> i32 {
        // every failure that reaches the caller is fatal for the run
        1
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChoreError::RootNotFound { path } => {
                format!("Directory not found: {}", path.display())
            }
            ChoreError::NotElevated => {
                "Administrator privileges are required to register scheduled tasks".to_string()
            }
            ChoreError::GitCommand { dir, message, .. } => {
                format!("git failed in {}: {}", dir.display(), message)
            }
            ChoreError::Scheduler { message, .. } => {
                format!("Failed to register scheduled task: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ChoreError::RootNotFound { .. } => "Check the --root path or the [scan].root setting",
            ChoreError::NotElevated => "Re-run from an elevated (Run as administrator) shell",
            ChoreError::GitCommand { .. } => "Make sure git is installed and on PATH",
            ChoreError::Scheduler { .. } => {
                "Verify the script path and that the Task Scheduler service is running"
            }
            ChoreError::Prompt { .. } => "Pass --start or --no-prompt to skip the confirmation",
            ChoreError::IoError(_) => "Check file permissions and available disk space",
            ChoreError::SerializationError(_) => "Report this as a bug",
            ChoreError::ConfigError { .. }
            | ChoreError::ConfigValidationError { .. }
            | ChoreError::InvalidConfigValueError { .. }
            | ChoreError::MissingConfigError { .. } => {
                "Fix the configuration file or command-line flags and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ChoreError>;
