use crate::core::recent_commits::{DEFAULT_WINDOW_HOURS, MAX_WINDOW_HOURS};
use crate::domain::model::{TaskAction, TaskDefinition, TaskPrincipal, TaskSettings, TaskTrigger};
use crate::utils::error::{ChoreError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "repo-chores.toml";

/// Principal shown in a dry run when the current user cannot be determined.
pub const PLACEHOLDER_USER_ID: &str = r"<DOMAIN>\<user>";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub scan: ScanConfig,
    pub task: TaskConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub root: Option<String>,
    pub window_hours: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub name: String,
    pub description: String,
    /// Daily trigger time, `HH:MM`.
    pub time: String,
    pub executable: String,
    pub script_path: String,
    pub working_directory: String,
    /// Overrides the arguments derived from `script_path`.
    pub arguments: Option<String>,
    /// `DOMAIN\user`; defaults to the current user.
    pub user_id: Option<String>,
    pub settings: TaskSettings,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            name: "TrafficStats".to_string(),
            description: "Collect daily traffic statistics".to_string(),
            time: "09:00".to_string(),
            executable: "powershell.exe".to_string(),
            script_path: r"C:\Scripts\traffic_stats.ps1".to_string(),
            working_directory: r"C:\Scripts".to_string(),
            arguments: None,
            user_id: None,
            settings: TaskSettings::default(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ChoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ChoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 載入配置：明確指定的檔案必須存在，否則嘗試預設檔案，最後使用內建預設值
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// 替換環境變數 (例如 ${SCRIPTS_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ChoreError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Root to scan: command line first, then `[scan].root`, then the working directory.
    pub fn scan_root(&self, cli_root: Option<&Path>) -> PathBuf {
        cli_root
            .map(Path::to_path_buf)
            .or_else(|| self.scan.root.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn window_hours(&self, cli_hours: Option<u32>) -> u32 {
        cli_hours
            .or(self.scan.window_hours)
            .unwrap_or(DEFAULT_WINDOW_HOURS)
    }

    /// Root and window for the git chores; only `[scan]` is validated.
    pub fn scan_settings(
        &self,
        cli_root: Option<&Path>,
        cli_hours: Option<u32>,
    ) -> Result<(PathBuf, u32)> {
        self.scan.validate()?;
        let hours = self.window_hours(cli_hours);
        validation::validate_range("--hours", hours, 1, MAX_WINDOW_HOURS)?;
        Ok((self.scan_root(cli_root), hours))
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        self.scan.validate()?;
        self.task.validate()
    }
}

impl Validate for ScanConfig {
    fn validate(&self) -> Result<()> {
        if let Some(root) = &self.root {
            validation::validate_path("scan.root", root)?;
        }
        if let Some(hours) = self.window_hours {
            validation::validate_range("scan.window_hours", hours, 1, MAX_WINDOW_HOURS)?;
        }
        Ok(())
    }
}

impl TaskConfig {
    pub fn arguments(&self) -> String {
        self.arguments.clone().unwrap_or_else(|| {
            format!(
                "-NoProfile -ExecutionPolicy Bypass -File \"{}\"",
                self.script_path
            )
        })
    }

    /// Assembles the four parts of the task. The principal comes from
    /// `user_id` or, failing that, the current user.
    pub fn to_definition(&self) -> Result<TaskDefinition> {
        self.build_definition(TaskPrincipal::current_user(), false)
    }

    /// Like [`to_definition`](Self::to_definition), but an unknown current
    /// user becomes [`PLACEHOLDER_USER_ID`] so a preview always renders.
    pub fn to_dry_run_definition(&self) -> Result<TaskDefinition> {
        self.build_definition(TaskPrincipal::current_user(), true)
    }

    fn build_definition(
        &self,
        current_user: Option<TaskPrincipal>,
        allow_placeholder: bool,
    ) -> Result<TaskDefinition> {
        self.validate()?;

        let principal = match (&self.user_id, current_user) {
            (Some(user_id), _) => TaskPrincipal::with_user(user_id),
            (None, Some(current)) => current,
            (None, None) if allow_placeholder => {
                tracing::warn!("⚠️ Current user unknown, previewing with {}", PLACEHOLDER_USER_ID);
                TaskPrincipal::with_user(PLACEHOLDER_USER_ID)
            }
            (None, None) => {
                return Err(ChoreError::MissingConfigError {
                    field: "task.user_id".to_string(),
                })
            }
        };

        Ok(TaskDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            action: TaskAction {
                execute: self.executable.clone(),
                arguments: self.arguments(),
                working_directory: self.working_directory.clone(),
            },
            trigger: TaskTrigger {
                daily_at: validation::parse_daily_time("task.time", &self.time)?,
            },
            settings: self.settings.clone(),
            principal,
        })
    }
}

impl Validate for TaskConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("task.name", &self.name)?;
        validation::validate_non_empty_string("task.executable", &self.executable)?;
        validation::validate_path("task.script_path", &self.script_path)?;
        validation::parse_daily_time("task.time", &self.time)?;
        if let Some(user_id) = &self.user_id {
            validation::validate_non_empty_string("task.user_id", user_id)?;
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
