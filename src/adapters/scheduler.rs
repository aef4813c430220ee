//! Windows Task Scheduler driven through the PowerShell `ScheduledTasks` cmdlets.

use crate::domain::model::TaskDefinition;
use crate::domain::ports::TaskScheduler;
use crate::utils::error::{ChoreError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

pub const DEFAULT_POWERSHELL: &str = "powershell.exe";

/// Quotes a value as a PowerShell single-quoted string literal.
pub fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn render_exists(name: &str) -> String {
    format!(
        "if (Get-ScheduledTask -TaskName {} -ErrorAction SilentlyContinue) {{ 'present' }} else {{ 'absent' }}",
        ps_quote(name)
    )
}

pub fn render_unregister(name: &str) -> String {
    format!(
        "Unregister-ScheduledTask -TaskName {} -Confirm:$false -ErrorAction Stop",
        ps_quote(name)
    )
}

pub fn render_start(name: &str) -> String {
    format!("Start-ScheduledTask -TaskName {} -ErrorAction Stop", ps_quote(name))
}

/// Builds action, trigger, settings and principal, then registers them in one call.
pub fn render_register(definition: &TaskDefinition) -> String {
    let action = &definition.action;
    let settings = &definition.settings;
    let principal = &definition.principal;

    let mut action_line = format!(
        "$action = New-ScheduledTaskAction -Execute {}",
        ps_quote(&action.execute)
    );
    if !action.arguments.is_empty() {
        action_line.push_str(&format!(" -Argument {}", ps_quote(&action.arguments)));
    }
    if !action.working_directory.is_empty() {
        action_line.push_str(&format!(
            " -WorkingDirectory {}",
            ps_quote(&action.working_directory)
        ));
    }

    let mut settings_line = "$settings = New-ScheduledTaskSettingsSet".to_string();
    for (enabled, switch) in [
        (settings.allow_start_if_on_batteries, "-AllowStartIfOnBatteries"),
        (settings.dont_stop_if_going_on_batteries, "-DontStopIfGoingOnBatteries"),
        (settings.start_when_available, "-StartWhenAvailable"),
        (settings.run_only_if_network_available, "-RunOnlyIfNetworkAvailable"),
    ] {
        if enabled {
            settings_line.push(' ');
            settings_line.push_str(switch);
        }
    }

    [
        "$ErrorActionPreference = 'Stop'".to_string(),
        action_line,
        format!(
            "$trigger = New-ScheduledTaskTrigger -Daily -At {}",
            ps_quote(&definition.trigger.daily_at.format("%H:%M").to_string())
        ),
        settings_line,
        format!(
            "$principal = New-ScheduledTaskPrincipal -UserId {} -LogonType {} -RunLevel {}",
            ps_quote(&principal.user_id),
            principal.logon_type.as_str(),
            principal.run_level.as_str()
        ),
        format!(
            "Register-ScheduledTask -TaskName {} -Description {} -Action $action -Trigger $trigger -Settings $settings -Principal $principal | Out-Null",
            ps_quote(&definition.name),
            ps_quote(&definition.description)
        ),
    ]
    .join("\n")
}

/// Runs a PowerShell script and returns its stdout.
pub async fn run_powershell(program: &str, operation: &str, script: &str) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args([
        "-NoProfile",
        "-NonInteractive",
        "-ExecutionPolicy",
        "Bypass",
        "-Command",
        script,
    ]);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("running PowerShell for '{}'", operation);

    let output = cmd.output().await.map_err(|e| ChoreError::Scheduler {
        operation: operation.to_string(),
        message: format!("failed to spawn {}: {}", program, e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(ChoreError::Scheduler {
            operation: operation.to_string(),
            message,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[derive(Debug, Clone)]
pub struct PowerShellScheduler {
    program: String,
}

impl PowerShellScheduler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PowerShellScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_POWERSHELL)
    }
}

#[async_trait]
impl TaskScheduler for PowerShellScheduler {
    async fn task_exists(&self, name: &str) -> Result<bool> {
        let out = run_powershell(&self.program, "lookup", &render_exists(name)).await?;
        Ok(out.trim() == "present")
    }

    async fn unregister(&self, name: &str) -> Result<()> {
        run_powershell(&self.program, "unregister", &render_unregister(name)).await?;
        Ok(())
    }

    async fn register(&self, definition: &TaskDefinition) -> Result<()> {
        run_powershell(&self.program, "register", &render_register(definition)).await?;
        Ok(())
    }

    async fn start(&self, name: &str) -> Result<()> {
        run_powershell(&self.program, "start", &render_start(name)).await?;
        Ok(())
    }
}
