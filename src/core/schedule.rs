use crate::adapters::scheduler::{render_register, render_unregister};
use crate::core::{Confirm, PrivilegeCheck, TaskScheduler};
use crate::domain::model::{RegistrationOutcome, TaskDefinition};
use crate::utils::error::{ChoreError, Result};

/// Whether to launch the task right after registering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPolicy {
    Always,
    Never,
    Ask,
}

impl StartPolicy {
    pub fn from_flags(start: bool, no_prompt: bool) -> Self {
        match (start, no_prompt) {
            (true, _) => StartPolicy::Always,
            (false, true) => StartPolicy::Never,
            (false, false) => StartPolicy::Ask,
        }
    }
}

/// The scripts a real registration would run, in order.
pub fn dry_run_script(definition: &TaskDefinition) -> String {
    format!(
        "# if the task already exists:\n{}\n{}\n",
        render_unregister(&definition.name),
        render_register(definition)
    )
}

/// Replaces any task of the same name, then registers the definition in one call.
pub struct TaskRegistrar<S: TaskScheduler, P: PrivilegeCheck, C: Confirm> {
    scheduler: S,
    privilege: P,
    confirm: C,
}

impl<S: TaskScheduler, P: PrivilegeCheck, C: Confirm> TaskRegistrar<S, P, C> {
    pub fn new(scheduler: S, privilege: P, confirm: C) -> Self {
        Self {
            scheduler,
            privilege,
            confirm,
        }
    }

    /// Renders the registration without checking elevation or calling the scheduler.
    pub fn dry_run(&self, definition: &TaskDefinition) -> String {
        tracing::info!("🔍 DRY RUN MODE - the scheduler will not be touched");
        dry_run_script(definition)
    }

    pub async fn register(
        &self,
        definition: &TaskDefinition,
        start: StartPolicy,
    ) -> Result<RegistrationOutcome> {
        // 沒有管理員權限就不碰排程器
        if !self.privilege.is_elevated().await? {
            return Err(ChoreError::NotElevated);
        }

        let name = definition.name.as_str();
        let replaced_existing = self.scheduler.task_exists(name).await?;
        if replaced_existing {
            tracing::info!("🗑️ Removing existing task '{}'", name);
            self.scheduler.unregister(name).await?;
        }

        tracing::info!(
            "📅 Registering task '{}' daily at {} as {}",
            name,
            definition.trigger.daily_at.format("%H:%M"),
            definition.principal.user_id
        );
        self.scheduler.register(definition).await?;

        let started = match start {
            StartPolicy::Always => true,
            StartPolicy::Never => false,
            StartPolicy::Ask => self
                .confirm
                .confirm(&format!("Start task '{}' now? [y/N] ", name))?,
        };
        if started {
            tracing::info!("▶️ Starting task '{}'", name);
            self.scheduler.start(name).await?;
        }

        Ok(RegistrationOutcome {
            replaced_existing,
            started,
        })
    }
}
