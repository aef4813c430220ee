mod common;

use common::{FixedPrivilege, InMemoryScheduler, ScriptedConfirm};
use repo_chores::config::toml_config::TaskConfig;
use repo_chores::domain::model::TaskDefinition;
use repo_chores::{ChoreError, StartPolicy, TaskRegistrar};

fn definition() -> TaskDefinition {
    TaskConfig {
        user_id: Some("CORP\\ops".to_string()),
        ..TaskConfig::default()
    }
    .to_definition()
    .unwrap()
}

#[tokio::test]
async fn test_registering_twice_leaves_one_task() {
    let scheduler = InMemoryScheduler::default();
    let registrar = TaskRegistrar::new(
        scheduler.clone(),
        FixedPrivilege(true),
        ScriptedConfirm::new(false),
    );

    let first = registrar
        .register(&definition(), StartPolicy::Never)
        .await
        .unwrap();
    let second = registrar
        .register(&definition(), StartPolicy::Never)
        .await
        .unwrap();

    assert!(!first.replaced_existing);
    assert!(second.replaced_existing);
    assert_eq!(scheduler.task_count("TrafficStats"), 1);
    assert_eq!(scheduler.tasks.lock().unwrap().len(), 1);
    assert_eq!(
        scheduler.operations(),
        vec!["exists", "register", "exists", "unregister", "register"]
    );
}

#[tokio::test]
async fn test_not_elevated_touches_nothing() {
    let scheduler = InMemoryScheduler::default();
    let registrar = TaskRegistrar::new(
        scheduler.clone(),
        FixedPrivilege(false),
        ScriptedConfirm::new(true),
    );

    let err = registrar
        .register(&definition(), StartPolicy::Always)
        .await
        .unwrap_err();

    assert!(matches!(err, ChoreError::NotElevated));
    assert_eq!(err.exit_code(), 1);
    assert!(scheduler.operations().is_empty());
}

#[tokio::test]
async fn test_start_policies() {
    let scheduler = InMemoryScheduler::default();
    let confirm = ScriptedConfirm::new(true);
    let registrar = TaskRegistrar::new(scheduler.clone(), FixedPrivilege(true), confirm.clone());

    let outcome = registrar.register(&definition(), StartPolicy::Ask).await.unwrap();
    assert!(outcome.started);
    assert_eq!(confirm.times_asked(), 1);

    let outcome = registrar
        .register(&definition(), StartPolicy::Always)
        .await
        .unwrap();
    assert!(outcome.started);
    assert_eq!(confirm.times_asked(), 1);

    let outcome = registrar
        .register(&definition(), StartPolicy::Never)
        .await
        .unwrap();
    assert!(!outcome.started);

    assert_eq!(
        *scheduler.started.lock().unwrap(),
        vec!["TrafficStats".to_string(), "TrafficStats".to_string()]
    );
}

#[tokio::test]
async fn test_declined_prompt_does_not_start() {
    let scheduler = InMemoryScheduler::default();
    let registrar = TaskRegistrar::new(
        scheduler.clone(),
        FixedPrivilege(true),
        ScriptedConfirm::new(false),
    );

    let outcome = registrar.register(&definition(), StartPolicy::Ask).await.unwrap();

    assert!(!outcome.started);
    assert!(scheduler.started.lock().unwrap().is_empty());
    assert_eq!(scheduler.task_count("TrafficStats"), 1);
}

#[tokio::test]
async fn test_scheduler_failure_keeps_underlying_message() {
    let scheduler = InMemoryScheduler {
        fail_register: Some("Access is denied.".to_string()),
        ..Default::default()
    };
    let registrar = TaskRegistrar::new(scheduler.clone(), FixedPrivilege(true), ScriptedConfirm::new(true));

    let err = registrar
        .register(&definition(), StartPolicy::Always)
        .await
        .unwrap_err();

    assert!(err.user_friendly_message().contains("Access is denied."));
    assert_eq!(err.exit_code(), 1);
    assert!(!scheduler.operations().contains(&"start".to_string()));
}

#[tokio::test]
async fn test_definition_carries_four_parts() {
    let definition = definition();

    assert_eq!(definition.action.execute, "powershell.exe");
    assert!(definition.action.arguments.contains("traffic_stats.ps1"));
    assert_eq!(definition.action.working_directory, "C:\\Scripts");
    assert_eq!(definition.trigger.daily_at.format("%H:%M").to_string(), "09:00");
    assert!(definition.settings.allow_start_if_on_batteries);
    assert_eq!(definition.principal.user_id, "CORP\\ops");
}

#[tokio::test]
async fn test_dry_run_needs_no_elevation_and_touches_nothing() {
    let scheduler = InMemoryScheduler::default();
    let confirm = ScriptedConfirm::new(true);
    let registrar = TaskRegistrar::new(scheduler.clone(), FixedPrivilege(false), confirm.clone());

    let script = registrar.dry_run(&definition());

    assert!(script.contains(
        "Unregister-ScheduledTask -TaskName 'TrafficStats' -Confirm:$false -ErrorAction Stop"
    ));
    assert!(script.contains("New-ScheduledTaskTrigger -Daily -At '09:00'"));
    assert!(script.contains("Register-ScheduledTask -TaskName 'TrafficStats'"));
    assert!(scheduler.operations().is_empty());
    assert_eq!(confirm.times_asked(), 0);
}
