use clap::Parser;
use repo_chores::config::cli::{BranchesArgs, Command, RecentArgs, ScheduleArgs};
use repo_chores::core::branches::render_branch_report;
use repo_chores::core::recent_commits::render_scan_report;
use repo_chores::utils::logger;
use repo_chores::{
    BranchLister, CliConfig, PowerShellScheduler, RecentCommitScanner, Result, StartPolicy,
    StdinConfirm, SystemGit, SystemPrivilege, TaskRegistrar, TomlConfig,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_from_env(config.verbose);

    tracing::info!("Starting repo-chores");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!("❌ {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    // 載入配置；各子命令只驗證自己用到的區段
    let settings = TomlConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Recent(args) => run_recent(&settings, args).await,
        Command::Branches(args) => run_branches(&settings, args).await,
        Command::Schedule(args) => run_schedule(&settings, args).await,
    }
}

async fn run_recent(settings: &TomlConfig, args: RecentArgs) -> Result<()> {
    let (root, hours) = settings.scan_settings(args.root.as_deref(), args.hours)?;

    tracing::info!("🔍 Scanning {} for commits in the past {} hours", root.display(), hours);

    let scanner = RecentCommitScanner::new(SystemGit::new(), hours);
    let report = scanner.scan(&root).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_scan_report(&report));
    }
    Ok(())
}

async fn run_branches(settings: &TomlConfig, args: BranchesArgs) -> Result<()> {
    let (root, _) = settings.scan_settings(args.root.as_deref(), None)?;
    tracing::info!("🌿 Listing branches under {}", root.display());

    let lister = BranchLister::new(SystemGit::new());
    let report = lister.list(&root).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_branch_report(&report));
    }
    Ok(())
}

async fn run_schedule(settings: &TomlConfig, args: ScheduleArgs) -> Result<()> {
    let registrar = TaskRegistrar::new(
        PowerShellScheduler::default(),
        SystemPrivilege,
        StdinConfirm,
    );

    if args.dry_run {
        let definition = settings.task.to_dry_run_definition()?;
        print!("{}", registrar.dry_run(&definition));
        return Ok(());
    }

    let definition = settings.task.to_definition()?;
    let outcome = registrar
        .register(&definition, StartPolicy::from_flags(args.start, args.no_prompt))
        .await?;

    if outcome.replaced_existing {
        println!("♻️ Replaced existing task '{}'", definition.name);
    }
    println!(
        "✅ Task '{}' registered to run daily at {}",
        definition.name,
        definition.trigger.daily_at.format("%H:%M")
    );
    if outcome.started {
        println!("▶️ Task '{}' started", definition.name);
    }
    Ok(())
}
