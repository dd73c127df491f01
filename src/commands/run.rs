use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use redwatch::config::Config;
use redwatch::{
    FileWatcher, Invocation, ProcessLauncher, Role, Supervisor, SupervisorEvent,
    SupervisorOptions, WatchSet, WatcherOptions,
};

use crate::cli::Cli;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;
use crate::ui::views::run::{render_run_event, render_run_header};

pub fn cmd_run(cli: &Cli) -> Result<()> {
    let project_root = std::env::current_dir().context("cannot determine working directory")?;

    let resolved = redwatch::config::resolve(&project_root, cli.config.as_deref())?;
    let mut config = resolved.config;
    if !cli.watch.is_empty() {
        config.watch.paths = cli.watch.clone();
    }

    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
    if !cli.json {
        print_config_warnings(&resolved.warnings, ui.unicode);
    }

    let role = Role::from_arg_with_peer(
        cli.role.as_deref(),
        &config.server.primary_host,
        config.server.primary_port,
    );
    let invocation = Invocation::for_role(&config.server.command, &role, config.server.replica_port)?;

    // Watch setup failures end the run before any child exists.
    let watch_set = WatchSet::resolve(&project_root, &config.watch.paths)?;
    let watching = watch_set.to_string();
    let patterns = watch_set.patterns().to_vec();
    let mut watcher = FileWatcher::start(watch_set, watcher_options(&config))?;

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    // SIGINT, SIGTERM and SIGHUP all end the loop so the child is stopped.
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("Error setting signal handler")?;

    if !cli.json {
        print!(
            "{}",
            render_run_header(
                &role.label(),
                &invocation.to_string(),
                &watching,
                ui.color,
                ui.unicode
            )
        );
    }

    let emit = |event: SupervisorEvent| emit_event(&ui, &event);
    emit(SupervisorEvent::WatchStarted {
        role: role.label(),
        command: invocation.to_string(),
        watching: patterns,
    });

    let mut supervisor = Supervisor::new(
        ProcessLauncher::new().with_working_dir(project_root.clone()),
        invocation,
        SupervisorOptions::from(&config.supervisor),
    );
    supervisor.run(&mut watcher, &running, emit);

    Ok(())
}

fn watcher_options(config: &Config) -> WatcherOptions {
    WatcherOptions {
        debounce: config.watch.debounce(),
        ignore_unchanged: config.watch.ignore_unchanged,
        ..WatcherOptions::default()
    }
}

fn emit_event(ui: &UiContext, event: &SupervisorEvent) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    let rendered = render_run_event(&timestamp, event, ui.verbose, ui.color, ui.unicode);
    if event.is_error() {
        eprint!("{rendered}");
    } else {
        print!("{rendered}");
    }
}
