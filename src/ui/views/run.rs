use redwatch::SupervisorEvent;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_run_header(
    role: &str,
    command: &str,
    watching: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "redwatch");
    header.add("Role", role);
    header.add("Command", command);
    header.add("Watching", watching);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

/// Render one supervisor event as a timestamped line.
///
/// `verbose` 1 lists changed paths, 2 adds the full command on every start.
pub fn render_run_event(
    timestamp: &str,
    event: &SupervisorEvent,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let icon = |i: Icon| i.colored(supports_color, supports_unicode);

    match event {
        SupervisorEvent::WatchStarted { watching, .. } => format!(
            "{} {} Watching {} path(s)\n",
            prefix,
            icon(Icon::Watch),
            watching.len()
        ),
        SupervisorEvent::FilesChanged { paths } => {
            if verbose == 0 || paths.is_empty() {
                let noun = if paths.len() == 1 { "file" } else { "files" };
                return format!(
                    "{} {} {} {} changed\n",
                    prefix,
                    icon(Icon::Arrow),
                    paths.len(),
                    noun
                );
            }
            let mut out = String::new();
            for path in paths {
                out.push_str(&format!("{} {} Changed: {}\n", prefix, icon(Icon::Arrow), path));
            }
            out
        }
        SupervisorEvent::ChildStarted { pid, command } => {
            if verbose >= 2 {
                format!(
                    "{} {} Started pid {}: {}\n",
                    prefix,
                    icon(Icon::Success),
                    pid,
                    command
                )
            } else {
                format!("{} {} Started pid {}\n", prefix, icon(Icon::Success), pid)
            }
        }
        SupervisorEvent::ChildStopping { pid } => format!(
            "{} {} Stopping pid {}...\n",
            prefix,
            icon(Icon::Progress),
            pid
        ),
        SupervisorEvent::ChildStopped { pid, code } => format!(
            "{} {} Stopped pid {} ({})\n",
            prefix,
            icon(Icon::Stop),
            pid,
            describe_code(*code)
        ),
        SupervisorEvent::ChildExited { pid, code } => {
            let i = if *code == Some(0) {
                Icon::Stop
            } else {
                Icon::Warning
            };
            format!(
                "{} {} Server pid {} exited ({}); waiting for changes\n",
                prefix,
                icon(i),
                pid,
                describe_code(*code)
            )
        }
        SupervisorEvent::ChildStartFailed { message } => format!(
            "{} {} {}\n",
            prefix,
            icon(Icon::Error),
            ColoredText::error(format!("Start failed: {}", message)).render(supports_color)
        ),
        SupervisorEvent::ChildTerminationFailed { pid, message } => format!(
            "{} {} {}\n",
            prefix,
            icon(Icon::Error),
            ColoredText::error(format!("Could not stop pid {}: {}", pid, message))
                .render(supports_color)
        ),
        SupervisorEvent::Shutdown => format!("\n{} {} Stopped.\n", prefix, icon(Icon::Watch)),
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "signal".to_string(),
    }
}
