//! Terminal output: notices, redirects, and small formatting helpers.

use blogdeck_client::{Navigator, Notice, NoticeLevel, Notifier};
use console::{Style, style};
use serde::Serialize;

/// Prints notices to stderr, the terminal's equivalent of a toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let (label, style) = match notice.level {
            NoticeLevel::Success => ("✓", Style::new().green()),
            NoticeLevel::Info => ("i", Style::new().cyan()),
            NoticeLevel::Warning => ("!", Style::new().yellow()),
            NoticeLevel::Error => ("✗", Style::new().red()),
        };
        eprintln!("{} {}", style.apply_to(label), notice.message);
    }
}

/// Reports redirects on stderr; there is no page to move to.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect(&self, path: &str) {
        let dim = Style::new().dim();
        eprintln!("{}", dim.apply_to(format!("→ redirected to {}", path)));
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn header(title: &str) {
    let dim = Style::new().dim();
    println!("{}", style(title).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_chars {
        s
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
