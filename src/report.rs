use crate::render::{View, REPOSITORY_HEADING};
use colored::*;
use std::fmt::Write;

/// Formats a view as terminal text for one-shot lookups
pub fn format_view(view: &View) -> String {
    let mut out = String::new();

    if !view.status.is_empty() {
        let _ = writeln!(out, "{}", view.status.yellow());
    }

    if let Some(panel) = &view.profile {
        let _ = writeln!(out, "{}", panel.overview.bold().green());
        let _ = writeln!(out, "{}", "=".repeat(50).dimmed());
        let _ = writeln!(out, "{}", panel.name.bold());
        let _ = writeln!(out, "Avatar: {}", panel.avatar.src.dimmed());
        if let Some(location) = &panel.location {
            let _ = writeln!(out, "📍 {}", location);
        }
        if let Some(website) = &panel.website {
            let _ = writeln!(out, "🔗 {}", website.href.underline().blue());
        }
        let stats: Vec<String> = panel
            .stats
            .iter()
            .map(|stat| format!("{} {}", stat.label, stat.value.bold()))
            .collect();
        let _ = writeln!(out, "{}", stats.join("  |  "));
    }

    if view.heading_visible {
        let _ = writeln!(out, "\n{}", REPOSITORY_HEADING.bold());
    }

    for repo in &view.repositories {
        let _ = writeln!(
            out,
            "  {} ({})\n    {}",
            repo.link.text.cyan(),
            repo.language,
            repo.link.href.dimmed()
        );
    }

    out
}

pub fn print_view(view: &View) {
    print!("{}", format_view(view));
}
