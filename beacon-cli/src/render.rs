//! Terminal rendering of a dashboard view

use beacon_core::domain::viewer::Viewer;
use beacon_core::dto::dashboard::{DashboardView, PipelineCard, TeamGroup};
use colored::*;

/// Renders the whole view, one block per team group
pub fn render_view(view: &DashboardView) -> String {
    let mut out = format!("{}\n\n", header(&view.viewer).bold());

    if view.teams.is_empty() {
        out.push_str(&format!("{}\n", "No visible pipelines.".yellow()));
        return out;
    }

    for group in &view.teams {
        out.push_str(&render_group(group));
        out.push('\n');
    }

    out
}

fn header(viewer: &Viewer) -> String {
    match viewer {
        Viewer::Anonymous => "Beacon dashboard (public)".to_string(),
        Viewer::Team(team) => format!("Beacon dashboard ({})", team),
    }
}

pub fn render_group(group: &TeamGroup) -> String {
    let title = if group.own {
        format!("{} (your team)", group.name)
    } else {
        group.name.clone()
    };

    let mut lines = vec![title.underline().to_string()];

    if group.pipelines.is_empty() {
        lines.push(format!("  {}", "no pipelines".dimmed()));
    }

    lines.extend(group.pipelines.iter().map(render_card));

    lines.join("\n") + "\n"
}

/// One line per pipeline: colored marker, name, state and annotations
pub fn render_card(card: &PipelineCard) -> String {
    let (r, g, b) = card.color.rgb();

    let mut parts = vec![format!(
        "  {} {:<24} {}",
        "■".truecolor(r, g, b),
        card.name.bold(),
        card.visual_state.as_str().truecolor(r, g, b)
    )];

    if let Some(failing_for) = &card.failing_for {
        parts.push(failing_for.red().to_string());
    }

    if !card.running_jobs.is_empty() {
        parts.push(
            format!("running: {}", card.running_jobs.join(", "))
                .cyan()
                .to_string(),
        );
    }

    if card.exposed {
        parts.push("[public]".dimmed().to_string());
    }

    parts.join("  ")
}
