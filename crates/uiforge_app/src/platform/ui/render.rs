use std::fmt::Write as _;

use chrono::{DateTime, Local, NaiveDateTime};
use uiforge_core::{AppViewModel, HistoryEntrySummary, Page, PreviewContent};
use uiforge_engine::PreviewSurface;

pub const EMPTY_STATE_TEXT: &str = "The generated component will appear here";
pub const LOADING_TEXT: &str = "Generating...";

/// Surface markup for every preview state except a mounted fragment, which
/// only ever reaches the surface through the renderer.
pub fn placeholder_markup(preview: &PreviewContent) -> Option<String> {
    match preview {
        PreviewContent::EmptyState => Some(format!(
            r#"<div class="empty-state">{EMPTY_STATE_TEXT}</div>"#
        )),
        PreviewContent::InProgress => Some(format!(r#"<div class="loading">{LOADING_TEXT}</div>"#)),
        PreviewContent::Error(message) => Some(format!(
            r#"<div class="error">Error: {}</div>"#,
            escape_html(message)
        )),
        PreviewContent::History(entries) => Some(history_markup(entries)),
        PreviewContent::Fragment(_) => None,
    }
}

fn history_markup(entries: &[HistoryEntrySummary]) -> String {
    let mut html = String::from(r#"<div class="history-container"><h3>Generation history</h3><ul>"#);
    for entry in entries {
        let _ = write!(
            html,
            r#"<li><strong>{}</strong><p>{}</p><p>Strategy: {}</p><button class="view-history-item" data-id="{}">View</button></li>"#,
            escape_html(&format_timestamp(&entry.timestamp)),
            escape_html(&entry.description),
            escape_html(&entry.strategy),
            escape_html(&entry.id),
        );
    }
    html.push_str(r#"</ul><button id="close-history">Close</button></div>"#);
    html
}

/// Local display form of a backend timestamp; unparsable input comes back
/// unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY).to_string();
    }
    // The service stores naive local ISO timestamps.
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(DISPLAY).to_string();
    }
    raw.to_string()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Text screen for the current page.
pub fn render(view: &AppViewModel, surface: &PreviewSurface) -> String {
    let mut out = String::new();
    match view.page {
        Page::Generator => render_generator(&mut out, view, surface),
        Page::StrategyEditor => render_editor(&mut out, view),
        Page::ResultView => render_result(&mut out, view, surface),
    }
    out
}

fn render_generator(out: &mut String, view: &AppViewModel, surface: &PreviewSurface) {
    let _ = writeln!(out, "== UI Forge ==");
    let _ = writeln!(out, "Strategies:");
    if view.strategies.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for option in &view.strategies {
        let marker = if option.selected { '*' } else { ' ' };
        let _ = writeln!(out, " {marker} {} [{}]", option.name, option.filename);
    }

    let details = &view.details;
    let _ = writeln!(out, "Name:                    {}", details.name);
    let _ = writeln!(out, "Abstraction level:       {}", details.abstraction_level);
    let _ = writeln!(out, "Role:                    {}", details.role);
    let _ = writeln!(out, "Format:                  {}", details.format);
    let _ = writeln!(out, "Additional requirements: {}", details.additional_requirements);
    let _ = writeln!(out, "Description: {}", view.description);

    let generate = if view.generating { "generating" } else { "ready" };
    let preview = if view.preview_enabled { "enabled" } else { "disabled" };
    let _ = writeln!(out, "Generate: {generate} | Preview: {preview}");

    if let PreviewContent::History(entries) = &view.preview {
        let _ = writeln!(out, "-- History --");
        for entry in entries {
            let _ = writeln!(
                out,
                "  [{}] {} | {} | {}",
                entry.id,
                format_timestamp(&entry.timestamp),
                entry.description,
                entry.strategy
            );
        }
        let _ = writeln!(out, "  (open <id> to view, close to dismiss)");
    } else {
        render_surface(out, surface);
    }
}

fn render_editor(out: &mut String, view: &AppViewModel) {
    let title = match &view.editing {
        Some(filename) => format!("== Edit strategy {filename} =="),
        None => "== New strategy ==".to_string(),
    };
    let _ = writeln!(out, "{title}");
    for field in uiforge_core::EditorField::ALL {
        let _ = writeln!(out, "{:<24} {}", field.key(), view.editor.get(field));
    }
}

fn render_result(out: &mut String, view: &AppViewModel, surface: &PreviewSurface) {
    let _ = writeln!(out, "== Generation result ==");
    let _ = writeln!(out, "Description: {}", view.replay.description);
    let _ = writeln!(out, "Strategy:    {}", view.replay.strategy);
    render_surface(out, surface);
}

fn render_surface(out: &mut String, surface: &PreviewSurface) {
    let _ = writeln!(out, "-- Preview --");
    if surface.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", surface.markup());
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn placeholder_states_have_markers() {
        let empty = placeholder_markup(&PreviewContent::EmptyState).unwrap();
        assert!(empty.contains("empty-state"));
        let loading = placeholder_markup(&PreviewContent::InProgress).unwrap();
        assert!(loading.contains("loading"));
        let error = placeholder_markup(&PreviewContent::Error("<quota>".into())).unwrap();
        assert_eq!(error, r#"<div class="error">Error: &lt;quota&gt;</div>"#);
        assert_eq!(placeholder_markup(&PreviewContent::Fragment("<p/>".into())), None);
    }

    #[test]
    fn history_list_is_escaped_markup() {
        let markup = placeholder_markup(&PreviewContent::History(vec![HistoryEntrySummary {
            id: "42".into(),
            timestamp: "not a time".into(),
            description: "<script>alert(1)</script>".into(),
            strategy: "minimal".into(),
        }]))
        .unwrap();
        assert!(markup.contains(r#"data-id="42""#));
        assert!(markup.contains("&lt;script&gt;"));
        assert!(markup.contains("<strong>not a time</strong>"));
        assert!(!markup.contains("<script>"));
    }

    #[test]
    fn naive_timestamps_are_reformatted() {
        assert_eq!(
            format_timestamp("2024-05-01T10:00:00.123456"),
            "2024-05-01 10:00:00"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn generator_screen_shows_placeholders() {
        let view = AppViewModel::default();
        let text = render(&view, &PreviewSurface::default());
        assert!(text.contains("No strategy selected"));
        assert!(text.contains("Preview: disabled"));
    }
}
