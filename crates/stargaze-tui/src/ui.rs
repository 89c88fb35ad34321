// UI rendering logic
use crate::{App, InputMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use stargaze_core::{PageWindow, RepoSummary, NUMBERED_PAGES};

pub fn render(frame: &mut Frame, app: &mut App) {
    let show_error = app.store.error().is_some();

    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Length(3), // Search input
    ];
    if show_error {
        constraints.push(Constraint::Length(3)); // Error banner
    }
    constraints.extend([
        Constraint::Min(5),    // Results (+ details)
        Constraint::Length(3), // Pagination bar
        Constraint::Length(1), // Status bar
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_search_input(frame, app, chunks[1]);

    let rest = if show_error {
        render_error_banner(frame, app, chunks[2]);
        &chunks[3..]
    } else {
        &chunks[2..]
    };

    // Details panel takes the right side while a repo is selected
    if app.store.selected().is_some() {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rest[0]);
        render_results_list(frame, app, content[0]);
        render_details(frame, app, content[1]);
    } else {
        render_results_list(frame, app, rest[0]);
    }

    render_pagination(frame, app, rest[1]);
    render_status_bar(frame, app, rest[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " ★ stargaze ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" GitHub repository search "),
    ];

    if !app.favorites.is_empty() {
        spans.push(Span::styled(
            format!(" {} favorite(s) ", app.favorites.len()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.input_mode == InputMode::Searching;
    let border_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::raw(app.search.text())];
    if active {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    if app.search.is_pending() {
        spans.push(Span::styled(
            format!("  (searching after {}s idle)", app.search.delay().as_secs_f32()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = if app.search.text().is_empty() && !active {
        " Github repository name (/ to type) "
    } else {
        " Github repository name "
    };

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(input, area);
}

fn render_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let message = app.store.error_message().unwrap_or_default();
    let banner = Paragraph::new(Line::from(vec![
        Span::styled("✗ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled(message, Style::default().fg(Color::Red)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Search failed (x to dismiss) "),
    );
    frame.render_widget(banner, area);
}

fn render_results_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let window = app.paginator.window();
    let total = app.store.len();

    let mut title = if total == 0 {
        " Results ".to_string()
    } else {
        let shown = app.paginator.visible(app.store.results()).len();
        let from = if shown == 0 { 0 } else { window.start + 1 };
        format!(" Results {}-{} of {} · sort: {} ", from, window.start + shown, total, app.sort)
    };
    if app.store.is_loading() {
        title.push_str("(loading…) ");
    }

    if total == 0 {
        let hint = if app.store.is_loading() {
            "Searching..."
        } else if app.last_query.is_some() {
            "No repositories found"
        } else {
            "Start typing to search GitHub"
        };
        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(hint)])
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .visible_rows()
        .into_iter()
        .map(|row| {
            let name_style = if row.is_cursor {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            };

            let line1 = Line::from(vec![
                Span::styled(
                    if row.is_favorite { "★ " } else { "☆ " },
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(row.repo.title.clone(), name_style),
                Span::raw("  "),
                Span::styled(
                    format!("by {}", row.repo.owner),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("★{}", format_number(row.repo.stars)),
                    Style::default().fg(Color::Rgb(255, 215, 0)),
                ),
            ]);

            let line2 = Line::from(vec![
                Span::raw("   "),
                Span::styled(
                    row.repo.timestamp.format("%Y-%m-%d").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(row.repo.url.clone(), Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(vec![line1, line2])
        })
        .collect();

    if items.is_empty() {
        app.list_state.select(None);
    } else {
        app.list_state.select(Some(app.cursor));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let Some(repo) = app.store.selected() else {
        return;
    };

    let paragraph = Paragraph::new(details_lines(repo, app.favorites.contains(repo.id)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Details (Esc close · o open) "),
        );
    frame.render_widget(paragraph, area);
}

fn details_lines(repo: &RepoSummary, is_favorite: bool) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{:<9}", name), label), Span::raw(value)])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            repo.full_name(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Owner", repo.owner.clone()),
        field("Stars", format_number(repo.stars)),
        field("Created", repo.timestamp.format("%Y-%m-%d %H:%M UTC").to_string()),
        field("Age", format_age(repo.timestamp)),
        field("Language", repo.language.clone().unwrap_or_else(|| "Unknown".into())),
        field("URL", repo.url.clone()),
        field("Avatar", repo.avatar.clone()),
        field("Favorite", if is_favorite { "yes ★".into() } else { "no".into() }),
    ];

    if let Some(description) = &repo.description {
        lines.push(Line::from(""));
        lines.push(Line::from(description.clone()));
    }

    lines
}

fn render_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let window = app.paginator.window();
    let button = |text: String, active: bool| {
        if active {
            Span::styled(
                text,
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(text, Style::default().fg(Color::Gray))
        }
    };

    let mut spans = vec![button(" ◀ Prev ".into(), false), Span::raw(" ")];
    for page in 1..=NUMBERED_PAGES {
        spans.push(button(format!(" {} ", page), window == PageWindow::page(page)));
        spans.push(Span::raw(" "));
    }
    spans.push(button(" Next ▶ ".into(), false));

    if window.start >= NUMBERED_PAGES * stargaze_core::PAGE_SIZE {
        spans.push(Span::styled(
            format!("  page {}", app.paginator.current_page()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.input_mode {
        InputMode::Searching => Span::styled(
            "SEARCH MODE | type to search | ESC/TAB: results | Ctrl+C: quit",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Normal => Span::raw(
            "j/k: move | ENTER: details | f: favorite | h/l: prev/next | 1-5: page | s/S: sort | /: search | q: quit",
        ),
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

fn format_number(num: u32) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}k", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

fn format_age(created: chrono::DateTime<chrono::Utc>) -> String {
    let days = (chrono::Utc::now() - created).num_days();
    if days < 1 {
        "today".to_string()
    } else if days < 30 {
        format!("{}d", days)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
