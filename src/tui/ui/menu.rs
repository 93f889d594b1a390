use crate::cards::{MAX_VALUE, MEGA_VALUE, MIN_VALUE};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let area = centered_rect(80, 80, size);
    let block = Block::default().title("highcard-rs").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    let inner_all = inner(area);

    // Logo is left-aligned text rendered centered as a block to keep its spacing
    let logo = r#"
 _   _ _       _        ____              _
| | | (_) __ _| |__    / ___|__ _ _ __ __| |
| |_| | |/ _` | '_ \  | |   / _` | '__/ _` |
|  _  | | (_| | | | | | |__| (_| | | | (_| |
|_| |_|_|\__, |_| |_|  \____\__,_|_|  \__,_|
         |___/
"#;

    let logo_lines: Vec<Line> = logo
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Magenta))))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(logo_lines.len() as u16 + 1),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(inner_all);

    let logo_para =
        Paragraph::new(logo_lines).wrap(Wrap { trim: false }).alignment(Alignment::Center);
    f.render_widget(logo_para, rows[0]);

    let rules = vec![
        Line::from(format!(
            "{MIN_VALUE}..{MAX_VALUE} plus one MEGA card ({MEGA_VALUE}). You and the robot draw one card each."
        )),
        Line::from("Higher card scores a point. The deck is never reshuffled mid-game."),
    ];
    let rules_para = Paragraph::new(rules)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(rules_para, rows[1]);

    let items = app.menu_items_display();
    let mut lines: Vec<Line> = Vec::with_capacity(items.len() + 3);
    for (i, it) in items.iter().enumerate() {
        let (marker, style) = if i == app.menu_index {
            ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default())
        };
        lines.push(Line::from(Span::styled(format!("{marker}{it}"), style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Select  [↑/↓] Move  [Q] Quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(para, rows[2]);
}
