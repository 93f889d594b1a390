use crate::cards::{Card, CardKind};
use crate::game::{Phase, MAX_ROUNDS};
use crate::round::RoundOutcome;
use crate::tui::app::{AppState, Tone};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::time::Instant;

use super::layout::{centered_rect, inner, split_columns};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let now = Instant::now();
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // scoreboard
            Constraint::Min(7),    // cards
            Constraint::Length(3), // round message
            Constraint::Length(5), // status bar
        ])
        .split(size);

    let game = &app.game;
    let header_lines = vec![
        Line::from(vec![
            Span::styled(
                format!("You: {}", game.player_score()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Robot: {}", game.robot_score()),
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Cards left: {}   Round: {}/{}",
            game.cards_remaining(),
            game.rounds_played(),
            MAX_ROUNDS
        )),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("highcard-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let last = game.last_round();
    let card_cols = split_columns(chunks[1], [50, 50]);
    render_card_widget(f, card_cols[0], "You", last.map(|r| r.player_card), winner(last, true));
    render_card_widget(f, card_cols[1], "Robot", last.map(|r| r.robot_card), winner(last, false));

    let message_line = match app.message() {
        Some((text, tone)) => Line::from(Span::styled(text.to_string(), tone_style(tone))),
        None => Line::from(Span::styled(
            "Draw a card to begin.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    let message = Paragraph::new(message_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[2]);

    let status_area = chunks[3];
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let cols = split_columns(inner(status_area), [60, 40]);

    let mut left_info: Vec<Line> = Vec::new();
    match game.phase() {
        Phase::Active => {
            let draw_style = if app.can_draw_at(now) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            left_info.push(Line::from(vec![
                Span::raw("Actions: "),
                Span::styled("Space draw", draw_style),
                Span::raw(" • "),
                Span::raw("R restart"),
            ]));
            if game.draw_in_flight_at(now) {
                left_info.push(Line::from(Span::styled(
                    "Revealing…",
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
        }
        Phase::Ended => {
            left_info.push(Line::from("Game over — press R to play again."));
            left_info.push(Line::from("Draw disabled until restart."));
        }
        Phase::Idle => left_info.push(Line::from("Game not started.")),
    }
    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let auto = if app.auto_enabled() { "Auto: on" } else { "Auto: off" };
    let right_keys = vec![Line::from(auto), Line::from("A auto • ? help • H history • M menu")];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, cols[0]);
    f.render_widget(right_para, cols[1]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn winner(last: Option<&crate::game::RoundReport>, player_side: bool) -> bool {
    match last.map(|r| r.outcome) {
        Some(RoundOutcome::PlayerWins) => player_side,
        Some(RoundOutcome::RobotWins) => !player_side,
        _ => false,
    }
}

fn tone_style(tone: Tone) -> Style {
    let color = match tone {
        Tone::Win => Color::Green,
        Tone::Lose => Color::Red,
        Tone::Tie => Color::Yellow,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn kind_style(kind: CardKind) -> Style {
    match kind {
        CardKind::Mega => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        CardKind::Negative => Style::default().fg(Color::Red),
        CardKind::Positive => Style::default().fg(Color::Green),
        CardKind::Zero => Style::default().fg(Color::White),
    }
}

fn card_label(card: Card) -> String {
    if card.is_mega() {
        format!("MEGA {card}")
    } else if card.value() > 0 {
        format!("+{card}")
    } else {
        card.to_string()
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, title: &str, card: Option<Card>, won: bool) {
    let mut block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .title_alignment(Alignment::Center);
    if won {
        block = block.border_style(Style::default().fg(Color::Green));
    }
    let inner_area = inner(area);
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(Span::styled(card_label(c), kind_style(c.kind()))),
        None => Line::from(Span::styled("?", Style::default().add_modifier(Modifier::DIM))),
    };
    // Vertically centre the single line
    let pad = inner_area.height.saturating_sub(1) / 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(pad), Constraint::Length(1), Constraint::Min(0)])
        .split(inner_area);
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), rows[1]);
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Rounds").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries =
        app.game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No rounds yet."));
    } else {
        for r in entries {
            let who = match r.outcome {
                RoundOutcome::PlayerWins => "you",
                RoundOutcome::RobotWins => "robot",
                RoundOutcome::Tie => "tie",
            };
            lines.push(Line::from(format!(
                "#{:>2}  you {:>4}  robot {:>4}  -> {:<5} ({}-{})",
                r.round, r.player_card, r.robot_card, who, r.player_score, r.robot_score
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let lines = vec![
        Line::from(Span::styled("Table:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- Space / Enter / D: draw"),
        Line::from("- R: restart with a fresh deck"),
        Line::from("- A: toggle auto draw"),
        Line::from("- H: round history"),
        Line::from("- M / Esc: start menu"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from(Span::styled("Rules:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- One draw per second at most"),
        Line::from("- MEGA beats every other card"),
        Line::from("- A leftover single card is discarded"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
