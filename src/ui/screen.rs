use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    effects::FeedbackKind,
    game::GameState,
    language::capitalize,
    mode::Mode,
    sequencer::{beginner_keys, key_label, normalize_word, WordSequencer, HOME_ROW},
    session::Target,
    store::KeyValueStore,
    ui::{
        board::board_table, bold_style, dim_bold_style, format_time, green_bold_style,
        keyboard::HomeRow, legend_style, red_bold_style, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
    },
};

/// A UI screen boundary, one per game state
pub trait Screen<S: KeyValueStore> {
    fn render(&self, app: &App<S>, area: Rect, buf: &mut Buffer);
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen<S: KeyValueStore>(state: GameState) -> Box<dyn Screen<S>> {
    match state {
        GameState::Idle => Box::new(IdleScreen),
        GameState::Playing => Box::new(PlayingScreen),
        GameState::Ended => Box::new(EndedScreen),
    }
}

fn mode_blurb(mode: Mode) -> &'static str {
    match mode {
        Mode::Beginner => {
            "Press the highlighted home row key. 60 seconds, new keys unlock every 10 hits."
        }
        Mode::Medium => "Type each word, then space or comma. 20 seconds, double word points.",
        Mode::Advanced => {
            "Type each word, then space or comma. 10 seconds, finished sentences buy more time."
        }
    }
}

pub struct IdleScreen;

impl<S: KeyValueStore> Screen<S> for IdleScreen {
    fn render(&self, app: &App<S>, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Length(2), // modes
                Constraint::Length(2), // blurb
                Constraint::Length(2), // player / best
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "HOME ROW TYPING",
            bold_style().fg(Color::Magenta),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let selected = app.game.mode();
        let mut modes = Vec::new();
        for (i, mode) in Mode::ALL.iter().enumerate() {
            if i > 0 {
                modes.push(Span::raw("   "));
            }
            let label = format!("({}) {}", i + 1, capitalize(&mode.to_string()));
            let style = if *mode == selected {
                bold_style().fg(Color::Black).bg(Color::Yellow)
            } else {
                dim_bold_style()
            };
            modes.push(Span::styled(label, style));
        }
        Paragraph::new(Line::from(modes))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(Span::styled(
            mode_blurb(selected),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

        let best = app
            .board()
            .first()
            .map_or_else(|| "no scores yet".to_string(), |e| format!("best {} by {}", e.score, e.name));
        Paragraph::new(Span::styled(
            format!("playing as {}   ·   {}", app.player_name(), best),
            Style::default().fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            "(enter) start   (1/2/3) mode   (esc) quit",
            legend_style(),
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
    }
}

pub struct PlayingScreen;

impl PlayingScreen {
    fn stats_line<S: KeyValueStore>(app: &App<S>) -> Line<'static> {
        let session = app.game.session();
        let mut spans = vec![
            Span::styled(format!("Score {}", session.score()), bold_style()),
            Span::raw("   "),
            Span::styled(format!("Level {}", session.level()), bold_style()),
            Span::raw("   "),
            Span::styled(
                format!("Time {}", format_time(session.mode, session.time_left())),
                bold_style(),
            ),
        ];
        if let Some(secs) = app.time_bonus() {
            spans.push(Span::styled(format!(" +{:.1}s", secs), green_bold_style()));
        }
        if let Some(wpm) = session.wpm() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(format!("WPM {}", wpm), bold_style()));
        }
        Line::from(spans)
    }

    fn sentence_line(seq: &WordSequencer) -> Line<'static> {
        let underlined = bold_style().add_modifier(Modifier::UNDERLINED);
        let mut spans = Vec::new();

        for (idx, word) in seq.sentence().words.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(" "));
            }
            let style = match idx.cmp(&seq.index()) {
                std::cmp::Ordering::Less => green_bold_style(),
                std::cmp::Ordering::Equal => {
                    let typed = seq.buffer();
                    if typed.is_empty() || normalize_word(word).starts_with(typed) {
                        underlined.fg(Color::Yellow)
                    } else {
                        underlined.fg(Color::Red)
                    }
                }
                std::cmp::Ordering::Greater => dim_bold_style(),
            };
            spans.push(Span::styled(word.clone(), style));
        }
        Line::from(spans)
    }
}

impl<S: KeyValueStore> Screen<S> for PlayingScreen {
    fn render(&self, app: &App<S>, area: Rect, buf: &mut Buffer) {
        let session = app.game.session();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // stats
                Constraint::Min(3),    // target
                Constraint::Length(2), // typed buffer
                Constraint::Length(2), // feedback
                Constraint::Length(1), // progress
                Constraint::Length(2), // keyboard
            ])
            .split(area);

        Paragraph::new(Self::stats_line(app))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        match &session.target {
            Target::Key(c) => {
                Paragraph::new(Span::styled(
                    key_label(*c),
                    bold_style().fg(Color::Yellow),
                ))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
            }
            Target::Words(seq) => {
                // short sentences are centered, long ones wrap from the left
                let fits = seq.sentence().text.width() <= chunks[1].width as usize;
                Paragraph::new(Self::sentence_line(seq))
                    .alignment(if fits {
                        Alignment::Center
                    } else {
                        Alignment::Left
                    })
                    .wrap(Wrap { trim: true })
                    .render(chunks[1], buf);

                Paragraph::new(Line::from(vec![
                    Span::styled("> ", dim_bold_style()),
                    Span::styled(seq.buffer().to_string(), bold_style()),
                    Span::styled("_", dim_bold_style()),
                ]))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
            }
            Target::None => {}
        }

        if let Some(feedback) = app.game.feedback() {
            let style = match feedback.kind {
                FeedbackKind::Correct => green_bold_style(),
                FeedbackKind::Incorrect => red_bold_style(),
            };
            Paragraph::new(Span::styled(feedback.message.clone(), style))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .percent(session.progress_percent().min(100) as u16)
            .render(chunks[4], buf);

        let active = if session.mode.is_word_mode() {
            &HOME_ROW[..]
        } else {
            beginner_keys(session.level())
        };
        HomeRow {
            active,
            target: session.target.key(),
            flash: app.key_flash(),
        }
        .render(chunks[5], buf);
    }
}

pub struct EndedScreen;

impl<S: KeyValueStore> Screen<S> for EndedScreen {
    fn render(&self, app: &App<S>, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // stats
                Constraint::Length(2), // rank
                Constraint::Min(3),    // board
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("GAME OVER", bold_style().fg(Color::Magenta)))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        if let Some(result) = app.game.last_result() {
            let mut stats = format!(
                "Score {}   Level {}   Accuracy {}%",
                result.score, result.level, result.accuracy
            );
            if let Some(wpm) = result.wpm {
                stats.push_str(&format!("   WPM {}", wpm));
            }
            Paragraph::new(Span::styled(stats, bold_style()))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
        }

        let rank = match app.last_rank() {
            Some(rank) => Span::styled(
                format!("{} placed #{} on the board", app.player_name(), rank),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
            None => Span::styled("not on the board this time", legend_style()),
        };
        Paragraph::new(rank)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        board_table(app.board(), app.last_rank()).render(chunks[3], buf);

        Paragraph::new(Span::styled("(r) restart   (esc) quit", legend_style()))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
