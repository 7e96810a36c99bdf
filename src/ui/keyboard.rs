use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    app::KeyFlash,
    sequencer::{Key, HOME_ROW},
};

/// One-line home row with the target and the last press highlighted
pub struct HomeRow<'a> {
    /// Keys in play; the rest are dimmed
    pub active: &'a [char],
    pub target: Option<char>,
    pub flash: Option<KeyFlash>,
}

impl HomeRow<'_> {
    fn key_style(&self, c: char) -> Style {
        let base = Style::default().add_modifier(Modifier::BOLD);
        match self.flash {
            Some(KeyFlash {
                key: Key::Char(pressed),
                correct,
            }) if pressed.to_ascii_lowercase() == c => {
                return base.fg(Color::Black).bg(if correct {
                    Color::Green
                } else {
                    Color::Red
                });
            }
            _ => {}
        }

        if self.target == Some(c) {
            base.fg(Color::Black).bg(Color::Yellow)
        } else if self.active.contains(&c) {
            base
        } else {
            base.add_modifier(Modifier::DIM)
        }
    }
}

fn cap(c: char) -> String {
    match c {
        ' ' => " SPACE ".to_string(),
        c => format!(" {} ", c.to_ascii_uppercase()),
    }
}

impl Widget for HomeRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(HOME_ROW.len() * 2);
        for (i, c) in HOME_ROW.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(cap(*c), self.key_style(*c)));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
