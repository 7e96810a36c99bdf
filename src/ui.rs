pub mod board;
pub mod keyboard;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::{app::App, mode::Mode, store::KeyValueStore};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl<S: KeyValueStore> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen::<S>(self.game.state()).render(self, area, buf);
    }
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold_style() -> Style {
    bold_style().add_modifier(Modifier::DIM)
}

fn green_bold_style() -> Style {
    bold_style().fg(Color::Green)
}

fn red_bold_style() -> Style {
    bold_style().fg(Color::Red)
}

fn legend_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM)
}

/// Countdown as shown on screen; advanced shows tenths
fn format_time(mode: Mode, secs: f64) -> String {
    match mode {
        Mode::Advanced => format!("{:.1}", secs),
        Mode::Beginner | Mode::Medium => format!("{}", secs.ceil() as u32),
    }
}
