use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::leaderboard::LeaderboardEntry;

/// Pure presenter for a single leaderboard row
pub fn present_row(rank: usize, entry: &LeaderboardEntry, highlight: bool) -> Row<'static> {
    let accuracy_color = if entry.accuracy >= 95 {
        Color::Green
    } else if entry.accuracy >= 80 {
        Color::Yellow
    } else {
        Color::Red
    };

    let row = Row::new(vec![
        Cell::from(format!("#{}", rank)).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(entry.name.clone()),
        Cell::from(entry.score.to_string()),
        Cell::from(entry.level.to_string()),
        Cell::from(format!("{}%", entry.accuracy)).style(Style::default().fg(accuracy_color)),
        Cell::from(entry.wpm.map_or_else(|| "—".to_string(), |w| w.to_string())),
        Cell::from(entry.mode.to_string()),
        Cell::from(entry.date.format("%Y-%m-%d %H:%M").to_string()),
    ]);

    if highlight {
        row.style(Style::default().fg(Color::Cyan))
    } else {
        row
    }
}

/// Ranked table; `highlight` is the 1-based rank to emphasize
pub fn board_table(entries: &[LeaderboardEntry], highlight: Option<usize>) -> Table<'static> {
    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| present_row(i + 1, e, highlight == Some(i + 1)))
        .collect();

    let header = Row::new(vec![
        "Rank", "Name", "Score", "Level", "Acc", "WPM", "Mode", "Date",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Leaderboard "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use chrono::{Local, TimeZone};

    fn entry(wpm: Option<u32>) -> LeaderboardEntry {
        LeaderboardEntry {
            name: "Ada".into(),
            score: 120,
            level: 3,
            accuracy: 97,
            wpm,
            mode: Mode::Beginner,
            date: Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn table_has_one_row_per_entry() {
        let entries = vec![entry(None), entry(Some(30))];
        let table = board_table(&entries, Some(2));
        // renders without panicking into a small area
        let area = ratatui::layout::Rect::new(0, 0, 80, 6);
        let mut buf = ratatui::buffer::Buffer::empty(area);
        ratatui::widgets::Widget::render(table, area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|p| buf[p].symbol().to_string())
            .collect();
        assert!(text.contains("#1") && text.contains("#2"));
        assert!(text.contains("2024-05-01 09:30"));
    }
}
