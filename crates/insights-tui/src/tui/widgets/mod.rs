// TUI widget modules for each dashboard panel.

pub mod awards;
pub mod brackets;
pub mod help_bar;
pub mod hero;
pub mod overview;
pub mod seasons;
pub mod standings;
pub mod tab_bar;
pub mod teams;
pub mod themes;
pub mod trend_chart;

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::{Frame, Terminal};

    use crate::tui::ViewState;

    /// Draw one widget into a `width` x `height` test terminal and return
    /// the buffer as text, one line per row.
    pub(crate) fn draw(
        width: u16,
        height: u16,
        state: &ViewState,
        render: fn(&mut Frame, Rect, &ViewState),
    ) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
