use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogTone {
    Info,
    Warning,
    Error,
}

/// Modal box drawn over whatever is underneath.
pub struct Dialog<'a> {
    pub title: String,
    pub lines: Vec<String>,
    pub hint: String,
    pub tone: DialogTone,
    pub theme: &'a Theme,
}

impl<'a> Dialog<'a> {
    pub fn new(title: String, message: &str, hint: String, tone: DialogTone, theme: &'a Theme) -> Self {
        Self {
            title,
            lines: message.lines().map(str::to_string).collect(),
            hint,
            tone,
            theme,
        }
    }

    /// Rect of the dialog centered in `area`, sized to its text.
    pub fn area(&self, area: Rect) -> Rect {
        let longest = self
            .lines
            .iter()
            .chain(std::iter::once(&self.hint))
            .chain(std::iter::once(&self.title))
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let width = (longest + 6).max(30).min(area.width);
        let height = (self.lines.len() as u16 + 5).min(area.height);
        Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        )
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let accent = match self.tone {
            DialogTone::Info => colors.accent(),
            DialogTone::Warning => colors.warning(),
            DialogTone::Error => colors.error(),
        };
        let dialog_area = self.area(area);

        let mut lines = vec![Line::from("")];
        lines.extend(
            self.lines
                .iter()
                .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(colors.fg())))),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.hint.clone(),
            Style::default().fg(colors.muted()),
        )));

        Clear.render(dialog_area, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(colors.bg()))
            .block(
                Block::bordered()
                    .title(Span::styled(
                        format!(" {} ", self.title),
                        Style::default().fg(accent).add_modifier(Modifier::BOLD),
                    ))
                    .border_style(Style::default().fg(accent)),
            )
            .render(dialog_area, buf);
    }
}
