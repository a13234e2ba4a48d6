use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::TrainingMode;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start(TrainingMode),
    Quit,
}

pub struct MenuItem {
    pub key: char,
    pub action: MenuAction,
}

impl MenuItem {
    fn label(&self) -> String {
        match self.action {
            MenuAction::Start(TrainingMode::Dictionary) => t!("menu.dictionary").to_string(),
            MenuAction::Start(TrainingMode::Irregular) => t!("menu.irregular").to_string(),
            MenuAction::Quit => t!("menu.quit").to_string(),
        }
    }

    fn description(&self) -> String {
        match self.action {
            MenuAction::Start(TrainingMode::Dictionary) => t!("menu.dictionary_desc").to_string(),
            MenuAction::Start(TrainingMode::Irregular) => t!("menu.irregular_desc").to_string(),
            MenuAction::Quit => t!("menu.quit_desc").to_string(),
        }
    }
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: '1',
                    action: MenuAction::Start(TrainingMode::Dictionary),
                },
                MenuItem {
                    key: '2',
                    action: MenuAction::Start(TrainingMode::Irregular),
                },
                MenuItem {
                    key: 'q',
                    action: MenuAction::Quit,
                },
            ],
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(self.items.len() - 1);
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items[self.selected].action
    }

    pub fn action_for_key(&self, key: char) -> Option<MenuAction> {
        self.items.iter().find(|i| i.key == key).map(|i| i.action)
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("app.title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
        ])
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(self.items.iter().map(|_| Constraint::Length(3)))
            .split(layout[2]);

        for (i, (item, row)) in self.items.iter().zip(rows.iter()).enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            Paragraph::new(vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {}", item.key, item.label()),
                    label_style,
                )),
                Line::from(Span::styled(
                    format!("       {}", item.description()),
                    Style::default().fg(colors.muted()),
                )),
            ])
            .render(*row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        menu.prev();
        assert_eq!(menu.selected_action(), MenuAction::Quit);
        menu.next();
        assert_eq!(
            menu.selected_action(),
            MenuAction::Start(TrainingMode::Dictionary)
        );
    }

    #[test]
    fn hotkeys_map_to_actions() {
        let theme = Theme::default();
        let menu = Menu::new(&theme);
        assert_eq!(
            menu.action_for_key('2'),
            Some(MenuAction::Start(TrainingMode::Irregular))
        );
        assert_eq!(menu.action_for_key('x'), None);
    }
}
