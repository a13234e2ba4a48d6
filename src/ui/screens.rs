use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;

use crate::app::{App, AppScreen, NoticeKind};
use crate::session::{self, StartError, TrainingMode, Verdict};
use crate::ui::answer_input::AnswerInput;
use crate::ui::components::dialog::{Dialog, DialogTone};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::layout::{DrillLayout, centered_rect, pack_hint_lines};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    frame.render_widget(Block::default().style(Style::default().bg(colors.bg())), area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Notice => {
            render_menu(frame, app);
            render_notice(frame, app);
        }
        AppScreen::Drill => render_drill(frame, app),
        AppScreen::RoundComplete => {
            render_drill(frame, app);
            render_round_complete(frame, app);
        }
    }
}

fn render_menu(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    frame.render_widget(&app.menu, centered_rect(50, 60, layout[0]));

    let footer = Paragraph::new(Line::from(Span::styled(
        t!("menu.footer").to_string(),
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout[1]);
}

fn render_drill(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let mode = session.mode();
    let input_count = match mode {
        TrainingMode::Dictionary => 1,
        TrainingMode::Irregular => 2,
    };

    let hints = footer_hints(app, mode);
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let footer_lines = pack_hint_lines(&hint_refs, area.width as usize);
    let layout = DrillLayout::new(area, input_count, footer_lines.len().max(1) as u16);

    let stats = session.stats();
    let mode_name = match mode {
        TrainingMode::Dictionary => t!("drill.mode_words").to_string(),
        TrainingMode::Irregular => t!("drill.mode_verbs").to_string(),
    };
    let direction_text = match session.direction() {
        Some(session::Direction::EnglishToRussian) => {
            format!(" | {}", t!("drill.direction_en_ru"))
        }
        Some(session::Direction::RussianToEnglish) => {
            format!(" | {}", t!("drill.direction_ru_en"))
        }
        None => String::new(),
    };
    let stats_text = t!(
        "drill.stats",
        round = stats.round,
        correct = stats.correct,
        missed = stats.missed,
        skipped = stats.skipped
    )
    .to_string();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {mode_name}{direction_text} "),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {stats_text}"),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    if let Some(prompt) = app.prompt.as_ref() {
        let prompt_text = match mode {
            TrainingMode::Dictionary => t!("drill.translate", term = &prompt.text).to_string(),
            TrainingMode::Irregular => t!("drill.verb", term = &prompt.text).to_string(),
        };
        let count = session
            .current()
            .map(|card| format!("  ({}/{})", session.count(card), session.threshold()))
            .unwrap_or_default();
        let prompt_line = Paragraph::new(Line::from(vec![
            Span::styled(
                prompt_text,
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(count, Style::default().fg(colors.muted())),
        ]))
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(Style::default().fg(colors.border())));
        frame.render_widget(prompt_line, layout.prompt);
    }

    let labels = match mode {
        TrainingMode::Dictionary => vec![t!("drill.answer").to_string()],
        TrainingMode::Irregular => vec![
            t!("drill.past").to_string(),
            t!("drill.participle").to_string(),
        ],
    };
    for (i, (label, rect)) in labels.iter().zip(layout.inputs.iter()).enumerate() {
        let focused = i == app.focused_input && app.awaiting_answer();
        render_input(frame, *rect, label, &app.inputs[i], focused, app.theme);
    }

    if let Some(feedback) = app.feedback.as_ref() {
        let (text, color) = match &feedback.verdict {
            Verdict::Correct => (t!("drill.correct").to_string(), colors.success()),
            Verdict::Incorrect { expected } => {
                (t!("drill.wrong", answer = expected).to_string(), colors.error())
            }
            Verdict::Skipped { expected } => {
                (t!("drill.skipped", answer = expected).to_string(), colors.success())
            }
        };
        let line = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(line, layout.feedback);
    }

    let (mastered, total) = session.mastery();
    frame.render_widget(
        ProgressBar::new(t!("drill.progress").to_string(), mastered, total, app.theme),
        layout.progress,
    );

    let footer = Paragraph::new(
        footer_lines
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted()))))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, layout.footer);
}

fn footer_hints(app: &App, mode: TrainingMode) -> Vec<String> {
    if !app.awaiting_answer() {
        return vec![
            t!("hint.continue").to_string(),
            t!("hint.quit").to_string(),
        ];
    }
    let mut hints = vec![t!("hint.check").to_string()];
    hints.push(match mode {
        TrainingMode::Dictionary => t!("hint.direction").to_string(),
        TrainingMode::Irregular => t!("hint.field").to_string(),
    });
    hints.push(t!("hint.skip").to_string());
    hints.push(t!("hint.quit").to_string());
    hints
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &AnswerInput,
    focused: bool,
    theme: &Theme,
) {
    let colors = &theme.colors;
    let border = if focused { colors.accent() } else { colors.border() };
    let block = Block::bordered()
        .title(format!(" {label} "))
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors.input_bg()));

    let text_style = Style::default().fg(colors.fg());
    let line = if focused {
        let (before, at, after) = input.render_parts();
        let cursor_style = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());
        Line::from(vec![
            Span::styled(before.to_string(), text_style),
            Span::styled(at.unwrap_or(' ').to_string(), cursor_style),
            Span::styled(after.to_string(), text_style),
        ])
    } else {
        Line::from(Span::styled(input.value().to_string(), text_style))
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_round_complete(frame: &mut Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let message = match session.mode() {
        TrainingMode::Dictionary => t!("complete.words", count = session.threshold()).to_string(),
        TrainingMode::Irregular => t!("complete.verbs").to_string(),
    };
    let stats = session.stats();
    let summary = t!(
        "drill.stats",
        round = stats.round,
        correct = stats.correct,
        missed = stats.missed,
        skipped = stats.skipped
    )
    .to_string();
    let body = format!("{message}\n{summary}\n{}", t!("complete.again"));
    let dialog = Dialog::new(
        t!("complete.title").to_string(),
        &body,
        t!("complete.keys").to_string(),
        DialogTone::Info,
        app.theme,
    );
    let area = frame.area();
    frame.render_widget(dialog, area);
}

fn render_notice(frame: &mut Frame, app: &App) {
    let Some(notice) = app.notice.as_ref() else {
        return;
    };
    let (title, tone) = match notice.kind {
        NoticeKind::Error => (t!("notice.error_title").to_string(), DialogTone::Error),
        NoticeKind::Warning => (t!("notice.warning_title").to_string(), DialogTone::Warning),
    };
    let message = notice_message(&notice.error);
    let dialog = Dialog::new(title, &message, t!("notice.dismiss").to_string(), tone, app.theme);
    let area = frame.area();
    frame.render_widget(dialog, area);
}

fn notice_message(error: &StartError) -> String {
    match error {
        StartError::FileNotFound(path) => {
            t!("notice.not_found", path = path.display()).to_string()
        }
        StartError::EmptyDataset(path) => t!("notice.empty", path = path.display()).to_string(),
        StartError::Read { path, source } => {
            t!("notice.read_failed", path = path.display(), reason = source).to_string()
        }
    }
}
