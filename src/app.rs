use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::session::schedule::Scheduler;
use crate::session::{
    self, Feedback, Phase, Prompt, RoundStats, Session, SessionConfig, StartError, Step,
    TrainingMode,
};
use crate::ui::answer_input::AnswerInput;
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Drill,
    RoundComplete,
    Notice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Warning,
}

/// Failed mode start, shown as a dialog over the menu.
#[derive(Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub error: StartError,
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    /// `None` until a mode has been chosen.
    pub session: Option<Session>,
    pub scheduler: Scheduler,
    pub prompt: Option<Prompt>,
    pub feedback: Option<Feedback>,
    pub inputs: [AnswerInput; 2],
    pub focused_input: usize,
    pub notice: Option<Notice>,
    pub final_stats: Option<RoundStats>,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, theme: &'static Theme, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            screen: AppScreen::Menu,
            menu: Menu::new(theme),
            theme,
            config,
            session: None,
            scheduler: Scheduler::new(),
            prompt: None,
            feedback: None,
            inputs: [AnswerInput::new(), AnswerInput::new()],
            focused_input: 0,
            notice: None,
            final_stats: None,
            should_quit: false,
            rng,
        }
    }

    /// Leave the menu for `mode`. On failure the app stays idle and shows
    /// why.
    pub fn start_mode(&mut self, mode: TrainingMode) {
        if self.session.is_some() {
            return;
        }
        let path = self.config.deck_path(mode).clone();
        let rng = SmallRng::seed_from_u64(self.rng.r#gen());
        match session::start(
            mode,
            &path,
            self.config.direction,
            SessionConfig::from(&self.config),
            rng,
        ) {
            Ok(mut session) => {
                let step = session.next_item();
                self.session = Some(session);
                self.apply_step(step);
            }
            Err(error) => {
                let kind = if error.is_warning() {
                    NoticeKind::Warning
                } else {
                    tracing::error!(%error, "could not start session");
                    NoticeKind::Error
                };
                self.notice = Some(Notice { kind, error });
                self.screen = AppScreen::Notice;
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.screen = AppScreen::Menu;
    }

    pub fn mode(&self) -> Option<TrainingMode> {
        self.session.as_ref().map(Session::mode)
    }

    pub fn awaiting_answer(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase() == Phase::AwaitingAnswer)
    }

    /// Enter in the drill. For verbs the first Enter moves to the participle
    /// field; the answer is checked from the second field.
    pub fn submit(&mut self, now: Instant) {
        if self.mode() == Some(TrainingMode::Irregular) && self.focused_input == 0 {
            self.focused_input = 1;
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let fields = [self.inputs[0].value(), self.inputs[1].value()];
        if let Some(feedback) = session.check_answer(&fields) {
            self.scheduler.schedule(session.id(), now, feedback.delay);
            self.feedback = Some(feedback);
        }
    }

    pub fn skip(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(feedback) = session.skip_current() {
            self.scheduler.schedule(session.id(), now, feedback.delay);
            self.feedback = Some(feedback);
        }
    }

    /// Tab in the drill: next field for verbs, flip direction for words.
    pub fn switch(&mut self) {
        match self.mode() {
            Some(TrainingMode::Irregular) => self.focused_input = 1 - self.focused_input,
            Some(TrainingMode::Dictionary) => {
                if let Some(session) = self.session.as_mut() {
                    if let Some(direction) = session.direction() {
                        session.set_direction(direction.toggled());
                    }
                }
            }
            None => {}
        }
    }

    /// Skip the rest of the feedback delay.
    pub fn continue_now(&mut self) {
        if self.scheduler.cancel().is_some() {
            self.advance();
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let active = self.session.as_ref().map(Session::id);
        if self.scheduler.fire(active, now) {
            self.advance();
        }
    }

    /// Answer to the completion prompt.
    pub fn finish_round(&mut self, restart: bool) {
        if self.screen != AppScreen::RoundComplete {
            return;
        }
        self.scheduler.cancel();
        if restart {
            let step = self.session.as_mut().and_then(Session::restart_round);
            if let Some(step) = step {
                self.apply_step(step);
            }
        } else {
            self.final_stats = self.session.take().map(Session::stop);
            self.should_quit = true;
        }
    }

    pub fn paste(&mut self, text: &str) {
        if self.screen == AppScreen::Drill && self.awaiting_answer() {
            self.inputs[self.focused_input].insert_str(text);
        }
    }

    pub fn quit(&mut self) {
        self.scheduler.cancel();
        self.final_stats = self.session.take().map(Session::stop);
        self.should_quit = true;
    }

    fn advance(&mut self) {
        let step = self.session.as_mut().and_then(Session::advance);
        if let Some(step) = step {
            self.apply_step(step);
        }
    }

    fn apply_step(&mut self, step: Step) {
        self.feedback = None;
        for input in &mut self.inputs {
            input.clear();
        }
        self.focused_input = 0;
        match step {
            Step::Prompt(prompt) => {
                self.prompt = Some(prompt);
                self.screen = AppScreen::Drill;
            }
            Step::RoundComplete(_) => {
                self.prompt = None;
                self.screen = AppScreen::RoundComplete;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use super::*;
    use crate::session::Verdict;

    fn theme() -> &'static Theme {
        Box::leak(Box::new(Theme::default()))
    }

    fn app_with(dictionary: &Path, verbs: &Path) -> App {
        let mut config = Config::default();
        config.dictionary_path = dictionary.to_path_buf();
        config.verbs_path = verbs.to_path_buf();
        App::new(config, theme(), Some(42))
    }

    fn type_into(app: &mut App, idx: usize, text: &str) {
        app.inputs[idx].clear();
        app.inputs[idx].insert_str(text);
    }

    #[test]
    fn missing_file_keeps_app_idle_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(&dir.path().join("d.txt"), &dir.path().join("v.txt"));
        app.start_mode(TrainingMode::Dictionary);
        assert_eq!(app.screen, AppScreen::Notice);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
        assert!(app.session.is_none());

        app.dismiss_notice();
        assert_eq!(app.screen, AppScreen::Menu);
    }

    #[test]
    fn empty_dictionary_warns_and_stays_idle() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("d.txt");
        std::fs::write(&dict, "").unwrap();
        let mut app = app_with(&dict, &dir.path().join("v.txt"));
        app.start_mode(TrainingMode::Dictionary);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Warning));
        assert!(app.session.is_none());
        assert!(app.prompt.is_none());
    }

    #[test]
    fn correct_answer_advances_after_delay() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("d.txt");
        std::fs::write(&dict, "cat - кот\n").unwrap();
        let mut app = app_with(&dict, &dir.path().join("v.txt"));
        app.start_mode(TrainingMode::Dictionary);
        assert_eq!(app.screen, AppScreen::Drill);
        assert_eq!(app.prompt.as_ref().unwrap().text, "cat");

        let t0 = Instant::now();
        type_into(&mut app, 0, "кот");
        app.submit(t0);
        assert_eq!(app.feedback.as_ref().unwrap().verdict, Verdict::Correct);

        app.tick(t0 + Duration::from_millis(100));
        assert!(app.feedback.is_some());

        app.tick(t0 + Duration::from_millis(800));
        assert!(app.feedback.is_none());
        assert_eq!(app.inputs[0].value(), "");
        assert_eq!(app.screen, AppScreen::Drill);
    }

    #[test]
    fn enter_during_feedback_advances_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("d.txt");
        std::fs::write(&dict, "cat - кот\n").unwrap();
        let mut app = app_with(&dict, &dir.path().join("v.txt"));
        app.start_mode(TrainingMode::Dictionary);

        let t0 = Instant::now();
        type_into(&mut app, 0, "кот");
        app.submit(t0);
        app.continue_now();
        assert!(app.awaiting_answer());
        // The cancelled timer must not advance a second time.
        app.tick(t0 + Duration::from_secs(10));
        assert!(app.awaiting_answer());

        type_into(&mut app, 0, "кот");
        app.submit(t0);
        app.continue_now();
        assert_eq!(app.screen, AppScreen::RoundComplete);
    }

    #[test]
    fn verb_flow_uses_two_fields_and_completes() {
        let dir = tempfile::tempdir().unwrap();
        let verbs = dir.path().join("v.txt");
        std::fs::write(&verbs, "go,went,gone\n").unwrap();
        let mut app = app_with(&dir.path().join("d.txt"), &verbs);
        app.start_mode(TrainingMode::Irregular);
        assert_eq!(app.prompt.as_ref().unwrap().text, "go");

        let t0 = Instant::now();
        type_into(&mut app, 0, "went");
        app.submit(t0);
        assert_eq!(app.focused_input, 1);
        assert!(app.feedback.is_none());

        type_into(&mut app, 1, "gone");
        app.submit(t0);
        assert!(app.feedback.as_ref().unwrap().is_positive());

        app.tick(t0 + Duration::from_millis(800));
        assert_eq!(app.screen, AppScreen::RoundComplete);

        app.finish_round(true);
        assert_eq!(app.screen, AppScreen::Drill);
        assert_eq!(app.session.as_ref().unwrap().stats().round, 2);

        app.skip(t0);
        app.continue_now();
        app.finish_round(false);
        assert!(app.should_quit);
        assert!(app.session.is_none());
        assert_eq!(app.final_stats.unwrap().skipped, 1);
    }

    #[test]
    fn mode_cannot_change_once_started() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("d.txt");
        let verbs = dir.path().join("v.txt");
        std::fs::write(&dict, "cat - кот\n").unwrap();
        std::fs::write(&verbs, "go,went,gone\n").unwrap();
        let mut app = app_with(&dict, &verbs);
        app.start_mode(TrainingMode::Dictionary);
        app.start_mode(TrainingMode::Irregular);
        assert_eq!(app.mode(), Some(TrainingMode::Dictionary));
    }

    #[test]
    fn tab_flips_direction_for_next_word() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("d.txt");
        std::fs::write(&dict, "cat - кот\n").unwrap();
        let mut app = app_with(&dict, &dir.path().join("v.txt"));
        app.start_mode(TrainingMode::Dictionary);
        app.switch();
        assert_eq!(app.prompt.as_ref().unwrap().text, "cat");

        app.skip(Instant::now());
        app.continue_now();
        assert_eq!(app.prompt.as_ref().unwrap().text, "кот");
    }
}
