use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use slovarik::app::{App, AppScreen};
use slovarik::config::Config;
use slovarik::event::{AppEvent, EventHandler};
use slovarik::logging;
use slovarik::session::{Direction, TrainingMode};
use slovarik::ui::answer_input::InputAction;
use slovarik::ui::components::menu::MenuAction;
use slovarik::ui::screens;
use slovarik::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "slovarik",
    version,
    about = "Terminal vocabulary and irregular-verb trainer"
)]
struct Cli {
    #[arg(short, long, help = "Dictionary file (`english - russian` per line)")]
    dictionary: Option<PathBuf>,

    #[arg(short, long, help = "Irregular verb file (`base,past,participle` per line)")]
    verbs: Option<PathBuf>,

    #[arg(short, long, help = "Start straight away: dictionary or irregular")]
    mode: Option<TrainingMode>,

    #[arg(long, help = "english-to-russian or russian-to-english")]
    direction: Option<Direction>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Interface language (en, ru)")]
    language: Option<String>,

    #[arg(long, help = "Seed for item selection")]
    seed: Option<u64>,

    #[arg(long, help = "Write the effective config file and exit")]
    init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Config::config_path();
    let (mut config, config_error) = Config::load_or_default(&config_path);
    if let Some(path) = cli.dictionary {
        config.dictionary_path = path;
    }
    if let Some(path) = cli.verbs {
        config.verbs_path = path;
    }
    if let Some(direction) = cli.direction {
        config.direction = direction;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(language) = cli.language {
        config.language = language;
    }
    config.validate();

    if cli.init_config {
        if let Some(err) = &config_error {
            println!("Replacing unreadable config: {err:#}");
        }
        let path = config.save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let _log_guard = logging::init(&Config::log_dir(), &config.log_level)?;
    if let Some(err) = config_error {
        tracing::warn!(path = %config_path.display(), "ignoring unreadable config: {err:#}");
    }
    rust_i18n::set_locale(&config.language);

    let theme: &'static Theme = Box::leak(Box::new(
        Theme::load(&config.theme).unwrap_or_default(),
    ));
    let mut app = App::new(config, theme, cli.seed);
    if let Some(mode) = cli.mode {
        app.start_mode(mode);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| screens::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => app.paste(&text),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Notice => handle_notice_key(app, key),
        AppScreen::Drill => handle_drill_key(app, key),
        AppScreen::RoundComplete => handle_round_complete_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    let action = match key.code {
        KeyCode::Esc => Some(MenuAction::Quit),
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu.prev();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu.next();
            None
        }
        KeyCode::Enter => Some(app.menu.selected_action()),
        KeyCode::Char(ch) => app.menu.action_for_key(ch),
        _ => None,
    };
    match action {
        Some(MenuAction::Start(mode)) => app.start_mode(mode),
        Some(MenuAction::Quit) => app.quit(),
        None => {}
    }
}

fn handle_notice_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_notice();
    }
}

fn handle_drill_key(app: &mut App, key: KeyEvent) {
    let now = Instant::now();
    if !app.awaiting_answer() {
        match key.code {
            KeyCode::Enter => app.continue_now(),
            KeyCode::Esc => app.quit(),
            _ => {}
        }
        return;
    }

    let focused = app.focused_input;
    match app.inputs[focused].handle(key) {
        InputAction::Submit => app.submit(now),
        InputAction::Skip => app.skip(now),
        InputAction::Switch => app.switch(),
        InputAction::Cancel => app.quit(),
        InputAction::Edited => {}
    }
}

fn handle_round_complete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.finish_round(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
            app.finish_round(false)
        }
        _ => {}
    }
}
