use crate::commands;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::prefs::Preferences;
use crate::store::cached_client::StoreClient;
use crate::store::types::Lang;
use crate::ui::components::{CommandEvent, CommandInput, KeyResult};
use crate::ui::renderfns::{draw_footer, draw_header};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{CatalogView, HomeView};
use crate::ui;
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Pick the display language: explicit flag, then the saved choice, then
/// the configured default
pub fn resolve_language(flag: Option<Lang>, stored: Option<Lang>, default: Lang) -> Lang {
  flag.or(stored).unwrap_or(default)
}

/// Main application state
pub struct App {
  /// Navigation stack, home is always at index 0
  views: Vec<Box<dyn View>>,
  command: CommandInput,
  lang: Lang,
  config: Config,
  client: StoreClient,
  prefs: Preferences,
  should_quit: bool,
}

impl App {
  pub fn new(
    config: Config,
    client: StoreClient,
    prefs: Preferences,
    lang: Lang,
    category: Option<String>,
  ) -> Self {
    let mut app = Self {
      views: Vec::new(),
      command: CommandInput::new(),
      lang,
      config,
      client,
      prefs,
      should_quit: false,
    };
    app.go_home();
    if let Some(category) = category {
      app.open_catalog(Some(category));
    }
    app
  }

  pub async fn run(&mut self) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let width = terminal.size()?.width;
    for view in self.views.iter_mut() {
      view.on_resize(width);
    }

    let mut events = EventHandler::new(Duration::from_millis(250));

    let result = self.event_loop(&mut terminal, &mut events).await;

    // Restore the terminal even if the loop failed
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| self.draw(frame))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Mouse(mouse) => {
        if let Some(view) = self.views.last_mut() {
          view.handle_mouse(mouse);
        }
      }
      Event::Resize(width, _) => {
        for view in self.views.iter_mut() {
          view.on_resize(width);
        }
      }
      Event::Tick => {
        let now = Instant::now();
        for view in self.views.iter_mut() {
          view.tick(now);
        }
      }
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      self.should_quit = true;
      return;
    }

    let capturing = self.views.last().is_some_and(|v| v.is_capturing_input());

    if !capturing {
      match self.command.handle_key(key) {
        KeyResult::Event(CommandEvent::Submitted(cmd)) => {
          self.execute_command(&cmd);
          return;
        }
        KeyResult::Event(CommandEvent::Cancelled) | KeyResult::Handled => return,
        KeyResult::NotHandled => {}
      }

      if key.code == KeyCode::Char('t') {
        self.toggle_language();
        return;
      }
    }

    let action = match self.views.last_mut() {
      Some(view) => view.handle_key(key),
      None => ViewAction::None,
    };
    self.apply(action);
  }

  fn apply(&mut self, action: ViewAction) {
    match action {
      ViewAction::None => {}
      ViewAction::Push(view) => self.views.push(view),
      ViewAction::Pop => {
        self.views.pop();
        if self.views.is_empty() {
          self.should_quit = true;
        }
      }
    }
  }

  fn execute_command(&mut self, cmd: &str) {
    match cmd {
      "home" => self.go_home(),
      "catalog" => {
        self.go_home();
        self.open_catalog(None);
      }
      "lang" => self.toggle_language(),
      "quit" => self.should_quit = true,
      _ => warn!(command = cmd, "unknown command"),
    }
  }

  fn go_home(&mut self) {
    self.views.clear();
    self.views.push(Box::new(HomeView::new(
      self.client.clone(),
      self.config.contact.clone(),
    )));
  }

  fn open_catalog(&mut self, category: Option<String>) {
    self.views.push(Box::new(CatalogView::new(
      self.client.clone(),
      category,
      self.config.contact.whatsapp_number.clone(),
    )));
  }

  /// Switch language and remember the choice for the next launch
  fn toggle_language(&mut self) {
    self.lang = self.lang.toggle();
    info!(lang = self.lang.code(), "language changed");
    if let Err(e) = self.prefs.set_language(self.lang) {
      warn!(error = %e, "failed to save language preference");
    }
  }

  fn draw(&mut self, frame: &mut Frame) {
    let (header, content, footer) = ui::layout(frame.area());
    let lang = self.lang;
    let title = self.config.header_title(lang);

    let Some(view) = self.views.last_mut() else {
      return;
    };

    draw_header(frame, header, &title, view.notice(lang), &view.shortcuts(lang));
    view.render(frame, content, lang);
    draw_footer(frame, footer, &view.breadcrumbs(lang));

    self.command.render_overlay(frame, content, lang);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{CacheConfig, ContactConfig, DataConfig, StoreConfig};
  use crate::db::Database;
  use std::sync::Arc;

  fn app(category: Option<&str>) -> App {
    let config = Config {
      store: StoreConfig::default(),
      data: DataConfig {
        base_url: "http://127.0.0.1:9/".to_string(),
        collections: "collections.json".to_string(),
        products: "products.json".to_string(),
        testimonials: "testimonials.json".to_string(),
        timeout_secs: 1,
      },
      default_lang: Lang::En,
      contact: ContactConfig::default(),
      cache: CacheConfig {
        offline: true,
        ..CacheConfig::default()
      },
    };
    let db = Arc::new(Database::open_in_memory().unwrap());
    let client = StoreClient::new(&config, db.clone()).unwrap();
    App::new(config, client, Preferences::new(db), Lang::En, category.map(String::from))
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn command(app: &mut App, cmd: &str) {
    app.handle_key(key(KeyCode::Char(':')));
    for c in cmd.chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));
  }

  #[test]
  fn test_resolve_language() {
    assert_eq!(resolve_language(Some(Lang::Te), Some(Lang::En), Lang::En), Lang::Te);
    assert_eq!(resolve_language(None, Some(Lang::Te), Lang::En), Lang::Te);
    assert_eq!(resolve_language(None, None, Lang::Te), Lang::Te);
  }

  #[tokio::test]
  async fn test_toggle_persists_language() {
    let mut app = app(None);
    app.handle_key(key(KeyCode::Char('t')));
    assert_eq!(app.lang, Lang::Te);
    assert_eq!(app.prefs.language().unwrap(), Some(Lang::Te));

    command(&mut app, "lang");
    assert_eq!(app.lang, Lang::En);
    assert_eq!(app.prefs.language().unwrap(), Some(Lang::En));
  }

  #[tokio::test]
  async fn test_category_flag_opens_catalog() {
    let mut app = app(Some("rings"));
    assert_eq!(app.views.len(), 2);

    command(&mut app, "home");
    assert_eq!(app.views.len(), 1);

    command(&mut app, "catalog");
    assert_eq!(app.views.len(), 2);
  }

  #[tokio::test]
  async fn test_search_field_swallows_global_keys() {
    let mut app = app(Some("rings"));
    app.handle_key(key(KeyCode::Char('/')));
    app.handle_key(key(KeyCode::Char('t')));
    assert_eq!(app.lang, Lang::En);
  }

  #[tokio::test]
  async fn test_popping_home_quits() {
    let mut app = app(None);
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);
  }

  #[tokio::test]
  async fn test_ctrl_c_quits() {
    let mut app = app(None);
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
  }
}
