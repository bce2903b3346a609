use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::catalog::{label, Label};
use crate::commands::{self, Command};
use crate::store::types::Lang;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Width of the command name column in the suggestion rows
const NAME_COLUMN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
  /// Resolved command name, or the raw lowercased input if nothing matched
  Submitted(String),
  Cancelled,
}

/// `:` prompt for jumping between pages. Every command is listed while the
/// prompt is empty; typing narrows the list and Tab/arrows pick from it.
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
  input: TextInput,
  active: bool,
  selected: usize,
}

impl CommandInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  fn open(&mut self) {
    self.active = true;
    self.input.clear();
    self.selected = 0;
  }

  fn close(&mut self) {
    self.active = false;
    self.input.clear();
    self.selected = 0;
  }

  fn suggestions(&self) -> Vec<&'static Command> {
    commands::get_suggestions(self.input.value())
  }

  /// Move the highlight, wrapping at both ends
  fn cycle(&mut self, forward: bool) {
    let count = self.suggestions().len();
    if count == 0 {
      return;
    }
    self.selected = if forward {
      (self.selected + 1) % count
    } else {
      (self.selected + count - 1) % count
    };
  }

  fn resolve(&self) -> String {
    match self.suggestions().get(self.selected) {
      Some(cmd) => cmd.name.to_string(),
      None => self.input.value().trim().to_lowercase(),
    }
  }

  /// Opens on ':'. While open, every key belongs to the prompt.
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<CommandEvent> {
    if !self.active {
      if key.code == KeyCode::Char(':') {
        self.open();
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Tab | KeyCode::Down => self.cycle(true),
      KeyCode::BackTab | KeyCode::Up => self.cycle(false),
      _ => match self.input.handle_key(key) {
        InputResult::Submitted(_) => {
          let cmd = self.resolve();
          self.close();
          return KeyResult::Event(CommandEvent::Submitted(cmd));
        }
        InputResult::Cancelled => {
          self.close();
          return KeyResult::Event(CommandEvent::Cancelled);
        }
        InputResult::Consumed => self.selected = 0,
        InputResult::NotHandled => {}
      },
    }
    KeyResult::Handled
  }

  fn suggestion_line(cmd: &Command, selected: bool, lang: Lang) -> Line<'static> {
    let row = if selected {
      Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
      Style::default()
    };
    Line::from(vec![
      Span::styled(
        format!("{:<width$}", cmd.name, width = NAME_COLUMN),
        row.fg(Color::Cyan),
      ),
      Span::styled(label(cmd.label, lang), row.fg(Color::Gray)),
    ])
  }

  /// Draw the prompt in the top-left corner of `area`. Rows are sized by
  /// display width, since Telugu labels are wider than their char count.
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect, lang: Lang) {
    if !self.active {
      return;
    }

    let title = format!(" {} ", label(Label::Command, lang));
    let mut lines = vec![Line::from(vec![
      Span::styled(":", Style::default().fg(Color::Yellow)),
      Span::raw(self.input.value().to_string()),
      Span::styled("_", Style::default().fg(Color::Yellow)),
    ])];
    lines.extend(
      self
        .suggestions()
        .into_iter()
        .enumerate()
        .map(|(i, cmd)| Self::suggestion_line(cmd, i == self.selected, lang)),
    );

    let content_width = lines
      .iter()
      .map(Line::width)
      .chain(std::iter::once(Span::raw(title.as_str()).width()))
      .max()
      .unwrap_or(0);
    let width = (content_width as u16 + 4).max(24).min(area.width.saturating_sub(1));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(1));
    let overlay = Rect::new(area.x + 1, area.y + 1, width, height).intersection(area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(title);

    frame.render_widget(Clear, overlay);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
  }
}
