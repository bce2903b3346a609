use crate::catalog::{label, Label};
use crate::store::types::Lang;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::prelude::*;
use std::time::Instant;

/// A keyboard shortcut hint for display in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutInfo {
  pub key: &'static str,
  pub label: &'static str,
  pub priority: u8, // Lower = shown first
}

impl ShortcutInfo {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self {
      key,
      label,
      priority: 100,
    }
  }

  pub const fn with_priority(mut self, priority: u8) -> Self {
    self.priority = priority;
    self
  }
}

/// Actions that a view can request in response to user input
pub enum ViewAction {
  /// No action needed
  None,
  /// Push a new view onto the stack
  Push(Box<dyn View>),
  /// Pop current view from stack (go back)
  Pop,
}

/// Trait for view behavior
///
/// Views handle their own input modes (search, carousel keys) and return
/// actions for the App to execute: App → View → Components.
///
/// The display language is owned by the App and passed in on every render,
/// so a toggle takes effect on the next frame without touching view state.
pub trait View {
  /// Handle a key event, returning an action for App to execute
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  /// Render the view to the frame
  fn render(&mut self, frame: &mut Frame, area: Rect, lang: Lang);

  /// Navigation trail shown in the footer
  fn breadcrumbs(&self, lang: Lang) -> Vec<String>;

  /// Short warning for the header, e.g. when showing a saved copy
  fn notice(&self, _lang: Lang) -> Option<&'static str> {
    None
  }

  /// True while a text field owns the keyboard, so global keys like `t`
  /// and `:` go to the field instead
  fn is_capturing_input(&self) -> bool {
    false
  }

  /// Called on each tick to poll queries and drive timers
  fn tick(&mut self, _now: Instant) {}

  /// Terminal size changed
  fn on_resize(&mut self, _width: u16) {}

  /// Mouse input, only used by views with swipeable content
  fn handle_mouse(&mut self, _mouse: MouseEvent) {}

  /// Keyboard shortcuts for the header
  fn shortcuts(&self, lang: Lang) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("t", label(Label::LanguageToggle, lang)).with_priority(20),
      ShortcutInfo::new("q", "back").with_priority(90),
    ]
  }
}
