use std::time::{Duration, Instant};

/// Time between automatic slides
pub const AUTO_SLIDE_INTERVAL: Duration = Duration::from_secs(5);

/// How many collection cards fit side by side at a given width (columns)
pub fn visible_count(width: u16) -> usize {
  if width <= 80 {
    1
  } else if width <= 120 {
    2
  } else {
    3
  }
}

/// Horizontal collections slider on the home page
#[derive(Debug, Clone)]
pub struct Slider {
  index: usize,
  total: usize,
  paused: bool,
  last_advance: Instant,
}

impl Slider {
  pub fn new(total: usize) -> Self {
    Self {
      index: 0,
      total,
      paused: false,
      last_advance: Instant::now(),
    }
  }

  /// First visible card
  pub fn index(&self) -> usize {
    self.index
  }

  pub fn set_total(&mut self, total: usize) {
    self.total = total;
    self.index = 0;
  }

  /// Arrows are hidden when every card already fits
  pub fn has_arrows(&self, width: u16) -> bool {
    self.total > visible_count(width)
  }

  /// Index of the last card that can start a full frame
  fn max_index(&self, width: u16) -> usize {
    self.total.saturating_sub(visible_count(width))
  }

  pub fn next(&mut self, width: u16) {
    if !self.has_arrows(width) {
      self.index = 0;
      return;
    }
    self.index = if self.index >= self.max_index(width) {
      0
    } else {
      self.index + 1
    };
    self.last_advance = Instant::now();
  }

  pub fn prev(&mut self, width: u16) {
    if !self.has_arrows(width) {
      self.index = 0;
      return;
    }
    self.index = if self.index == 0 {
      self.max_index(width)
    } else {
      self.index - 1
    };
    self.last_advance = Instant::now();
  }

  /// Range of cards to draw
  pub fn visible_range(&self, width: u16) -> std::ops::Range<usize> {
    let start = if self.has_arrows(width) {
      self.index.min(self.max_index(width))
    } else {
      0
    };
    start..(start + visible_count(width)).min(self.total)
  }

  /// Stop auto-advance while the user is driving the slider
  pub fn set_paused(&mut self, paused: bool) {
    self.paused = paused;
    if !paused {
      self.last_advance = Instant::now();
    }
  }

  /// Terminal was resized
  pub fn reset(&mut self) {
    self.index = 0;
  }

  /// Advance if the auto-slide interval elapsed. Returns true if it moved.
  pub fn tick(&mut self, now: Instant, width: u16) -> bool {
    if self.paused || now.duration_since(self.last_advance) < AUTO_SLIDE_INTERVAL {
      return false;
    }
    let before = self.index;
    self.next(width);
    self.last_advance = now;
    before != self.index
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const MOBILE: u16 = 60;
  const TABLET: u16 = 100;
  const DESKTOP: u16 = 160;

  #[test]
  fn test_visible_count() {
    assert_eq!(visible_count(MOBILE), 1);
    assert_eq!(visible_count(80), 1);
    assert_eq!(visible_count(TABLET), 2);
    assert_eq!(visible_count(120), 2);
    assert_eq!(visible_count(DESKTOP), 3);
  }

  #[test]
  fn test_next_wraps_after_last_full_frame() {
    let mut s = Slider::new(5);
    s.next(DESKTOP);
    s.next(DESKTOP);
    assert_eq!(s.index(), 2);
    s.next(DESKTOP);
    assert_eq!(s.index(), 0);
  }

  #[test]
  fn test_prev_wraps_to_last_full_frame() {
    let mut s = Slider::new(5);
    s.prev(DESKTOP);
    assert_eq!(s.index(), 2);
    s.prev(DESKTOP);
    assert_eq!(s.index(), 1);
  }

  #[test]
  fn test_few_items_hide_arrows() {
    let mut s = Slider::new(3);
    assert!(!s.has_arrows(DESKTOP));
    assert!(s.has_arrows(MOBILE));
    s.next(DESKTOP);
    assert_eq!(s.index(), 0);
    assert_eq!(s.visible_range(DESKTOP), 0..3);
  }

  #[test]
  fn test_visible_range_follows_index() {
    let mut s = Slider::new(4);
    s.next(TABLET);
    assert_eq!(s.visible_range(TABLET), 1..3);
    assert_eq!(s.visible_range(MOBILE), 1..2);
  }

  #[test]
  fn test_tick_respects_interval_and_pause() {
    let mut s = Slider::new(4);
    let start = s.last_advance;

    assert!(!s.tick(start + Duration::from_secs(1), MOBILE));
    assert!(s.tick(start + AUTO_SLIDE_INTERVAL, MOBILE));
    assert_eq!(s.index(), 1);

    s.set_paused(true);
    assert!(!s.tick(start + Duration::from_secs(60), MOBILE));
  }

  #[test]
  fn test_reset_and_set_total() {
    let mut s = Slider::new(4);
    s.next(MOBILE);
    s.reset();
    assert_eq!(s.index(), 0);

    s.next(MOBILE);
    s.set_total(2);
    assert_eq!(s.index(), 0);
  }
}
