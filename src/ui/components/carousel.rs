/// Minimum horizontal travel (in pointer units) that counts as a swipe
pub const SWIPE_THRESHOLD: i32 = 50;

/// Image carousel state for the product modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
  index: usize,
  total: usize,
  zoomed: bool,
}

impl Carousel {
  pub fn new(total: usize) -> Self {
    Self {
      index: 0,
      total,
      zoomed: false,
    }
  }

  /// Start over with a new set of slides
  pub fn reset(&mut self, total: usize) {
    *self = Self::new(total);
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn total(&self) -> usize {
    self.total
  }

  pub fn is_zoomed(&self) -> bool {
    self.zoomed
  }

  /// Arrows and dots are only shown with more than one slide
  pub fn has_navigation(&self) -> bool {
    self.total > 1
  }

  /// Move by `step` slides, wrapping at both ends. Zoom is dropped first.
  pub fn move_by(&mut self, step: i32) {
    self.zoomed = false;
    if self.total == 0 {
      return;
    }
    let total = self.total as i64;
    self.index = (self.index as i64 + step as i64).rem_euclid(total) as usize;
  }

  /// Jump to a slide (dot click); out-of-range indices clamp to the last slide
  pub fn go_to(&mut self, index: usize) {
    if self.total == 0 {
      return;
    }
    self.index = index.min(self.total - 1);
  }

  /// Handle a completed swipe gesture
  pub fn swipe(&mut self, start_x: i32, end_x: i32) {
    if start_x - end_x > SWIPE_THRESHOLD {
      self.move_by(1);
    } else if end_x - start_x > SWIPE_THRESHOLD {
      self.move_by(-1);
    }
  }

  pub fn toggle_zoom(&mut self) {
    if self.total > 0 {
      self.zoomed = !self.zoomed;
    }
  }

  /// Dot indicator line, e.g. "○●○"
  pub fn dots(&self) -> String {
    (0..self.total)
      .map(|i| if i == self.index { '●' } else { '○' })
      .collect()
  }
}
