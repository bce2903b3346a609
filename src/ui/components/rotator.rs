use std::time::{Duration, Instant};

/// Time each testimonial stays on screen
pub const ROTATE_INTERVAL: Duration = Duration::from_secs(5);

/// Cycles through testimonials one at a time
#[derive(Debug, Clone)]
pub struct Rotator {
  current: usize,
  total: usize,
  last_switch: Instant,
}

impl Rotator {
  pub fn new(total: usize) -> Self {
    Self {
      current: 0,
      total,
      last_switch: Instant::now(),
    }
  }

  pub fn current(&self) -> usize {
    self.current
  }

  pub fn set_total(&mut self, total: usize) {
    self.total = total;
    self.current = 0;
    self.last_switch = Instant::now();
  }

  /// A single testimonial just stays put
  pub fn is_rotating(&self) -> bool {
    self.total > 1
  }

  /// Switch to the next item if the interval elapsed. Returns true on switch.
  pub fn tick(&mut self, now: Instant) -> bool {
    if !self.is_rotating() || now.duration_since(self.last_switch) < ROTATE_INTERVAL {
      return false;
    }
    self.current = (self.current + 1) % self.total;
    self.last_switch = now;
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rotates_and_wraps() {
    let mut r = Rotator::new(2);
    let start = r.last_switch;

    assert!(!r.tick(start + Duration::from_secs(2)));
    assert!(r.tick(start + ROTATE_INTERVAL));
    assert_eq!(r.current(), 1);
    assert!(r.tick(start + ROTATE_INTERVAL * 2));
    assert_eq!(r.current(), 0);
  }

  #[test]
  fn test_single_item_does_not_rotate() {
    let mut r = Rotator::new(1);
    assert!(!r.is_rotating());
    assert!(!r.tick(Instant::now() + Duration::from_secs(60)));
    assert_eq!(r.current(), 0);
  }
}
