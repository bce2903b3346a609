/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated. Counts chars so Telugu titles are never cut mid-codepoint.
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}
