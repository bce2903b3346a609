use crate::cache::CacheResult;
use crate::catalog::media::{enquiry_link, image_list, picture_sources, spec_rows};
use crate::catalog::{self, label, Label};
use crate::query::Query;
use crate::store::cached_client::StoreClient;
use crate::store::types::{Collection, Lang, Product};
use crate::ui::components::Carousel;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::saved_copy_notice;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::time::Instant;

/// Approximate pixel width of a terminal cell, so drags compare against the
/// carousel's pixel swipe threshold
const CELL_WIDTH_PX: i32 = 8;

/// Product detail page: image carousel, specs and enquiry link
pub struct ProductView {
  product: Product,
  collection: Option<Collection>,
  whatsapp: Option<String>,
  carousel: Carousel,
  /// Only started by a retry
  refresh: Query<CacheResult<Vec<Product>>>,
  drag_start: Option<u16>,
}

impl ProductView {
  pub fn new(
    product: Product,
    collection: Option<Collection>,
    client: StoreClient,
    whatsapp: Option<String>,
  ) -> Self {
    let carousel = Carousel::new(image_list(&product).len());
    let refresh = Query::new(move || {
      let client = client.clone();
      async move { Ok(client.products().await) }
    });

    Self {
      product,
      collection,
      whatsapp,
      carousel,
      refresh,
      drag_start: None,
    }
  }

  /// Pick up the refreshed copy of this product, if it still exists
  fn apply_refresh(&mut self) {
    let Some(result) = self.refresh.data() else {
      return;
    };
    if let Some(updated) = catalog::find_product(&result.data, &self.product.id) {
      let updated = updated.clone();
      if image_list(&updated) != image_list(&self.product) {
        self.carousel.reset(image_list(&updated).len());
      }
      self.product = updated;
    }
  }

  fn render_images(&self, frame: &mut Frame, area: Rect) {
    let images = image_list(&self.product);
    let title = if self.carousel.is_zoomed() {
      " Image (zoom) ".to_string()
    } else {
      format!(" Image {}/{} ", self.carousel.index() + 1, self.carousel.total().max(1))
    };
    let block = Block::default()
      .title(title)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let Some(current) = images.get(self.carousel.index()) else {
      frame.render_widget(block, area);
      return;
    };

    let sources = picture_sources(current);
    let mut lines = vec![
      Line::from(Span::styled(sources.original.clone(), Style::default().bold())),
      Line::from(Span::styled(
        format!("avif  {}", sources.avif),
        Style::default().fg(Color::DarkGray),
      )),
      Line::from(Span::styled(
        format!("webp  {}", sources.webp),
        Style::default().fg(Color::DarkGray),
      )),
    ];

    if self.carousel.has_navigation() {
      lines.push(Line::raw(""));
      lines.push(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::Cyan)),
        Span::styled(self.carousel.dots(), Style::default().fg(Color::Yellow)),
        Span::styled(" ▶", Style::default().fg(Color::Cyan)),
      ]));
    }

    let paragraph = Paragraph::new(lines)
      .block(block)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
  }

  fn render_details(&self, frame: &mut Frame, area: Rect, lang: Lang) {
    let p = &self.product;
    let price = p
      .price
      .clone()
      .unwrap_or_else(|| label(Label::PriceOnRequest, lang).to_string());

    let mut lines = vec![
      Line::from(Span::styled(
        lang.pick(&p.title_en, &p.title_te).to_string(),
        Style::default().fg(Color::Yellow).bold(),
      )),
      Line::from(Span::styled(price, Style::default().fg(Color::Cyan))),
      Line::raw(""),
      Line::raw(lang.pick(&p.desc_en, &p.desc_te).to_string()),
    ];

    let rows = spec_rows(p, lang);
    if !rows.is_empty() {
      lines.push(Line::raw(""));
      // Two specs per line; a full-row spec gets a line of its own
      let mut pending: Vec<Span> = Vec::new();
      for row in rows {
        let spans = vec![
          Span::styled(format!("{}: ", row.label), Style::default().fg(Color::DarkGray)),
          Span::raw(format!("{:<12}", row.value)),
        ];
        if row.full_row {
          if !pending.is_empty() {
            lines.push(Line::from(std::mem::take(&mut pending)));
          }
          lines.push(Line::from(spans));
        } else {
          pending.extend(spans);
          if pending.len() == 4 {
            lines.push(Line::from(std::mem::take(&mut pending)));
          }
        }
      }
      if !pending.is_empty() {
        lines.push(Line::from(pending));
      }
    }

    if let Some(link) = self
      .whatsapp
      .as_deref()
      .and_then(|number| enquiry_link(number, p))
    {
      lines.push(Line::raw(""));
      lines.push(Line::from(Span::styled(
        label(Label::Enquire, lang),
        Style::default().fg(Color::Green).bold(),
      )));
      lines.push(Line::from(Span::styled(
        link.to_string(),
        Style::default().fg(Color::Green),
      )));
    }

    let block = Block::default()
      .title(format!(" {} ", p.id))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));
    let paragraph = Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
  }
}

impl View for ProductView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Left | KeyCode::Char('h') => self.carousel.move_by(-1),
      KeyCode::Right | KeyCode::Char('l') => self.carousel.move_by(1),
      KeyCode::Char(c @ '1'..='9') => {
        self.carousel.go_to(c as usize - '1' as usize);
      }
      KeyCode::Char('z') | KeyCode::Enter => self.carousel.toggle_zoom(),
      KeyCode::Char('r') => self.refresh.refetch(),
      KeyCode::Esc if self.carousel.is_zoomed() => self.carousel.toggle_zoom(),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn handle_mouse(&mut self, mouse: MouseEvent) {
    match mouse.kind {
      MouseEventKind::Down(MouseButton::Left) => self.drag_start = Some(mouse.column),
      MouseEventKind::Up(MouseButton::Left) => {
        if let Some(start) = self.drag_start.take() {
          self.carousel.swipe(
            start as i32 * CELL_WIDTH_PX,
            mouse.column as i32 * CELL_WIDTH_PX,
          );
        }
      }
      _ => {}
    }
  }

  fn render(&mut self, frame: &mut Frame, area: Rect, lang: Lang) {
    if self.carousel.is_zoomed() {
      self.render_images(frame, area);
      return;
    }

    let chunks = if area.width > 80 {
      Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area)
    } else {
      Layout::vertical([Constraint::Length(8), Constraint::Min(4)]).split(area)
    };
    self.render_images(frame, chunks[0]);
    self.render_details(frame, chunks[1], lang);
  }

  fn breadcrumbs(&self, lang: Lang) -> Vec<String> {
    let mut trail = catalog::breadcrumbs(self.collection.as_ref(), lang);
    trail.push(
      lang
        .pick(&self.product.title_en, &self.product.title_te)
        .to_string(),
    );
    trail
  }

  fn notice(&self, lang: Lang) -> Option<&'static str> {
    saved_copy_notice(self.refresh.data()?, lang)
  }

  fn tick(&mut self, _now: Instant) {
    if self.refresh.poll() {
      self.apply_refresh();
    }
  }

  fn shortcuts(&self, lang: Lang) -> Vec<ShortcutInfo> {
    let mut shortcuts = vec![
      ShortcutInfo::new("t", label(Label::LanguageToggle, lang)).with_priority(20),
      ShortcutInfo::new("z", "zoom").with_priority(40),
      ShortcutInfo::new("r", "retry").with_priority(50),
      ShortcutInfo::new("q", "back").with_priority(90),
    ];
    if self.carousel.has_navigation() {
      shortcuts.push(ShortcutInfo::new("←/→", "image").with_priority(30));
    }
    shortcuts
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{CacheConfig, Config, ContactConfig, DataConfig, StoreConfig};
  use crate::db::Database;
  use crossterm::event::KeyModifiers;
  use std::sync::Arc;

  fn client() -> StoreClient {
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
    StoreClient::new(&config, Arc::new(Database::open_in_memory().unwrap())).unwrap()
  }

  fn necklace(images: &[&str]) -> Product {
    Product {
      id: "N1".to_string(),
      category_id: "necklaces".to_string(),
      title_en: "Temple Necklace".to_string(),
      title_te: "టెంపుల్ నెక్లెస్".to_string(),
      desc_en: String::new(),
      desc_te: String::new(),
      image: "cover.jpg".to_string(),
      images: images.iter().map(|s| s.to_string()).collect(),
      price: None,
      specs: None,
      search_tags: None,
    }
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn mouse(kind: MouseEventKind, column: u16) -> MouseEvent {
    MouseEvent {
      kind,
      column,
      row: 0,
      modifiers: KeyModifiers::NONE,
    }
  }

  #[tokio::test]
  async fn test_keys_drive_carousel() {
    let mut view = ProductView::new(necklace(&["a.jpg", "b.jpg", "c.jpg"]), None, client(), None);

    view.handle_key(key(KeyCode::Left));
    assert_eq!(view.carousel.index(), 2);
    view.handle_key(key(KeyCode::Char('2')));
    assert_eq!(view.carousel.index(), 1);

    view.handle_key(key(KeyCode::Char('z')));
    assert!(view.carousel.is_zoomed());
    // Esc leaves zoom before leaving the page
    assert!(matches!(view.handle_key(key(KeyCode::Esc)), ViewAction::None));
    assert!(matches!(view.handle_key(key(KeyCode::Esc)), ViewAction::Pop));
  }

  #[tokio::test]
  async fn test_mouse_drag_swipes() {
    let mut view = ProductView::new(necklace(&["a.jpg", "b.jpg"]), None, client(), None);

    view.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 40));
    view.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 38));
    assert_eq!(view.carousel.index(), 0);

    view.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 40));
    view.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 30));
    assert_eq!(view.carousel.index(), 1);
  }

  #[tokio::test]
  async fn test_breadcrumbs_end_with_title() {
    let view = ProductView::new(necklace(&[]), None, client(), None);
    assert_eq!(
      view.breadcrumbs(Lang::Te),
      vec!["హోమ్", "సేకరణలు", "టెంపుల్ నెక్లెస్"]
    );
    assert_eq!(view.carousel.total(), 1);
  }
}
