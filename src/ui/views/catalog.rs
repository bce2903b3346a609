use crate::catalog::{self, label, Label};
use crate::query::Query;
use crate::store::cached_client::{CatalogData, StoreClient};
use crate::store::types::{Collection, Lang, Product};
use crate::ui::components::{KeyResult, SearchEvent, SearchInput};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::truncate;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::{empty_message, saved_copy_notice, ProductView};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use std::time::{Duration, Instant};
use tracing::info;

/// Quiet period after the last keystroke before a search runs
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries at least this long are written to the search log
const LOGGED_QUERY_MIN_CHARS: usize = 3;

/// Product grid for one collection, or for every product
pub struct CatalogView {
  client: StoreClient,
  whatsapp: Option<String>,
  category: Option<String>,
  query: Query<CatalogData>,
  list_state: ListState,
  search: SearchInput,
  /// Typed but not yet applied, with the time of the last keystroke
  pending_search: Option<(String, Instant)>,
  applied_search: String,
}

impl CatalogView {
  pub fn new(client: StoreClient, category: Option<String>, whatsapp: Option<String>) -> Self {
    let client_for_query = client.clone();
    let mut query = Query::new(move || {
      let client = client_for_query.clone();
      async move { Ok(client.catalog().await) }
    });

    query.fetch();

    Self {
      client,
      whatsapp,
      category,
      query,
      list_state: ListState::default(),
      search: SearchInput::new(),
      pending_search: None,
      applied_search: String::new(),
    }
  }

  fn all_products(&self) -> &[Product] {
    self
      .query
      .data()
      .map(|d| d.products.data.as_slice())
      .unwrap_or(&[])
  }

  fn collection(&self) -> Option<&Collection> {
    let data = self.query.data()?;
    catalog::find_collection(&data.collections.data, self.category.as_deref()?)
  }

  /// Products for this page after the category filter
  fn pool(&self) -> Vec<Product> {
    match &self.category {
      Some(id) => catalog::products_in_category(self.all_products(), id),
      None => self.all_products().to_vec(),
    }
  }

  /// Products currently listed: the pool, narrowed by the applied search
  fn visible_products(&self) -> Vec<Product> {
    let pool = self.pool();
    if self.applied_search.trim().is_empty() {
      return pool;
    }
    catalog::search(&pool, self.all_products(), &self.applied_search)
      .into_iter()
      .cloned()
      .collect()
  }

  fn apply_search(&mut self, query: String) {
    if query.trim().chars().count() >= LOGGED_QUERY_MIN_CHARS {
      info!(query = %query.trim(), category = ?self.category, "search");
    }
    self.applied_search = query;
    self.pending_search = None;
    self.list_state.select(Some(0));
  }

  fn title(&self, lang: Lang) -> String {
    match self.collection() {
      Some(c) => lang.pick(&c.name_en, &c.name_te).to_string(),
      None => match &self.category {
        // Collection list unavailable, fall back to the raw id
        Some(id) => id.clone(),
        None => label(Label::AllProducts, lang).to_string(),
      },
    }
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect, lang: Lang) {
    let products = self.visible_products();
    ensure_valid_selection(&mut self.list_state, products.len());

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);

    let query = (!self.applied_search.trim().is_empty()).then_some(self.applied_search.as_str());
    let count = if self.query.is_loading() && products.is_empty() {
      label(Label::Loading, lang).to_string()
    } else {
      catalog::item_count_label(products.len(), lang, query)
    };
    frame.render_widget(
      Paragraph::new(format!(" {}", count)).style(Style::default().fg(Color::DarkGray)),
      chunks[0],
    );

    let block = Block::default()
      .title(format!(" {} ", self.title(lang)))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if products.is_empty() {
      let content = if self.query.is_loading() {
        label(Label::Loading, lang)
      } else {
        self
          .query
          .data()
          .and_then(|d| empty_message(&d.products, lang))
          .unwrap_or(label(Label::NoItemsFound, lang))
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, chunks[1]);
      return;
    }

    let title_width = (chunks[1].width as usize).saturating_sub(36).max(10);
    let items: Vec<ListItem> = products
      .iter()
      .map(|p| {
        let price = p
          .price
          .clone()
          .unwrap_or_else(|| label(Label::PriceOnRequest, lang).to_string());
        ListItem::new(Line::from(vec![
          Span::styled(format!("{:<8}", p.id), Style::default().fg(Color::Cyan)),
          Span::raw(" "),
          Span::raw(truncate(lang.pick(&p.title_en, &p.title_te), title_width)),
          Span::raw("  "),
          Span::styled(price, Style::default().fg(Color::Yellow)),
        ]))
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
  }

  fn handle_overlays(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match self.search.handle_key(key) {
      KeyResult::Handled => Some(ViewAction::None),
      KeyResult::Event(SearchEvent::Changed(query)) => {
        if query.is_empty() {
          // Clearing applies at once
          self.apply_search(query);
        } else {
          self.pending_search = Some((query, Instant::now()));
        }
        Some(ViewAction::None)
      }
      KeyResult::Event(SearchEvent::Submitted) => {
        self.apply_search(self.search.query().to_string());
        Some(ViewAction::None)
      }
      KeyResult::NotHandled => None,
    }
  }

  fn handle_navigation(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
        Some(ViewAction::None)
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
        Some(ViewAction::None)
      }
      _ => None,
    }
  }

  fn handle_actions(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Char('r') => {
        self.query.refetch();
        Some(ViewAction::None)
      }
      KeyCode::Char('c') => {
        self.search.clear();
        self.apply_search(String::new());
        Some(ViewAction::None)
      }
      KeyCode::Enter => {
        let idx = self.list_state.selected()?;
        let product = self.visible_products().into_iter().nth(idx)?;
        Some(ViewAction::Push(Box::new(ProductView::new(
          product,
          self.collection().cloned(),
          self.client.clone(),
          self.whatsapp.clone(),
        ))))
      }
      KeyCode::Char('q') | KeyCode::Esc => Some(ViewAction::Pop),
      _ => None,
    }
  }
}

impl View for CatalogView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    self
      .handle_overlays(key)
      .or_else(|| self.handle_navigation(key))
      .or_else(|| self.handle_actions(key))
      .unwrap_or(ViewAction::None)
  }

  fn render(&mut self, frame: &mut Frame, area: Rect, lang: Lang) {
    self.render_list(frame, area, lang);
    self.search.render_overlay(frame, area);
  }

  fn breadcrumbs(&self, lang: Lang) -> Vec<String> {
    let mut trail = catalog::breadcrumbs(self.collection(), lang);
    if self.collection().is_none() {
      trail.push(self.title(lang));
    }
    trail
  }

  fn notice(&self, lang: Lang) -> Option<&'static str> {
    let data = self.query.data()?;
    saved_copy_notice(&data.products, lang).or_else(|| saved_copy_notice(&data.collections, lang))
  }

  fn is_capturing_input(&self) -> bool {
    self.search.is_active()
  }

  fn tick(&mut self, now: Instant) {
    self.query.poll();

    let due = matches!(
      &self.pending_search,
      Some((_, typed_at)) if now.duration_since(*typed_at) >= SEARCH_DEBOUNCE
    );
    if due {
      if let Some((query, _)) = self.pending_search.take() {
        self.apply_search(query);
      }
    }
  }

  fn shortcuts(&self, lang: Lang) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("t", label(Label::LanguageToggle, lang)).with_priority(20),
      ShortcutInfo::new("/", "search").with_priority(30),
      ShortcutInfo::new("c", "clear").with_priority(40),
      ShortcutInfo::new("r", "retry").with_priority(50),
      ShortcutInfo::new("q", "back").with_priority(90),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::CacheResult;
  use crate::config::{CacheConfig, Config, ContactConfig, DataConfig, StoreConfig};
  use crate::db::Database;
  use crossterm::event::KeyModifiers;
  use std::sync::Arc;

  fn product(id: &str, category: &str, title_en: &str) -> Product {
    Product {
      id: id.to_string(),
      category_id: category.to_string(),
      title_en: title_en.to_string(),
      title_te: title_en.to_string(),
      desc_en: String::new(),
      desc_te: String::new(),
      image: String::new(),
      images: Vec::new(),
      price: None,
      specs: None,
      search_tags: None,
    }
  }

  /// A view whose query already holds data, with nothing reachable on the network
  fn view(category: Option<&str>) -> CatalogView {
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
    let client = StoreClient::new(&config, db).unwrap();

    let mut view = CatalogView::new(client, category.map(String::from), None);
    view.query = Query::new(|| async {
      Ok(CatalogData {
        collections: CacheResult::from_network(Vec::new()),
        products: CacheResult::from_network(vec![
          product("R1", "rings", "Gold Ring"),
          product("R2", "rings", "Ruby Ring"),
          product("N1", "necklaces", "Temple Necklace"),
        ]),
      })
    });
    view
  }

  async fn load(view: &mut CatalogView) {
    view.query.fetch();
    tokio::time::sleep(Duration::from_millis(20)).await;
    view.tick(Instant::now());
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn ids(view: &CatalogView) -> Vec<String> {
    view.visible_products().into_iter().map(|p| p.id).collect()
  }

  #[tokio::test]
  async fn test_category_filter() {
    let mut view = view(Some("rings"));
    load(&mut view).await;
    assert_eq!(ids(&view), vec!["R1", "R2"]);
  }

  #[tokio::test]
  async fn test_search_waits_for_debounce() {
    let mut view = view(None);
    load(&mut view).await;

    view.handle_key(key(KeyCode::Char('/')));
    for c in "temple".chars() {
      view.handle_key(key(KeyCode::Char(c)));
    }
    assert!(view.is_capturing_input());

    let typed_at = Instant::now();
    view.tick(typed_at);
    assert_eq!(ids(&view).len(), 3);

    view.tick(typed_at + SEARCH_DEBOUNCE);
    assert_eq!(ids(&view), vec!["N1"]);
  }

  #[tokio::test]
  async fn test_enter_applies_search_immediately() {
    let mut view = view(Some("rings"));
    load(&mut view).await;

    view.handle_key(key(KeyCode::Char('/')));
    for c in "ruby".chars() {
      view.handle_key(key(KeyCode::Char(c)));
    }
    view.handle_key(key(KeyCode::Enter));

    assert!(!view.is_capturing_input());
    assert_eq!(ids(&view), vec!["R2"]);

    view.handle_key(key(KeyCode::Char('c')));
    assert_eq!(ids(&view), vec!["R1", "R2"]);
  }

  #[tokio::test]
  async fn test_empty_category_lists_nothing() {
    let mut view = view(Some("bangles"));
    load(&mut view).await;
    assert!(ids(&view).is_empty());
    assert_eq!(view.breadcrumbs(Lang::En), vec!["Home", "Collections", "bangles"]);
  }
}
