use crate::cache::CacheResult;
use crate::catalog::media::stars;
use crate::catalog::{label, Label};
use crate::config::ContactConfig;
use crate::query::Query;
use crate::store::cached_client::StoreClient;
use crate::store::types::{Collection, Lang, Testimonial};
use crate::ui::components::{visible_count, Rotator, Slider};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::truncate;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::{empty_message, saved_copy_notice, CatalogView};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use std::time::Instant;

/// Collections and testimonials loaded together for the home page
#[derive(Debug, Clone)]
struct HomeData {
  collections: CacheResult<Vec<Collection>>,
  testimonials: CacheResult<Vec<Testimonial>>,
}

/// Which part of the home page has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
  Slider,
  List,
}

/// Landing page: collections slider, collection list and a rotating testimonial
pub struct HomeView {
  client: StoreClient,
  contact: ContactConfig,
  query: Query<HomeData>,
  slider: Slider,
  rotator: Rotator,
  list_state: ListState,
  focus: Focus,
  width: u16,
}

impl HomeView {
  pub fn new(client: StoreClient, contact: ContactConfig) -> Self {
    let client_for_query = client.clone();
    let mut query = Query::new(move || {
      let client = client_for_query.clone();
      async move {
        let (collections, testimonials) = tokio::join!(client.collections(), client.testimonials());
        Ok(HomeData {
          collections,
          testimonials,
        })
      }
    });

    query.fetch();

    Self {
      client,
      contact,
      query,
      slider: Slider::new(0),
      rotator: Rotator::new(0),
      list_state: ListState::default(),
      focus: Focus::List,
      width: 0,
    }
  }

  fn collections(&self) -> &[Collection] {
    self
      .query
      .data()
      .map(|d| d.collections.data.as_slice())
      .unwrap_or(&[])
  }

  fn testimonials(&self) -> &[Testimonial] {
    self
      .query
      .data()
      .map(|d| d.testimonials.data.as_slice())
      .unwrap_or(&[])
  }

  fn open_collection(&self, index: usize) -> Option<ViewAction> {
    let collection = self.collections().get(index)?;
    Some(ViewAction::Push(Box::new(CatalogView::new(
      self.client.clone(),
      Some(collection.gallery_id.clone()),
      self.contact.whatsapp_number.clone(),
    ))))
  }

  fn set_focus(&mut self, focus: Focus) {
    self.focus = focus;
    self.slider.set_paused(focus == Focus::Slider);
  }

  fn render_slider(&self, frame: &mut Frame, area: Rect, lang: Lang) {
    let border = if self.focus == Focus::Slider {
      Color::Yellow
    } else {
      Color::Blue
    };
    let block = Block::default()
      .title(format!(" {} ", label(Label::Collections, lang)))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let collections = self.collections();
    if collections.is_empty() || inner.width < 4 {
      return;
    }

    let arrows = self.slider.has_arrows(area.width);
    let cards_area = if arrows {
      let chunks = Layout::horizontal([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(2),
      ])
      .split(inner);
      frame.render_widget(Paragraph::new("◀"), chunks[0]);
      frame.render_widget(Paragraph::new("▶").alignment(Alignment::Right), chunks[2]);
      chunks[1]
    } else {
      inner
    };

    let range = self.slider.visible_range(area.width);
    let slots = visible_count(area.width) as u32;
    let cards =
      Layout::horizontal(vec![Constraint::Ratio(1, slots); slots as usize]).split(cards_area);

    for (slot, collection) in collections[range].iter().enumerate() {
      let name = lang.pick(&collection.name_en, &collection.name_te);
      let card_width = cards[slot].width.saturating_sub(2) as usize;
      let text = vec![
        Line::from(Span::styled(
          truncate(name, card_width),
          Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(
          label(Label::ExploreCollection, lang),
          Style::default().fg(Color::DarkGray),
        )),
      ];
      let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
      frame.render_widget(card, cards[slot]);
    }
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect, lang: Lang) {
    let len = self.collections().len();
    ensure_valid_selection(&mut self.list_state, len);

    let border = if self.focus == Focus::List {
      Color::Yellow
    } else {
      Color::Blue
    };
    let title = if self.query.is_loading() {
      format!(" {} ({}) ", label(Label::Collections, lang), label(Label::Loading, lang))
    } else {
      format!(" {} ({}) ", label(Label::Collections, lang), len)
    };
    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(border));

    if len == 0 {
      let content = if self.query.is_loading() {
        label(Label::Loading, lang)
      } else {
        self
          .query
          .data()
          .and_then(|d| empty_message(&d.collections, lang))
          .unwrap_or(label(Label::NoItemsFound, lang))
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = self
      .collections()
      .iter()
      .map(|c| {
        ListItem::new(Line::from(vec![
          Span::styled(format!("{:<14}", c.gallery_id), Style::default().fg(Color::Cyan)),
          Span::raw(" "),
          Span::raw(lang.pick(&c.name_en, &c.name_te).to_string()),
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

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }

  fn render_testimonial(&self, frame: &mut Frame, area: Rect, lang: Lang) {
    let block = Block::default()
      .title(format!(" {} ", label(Label::Testimonials, lang)))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let Some(t) = self.testimonials().get(self.rotator.current()) else {
      frame.render_widget(block, area);
      return;
    };

    let text = vec![
      Line::from(Span::styled(stars(t), Style::default().fg(Color::Yellow))),
      Line::from(format!("\"{}\"", t.text)),
      Line::from(Span::styled(
        format!("- {}", t.name),
        Style::default().fg(Color::DarkGray),
      )),
    ];
    let paragraph = Paragraph::new(text)
      .block(block)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
  }

  fn handle_slider(&mut self, key: KeyEvent) -> Option<ViewAction> {
    if self.focus != Focus::Slider {
      return None;
    }
    match key.code {
      KeyCode::Left | KeyCode::Char('h') => self.slider.prev(self.width),
      KeyCode::Right | KeyCode::Char('l') => self.slider.next(self.width),
      KeyCode::Enter => return self.open_collection(self.slider.index()),
      _ => return None,
    }
    Some(ViewAction::None)
  }

  fn handle_navigation(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Tab | KeyCode::BackTab => {
        let next = match self.focus {
          Focus::Slider => Focus::List,
          Focus::List => Focus::Slider,
        };
        self.set_focus(next);
        Some(ViewAction::None)
      }
      KeyCode::Char('j') | KeyCode::Down if self.focus == Focus::List => {
        self.list_state.select_next();
        Some(ViewAction::None)
      }
      KeyCode::Char('k') | KeyCode::Up if self.focus == Focus::List => {
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
      KeyCode::Char('a') => Some(ViewAction::Push(Box::new(CatalogView::new(
        self.client.clone(),
        None,
        self.contact.whatsapp_number.clone(),
      )))),
      KeyCode::Enter => self
        .list_state
        .selected()
        .and_then(|idx| self.open_collection(idx)),
      KeyCode::Char('q') | KeyCode::Esc => Some(ViewAction::Pop),
      _ => None,
    }
  }
}

impl View for HomeView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    self
      .handle_slider(key)
      .or_else(|| self.handle_navigation(key))
      .or_else(|| self.handle_actions(key))
      .unwrap_or(ViewAction::None)
  }

  fn render(&mut self, frame: &mut Frame, area: Rect, lang: Lang) {
    self.width = area.width;

    let has_testimonials = !self.testimonials().is_empty();
    let contact = self.contact.summary();
    let chunks = Layout::vertical([
      Constraint::Length(6),
      Constraint::Min(3),
      Constraint::Length(if has_testimonials { 6 } else { 0 }),
      Constraint::Length(if contact.is_some() { 1 } else { 0 }),
    ])
    .split(area);

    self.render_slider(frame, chunks[0], lang);
    self.render_list(frame, chunks[1], lang);
    if has_testimonials {
      self.render_testimonial(frame, chunks[2], lang);
    }
    if let Some(contact) = contact {
      frame.render_widget(
        Paragraph::new(contact)
          .alignment(Alignment::Center)
          .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
      );
    }
  }

  fn breadcrumbs(&self, lang: Lang) -> Vec<String> {
    vec![label(Label::Home, lang).to_string()]
  }

  fn notice(&self, lang: Lang) -> Option<&'static str> {
    let data = self.query.data()?;
    saved_copy_notice(&data.collections, lang)
      .or_else(|| saved_copy_notice(&data.testimonials, lang))
  }

  fn tick(&mut self, now: Instant) {
    if self.query.poll() {
      let collections = self.collections().len();
      let testimonials = self.testimonials().len();
      self.slider.set_total(collections);
      self.rotator.set_total(testimonials);
    }
    self.slider.tick(now, self.width);
    self.rotator.tick(now);
  }

  fn on_resize(&mut self, width: u16) {
    self.width = width;
    self.slider.reset();
  }

  fn shortcuts(&self, lang: Lang) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("t", label(Label::LanguageToggle, lang)).with_priority(20),
      ShortcutInfo::new("tab", "slider/list").with_priority(30),
      ShortcutInfo::new("a", label(Label::AllProducts, lang)).with_priority(40),
      ShortcutInfo::new("r", "retry").with_priority(50),
      ShortcutInfo::new("q", "quit").with_priority(90),
    ]
  }
}
