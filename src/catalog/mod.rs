//! Pure catalog logic: filtering, search and display helpers.

pub mod i18n;
pub mod media;

use crate::cache::Cacheable;
use crate::store::types::{Collection, Lang, Product};

pub use i18n::{label, Label};

/// Products belonging to a collection (exact `category_id` match)
pub fn products_in_category(products: &[Product], category_id: &str) -> Vec<Product> {
  products
    .iter()
    .filter(|p| p.category_id == category_id)
    .cloned()
    .collect()
}

/// Find a record by its identifier
pub fn find_by_id<'a, T: Cacheable>(records: &'a [T], id: &str) -> Option<&'a T> {
  records.iter().find(|r| r.record_id() == id)
}

pub fn find_collection<'a>(
  collections: &'a [Collection],
  gallery_id: &str,
) -> Option<&'a Collection> {
  find_by_id(collections, gallery_id)
}

pub fn find_product<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
  find_by_id(products, id)
}

/// Search products by title (either language), id or tags.
///
/// Searches within `pool` when it is non-empty (a category view), otherwise
/// within `all`. An empty query returns the pool unchanged.
pub fn search<'a>(pool: &'a [Product], all: &'a [Product], query: &str) -> Vec<&'a Product> {
  let pool = if pool.is_empty() { all } else { pool };
  let query = query.trim().to_lowercase();

  if query.is_empty() {
    return pool.iter().collect();
  }

  pool
    .iter()
    .filter(|item| {
      item.title_en.to_lowercase().contains(&query)
        || item.title_te.to_lowercase().contains(&query)
        || item.id.to_lowercase().contains(&query)
        || item
          .search_tags
          .as_deref()
          .unwrap_or("")
          .to_lowercase()
          .contains(&query)
    })
    .collect()
}

/// Navigation trail: Home / Collections [/ category]
pub fn breadcrumbs(collection: Option<&Collection>, lang: Lang) -> Vec<String> {
  let mut trail = vec![
    label(Label::Home, lang).to_string(),
    label(Label::Collections, lang).to_string(),
  ];
  if let Some(c) = collection {
    trail.push(lang.pick(&c.name_en, &c.name_te).to_string());
  }
  trail
}

/// "N Items Found", with the active search query appended
pub fn item_count_label(count: usize, lang: Lang, query: Option<&str>) -> String {
  let base = match lang {
    Lang::En => format!("{} Items Found", count),
    Lang::Te => format!("{} వస్తువులు కనుగొనబడ్డాయి", count),
  };

  match query.map(str::trim).filter(|q| !q.is_empty()) {
    Some(q) => format!("{} (filtered for \"{}\")", base, q),
    None => base,
  }
}
