//! Product images, specs and outbound links.

use url::Url;

use super::i18n::{label, Label};
use crate::store::types::{Lang, Product, Testimonial};

/// Images to show in the product carousel: the gallery if present, else the
/// single cover image.
pub fn image_list(product: &Product) -> Vec<String> {
  if !product.images.is_empty() {
    product.images.clone()
  } else if !product.image.is_empty() {
    vec![product.image.clone()]
  } else {
    Vec::new()
  }
}

/// Optimized variants of an image, published next to the original
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureSources {
  pub avif: String,
  pub webp: String,
  pub original: String,
}

/// "Products_Images/gold_ring.jpg" -> .avif / .webp siblings
pub fn picture_sources(image_path: &str) -> PictureSources {
  let file_name = image_path.rfind('/').map_or(image_path, |i| &image_path[i + 1..]);
  let stem = match file_name.rfind('.') {
    Some(dot) if dot > 0 => &image_path[..image_path.len() - (file_name.len() - dot)],
    _ => image_path,
  };

  PictureSources {
    avif: format!("{}.avif", stem),
    webp: format!("{}.webp", stem),
    original: image_path.to_string(),
  }
}

/// One label/value row of the specs grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
  pub label: &'static str,
  pub value: String,
  /// Spans both grid columns
  pub full_row: bool,
}

/// Specs grid rows. Purity and weight always appear (with defaults); stones
/// only when present and not "none". Products without specs get no grid.
pub fn spec_rows(product: &Product, lang: Lang) -> Vec<SpecRow> {
  let specs = match &product.specs {
    Some(specs) => specs,
    None => return Vec::new(),
  };

  let mut rows = vec![
    SpecRow {
      label: label(Label::Purity, lang),
      value: specs.purity.clone().unwrap_or_else(|| "22K".to_string()),
      full_row: false,
    },
    SpecRow {
      label: label(Label::Weight, lang),
      value: specs.weight.clone().unwrap_or_else(|| "N/A".to_string()),
      full_row: false,
    },
  ];

  let stones = match lang {
    Lang::En => specs.stones_en.as_deref(),
    Lang::Te => specs.stones_te.as_deref(),
  };
  if let Some(stones) = stones.filter(|s| !s.trim().is_empty() && !s.eq_ignore_ascii_case("none")) {
    rows.push(SpecRow {
      label: label(Label::Stones, lang),
      value: stones.to_string(),
      full_row: true,
    });
  }

  rows
}

/// WhatsApp enquiry link for a product. The message is always English so the
/// shop sees a consistent format.
pub fn enquiry_link(whatsapp_number: &str, product: &Product) -> Option<Url> {
  let number = whatsapp_number.trim().trim_start_matches('+');
  let mut url = Url::parse("https://wa.me/").ok()?.join(number).ok()?;
  let message = format!("Enquiry for {} (ID: {})", product.title_en, product.id);
  url.query_pairs_mut().append_pair("text", &message);
  Some(url)
}

/// Five-star rating string
pub fn stars(testimonial: &Testimonial) -> String {
  let filled = testimonial.rating.min(5) as usize;
  format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
