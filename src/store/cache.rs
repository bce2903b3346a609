//! Caching implementations for catalog types.

use crate::cache::Cacheable;

use super::types::{Collection, Product, Testimonial};

impl Cacheable for Collection {
  fn record_id(&self) -> &str {
    &self.gallery_id
  }

  fn record_type() -> &'static str {
    "collection"
  }
}

impl Cacheable for Product {
  fn record_id(&self) -> &str {
    &self.id
  }

  fn record_type() -> &'static str {
    "product"
  }
}

impl Cacheable for Testimonial {
  fn record_id(&self) -> &str {
    // Testimonials have no identifier field
    &self.name
  }

  fn record_type() -> &'static str {
    "testimonial"
  }
}
