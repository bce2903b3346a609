use serde::{Deserialize, Deserializer, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
  #[default]
  En,
  Te,
}

impl Lang {
  pub fn toggle(self) -> Self {
    match self {
      Lang::En => Lang::Te,
      Lang::Te => Lang::En,
    }
  }

  pub fn code(self) -> &'static str {
    match self {
      Lang::En => "en",
      Lang::Te => "te",
    }
  }

  /// Parse a language code ("en" / "te"), case-insensitive
  pub fn from_code(code: &str) -> Option<Self> {
    match code.trim().to_lowercase().as_str() {
      "en" => Some(Lang::En),
      "te" => Some(Lang::Te),
      _ => None,
    }
  }

  /// Pick the variant of a bilingual field for this language
  pub fn pick<'a>(self, en: &'a str, te: &'a str) -> &'a str {
    match self {
      Lang::En => en,
      Lang::Te => te,
    }
  }
}

/// A product collection (gallery) shown on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
  #[serde(deserialize_with = "string_or_number")]
  pub gallery_id: String,
  #[serde(default)]
  pub name_en: String,
  #[serde(default)]
  pub name_te: String,
  #[serde(default)]
  pub image: String,
}

/// A catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  #[serde(deserialize_with = "string_or_number")]
  pub id: String,
  #[serde(default, deserialize_with = "string_or_number")]
  pub category_id: String,
  #[serde(default)]
  pub title_en: String,
  #[serde(default)]
  pub title_te: String,
  #[serde(default)]
  pub desc_en: String,
  #[serde(default)]
  pub desc_te: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub images: Vec<String>,
  /// Missing, null or blank means "price on request"
  #[serde(default, deserialize_with = "optional_string_or_number")]
  pub price: Option<String>,
  pub specs: Option<Specs>,
  pub search_tags: Option<String>,
}

/// Physical details of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specs {
  #[serde(default, deserialize_with = "optional_string_or_number")]
  pub purity: Option<String>,
  #[serde(default, deserialize_with = "optional_string_or_number")]
  pub weight: Option<String>,
  pub stones_en: Option<String>,
  pub stones_te: Option<String>,
}

/// Customer review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub text: String,
  #[serde(default, deserialize_with = "star_rating")]
  pub rating: u8,
}

/// A JSON scalar that may arrive as text or as a number
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
  Str(String),
  Int(i64),
  Float(f64),
}

impl Scalar {
  fn into_string(self) -> String {
    match self {
      Scalar::Str(s) => s,
      Scalar::Int(n) => n.to_string(),
      Scalar::Float(f) => f.to_string(),
    }
  }
}

/// Accept both `"12"` and `12` for identifier fields, normalizing to a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Scalar::deserialize(deserializer)?.into_string())
}

/// Like `string_or_number`, but null and blank text read as absent.
fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(
    Option::<Scalar>::deserialize(deserializer)?
      .map(Scalar::into_string)
      .filter(|s| !s.trim().is_empty()),
  )
}

/// Star count from `4`, `4.5` or `"4"`, rounded and kept within 0..=5.
/// Anything unreadable counts as no stars.
fn star_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
  D: Deserializer<'de>,
{
  let value = match Option::<Scalar>::deserialize(deserializer)? {
    Some(Scalar::Int(n)) => n as f64,
    Some(Scalar::Float(f)) => f,
    Some(Scalar::Str(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
    None => 0.0,
  };
  Ok(value.round().clamp(0.0, 5.0) as u8)
}
