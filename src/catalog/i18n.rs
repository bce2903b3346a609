//! Bilingual UI labels.

use crate::store::types::Lang;

/// Fixed UI strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
  Home,
  Collections,
  AllProducts,
  ExploreCollection,
  ViewDetails,
  NoItemsFound,
  PriceOnRequest,
  Purity,
  Weight,
  Stones,
  Enquire,
  Testimonials,
  LanguageToggle,
  Loading,
  ShowingSavedCopy,
  Command,
  Quit,
}

/// Look up a label in the given language
pub fn label(label: Label, lang: Lang) -> &'static str {
  use Label::*;

  match (label, lang) {
    (Home, Lang::En) => "Home",
    (Home, Lang::Te) => "హోమ్",
    (Collections, Lang::En) => "Collections",
    (Collections, Lang::Te) => "సేకరణలు",
    (AllProducts, Lang::En) => "All Products",
    (AllProducts, Lang::Te) => "అన్ని ఉత్పత్తులు",
    (ExploreCollection, Lang::En) => "Explore Collection",
    (ExploreCollection, Lang::Te) => "సేకరణను అన్వేషించండి",
    (ViewDetails, Lang::En) => "View Details",
    (ViewDetails, Lang::Te) => "వివరాలు చూడండి",
    (NoItemsFound, Lang::En) => "No Items Found in this Collection",
    (NoItemsFound, Lang::Te) => "ఈ సేకరణలో వస్తువులు ఏవీ లేవు",
    (PriceOnRequest, Lang::En) => "Price on Request",
    (PriceOnRequest, Lang::Te) => "ధర కోసం సంప్రదించండి",
    (Purity, Lang::En) => "PURITY",
    (Purity, Lang::Te) => "ప్యూరిటీ",
    (Weight, Lang::En) => "WEIGHT",
    (Weight, Lang::Te) => "బరువు",
    (Stones, Lang::En) => "STONES",
    (Stones, Lang::Te) => "రాళ్ళు (Stones)",
    (Enquire, Lang::En) => "Enquire on WhatsApp",
    (Enquire, Lang::Te) => "వాట్సాప్‌లో విచారించండి",
    (Testimonials, Lang::En) => "What our customers say",
    (Testimonials, Lang::Te) => "మా కస్టమర్లు ఏమంటున్నారు",
    // The toggle names the language you would switch to
    (LanguageToggle, Lang::En) => "తెలుగు",
    (LanguageToggle, Lang::Te) => "English",
    (Loading, Lang::En) => "Loading...",
    (Loading, Lang::Te) => "లోడ్ అవుతోంది...",
    (ShowingSavedCopy, Lang::En) => "offline, showing saved copy",
    (ShowingSavedCopy, Lang::Te) => "ఆఫ్‌లైన్, సేవ్ చేసిన కాపీ",
    (Command, Lang::En) => "Command",
    (Command, Lang::Te) => "ఆదేశం",
    (Quit, Lang::En) => "Quit",
    (Quit, Lang::Te) => "నిష్క్రమించండి",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_labels_differ_by_language() {
    assert_eq!(label(Label::ViewDetails, Lang::En), "View Details");
    assert_eq!(label(Label::ViewDetails, Lang::Te), "వివరాలు చూడండి");
  }

  #[test]
  fn test_toggle_label_names_other_language() {
    assert_eq!(label(Label::LanguageToggle, Lang::En), "తెలుగు");
    assert_eq!(label(Label::LanguageToggle, Lang::Te), "English");
  }
}
