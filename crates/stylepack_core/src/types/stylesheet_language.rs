use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// The syntax a component stylesheet is written in
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StylesheetLanguage {
  #[default]
  Css,
  Scss,
  /// The indented SASS syntax
  Sass,
}

impl StylesheetLanguage {
  pub fn as_str(&self) -> &'static str {
    match self {
      StylesheetLanguage::Css => "css",
      StylesheetLanguage::Scss => "scss",
      StylesheetLanguage::Sass => "sass",
    }
  }

  /// Whether the stylesheet has to go through the preprocessor before bundling
  pub fn is_preprocessed(&self) -> bool {
    !matches!(self, StylesheetLanguage::Css)
  }

  pub fn from_extension(ext: &str) -> Option<Self> {
    ext.parse().ok()
  }
}

impl Display for StylesheetLanguage {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for StylesheetLanguage {
  type Err = anyhow::Error;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "css" => Ok(StylesheetLanguage::Css),
      "scss" => Ok(StylesheetLanguage::Scss),
      "sass" => Ok(StylesheetLanguage::Sass),
      other => Err(anyhow::anyhow!("Unsupported stylesheet language: {other}")),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_known_languages() {
    assert_eq!("css".parse::<StylesheetLanguage>().unwrap(), StylesheetLanguage::Css);
    assert_eq!("scss".parse::<StylesheetLanguage>().unwrap(), StylesheetLanguage::Scss);
    assert_eq!(StylesheetLanguage::from_extension("sass"), Some(StylesheetLanguage::Sass));
    assert_eq!(StylesheetLanguage::from_extension("less"), None);
  }

  #[test]
  fn only_css_skips_the_preprocessor() {
    assert!(!StylesheetLanguage::Css.is_preprocessed());
    assert!(StylesheetLanguage::Scss.is_preprocessed());
    assert!(StylesheetLanguage::Sass.is_preprocessed());
  }
}
