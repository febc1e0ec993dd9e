//! Synthetic specifiers for component stylesheets
//!
//! A component stylesheet has no path of its own when its text is inline in the component
//! definition. It enters the bundler as an entry point whose specifier carries the
//! stylesheet language, a per-component identifier and the filename used as the base for
//! relative references:
//!
//! ```text
//! stylepack:styles/component;v1;<language>;<identifier>;<filename>
//! ```
//!
//! `;` and `%` inside segments are percent-encoded, so two specifiers are equal only when
//! all of their segments are.
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use thiserror::Error;

use crate::types::StylesheetLanguage;

/// Namespace of component stylesheets whose contents are supplied in memory
pub const COMPONENT_STYLE_NAMESPACE: &str = "stylepack:styles/component";

const SPECIFIER_VERSION: &str = "v1";

const SEGMENT: &AsciiSet = &CONTROLS.add(b';').add(b'%');

/// Inline stylesheet contents keyed by their encoded `ComponentStyleSpecifier`
pub type InlineComponentData = Arc<HashMap<String, String>>;

#[derive(Debug, Error, PartialEq)]
pub enum SpecifierError {
  #[error("Specifier is not in the {COMPONENT_STYLE_NAMESPACE} namespace: {0}")]
  ForeignNamespace(String),

  #[error("Unsupported component style specifier version: {0}")]
  UnsupportedVersion(String),

  #[error("Malformed component style specifier: {0}")]
  Malformed(String),

  #[error("Unknown stylesheet language: {0}")]
  UnknownLanguage(String),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ComponentStyleSpecifier {
  pub language: StylesheetLanguage,
  /// Unique per component stylesheet within one compilation
  pub identifier: String,
  /// Real or logical location of the stylesheet
  pub filename: PathBuf,
}

impl ComponentStyleSpecifier {
  pub fn new(
    language: StylesheetLanguage,
    identifier: impl Into<String>,
    filename: impl Into<PathBuf>,
  ) -> Self {
    ComponentStyleSpecifier {
      language,
      identifier: identifier.into(),
      filename: filename.into(),
    }
  }

  pub fn encode(&self) -> String {
    format!(
      "{COMPONENT_STYLE_NAMESPACE};{SPECIFIER_VERSION};{};{};{}",
      self.language,
      utf8_percent_encode(&self.identifier, SEGMENT),
      utf8_percent_encode(&self.filename.to_string_lossy(), SEGMENT),
    )
  }

  pub fn decode(specifier: &str) -> Result<Self, SpecifierError> {
    let rest = specifier
      .strip_prefix(COMPONENT_STYLE_NAMESPACE)
      .and_then(|rest| rest.strip_prefix(';'))
      .ok_or_else(|| SpecifierError::ForeignNamespace(specifier.to_string()))?;

    let segments = rest.split(';').collect::<Vec<&str>>();
    let [version, language, identifier, filename] = segments.as_slice() else {
      return Err(SpecifierError::Malformed(specifier.to_string()));
    };

    if *version != SPECIFIER_VERSION {
      return Err(SpecifierError::UnsupportedVersion(version.to_string()));
    }

    let language = language
      .parse::<StylesheetLanguage>()
      .map_err(|_| SpecifierError::UnknownLanguage(language.to_string()))?;

    let decode_segment = |segment: &str| {
      percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| SpecifierError::Malformed(specifier.to_string()))
    };

    Ok(ComponentStyleSpecifier {
      language,
      identifier: decode_segment(*identifier)?,
      filename: PathBuf::from(decode_segment(*filename)?),
    })
  }

  /// Directory that relative references inside the stylesheet resolve against
  pub fn resolve_dir(&self) -> PathBuf {
    self
      .filename
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_default()
  }

  /// Pattern matching every encoded component style specifier
  pub fn prefix_pattern() -> String {
    format!("^{};", regex::escape(COMPONENT_STYLE_NAMESPACE))
  }

  /// Pattern matching encoded specifiers written in one of `languages`
  pub fn language_pattern(languages: &[StylesheetLanguage]) -> String {
    let languages = languages
      .iter()
      .map(StylesheetLanguage::as_str)
      .collect::<Vec<&str>>()
      .join("|");

    format!(
      "{}{SPECIFIER_VERSION};(?:{languages});",
      ComponentStyleSpecifier::prefix_pattern()
    )
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use regex::Regex;

  use super::*;

  #[test]
  fn encodes_all_segments() {
    let specifier =
      ComponentStyleSpecifier::new(StylesheetLanguage::Css, "cmp1", "/src/cmp1.css").encode();

    assert_eq!(
      specifier,
      "stylepack:styles/component;v1;css;cmp1;/src/cmp1.css"
    );
  }

  #[test]
  fn decodes_what_it_encodes() {
    let original = ComponentStyleSpecifier::new(
      StylesheetLanguage::Scss,
      "weird;id%20",
      "/src/dir;with;semicolons/cmp.scss",
    );

    assert_eq!(
      ComponentStyleSpecifier::decode(&original.encode()),
      Ok(original)
    );
  }

  #[test]
  fn distinct_identifiers_never_collide() {
    let a = ComponentStyleSpecifier::new(StylesheetLanguage::Css, "a;b", "c.css").encode();
    let b = ComponentStyleSpecifier::new(StylesheetLanguage::Css, "a", "b;c.css").encode();
    let c = ComponentStyleSpecifier::new(StylesheetLanguage::Css, "cmp2", "c.css").encode();

    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_ne!(b, c);
  }

  #[test]
  fn rejects_foreign_and_malformed_specifiers() {
    assert_eq!(
      ComponentStyleSpecifier::decode("./app.css"),
      Err(SpecifierError::ForeignNamespace("./app.css".into()))
    );
    assert_eq!(
      ComponentStyleSpecifier::decode("stylepack:styles/component;v2;css;a;b"),
      Err(SpecifierError::UnsupportedVersion("v2".into()))
    );
    assert_eq!(
      ComponentStyleSpecifier::decode("stylepack:styles/component;v1;css;a"),
      Err(SpecifierError::Malformed(
        "stylepack:styles/component;v1;css;a".into()
      ))
    );
    assert_eq!(
      ComponentStyleSpecifier::decode("stylepack:styles/component;v1;less;a;b"),
      Err(SpecifierError::UnknownLanguage("less".into()))
    );
  }

  #[test]
  fn patterns_select_by_prefix_and_language() {
    let css = ComponentStyleSpecifier::new(StylesheetLanguage::Css, "a", "/a.css").encode();
    let scss = ComponentStyleSpecifier::new(StylesheetLanguage::Scss, "b", "/b.scss").encode();

    let prefix = Regex::new(&ComponentStyleSpecifier::prefix_pattern()).unwrap();
    assert!(prefix.is_match(&css));
    assert!(prefix.is_match(&scss));
    assert!(!prefix.is_match("/src/a.css"));

    let css_only =
      Regex::new(&ComponentStyleSpecifier::language_pattern(&[StylesheetLanguage::Css])).unwrap();
    assert!(css_only.is_match(&css));
    assert!(!css_only.is_match(&scss));
  }

  #[test]
  fn resolves_relative_to_the_filename_directory() {
    let specifier = ComponentStyleSpecifier::new(StylesheetLanguage::Css, "a", "/src/app/a.css");

    assert_eq!(specifier.resolve_dir(), PathBuf::from("/src/app"));
  }
}
