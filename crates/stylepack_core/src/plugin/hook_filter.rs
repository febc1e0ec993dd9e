use regex::Regex;

/// Predicate that selects which requests a hook is offered
///
/// The pattern is matched against the request path, a filter without a pattern matches
/// every path. When a namespace is set only requests in that namespace match.
#[derive(Clone, Debug, Default)]
pub struct HookFilter {
  pub pattern: Option<Regex>,
  pub namespace: Option<String>,
}

impl HookFilter {
  pub fn new(pattern: &str) -> Result<Self, regex::Error> {
    Ok(HookFilter {
      pattern: Some(Regex::new(pattern)?),
      namespace: None,
    })
  }

  /// Matches every path in every namespace
  pub fn any() -> Self {
    HookFilter::default()
  }

  pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
    self.namespace = Some(namespace.into());
    self
  }

  pub fn matches(&self, path: &str, namespace: &str) -> bool {
    if self
      .namespace
      .as_deref()
      .is_some_and(|expected| expected != namespace)
    {
      return false;
    }

    self
      .pattern
      .as_ref()
      .map_or(true, |pattern| pattern.is_match(path))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn matches_pattern_in_any_namespace() {
    let filter = HookFilter::new(r"\.s[ac]ss$").unwrap();

    assert!(filter.matches("/src/app.scss", "file"));
    assert!(filter.matches("/src/app.sass", "virtual"));
    assert!(!filter.matches("/src/app.css", "file"));
  }

  #[test]
  fn restricts_to_namespace() {
    let filter = HookFilter::any().in_namespace("css-resource");

    assert!(filter.matches("/src/logo.png", "css-resource"));
    assert!(!filter.matches("/src/logo.png", "file"));
  }
}
