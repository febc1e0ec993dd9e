use anyhow::Context;
use lightningcss::targets::Browsers;
use lightningcss::targets::Targets;
use stylepack_core::types::BundleConfig;
use stylepack_core::types::Platform;

/// Turns target descriptors into browserslist queries
///
/// Accepts compact descriptors such as `chrome90` or `safari14.1` as well as queries that
/// are already in browserslist form. Language level and runtime descriptors (`es2020`,
/// `esnext`, `node18`) do not constrain CSS and are skipped.
pub fn browserslist_queries(target: &[String]) -> Vec<String> {
  target
    .iter()
    .map(|descriptor| descriptor.trim().to_lowercase())
    .filter(|descriptor| !descriptor.is_empty())
    .filter(|descriptor| !descriptor.starts_with("es") && !descriptor.starts_with("node"))
    .map(|descriptor| {
      if descriptor.contains(char::is_whitespace) {
        return descriptor;
      }

      match descriptor.find(|c: char| c.is_ascii_digit()) {
        Some(index) if index > 0 => {
          let (browser, version) = descriptor.split_at(index);
          let browser = match browser {
            "ios" => "ios_saf",
            browser => browser,
          };
          format!("{browser} {version}")
        }
        _ => descriptor,
      }
    })
    .collect()
}

pub fn targets_for(config: &BundleConfig) -> anyhow::Result<Targets> {
  if config.platform != Platform::Browser {
    return Ok(Targets::default());
  }

  let queries = browserslist_queries(&config.target);
  if queries.is_empty() {
    return Ok(Targets::default());
  }

  let browsers = Browsers::from_browserslist(queries.iter().map(String::as_str))
    .with_context(|| format!("Invalid target: {}", config.target.join(", ")))?;

  Ok(Targets {
    browsers,
    ..Targets::default()
  })
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
  }

  #[test]
  fn converts_compact_descriptors() {
    assert_eq!(
      browserslist_queries(&strings(&["chrome90", "Safari14.1", "ios15", "firefox 100"])),
      strings(&["chrome 90", "safari 14.1", "ios_saf 15", "firefox 100"])
    );
  }

  #[test]
  fn skips_language_and_runtime_descriptors() {
    assert_eq!(
      browserslist_queries(&strings(&["es2020", "esnext", "node18", "edge110"])),
      strings(&["edge 110"])
    );
  }

  #[test]
  fn neutral_platform_ignores_targets() {
    let config = BundleConfig {
      platform: Platform::Neutral,
      target: strings(&["chrome90"]),
      ..BundleConfig::default()
    };

    assert!(targets_for(&config).unwrap().browsers.is_none());
  }

  #[test]
  fn browser_platform_builds_browser_targets() {
    let config = BundleConfig {
      target: strings(&["chrome90"]),
      ..BundleConfig::default()
    };

    let browsers = targets_for(&config).unwrap().browsers.unwrap();
    assert_eq!(browsers.chrome, Some(90 << 16));
  }

  #[test]
  fn invalid_queries_fail() {
    let config = BundleConfig {
      target: strings(&["notabrowser12"]),
      ..BundleConfig::default()
    };

    assert!(targets_for(&config).is_err());
  }
}
