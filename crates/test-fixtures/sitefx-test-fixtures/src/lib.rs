use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

mod page;
mod selector;

pub use page::{FakeElement, FakePage, PageSpec};
pub use selector::matches_selector;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    pages: HashMap<String, String>,
    #[serde(default)]
    configs: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a String> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Page layouts used to drive the reveal controller without a browser.
pub mod pages {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.pages.keys().cloned().collect()
    }

    pub fn spec(name: &str) -> Result<PageSpec> {
        let rel = lookup(&MANIFEST.pages, "page", name)?;
        super::load_json(rel)
    }

    /// Build a ready-to-use in-memory page from a fixture.
    pub fn load(name: &str) -> Result<FakePage> {
        Ok(FakePage::from_spec(spec(name)?))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.pages, "page", name)?;
        Ok(resolve_path(rel))
    }
}

/// Partial controller configs as a host would pass them.
pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_page_loads() {
        for key in pages::keys() {
            let page = pages::load(&key).unwrap_or_else(|e| panic!("{key}: {e:#}"));
            assert!(!page.is_empty(), "{key} has no elements");
        }
    }

    #[test]
    fn every_manifest_config_parses() {
        for key in configs::keys() {
            let json = configs::json(&key).unwrap_or_else(|e| panic!("{key}: {e:#}"));
            sitefx_reveal::Config::from_json_str(&json)
                .and_then(|cfg| cfg.validate().map(|_| cfg))
                .unwrap_or_else(|e| panic!("{key}: {e}"));
        }
    }

    #[test]
    fn page_paths_point_at_files() {
        for key in pages::keys() {
            assert!(pages::path(&key).unwrap().is_file(), "{key}");
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = pages::spec("does-not-exist").unwrap_err();
        assert!(err.to_string().contains("unknown page fixture"));
    }
}
