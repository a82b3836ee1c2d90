use crate::config::ActiveLinkConfig;

/// Last path segment, or the configured index page when it is empty.
pub fn current_page<'a>(cfg: &'a ActiveLinkConfig, pathname: &'a str) -> &'a str {
    match pathname.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => &cfg.index_page,
    }
}

/// Whether a nav link with `href` marks the current page. Links without an
/// href never match.
pub fn is_active(cfg: &ActiveLinkConfig, pathname: &str, href: Option<&str>) -> bool {
    href.is_some_and(|h| h == current_page(cfg, pathname))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_or_index() {
        let cfg = ActiveLinkConfig::default();
        assert_eq!(current_page(&cfg, "/about.html"), "about.html");
        assert_eq!(current_page(&cfg, "/docs/guide.html"), "guide.html");
        assert_eq!(current_page(&cfg, "/"), "index.html");
        assert_eq!(current_page(&cfg, ""), "index.html");
        assert_eq!(current_page(&cfg, "/docs/"), "index.html");
    }

    #[test]
    fn exact_href_match_only() {
        let cfg = ActiveLinkConfig::default();
        assert!(is_active(&cfg, "/about.html", Some("about.html")));
        assert!(!is_active(&cfg, "/about.html", Some("/about.html")));
        assert!(is_active(&cfg, "/", Some("index.html")));
        assert!(!is_active(&cfg, "/", None));
    }
}
