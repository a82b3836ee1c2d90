//! Just enough CSS selector matching for fixture pages: comma lists of
//! compound selectors built from a tag, `.class` parts and `[attr]` /
//! `[attr^="prefix"]` / `[attr="value"]` filters. No combinators.

use crate::page::FakeElement;

#[derive(Debug, PartialEq)]
enum AttrTest {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

fn parse_attr(body: &str) -> AttrTest {
    let unquote = |v: &str| v.trim().trim_matches('"').trim_matches('\'').to_string();
    if let Some((name, value)) = body.split_once("^=") {
        AttrTest::Prefix(name.trim().to_string(), unquote(value))
    } else if let Some((name, value)) = body.split_once('=') {
        AttrTest::Equals(name.trim().to_string(), unquote(value))
    } else {
        AttrTest::Present(body.trim().to_string())
    }
}

fn parse_compound(src: &str) -> Compound {
    let mut out = Compound::default();
    let mut rest = src.trim();
    let tag_end = rest.find(['.', '[']).unwrap_or(rest.len());
    if tag_end > 0 {
        out.tag = Some(rest[..tag_end].to_string());
    }
    rest = &rest[tag_end..];
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(['.', '[']).unwrap_or(after.len());
            out.classes.push(after[..end].to_string());
            rest = &after[end..];
        } else if let Some(after) = rest.strip_prefix('[') {
            let end = after.find(']').unwrap_or(after.len());
            out.attrs.push(parse_attr(&after[..end]));
            rest = after.get(end + 1..).unwrap_or("");
        } else {
            break;
        }
    }
    out
}

fn matches_compound(el: &FakeElement, c: &Compound) -> bool {
    if let Some(tag) = &c.tag {
        if !el.tag.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if !c.classes.iter().all(|cls| el.has_class(cls)) {
        return false;
    }
    c.attrs.iter().all(|test| match test {
        AttrTest::Present(name) => el.attributes.contains_key(name),
        AttrTest::Equals(name, value) => el.attributes.get(name) == Some(value),
        AttrTest::Prefix(name, prefix) => el
            .attributes
            .get(name)
            .is_some_and(|v| v.starts_with(prefix.as_str())),
    })
}

/// Whether `el` matches any selector in a comma-separated list.
pub fn matches_selector(el: &FakeElement, selector: &str) -> bool {
    selector
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .any(|s| matches_compound(el, &parse_compound(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(attrs: &[(&str, &str)]) -> FakeElement {
        let mut el = FakeElement::new("img");
        for (k, v) in attrs {
            el.attributes.insert(k.to_string(), v.to_string());
        }
        el
    }

    #[test]
    fn tag_class_and_attribute_filters() {
        let mut div = FakeElement::new("div");
        div.classes = vec!["timeline-item".into(), "fade-in".into()];
        assert!(matches_selector(&div, ".timeline-item"));
        assert!(matches_selector(&div, "div.fade-in.timeline-item"));
        assert!(!matches_selector(&div, "section.fade-in"));

        assert!(matches_selector(&img(&[("data-src", "a.jpg")]), "img[data-src]"));
        assert!(!matches_selector(&img(&[("src", "a.jpg")]), "img[data-src]"));

        let mut a = FakeElement::new("a");
        a.attributes.insert("href".into(), "#contact".into());
        assert!(matches_selector(&a, r##"a[href^="#"]"##));
        assert!(matches_selector(&a, r##"a[href="#contact"]"##));
    }

    #[test]
    fn comma_lists_match_any() {
        let mut header = FakeElement::new("header");
        header.classes = vec!["page-header".into()];
        assert!(matches_selector(&header, ".hero, .page-header"));
        assert!(!matches_selector(&header, ".hero, .stat-number"));
    }
}
