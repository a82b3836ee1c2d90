use sitefx_reveal::{
    format_thousands, CounterPhase, Effect, RevealEvent, RevealKind, ViewportRevealController,
    VisibilityEntry, WatcherConfig,
};
use sitefx_test_fixtures::{FakeElement, FakePage};

fn register(
    ctl: &mut ViewportRevealController,
    page: &mut FakePage,
    kind: RevealKind,
    elements: &[sitefx_reveal::ElementId],
) -> sitefx_reveal::WatcherId {
    let id = ctl.register(kind, elements, WatcherConfig::default());
    let outputs = ctl.outputs().clone();
    page.apply(&outputs);
    id
}

fn delays(effects: &[Effect]) -> Vec<u32> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::AddClass { delay_ms, .. } => Some(*delay_ms),
            _ => None,
        })
        .collect()
}

#[test]
fn stagger_restarts_at_zero_for_each_batch() {
    let mut page = FakePage::new(1000.0, 800.0);
    let items: Vec<_> = (0..5)
        .map(|i| page.push(FakeElement::new("li").with_class("timeline-item").at(i as f64 * 50.0, 40.0)))
        .collect();
    let mut ctl = ViewportRevealController::default();
    let w = register(&mut ctl, &mut page, RevealKind::TimelineStagger, &items);

    let first: Vec<_> = items[..3].iter().map(|&e| VisibilityEntry::visible(e, 1.0)).collect();
    let out = ctl.handle_entries(&page, w, &first);
    assert_eq!(delays(&out.effects), vec![0, 100, 200]);

    let second: Vec<_> = items[3..].iter().map(|&e| VisibilityEntry::visible(e, 1.0)).collect();
    let out = ctl.handle_entries(&page, w, &second);
    assert_eq!(delays(&out.effects), vec![0, 100]);
}

#[test]
fn stagger_position_counts_entries_that_do_not_reveal() {
    let mut page = FakePage::new(1000.0, 800.0);
    let a = page.push(FakeElement::new("li").with_class("timeline-item"));
    let b = page.push(FakeElement::new("li").with_class("timeline-item"));
    let mut ctl = ViewportRevealController::default();
    let w = register(&mut ctl, &mut page, RevealKind::TimelineStagger, &[a, b]);

    let out = ctl.handle_entries(&page, w, &[VisibilityEntry::hidden(a), VisibilityEntry::visible(b, 1.0)]);
    assert_eq!(
        out.effects,
        vec![Effect::AddClass {
            element: b,
            class: "visible".into(),
            delay_ms: 100
        }]
    );
}

#[test]
fn lazy_image_detaches_and_ignores_later_entries() {
    let mut page = FakePage::new(1000.0, 800.0);
    let img = page.push(FakeElement::new("img").with_attr("data-src", "/a.jpg"));
    let mut ctl = ViewportRevealController::default();
    let w = register(&mut ctl, &mut page, RevealKind::LazyImage, &[img]);

    let out = ctl.handle_entries(&page, w, &[VisibilityEntry::visible(img, 0.01)]).clone();
    assert_eq!(
        out.effects,
        vec![
            Effect::SetAttribute {
                element: img,
                name: "src".into(),
                value: "/a.jpg".into()
            },
            Effect::RemoveAttribute {
                element: img,
                name: "data-src".into()
            },
            Effect::Unobserve {
                watcher: w,
                element: img
            },
        ]
    );
    page.apply(&out);
    assert!(!page.is_observed(w, img));

    let out = ctl.handle_entries(&page, w, &[VisibilityEntry::visible(img, 1.0)]);
    assert!(out.is_empty());
    assert_eq!(page.element(img).attributes.get("src").map(String::as_str), Some("/a.jpg"));
}

#[test]
fn lazy_image_without_staged_source_still_detaches() {
    let mut page = FakePage::new(1000.0, 800.0);
    let img = page.push(FakeElement::new("img"));
    let mut ctl = ViewportRevealController::default();
    let w = register(&mut ctl, &mut page, RevealKind::LazyImage, &[img]);

    let out = ctl.handle_entries(&page, w, &[VisibilityEntry::visible(img, 1.0)]);
    assert_eq!(out.effects, vec![Effect::Unobserve { watcher: w, element: img }]);
    assert!(out
        .events
        .contains(&RevealEvent::LazySourceMissing { element: img }));
    assert!(!ctl.is_observing(img));
}

fn run_counter(text: &str) -> (FakePage, ViewportRevealController, sitefx_reveal::ElementId) {
    let mut page = FakePage::new(1000.0, 800.0);
    let el = page.push(FakeElement::new("span").with_class("stat-number").with_text(text));
    let mut ctl = ViewportRevealController::default();
    let w = register(&mut ctl, &mut page, RevealKind::Counter, &[el]);
    let out = ctl.handle_entries(&page, w, &[VisibilityEntry::visible(el, 1.0)]).clone();
    page.apply(&out);
    page.run_frames(&mut ctl, 16, 1_000);
    (page, ctl, el)
}

#[test]
fn counter_counts_up_monotonically_to_its_text() {
    let (page, ctl, el) = run_counter("1,234+");
    let history = page.text_history(el);
    assert_eq!(history.len(), 125);
    assert_eq!(history.last().map(String::as_str), Some("1,234+"));

    let values: Vec<u64> = history[..history.len() - 1]
        .iter()
        .map(|t| t.replace(',', "").parse().unwrap())
        .collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert!(values.iter().all(|&v| v < 1234));
    assert_eq!(ctl.counter_phase(el), Some(CounterPhase::Done));
}

#[test]
fn counter_final_text_matches_formatted_target() {
    for text in ["7", "42%", "1,000", "12,500+", "3,000,000 users", "250k"] {
        let (page, _, el) = run_counter(text);
        let spec = sitefx_reveal::parse_counter_text(text).unwrap();
        assert_eq!(
            page.text(el),
            format!("{}{}", format_thousands(spec.target, ","), spec.suffix),
            "counter text {text:?}"
        );
    }
}

#[test]
fn non_numeric_counter_is_left_alone() {
    let (page, ctl, el) = run_counter("N/A");
    assert_eq!(page.text(el), "N/A");
    assert!(page.text_history(el).is_empty());
    assert_eq!(ctl.counter_phase(el), Some(CounterPhase::Skipped));
    assert!(ctl.is_revealed(el));
}
