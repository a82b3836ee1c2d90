//! Event wiring for the page chrome: nav styling and parallax on scroll,
//! active link on load, smooth anchor scrolling and the mobile menu.

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use sitefx_chrome::{
    anchor_action, is_active, nav_style, parallax, AnchorAction, ChromeConfig, MenuState,
    VerticalSpan,
};

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn first(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        warn!(%selector, "querySelectorAll failed");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(e) = result {
        warn!(%class, ?e, "classList update failed");
    }
}

pub fn update_nav(cfg: &ChromeConfig, window: &Window, document: &Document) {
    let Some(nav) = first(document, &cfg.nav.selector) else {
        return;
    };
    let light = first(document, &cfg.nav.light_section_selector).map(|el| {
        let rect = el.get_bounding_client_rect();
        VerticalSpan {
            top: rect.top(),
            bottom: rect.bottom(),
        }
    });
    let style = nav_style(&cfg.nav, scroll_y(window), viewport_height(window), light);
    let edits = style.class_edits(&cfg.nav);
    for class in &edits.remove {
        set_class(&nav, class, false);
    }
    for class in &edits.add {
        set_class(&nav, class, true);
    }
}

pub fn set_active_links(cfg: &ChromeConfig, window: &Window, document: &Document) {
    let pathname = window.location().pathname().unwrap_or_default();
    for link in all(document, &cfg.active_link.selector) {
        let href = link.get_attribute("href");
        let on = is_active(&cfg.active_link, &pathname, href.as_deref());
        set_class(&link, &cfg.active_link.active_class, on);
    }
}

fn apply_parallax(cfg: &ChromeConfig, window: &Window, image: &HtmlElement) {
    let Some(offset) = parallax::offset(&cfg.parallax, scroll_y(window), viewport_height(window))
    else {
        return;
    };
    let css = parallax::transform_css(offset);
    if let Err(e) = image.style().set_property("transform", &css) {
        warn!(?e, "parallax transform failed");
    }
}

fn scroll_smoothly(window: &Window, top: f64) {
    let opts = ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
}

fn on_anchor_click(cfg: &ChromeConfig, window: &Window, document: &Document, anchor: &Element, event: &Event) {
    let Some(href) = anchor.get_attribute("href") else {
        return;
    };
    let target_top = document
        .query_selector(&href)
        .ok()
        .flatten()
        .map(|t| t.get_bounding_client_rect().top());
    let nav_height = first(document, &cfg.nav.selector)
        .and_then(|n| n.dyn_into::<HtmlElement>().ok())
        .map(|n| f64::from(n.offset_height()))
        .unwrap_or(0.0);
    let action = anchor_action(&href, target_top, scroll_y(window), nav_height);
    if action.prevents_default() {
        event.prevent_default();
    }
    if let AnchorAction::ScrollTo { top } = action {
        scroll_smoothly(window, top);
    }
}

/// Keeps the chrome listeners attached; dropping it detaches them.
pub struct ChromeRuntime {
    _listeners: Vec<EventListener>,
}

impl ChromeRuntime {
    pub fn install(cfg: ChromeConfig, window: Window, document: Document) -> Self {
        let cfg = Rc::new(cfg);
        let mut listeners = Vec::new();

        for event in ["scroll", "load"] {
            let (cfg, win, doc) = (Rc::clone(&cfg), window.clone(), document.clone());
            listeners.push(EventListener::new(&window, event, move |_| {
                update_nav(&cfg, &win, &doc);
            }));
        }
        update_nav(&cfg, &window, &document);

        {
            let (cfg, win, doc) = (Rc::clone(&cfg), window.clone(), document.clone());
            listeners.push(EventListener::new(&window, "load", move |_| {
                set_active_links(&cfg, &win, &doc);
            }));
        }
        set_active_links(&cfg, &window, &document);

        // Anchors need a non-passive listener to cancel the default jump.
        for anchor in all(&document, &cfg.anchor.selector) {
            let (cfg, win, doc) = (Rc::clone(&cfg), window.clone(), document.clone());
            let target = anchor.clone();
            listeners.push(EventListener::new_with_options(
                &target,
                "click",
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| on_anchor_click(&cfg, &win, &doc, &anchor, event),
            ));
        }

        if let (Some(toggle), Some(menu)) = (
            first(&document, &cfg.menu.toggle_selector),
            first(&document, &cfg.menu.menu_selector),
        ) {
            let class = cfg.menu.active_class.clone();
            // Each element flips its own class, whatever state the markup shipped.
            let parts: Vec<(Element, Cell<MenuState>)> = [toggle.clone(), menu]
                .into_iter()
                .map(|el| {
                    let open = el.class_list().contains(&class);
                    (el, Cell::new(MenuState::from_markup(open)))
                })
                .collect();
            listeners.push(EventListener::new(&toggle, "click", move |_| {
                for (el, state) in &parts {
                    let mut s = state.get();
                    let open = s.toggle();
                    state.set(s);
                    set_class(el, &class, open);
                }
            }));
        }

        if let Some(image) = first(&document, &cfg.parallax.selector)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let (cfg, win) = (Rc::clone(&cfg), window.clone());
            listeners.push(EventListener::new(&window, "scroll", move |_| {
                apply_parallax(&cfg, &win, &image);
            }));
        }

        Self {
            _listeners: listeners,
        }
    }
}
