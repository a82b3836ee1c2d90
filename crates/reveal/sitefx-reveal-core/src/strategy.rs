//! Reveal strategies: what happens to an element the first time its watcher
//! sees it qualify.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CounterConfig, FadeInConfig, LazyImageConfig, TimelineConfig};
use crate::counter::{parse_counter_text, CounterAnimation};
use crate::document::PageDocument;
use crate::ids::{ElementId, WatcherId};
use crate::outputs::{Effect, Outputs, RevealEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealKind {
    FadeIn,
    LazyImage,
    TimelineStagger,
    Counter,
}

impl RevealKind {
    /// Whether revealing detaches the element from its watcher.
    pub fn unobserves_on_reveal(self) -> bool {
        matches!(self, RevealKind::LazyImage)
    }
}

/// Add the visible class.
pub fn reveal_fade_in(cfg: &FadeInConfig, element: ElementId, out: &mut Outputs) {
    out.push_effect(Effect::AddClass {
        element,
        class: cfg.visible_class.clone(),
        delay_ms: 0,
    });
}

/// Move the staged source into place and stop watching the image.
pub fn reveal_lazy_image(
    cfg: &LazyImageConfig,
    doc: &dyn PageDocument,
    watcher: WatcherId,
    element: ElementId,
    out: &mut Outputs,
) {
    match doc
        .attribute(element, &cfg.staging_attribute)
        .filter(|src| !src.is_empty())
    {
        Some(src) => {
            out.push_effect(Effect::SetAttribute {
                element,
                name: cfg.source_attribute.clone(),
                value: src,
            });
            out.push_effect(Effect::RemoveAttribute {
                element,
                name: cfg.staging_attribute.clone(),
            });
        }
        None => {
            debug!(?element, "lazy image has no staged source");
            out.push_event(RevealEvent::LazySourceMissing { element });
        }
    }
    out.push_effect(Effect::Unobserve { watcher, element });
}

/// Add the visible class after a delay set by the entry's position in its batch.
pub fn reveal_timeline_item(
    cfg: &TimelineConfig,
    element: ElementId,
    batch_index: usize,
    out: &mut Outputs,
) {
    let delay_ms = (batch_index as u32).saturating_mul(cfg.step_ms);
    out.push_effect(Effect::AddClass {
        element,
        class: cfg.visible_class.clone(),
        delay_ms,
    });
}

/// Parse the counter's text and render its first frame.
///
/// Returns the running animation, or `None` when the text has no digits (the
/// text is left exactly as it was).
pub fn reveal_counter(
    cfg: &CounterConfig,
    doc: &dyn PageDocument,
    element: ElementId,
    out: &mut Outputs,
) -> Option<CounterAnimation> {
    let text = doc.text_content(element).unwrap_or_default();
    let Some(spec) = parse_counter_text(&text) else {
        debug!(?element, %text, "counter text is not numeric, skipping");
        out.push_event(RevealEvent::CounterSkipped { element, text });
        return None;
    };
    out.push_event(RevealEvent::CounterStarted {
        element,
        target: spec.target,
    });
    let mut anim = CounterAnimation::new(spec, cfg);
    advance_counter(cfg, element, &mut anim, out);
    Some(anim)
}

/// Render one frame of a running counter.
pub fn advance_counter(
    cfg: &CounterConfig,
    element: ElementId,
    anim: &mut CounterAnimation,
    out: &mut Outputs,
) {
    let step = anim.step(&cfg.thousands_separator);
    if step.done {
        out.push_event(RevealEvent::CounterFinished {
            element,
            text: step.text.clone(),
        });
    }
    out.push_effect(Effect::SetText {
        element,
        text: step.text,
    });
}
