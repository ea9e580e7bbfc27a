//! Container width observer.
//!
//! The host component owns the `NodeRef` and calls [`use_container_width`];
//! geometry engines only ever see the resulting width.

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{ResizeObserver, ResizeObserverEntry};

type ResizeCallback = Closure<dyn FnMut(js_sys::Array, ResizeObserver)>;

/// Width observer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthObserverConfig {
    /// Width reported before the element mounts
    pub initial: f64,
    /// Lower bound for every observed width
    pub min: f64,
}

impl WidthObserverConfig {
    pub const fn new(initial: f64, min: f64) -> Self {
        Self { initial, min }
    }
}

impl Default for WidthObserverConfig {
    fn default() -> Self {
        Self::new(260.0, 220.0)
    }
}

/// Clamp an observed width to `min`; non-finite widths become `min`
pub fn clamp_width(raw: f64, min: f64) -> f64 {
    if raw.is_finite() { raw.max(min) } else { min }
}

/// Track the content-box width of `node`.
///
/// Holds `config.initial` until the node mounts, then re-emits on every
/// resize notification. The observer disconnects when the owning component
/// is cleaned up.
pub fn use_container_width(node: NodeRef<Div>, config: WidthObserverConfig) -> Signal<f64> {
    let width = RwSignal::new(config.initial);
    let min = config.min;
    let observer: StoredValue<Option<(ResizeObserver, ResizeCallback)>, LocalStorage> =
        StoredValue::new_local(None);

    Effect::new(move |_| {
        let Some(el) = node.get() else {
            return;
        };
        if observer.with_value(|o| o.is_some()) {
            return;
        }

        let callback: ResizeCallback = Closure::new(move |entries: js_sys::Array, _: ResizeObserver| {
            if let Some(entry) = entries
                .iter()
                .filter_map(|e| e.dyn_into::<ResizeObserverEntry>().ok())
                .last()
            {
                let next = clamp_width(entry.content_rect().width(), min);
                if width.get_untracked() != next {
                    width.set(next);
                }
            }
        });

        match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(ro) => {
                ro.observe(&el);
                tracing::debug!(min, "width observer attached");
                observer.set_value(Some((ro, callback)));
            }
            Err(err) => {
                tracing::warn!(?err, "ResizeObserver unavailable, keeping initial width");
            }
        }
    });

    on_cleanup(move || {
        observer.update_value(|o| {
            if let Some((ro, _callback)) = o.take() {
                ro.disconnect();
                tracing::debug!("width observer disconnected");
            }
        });
    });

    width.into()
}
