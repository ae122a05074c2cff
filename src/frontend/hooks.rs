use std::{cell::Cell, rc::Rc, time::Duration};

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};
use yew::prelude::*;

/// Root margin used for section entrance animations.
pub const REVEAL_MARGIN: &str = "-100px";

/// A DOM event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<E, F>(target: &EventTarget, kind: &'static str, mut handler: F) -> Option<Self>
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        });
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|err| log::warn!("could not listen for {kind}: {err:?}"))
            .ok()?;
        Some(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    pub fn on_window<E, F>(kind: &'static str, handler: F) -> Option<Self>
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        let target: EventTarget = window()?.into();
        Self::new(&target, kind, handler)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

fn current_scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Vertical scroll offset of the window, updated on every scroll event.
#[hook]
pub fn use_window_scroll() -> f64 {
    let scroll_y = use_state(current_scroll_y);

    {
        let scroll_y = scroll_y.clone();
        use_effect_with((), move |_| {
            let listener = Listener::on_window("scroll", move |_: Event| {
                scroll_y.set(current_scroll_y());
            });
            move || drop(listener)
        });
    }

    *scroll_y
}

/// Window size, refreshed on resize.
#[hook]
pub fn use_viewport() -> (f64, f64) {
    let size = use_state(super::viewport_size);

    {
        let size = size.clone();
        use_effect_with((), move |_| {
            let listener = Listener::on_window("resize", move |_: Event| {
                size.set(super::viewport_size());
            });
            move || drop(listener)
        });
    }

    *size
}

fn observe(
    node: &NodeRef,
    root_margin: &str,
    on_change: impl Fn(bool) -> bool + 'static,
) -> Result<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>), JsValue>
{
    let element = node
        .cast::<web_sys::Element>()
        .ok_or_else(|| JsValue::from_str("node is not mounted"))?;

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !on_change(entry.is_intersecting()) {
                    observer.disconnect();
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(&element);
    Ok((observer, callback))
}

/// Whether `node` intersects the viewport (shrunk or grown by `root_margin`).
/// With `once`, the value latches to true on first sight and observation
/// stops.
#[hook]
pub fn use_intersection(node: NodeRef, root_margin: &'static str, once: bool) -> bool {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with(node, move |node| {
            let observation = observe(node, root_margin, move |intersecting| {
                if once {
                    if intersecting {
                        visible.set(true);
                        return false;
                    }
                    return true;
                }
                visible.set(intersecting);
                true
            });
            if let Err(err) = &observation {
                log::debug!("intersection observer unavailable: {err:?}");
            }
            move || {
                if let Ok((observer, _callback)) = observation {
                    observer.disconnect();
                }
            }
        });
    }

    *visible
}

/// Latches once the section scrolls into view.
#[hook]
pub fn use_in_view(node: NodeRef) -> bool {
    use_intersection(node, REVEAL_MARGIN, true)
}

/// Runs `tick` every `period` until the component unmounts or `deps`
/// change. `tick` returning false stops the loop early.
#[hook]
pub fn use_interval<D, F>(deps: D, period: Duration, tick: F)
where
    D: PartialEq + 'static,
    F: Fn() -> bool + 'static,
{
    use_effect_with(deps, move |_| {
        let alive = Rc::new(Cell::new(true));
        {
            let alive = alive.clone();
            wasm_bindgen_futures::spawn_local(async move {
                loop {
                    yew::platform::time::sleep(period).await;
                    if !alive.get() || !tick() {
                        break;
                    }
                }
            });
        }
        move || alive.set(false)
    });
}

/// Page offset and height of a mounted element.
pub fn element_extent(node: &NodeRef) -> Option<(f64, f64)> {
    let element = node.cast::<web_sys::Element>()?;
    let rect = element.get_bounding_client_rect();
    Some((rect.top() + current_scroll_y(), rect.height()))
}

/// False on the first render and true afterwards, so CSS transitions keyed
/// on it run on mount.
#[hook]
pub fn use_mounted() -> bool {
    let mounted = use_state_eq(|| false);

    {
        let mounted = mounted.clone();
        use_effect_with((), move |_| mounted.set(true));
    }

    *mounted
}
