use std::{cell::RefCell, rc::Rc};

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlCanvasElement, HtmlElement, TouchEvent};
use yew::prelude::*;

use super::canvas::{context_2d, fit_to_display, paint, AnimationLoop};
use super::hooks::Listener;
use super::{now_ms, use_prefs, Prefs};
use crate::cursor::{is_interactive, CursorEffects, PointerKind, INTERACTIVE_SELECTOR};
use crate::scene::{Clock, DrawCommand};

type Shared<T> = Rc<RefCell<T>>;

fn first_touch(event: &TouchEvent) -> Option<Vec2> {
    let touch = event.touches().get(0)?;
    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}

fn hovers_interactive(event: &MouseEvent) -> bool {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    let inside = matches!(element.closest(INTERACTIVE_SELECTOR), Ok(Some(_)));
    is_interactive(&element.tag_name(), inside)
}

fn set_style(node: &NodeRef, style: &str) {
    if let Some(element) = node.cast::<HtmlElement>() {
        let _ = element.set_attribute("style", style);
    }
}

fn feed_pointer(effects: &Shared<CursorEffects>, prefs: &Shared<Prefs>, kind: PointerKind, at: Vec2) {
    let prefs = prefs.borrow();
    let tone = effects
        .borrow_mut()
        .pointer(kind, at, prefs.sound.enabled, now_ms());
    if let Some(tone) = tone {
        prefs.play(tone);
    }
}

fn pointer_listeners(effects: &Shared<CursorEffects>, prefs: &Shared<Prefs>) -> Vec<Listener> {
    let touch = |kind: PointerKind| {
        let effects = effects.clone();
        let prefs = prefs.clone();
        move |event: TouchEvent| {
            if let Some(at) = first_touch(&event) {
                feed_pointer(&effects, &prefs, kind, at);
            }
        }
    };

    [
        Listener::on_window("mousemove", {
            let effects = effects.clone();
            let prefs = prefs.clone();
            move |event: MouseEvent| {
                let at = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                feed_pointer(&effects, &prefs, PointerKind::MouseMove, at);
            }
        }),
        Listener::on_window("touchmove", touch(PointerKind::TouchMove)),
        Listener::on_window("touchstart", touch(PointerKind::TouchStart)),
        Listener::on_window("mousedown", {
            let effects = effects.clone();
            move |_: MouseEvent| effects.borrow_mut().reveal()
        }),
        Listener::on_window("mouseover", {
            let effects = effects.clone();
            move |event: MouseEvent| {
                effects.borrow_mut().set_hovering(hovers_interactive(&event));
            }
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Spring-follow dot and ring plus the sparkle trail, drawn over the whole
/// page.
#[function_component(CustomCursor)]
pub fn custom_cursor() -> Html {
    let canvas_ref = use_node_ref();
    let dot_ref = use_node_ref();
    let ring_ref = use_node_ref();
    let effects = use_mut_ref(|| CursorEffects::new(now_ms().to_bits()));
    let prefs = use_mut_ref(Prefs::default);
    *prefs.borrow_mut() = use_prefs();

    {
        let canvas_ref = canvas_ref.clone();
        let dot_ref = dot_ref.clone();
        let ring_ref = ring_ref.clone();
        use_effect_with((), move |_| {
            let listeners = pointer_listeners(&effects, &prefs);

            let animation = canvas_ref
                .cast::<HtmlCanvasElement>()
                .ok_or_else(|| JsValue::from_str("cursor canvas not mounted"))
                .and_then(|canvas| {
                    let ctx = context_2d(&canvas)?;
                    let mut clock = Clock::default();
                    let mut last = None::<f64>;
                    AnimationLoop::start(move |timestamp| {
                        clock.advance(last.map_or(0.0, |l| ((timestamp - l) / 1000.0) as f32));
                        last = Some(timestamp);

                        let mut effects = effects.borrow_mut();
                        let at = effects.tick(clock.delta);
                        let ring = effects.ring();
                        let shown = if effects.is_visible() { 1.0 } else { 0.0 };
                        set_style(
                            &dot_ref,
                            &format!(
                                "opacity: {shown}; transform: translate3d({}px, {}px, 0) \
                                 translate(-50%, -50%) scale({});",
                                at.x, at.y, ring.dot_scale
                            ),
                        );
                        set_style(
                            &ring_ref,
                            &format!(
                                "opacity: {}; width: {size}px; height: {size}px; \
                                 transform: translate3d({}px, {}px, 0) translate(-50%, -50%);",
                                shown * ring.opacity,
                                at.x,
                                at.y,
                                size = ring.size,
                            ),
                        );

                        let (width, height) = fit_to_display(&canvas, &ctx);
                        let sparkles: Vec<DrawCommand> = effects
                            .sparkles
                            .live()
                            .map(|particle| DrawCommand::Circle {
                                center: particle.position,
                                radius: particle.size,
                                color: particle.color.fade(particle.alpha()),
                            })
                            .collect();
                        paint(&ctx, width, height, None, &sparkles);
                    })
                });
            if let Err(err) = &animation {
                log::warn!("cursor effects disabled: {err:?}");
            }

            move || {
                drop(animation);
                drop(listeners);
            }
        });
    }

    html! {
        <div class="cursor-layer" aria-hidden="true">
            <canvas ref={canvas_ref} class="cursor-sparkles" />
            <div ref={ring_ref} class="cursor-ring" />
            <div ref={dot_ref} class="cursor-dot" />
        </div>
    }
}
