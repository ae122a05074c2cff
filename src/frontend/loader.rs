use std::{cell::Cell, rc::Rc, time::Duration};

use wasm_bindgen_futures::spawn_local;
use yew::platform::time::sleep;
use yew::prelude::*;

use super::canvas::SceneCanvas;
use super::{now_ms, use_prefs};
use crate::loader::{
    LoaderClock, LoaderSwitcher as Switcher, LoaderVariant, FADE_OUT_SECONDS,
    SAFETY_TIMEOUT_SECONDS,
};
use crate::scene::SceneKind;

#[derive(Properties, PartialEq)]
pub struct LoaderProps {
    pub variant: LoaderVariant,
    pub on_complete: Callback<()>,
    /// When false the loader only finishes through its button or the parent.
    #[prop_or(true)]
    pub auto_complete: bool,
}

#[function_component(Loader)]
pub fn loader(props: &LoaderProps) -> Html {
    let variant = props.variant;
    let auto_complete = props.auto_complete;
    let clock = use_mut_ref(|| {
        if auto_complete {
            LoaderClock::new(variant)
        } else {
            LoaderClock::manual(variant)
        }
    });
    let status = use_state_eq(|| None::<&'static str>);
    let fading = use_state_eq(|| false);
    let seed = use_memo((), |_| now_ms() as u64 | 1);
    let prefs = use_prefs();

    let finish = {
        let fading = fading.clone();
        let on_complete = props.on_complete.clone();
        Callback::from(move |_: ()| {
            fading.set(true);
            let on_complete = on_complete.clone();
            spawn_local(async move {
                sleep(Duration::from_secs_f32(FADE_OUT_SECONDS)).await;
                on_complete.emit(());
            });
        })
    };

    {
        let clock = clock.clone();
        let finish = finish.clone();
        use_effect_with((), move |_| {
            let alive = Rc::new(Cell::new(true));
            if auto_complete {
                let alive = alive.clone();
                spawn_local(async move {
                    sleep(Duration::from_secs_f32(SAFETY_TIMEOUT_SECONDS)).await;
                    if alive.get() && clock.borrow_mut().skip() {
                        log::warn!("loader {} hit the safety timeout", variant.name());
                        finish.emit(());
                    }
                });
            }
            move || alive.set(false)
        });
    }

    let on_tick = {
        let clock = clock.clone();
        let status = status.clone();
        let finish = finish.clone();
        Callback::from(move |elapsed: f32| {
            let completed = {
                let mut clock = clock.borrow_mut();
                status.set(clock.status(elapsed));
                clock.poll(elapsed)
            };
            if completed {
                finish.emit(());
            }
        })
    };

    let on_enter = {
        let clock = clock.clone();
        let finish = finish.clone();
        Callback::from(move |_: MouseEvent| {
            prefs.click();
            if clock.borrow_mut().enter() {
                finish.emit(());
            }
        })
    };

    html! {
        <section
            class={classes!("loader", (*fading).then_some("loader-fading"))}
            style={format!("transition: opacity {FADE_OUT_SECONDS}s ease-out;")}
            aria-label={variant.name()}
        >
            <SceneCanvas
                kind={SceneKind::Intro(variant)}
                seed={*seed}
                on_tick={on_tick}
                class="loader-canvas"
            />
            <div class="loader-overlay">
                if let Some(headline) = variant.headline() {
                    <h2 class="loader-headline">{ headline }</h2>
                }
                if let Some(caption) = variant.caption() {
                    <p class="loader-caption">{ caption }</p>
                }
                if let Some(status) = *status {
                    <p class="loader-status">{ status }</p>
                }
                if variant.skippable() {
                    <button class="loader-enter" onclick={on_enter}>
                        { "[ ENTER SYSTEM ]" }
                    </button>
                }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoaderSwitcherProps {
    pub on_complete: Callback<()>,
}

/// Cycles through the candidate loaders without letting any finish by itself.
#[function_component(LoaderSwitcher)]
pub fn loader_switcher(props: &LoaderSwitcherProps) -> Html {
    let switcher = use_state(Switcher::default);
    let prefs = use_prefs();
    let current = switcher.current();

    let step = |forward: bool| {
        let switcher = switcher.clone();
        let prefs = prefs.clone();
        Callback::from(move |_: MouseEvent| {
            prefs.click();
            let mut next = (*switcher).clone();
            if forward {
                next.next();
            } else {
                next.prev();
            }
            switcher.set(next);
        })
    };

    let select = {
        let on_complete = props.on_complete.clone();
        let prefs = prefs.clone();
        Callback::from(move |_: MouseEvent| {
            prefs.click();
            log::info!("loader concept {} selected", current.name());
            on_complete.emit(());
        })
    };

    html! {
        <section class="loader-switcher">
            <Loader
                key={current.name()}
                variant={current}
                auto_complete={false}
                on_complete={Callback::noop()}
            />
            <div class="switcher-controls">
                <button class="switcher-step" onclick={step(false)}>{ "←" }</button>
                <div class="switcher-label">{ switcher.label() }</div>
                <button class="switcher-step" onclick={step(true)}>{ "→" }</button>
            </div>
            <button class="switcher-select" onclick={select}>{ "SELECT THIS CONCEPT" }</button>
        </section>
    }
}
