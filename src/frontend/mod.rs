mod audio;
mod canvas;
mod chat;
mod contact;
mod cursor;
mod hooks;
mod loader;
mod maintenance;
mod navigation;
mod playground;
mod sections;

use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, ScrollBehavior, ScrollIntoViewOptions, Storage};
use yew::prelude::*;

use crate::config::{loader_review_requested, maintenance_requested, SOUND_KEY, THEME_KEY};
use crate::cursor::Tone;
use crate::loader::LoaderVariant;
use crate::motion::{CubicBezier, Reveal};
use crate::prefs::{SoundPreference, Theme};

pub use audio::Audio;

/// Visitor preferences shared with every component through context.
#[derive(Clone, PartialEq)]
pub struct Prefs {
    pub theme: Theme,
    pub sound: SoundPreference,
    pub audio: Audio,
    pub toggle_theme: Callback<()>,
    pub toggle_sound: Callback<()>,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sound: SoundPreference::default(),
            audio: Audio::default(),
            toggle_theme: Callback::noop(),
            toggle_sound: Callback::noop(),
        }
    }
}

impl Prefs {
    pub fn play(&self, tone: Tone) {
        if self.sound.enabled {
            self.audio.play(tone);
        }
    }

    pub fn click(&self) {
        self.play(Tone::CLICK);
    }
}

#[hook]
pub fn use_prefs() -> Prefs {
    use_context::<Prefs>().unwrap_or_default()
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn read_stored(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

fn persist(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("could not persist {key}");
        }
    }
}

fn apply_theme(theme: Theme) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    // The browser runs the callback later, so it has to outlive this call.
    let callback = Closure::once_into_js(move || apply_theme(theme));

    if start_view_transition
        .call1(&document_js, &callback)
        .is_err()
    {
        apply_theme(theme);
    }
}

fn location_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub(crate) fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub(crate) fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub(crate) fn scroll_to_section(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        log::debug!("no section #{id}");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Inline style for an entrance animation; `offset` is applied along X when
/// `horizontal`, otherwise along Y.
pub(crate) fn reveal_style(reveal: Reveal, visible: bool, horizontal: bool) -> String {
    let state = reveal.sample(visible.then_some(f32::INFINITY));
    let axis = if horizontal { "X" } else { "Y" };
    let curve = CubicBezier::SMOOTH_OUT.css();
    format!(
        "opacity: {}; transform: translate{axis}({}px); \
         transition: opacity {d}s {curve} {delay}s, transform {d}s {curve} {delay}s;",
        state.opacity,
        state.translate,
        d = reveal.duration,
        delay = reveal.delay,
    )
}

#[function_component(Home)]
fn home() -> Html {
    let loading = use_state(|| true);

    let on_complete = {
        let loading = loading.clone();
        Callback::from(move |_| {
            if let Some(win) = window() {
                win.scroll_to_with_x_and_y(0.0, 0.0);
            }
            loading.set(false);
        })
    };

    html! {
        <main class="page">
            if *loading {
                if loader_review_requested(&location_search()) {
                    <loader::LoaderSwitcher on_complete={on_complete} />
                } else {
                    <loader::Loader variant={LoaderVariant::Terminal} on_complete={on_complete} />
                }
            }
            <navigation::Navigation />
            <sections::Hero />
            <sections::About />
            <sections::Skills />
            <sections::Experience />
            <sections::Projects />
            <playground::DevOpsPlayground />
            <contact::Contact />
            <chat::ChatWidget />
        </main>
    }
}

#[function_component(App)]
fn app() -> Html {
    let maintenance = use_memo((), |_| maintenance_requested(&location_search()));
    let theme = use_state(Theme::default);
    let sound = use_state(|| SoundPreference::from_stored(read_stored(SOUND_KEY).as_deref()));
    let audio = use_memo((), |_| Audio::default());

    {
        let current = *theme;
        let audio = (*audio).clone();
        use_effect_with((), move |_| {
            apply_theme(current);
            move || audio.close()
        });
    }

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = (*theme).toggled();
            persist(THEME_KEY, next.as_str());
            apply_theme_with_transition(next);
            theme.set(next);
        })
    };

    let toggle_sound = {
        let sound = sound.clone();
        let audio = (*audio).clone();
        Callback::from(move |_| {
            let next = (*sound).toggled();
            persist(SOUND_KEY, next.as_str());
            if next.enabled {
                audio.play(Tone {
                    gain: SoundPreference::CONFIRM_GAIN,
                    ..Tone::CLICK
                });
            }
            sound.set(next);
        })
    };

    let prefs = Prefs {
        theme: *theme,
        sound: *sound,
        audio: (*audio).clone(),
        toggle_theme,
        toggle_sound,
    };

    html! {
        <ContextProvider<Prefs> context={prefs}>
            <cursor::CustomCursor />
            if *maintenance {
                <maintenance::Maintenance />
            } else {
                <Home />
            }
        </ContextProvider<Prefs>>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).ok();
    log::info!("portfolio starting");

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
