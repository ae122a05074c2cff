use yew::prelude::*;

use super::hooks::{use_mounted, use_window_scroll};
use super::{reveal_style, scroll_to_section, use_prefs};
use crate::content::{NavItem, NAV_ITEMS};
use crate::motion::{CubicBezier, Reveal};
use crate::scroll::nav_is_scrolled;

const SLIDE_IN_SECONDS: f32 = 0.6;
const ITEM_STAGGER_SECONDS: f32 = 0.1;

fn item_reveal(index: usize, offset: f32) -> Reveal {
    Reveal::new(index as f32 * ITEM_STAGGER_SECONDS, 0.5, offset)
}

#[function_component(Navigation)]
pub fn navigation() -> Html {
    let prefs = use_prefs();
    let scrolled = nav_is_scrolled(use_window_scroll());
    let menu_open = use_state(|| false);
    let entered = use_mounted();

    let go_to = |item: &'static NavItem| {
        let prefs = prefs.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            prefs.click();
            menu_open.set(false);
            scroll_to_section(item.section);
        })
    };

    let toggle_menu = {
        let prefs = prefs.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(!*menu_open);
            prefs.click();
        })
    };

    let toggle_theme = {
        let prefs = prefs.clone();
        Callback::from(move |_: MouseEvent| {
            prefs.toggle_theme.emit(());
            prefs.click();
        })
    };

    // The sound toggle plays its own confirmation click.
    let toggle_sound = {
        let toggle = prefs.toggle_sound.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };

    let nav_style = format!(
        "transform: translateY({}px); transition: transform {SLIDE_IN_SECONDS}s {}, \
         background-color 0.5s, padding 0.5s;",
        if entered { 0 } else { -100 },
        CubicBezier::SMOOTH_OUT.css(),
    );

    html! {
        <>
            <nav class={classes!("nav", scrolled.then_some("nav-scrolled"))} style={nav_style}>
                <div class="container nav-inner">
                    <div class="nav-links">
                        { for NAV_ITEMS.iter().enumerate().map(|(index, item)| html! {
                            <button
                                key={item.section}
                                class="nav-link"
                                data-magnetic="true"
                                style={reveal_style(item_reveal(index, -20.0), entered, false)}
                                onclick={go_to(item)}
                            >
                                { item.label }
                            </button>
                        }) }
                    </div>
                    <div class="nav-controls">
                        <button
                            class="nav-toggle"
                            aria-label={prefs.sound.toggle_label()}
                            onclick={toggle_sound}
                        >
                            { if prefs.sound.enabled { "🔊" } else { "🔇" } }
                        </button>
                        <button
                            class="nav-toggle"
                            aria-label={prefs.theme.toggle_label()}
                            onclick={toggle_theme}
                        >
                            { prefs.theme.icon() }
                        </button>
                        <button
                            class="nav-toggle nav-menu-toggle"
                            aria-label="Toggle menu"
                            aria-expanded={(*menu_open).to_string()}
                            onclick={toggle_menu}
                        >
                            { if *menu_open { "✕" } else { "☰" } }
                        </button>
                    </div>
                </div>
            </nav>
            if *menu_open {
                <div class="mobile-menu">
                    { for NAV_ITEMS.iter().enumerate().map(|(index, item)| html! {
                        <button
                            key={item.section}
                            class="mobile-link"
                            style={reveal_style(item_reveal(index, 20.0), true, false)}
                            onclick={go_to(item)}
                        >
                            { item.label }
                        </button>
                    }) }
                </div>
            }
        </>
    }
}
