use yew::prelude::*;

use super::canvas::SceneCanvas;
use super::hooks::use_in_view;
use super::{reveal_style, use_prefs};
use crate::content::{footer_line, ContactLink, CONTACT_BLURB, CONTACT_LINKS, CONTACT_TITLE, PROFILE};
use crate::motion::Reveal;
use crate::scene::SceneKind;

fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

#[derive(Properties, PartialEq)]
struct LinkCardProps {
    link: ContactLink,
    index: usize,
    visible: bool,
}

#[function_component(LinkCard)]
fn link_card(props: &LinkCardProps) -> Html {
    let prefs = use_prefs();
    let link = props.link;
    let new_tab = link.opens_new_tab();
    let onclick = Callback::from(move |_: MouseEvent| prefs.click());

    html! {
        <a
            href={link.href}
            target={new_tab.then_some("_blank")}
            rel={new_tab.then_some("noopener noreferrer")}
            class="contact-link glass-card"
            data-magnetic="true"
            style={reveal_style(Reveal::new(0.3 + props.index as f32 * 0.1, 0.6, 20.0), props.visible, false)}
            {onclick}
        >
            <span class="contact-label">{ link.label }</span>
            <span class="muted">{ link.handle }</span>
        </a>
    }
}

#[function_component(Contact)]
pub fn contact() -> Html {
    let prefs = use_prefs();
    let section_ref = use_node_ref();
    let visible = use_in_view(section_ref.clone());
    let show_location = use_state_eq(|| false);

    let hover = |value: bool| {
        let show_location = show_location.clone();
        Callback::from(move |_: MouseEvent| show_location.set(value))
    };

    let (lead, accent) = CONTACT_TITLE
        .rsplit_once(' ')
        .unwrap_or((CONTACT_TITLE, ""));

    html! {
        <section id="contact" ref={section_ref} class="section contact">
            <div class="container">
                <div class="section-header" style={reveal_style(Reveal::new(0.0, 0.8, 30.0), visible, false)}>
                    <span class="eyebrow">{ "Get In Touch" }</span>
                    <h2 class="section-title">
                        { lead }{ " " }<span class="gradient-text">{ accent }</span>
                    </h2>
                    <p class="section-subtitle">{ CONTACT_BLURB }</p>
                </div>
                <div class="location-card glass-card" style={reveal_style(Reveal::new(0.0, 0.6, 30.0), visible, false)}>
                    <div class="location-head">
                        <span class="location-pin">{ "⌖" }</span>
                        <div>
                            <h4>{ "Location" }</h4>
                            <p
                                class="location-name"
                                style={reveal_style(Reveal::new(0.0, 0.3, -10.0), *show_location, true)}
                            >
                                { PROFILE.location }
                            </p>
                        </div>
                    </div>
                    <div class="globe-stage">
                        if visible {
                            <SceneCanvas
                                kind={SceneKind::ContactGlobe}
                                hovered={*show_location}
                                dark={prefs.theme.is_dark()}
                                onmouseenter={hover(true)}
                                onmouseleave={hover(false)}
                            />
                        }
                    </div>
                </div>
                <div class="contact-links">
                    { for CONTACT_LINKS.iter().enumerate().map(|(index, link)| html! {
                        <LinkCard key={link.label} link={*link} {index} {visible} />
                    }) }
                </div>
                <footer class="footer" style={reveal_style(Reveal::new(0.8, 0.6, 0.0), visible, false)}>
                    <p class="muted">{ footer_line(current_year()) }</p>
                </footer>
            </div>
        </section>
    }
}
