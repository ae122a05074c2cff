use std::time::Duration;

use yew::prelude::*;

use super::canvas::SceneCanvas;
use super::hooks::{
    element_extent, use_in_view, use_interval, use_mounted, use_viewport, use_window_scroll,
};
use super::{reveal_style, scroll_to_section, use_prefs};
use crate::config::asset_path;
use crate::content::{
    Experience as Role, Project, ProjectFilter, SkillCategory, ABOUT_PARAGRAPHS, ABOUT_TITLE,
    EXPERIENCES, HERO_ACTIONS, PROFILE, PROFILE_SLIDES, SKILL_CATEGORIES, SLIDE_PERIOD_SECONDS,
    STATS,
};
use crate::motion::{Cycle, Reveal};
use crate::scene::SceneKind;
use crate::scroll::{centered_progress, section_progress};

/// Header fade-up shared by the content sections.
const HEADER_REVEAL: Reveal = Reveal::new(0.0, 0.8, 30.0);

#[derive(Properties, PartialEq)]
struct SectionHeaderProps {
    eyebrow: &'static str,
    title: &'static str,
    accent: &'static str,
    subtitle: &'static str,
    visible: bool,
}

#[function_component(SectionHeader)]
fn section_header(props: &SectionHeaderProps) -> Html {
    html! {
        <div class="section-header" style={reveal_style(HEADER_REVEAL, props.visible, false)}>
            <span class="eyebrow">{ props.eyebrow }</span>
            <h2 class="section-title">
                { props.title }{ " " }<span class="gradient-text">{ props.accent }</span>
            </h2>
            <p class="section-subtitle">{ props.subtitle }</p>
        </div>
    }
}

#[function_component(Hero)]
pub fn hero() -> Html {
    let prefs = use_prefs();
    let section_ref = use_node_ref();
    let scroll_y = use_window_scroll();
    let (_, viewport_height) = use_viewport();
    let mounted = use_mounted();

    let progress = element_extent(&section_ref)
        .map(|(top, height)| section_progress(scroll_y, top, height, viewport_height))
        .unwrap_or(0.0);

    let go_to = |section: &'static str| {
        let prefs = prefs.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            prefs.click();
            scroll_to_section(section);
        })
    };

    html! {
        <section id="home" ref={section_ref} class="hero">
            <div class="hero-copy">
                <p class="hero-tagline" style={reveal_style(Reveal::new(0.2, 0.6, 20.0), mounted, false)}>
                    { PROFILE.tagline }
                </p>
                <h1
                    class="hero-headline"
                    aria-label={PROFILE.headline}
                    style={reveal_style(Reveal::new(0.4, 0.6, 30.0), mounted, false)}
                >
                    { "I build " }
                    <span class="gradient-text-glow">{ "scalable interfaces" }</span>
                    { " & " }
                    <span class="gradient-text-glow">{ "resilient cloud systems" }</span>
                </h1>
                <div class="hero-actions" style={reveal_style(Reveal::new(0.6, 0.6, 20.0), mounted, false)}>
                    { for HERO_ACTIONS.iter().enumerate().map(|(index, action)| html! {
                        <a
                            key={action.section}
                            href={format!("#{}", action.section)}
                            class={if index == 0 { "button button-solid" } else { "button button-outline" }}
                            onclick={go_to(action.section)}
                        >
                            { action.label }
                        </a>
                    }) }
                </div>
            </div>
            <div class="hero-stage">
                <SceneCanvas
                    kind={SceneKind::HeroLaptop}
                    scroll_progress={progress}
                    dark={prefs.theme.is_dark()}
                />
            </div>
            <div class="scroll-hint">{ "SCROLL" }</div>
        </section>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    let section_ref = use_node_ref();
    let visible = use_in_view(section_ref.clone());
    let hovering = use_state_eq(|| false);
    let ticks = use_mut_ref(|| 0u32);
    let redraw = use_force_update();
    let cycle = Cycle::new(PROFILE_SLIDES.len(), SLIDE_PERIOD_SECONDS);

    {
        let ticks = ticks.clone();
        let hovering = *hovering;
        use_interval(
            hovering,
            Duration::from_secs_f32(SLIDE_PERIOD_SECONDS),
            move || {
                if hovering {
                    *ticks.borrow_mut() += 1;
                    redraw.force_update();
                }
                hovering
            },
        );
    }

    let current = cycle.index(
        hovering.then(|| *ticks.borrow() as f32 * SLIDE_PERIOD_SECONDS),
    );

    let set_hover = |value: bool| {
        let hovering = hovering.clone();
        let ticks = ticks.clone();
        Callback::from(move |_: MouseEvent| {
            *ticks.borrow_mut() = 0;
            hovering.set(value);
        })
    };

    html! {
        <section id="about" ref={section_ref} class="section about">
            <div class="container about-grid">
                <div
                    class="portrait"
                    style={reveal_style(Reveal::new(0.0, 0.8, -50.0), visible, true)}
                    onmouseenter={set_hover(true)}
                    onmouseleave={set_hover(false)}
                >
                    <div class="portrait-frame glass-card">
                        { for PROFILE_SLIDES.iter().enumerate().map(|(index, slide)| html! {
                            <img
                                key={*slide}
                                src={asset_path(slide)}
                                alt={PROFILE.tagline}
                                class={classes!("portrait-slide", (index == current).then_some("active"))}
                            />
                        }) }
                        <div
                            class="portrait-badge glass"
                            style={reveal_style(Reveal::new(0.5, 0.6, 20.0), visible, false)}
                        >
                            <p class="muted">{ "Based in" }</p>
                            <p class="strong">{ PROFILE.location }</p>
                        </div>
                    </div>
                </div>
                <div class="about-copy" style={reveal_style(Reveal::new(0.2, 0.8, 50.0), visible, true)}>
                    <span class="eyebrow">{ "About Me" }</span>
                    <h2 class="section-title">{ ABOUT_TITLE }</h2>
                    { for ABOUT_PARAGRAPHS.iter().map(|paragraph| html! {
                        <p class="muted">{ *paragraph }</p>
                    }) }
                    <div class="stats">
                        { for STATS.iter().enumerate().map(|(index, stat)| html! {
                            <div
                                key={stat.label}
                                class="stat"
                                style={reveal_style(Reveal::new(0.5 + index as f32 * 0.1, 0.6, 20.0), visible, false)}
                            >
                                <div class="stat-value gradient-text">{ stat.value }</div>
                                <div class="stat-label">{ stat.label }</div>
                            </div>
                        }) }
                    </div>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SkillCardProps {
    category: SkillCategory,
    index: usize,
    visible: bool,
}

#[function_component(SkillCard)]
fn skill_card(props: &SkillCardProps) -> Html {
    let category = props.category;
    let base = 0.2 + props.index as f32 * 0.1;

    html! {
        <div class="skill-card glass-card" style={reveal_style(Reveal::new(base, 0.5, 30.0), props.visible, false)}>
            <div class="card-glow" style={format!("background: {};", category.color)} />
            <h3 class="card-title" style={format!("--accent: {};", category.color)}>{ category.title }</h3>
            <div class="chips">
                { for category.skills.iter().enumerate().map(|(i, skill)| html! {
                    <span
                        key={*skill}
                        class="chip"
                        style={reveal_style(Reveal::new(base + 0.2 + i as f32 * 0.05, 0.3, 0.0), props.visible, false)}
                    >
                        { *skill }
                    </span>
                }) }
            </div>
        </div>
    }
}

#[function_component(Skills)]
pub fn skills() -> Html {
    let section_ref = use_node_ref();
    let visible = use_in_view(section_ref.clone());

    html! {
        <section id="skills" ref={section_ref} class="section skills">
            <div class="container">
                <SectionHeader
                    eyebrow="Technical Arsenal"
                    title="Skills &"
                    accent="Technologies"
                    subtitle="A comprehensive ecosystem of tools and frameworks for building modern digital solutions."
                    {visible}
                />
                <div class="skills-grid">
                    { for SKILL_CATEGORIES.iter().enumerate().map(|(index, category)| html! {
                        <SkillCard key={category.title} category={*category} {index} {visible} />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct RoleCardProps {
    role: Role,
    index: usize,
    visible: bool,
}

#[function_component(RoleCard)]
fn role_card(props: &RoleCardProps) -> Html {
    let expanded = use_state(|| false);
    let role = props.role;
    let from_left = props.index % 2 == 0;
    let reveal = Reveal::new(
        props.index as f32 * 0.2,
        0.8,
        if from_left { -50.0 } else { 50.0 },
    );

    let toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    let card = html! {
        <div class="role-card glass-card">
            <h3 class="card-title">{ role.role }</h3>
            <div class="muted">{ role.company }</div>
            <div class="role-meta">
                <span>{ role.period }</span>
                <span>{ role.location }</span>
            </div>
            <p class="muted">{ role.description }</p>
            <button class="link-button" onclick={toggle}>
                { if *expanded { "Show less" } else { "Show more" } }
            </button>
            if *expanded {
                <div class="role-details">
                    <h4>{ "Key Achievements" }</h4>
                    <ul>
                        { for role.highlights.iter().map(|highlight| html! { <li>{ *highlight }</li> }) }
                    </ul>
                    <div class="chips">
                        { for role.technologies.iter().map(|tech| html! {
                            <span key={*tech} class="chip">{ *tech }</span>
                        }) }
                    </div>
                </div>
            }
        </div>
    };

    html! {
        <div class="timeline-row" style={reveal_style(reveal, props.visible, true)}>
            <div class="timeline-side">
                if from_left { { card.clone() } }
            </div>
            <div class="timeline-dot" />
            <div class="timeline-side">
                if !from_left { { card } }
            </div>
        </div>
    }
}

#[function_component(Experience)]
pub fn experience() -> Html {
    let section_ref = use_node_ref();
    let timeline_ref = use_node_ref();
    let visible = use_in_view(section_ref.clone());
    let scroll_y = use_window_scroll();
    let (_, viewport_height) = use_viewport();

    let progress = element_extent(&timeline_ref)
        .map(|(top, height)| centered_progress(scroll_y, top, height, viewport_height))
        .unwrap_or(0.0);

    html! {
        <section id="experience" ref={section_ref} class="section experience">
            <div class="container">
                <SectionHeader
                    eyebrow="Career Journey"
                    title="Professional"
                    accent="Experience"
                    subtitle="A track record of delivering impactful digital transformation projects across diverse industries and technology stacks."
                    {visible}
                />
                <div ref={timeline_ref} class="timeline">
                    <div class="timeline-line" />
                    <div class="timeline-progress" style={format!("height: {:.2}%;", progress * 100.0)} />
                    { for EXPERIENCES.iter().enumerate().map(|(index, role)| html! {
                        <RoleCard key={index} role={*role} {index} {visible} />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: &'static Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = props.project;
    let mounted = use_mounted();

    html! {
        <article
            class="project-card glass-card"
            style={format!(
                "opacity: {}; transform: scale({}); transition: opacity 0.3s, transform 0.3s;",
                if mounted { 1.0 } else { 0.0 },
                if mounted { 1.0 } else { 0.9 },
            )}
        >
            <div class="card-glow" style={format!("background: {};", project.color)} />
            <div class="project-head">
                <span class="project-mark" style={format!("color: {0}; box-shadow: 0 0 20px {0}33;", project.color)}>
                    { "↗" }
                </span>
                <span class="project-category">{ project.category }</span>
            </div>
            <h3 class="card-title">{ project.title }</h3>
            <p class="muted">{ project.description }</p>
            <div class="metrics">
                { for project.metrics.iter().map(|metric| html! {
                    <div key={metric.label} class="metric">
                        <div class="metric-value" style={format!("color: {};", project.color)}>{ metric.value }</div>
                        <div class="metric-label">{ metric.label }</div>
                    </div>
                }) }
            </div>
            <div class="chips project-stack">
                { for project.technologies.iter().map(|tech| html! {
                    <span key={*tech} class="chip">{ *tech }</span>
                }) }
            </div>
        </article>
    }
}

#[function_component(Projects)]
pub fn projects() -> Html {
    let section_ref = use_node_ref();
    let visible = use_in_view(section_ref.clone());
    let filter = use_state_eq(ProjectFilter::default);

    html! {
        <section id="projects" ref={section_ref} class="section projects">
            <div class="container">
                <SectionHeader
                    eyebrow="Featured Work"
                    title="Project"
                    accent="Showcase"
                    subtitle="Designing scalable architectures and intuitive digital experiences."
                    {visible}
                />
                <div class="filter-tabs glass">
                    { for ProjectFilter::TABS.iter().map(|tab| {
                        let tab = *tab;
                        let onclick = {
                            let filter = filter.clone();
                            Callback::from(move |_: MouseEvent| filter.set(tab))
                        };
                        html! {
                            <button
                                key={tab.label()}
                                class={classes!("filter-tab", (*filter == tab).then_some("active"))}
                                {onclick}
                            >
                                { tab.label() }
                            </button>
                        }
                    }) }
                </div>
                <div class="projects-grid">
                    { for filter.apply().map(|project| html! {
                        <ProjectCard key={project.id} {project} />
                    }) }
                </div>
            </div>
        </section>
    }
}
