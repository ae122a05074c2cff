use std::time::Duration;

use yew::prelude::*;

use super::hooks::{use_in_view, use_interval};
use super::{reveal_style, use_prefs};
use crate::content::{PipelineStage, PIPELINE_STAGES};
use crate::devops::{LogTone, StageConsole, LINE_INTERVAL_SECONDS};
use crate::motion::Reveal;

#[derive(Properties, PartialEq)]
struct ConsoleProps {
    stage: &'static PipelineStage,
    index: usize,
    lines: &'static [&'static str],
}

#[function_component(Console)]
fn console(props: &ConsoleProps) -> Html {
    let stage = props.stage;

    html! {
        <div class="console">
            <div class="console-header">
                <span class="muted">{ "console.log" }</span>
                <div class="console-lights">
                    <span class="light light-red" />
                    <span class="light light-yellow" />
                    <span class="light light-green" />
                </div>
            </div>
            <div class="console-body">
                { for props.lines.iter().enumerate().map(|(i, line)| html! {
                    <div key={format!("{}-{i}", props.index)} class="console-line">
                        <span class="console-prompt">{ "$" }</span>
                        <span style={format!("color: {};", LogTone::classify(line).color())}>{ *line }</span>
                    </div>
                }) }
                <div class="console-caret">{ "_" }</div>
            </div>
            <div class="console-status" style={format!("color: {};", stage.color)}>
                { format!("STATUS: {}", stage.status) }
            </div>
        </div>
    }
}

#[function_component(DevOpsPlayground)]
pub fn devops_playground() -> Html {
    let prefs = use_prefs();
    let section_ref = use_node_ref();
    let visible = use_in_view(section_ref.clone());
    let console = use_mut_ref(StageConsole::default);
    let selections = use_mut_ref(|| 0u32);
    let redraw = use_force_update();
    let active = console.borrow().active();

    {
        let console = console.clone();
        let redraw = redraw.clone();
        // Re-selecting the current stage restarts its reveal too.
        use_interval(
            (active, *selections.borrow()),
            Duration::from_secs_f32(LINE_INTERVAL_SECONDS),
            move || {
                let mut console = console.borrow_mut();
                console.advance(LINE_INTERVAL_SECONDS);
                redraw.force_update();
                !console.is_finished()
            },
        );
    }

    let select = |index: usize| {
        let console = console.clone();
        let selections = selections.clone();
        let prefs = prefs.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            if console.borrow_mut().select(index) {
                *selections.borrow_mut() += 1;
                log::debug!("pipeline stage {index} selected");
            }
            prefs.click();
            redraw.force_update();
        })
    };

    let (stage, lines) = {
        let console = console.borrow();
        (console.stage(), console.visible())
    };

    html! {
        <section id="devops" ref={section_ref} class="section devops">
            <div class="container">
                <div class="section-header" style={reveal_style(Reveal::new(0.0, 0.8, 30.0), visible, false)}>
                    <span class="eyebrow">{ "Infrastructure Dashboard" }</span>
                    <h2 class="section-title">
                        { "DevOps " }<span class="gradient-text">{ "Command Center" }</span>
                    </h2>
                </div>
                <div class="devops-grid">
                    <div class="stage-list">
                        { for PIPELINE_STAGES.iter().enumerate().map(|(index, item)| {
                            let is_active = index == active;
                            html! {
                                <div
                                    key={item.name}
                                    role="button"
                                    class={classes!("stage", is_active.then_some("active"))}
                                    style={reveal_style(Reveal::new(index as f32 * 0.1, 0.5, -20.0), visible, true)}
                                    onclick={select(index)}
                                >
                                    if is_active {
                                        <span class="stage-glow" style={format!("background-color: {};", item.color)} />
                                    }
                                    <span
                                        class="stage-mark"
                                        style={format!("color: {};", if is_active { item.color } else { "#6b7280" })}
                                    >
                                        { "●" }
                                    </span>
                                    <div>
                                        <h4>{ item.name }</h4>
                                        <p class="muted">{ StageConsole::stage_label(index) }</p>
                                    </div>
                                    <span class="stage-chevron">{ "›" }</span>
                                </div>
                            }
                        }) }
                    </div>
                    <Console key={active} {stage} index={active} {lines} />
                </div>
            </div>
        </section>
    }
}
