use std::time::Duration;

use rand::{rngs::SmallRng, SeedableRng};
use yew::prelude::*;

use super::canvas::SceneCanvas;
use super::hooks::{use_interval, use_mounted};
use super::{now_ms, reveal_style};
use crate::content::PROFILE;
use crate::devops::{MaintenanceProgress, PROGRESS_TICK_MS};
use crate::motion::Reveal;
use crate::scene::SceneKind;

const BLURB: &str = "Our servers are currently undergoing a scheduled quantum enhancement. We will remain offline for a short duration.";

/// Full-screen stand-in for the whole site while maintenance is on.
#[function_component(Maintenance)]
pub fn maintenance() -> Html {
    let progress = use_mut_ref(MaintenanceProgress::default);
    let rng = use_mut_ref(|| SmallRng::seed_from_u64(now_ms().to_bits()));
    let redraw = use_force_update();
    let mounted = use_mounted();

    {
        let progress = progress.clone();
        use_interval(
            (),
            Duration::from_millis(u64::from(PROGRESS_TICK_MS)),
            move || {
                let mut progress = progress.borrow_mut();
                progress.tick(&mut *rng.borrow_mut());
                redraw.force_update();
                if progress.is_complete() {
                    log::info!("maintenance progress reached 100%");
                }
                !progress.is_complete()
            },
        );
    }

    let progress = *progress.borrow();

    html! {
        <main class="maintenance">
            <div class="maintenance-scene">
                <SceneCanvas kind={SceneKind::ServerRack} seed={7} />
            </div>
            <div class="scanlines" />
            <div class="maintenance-content">
                <div class="maintenance-header" style={reveal_style(Reveal::new(0.0, 1.0, -50.0), mounted, false)}>
                    <span class="eyebrow maintenance-eyebrow">{ "System Maintenance" }</span>
                    <h1 class="maintenance-title">{ "SYSTEM UPGRADE" }</h1>
                    <p class="muted">{ BLURB }</p>
                </div>
                <div class="maintenance-panel">
                    <div class="maintenance-status">
                        <span>{ progress.status() }</span>
                        <span class="maintenance-percent">{ format!("{}%", progress.display_percent()) }</span>
                    </div>
                    <div class="progress-track">
                        <div class="progress-fill" style={format!("width: {:.2}%;", progress.percent())} />
                    </div>
                    <div class="maintenance-foot">
                        <span>{ "Secure Connection" }</span>
                        <span>{ "Est. Remaining: 12m 30s" }</span>
                    </div>
                </div>
                <a
                    class="support-link"
                    href={format!("mailto:{}", PROFILE.email)}
                    style={reveal_style(Reveal::new(2.0, 0.6, 0.0), mounted, false)}
                >
                    { "Contact Support" }
                </a>
            </div>
        </main>
    }
}
