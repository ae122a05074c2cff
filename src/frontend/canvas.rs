use std::{
    cell::{Cell, RefCell},
    f64::consts::TAU,
    rc::Rc,
};

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::hooks::use_intersection;
use crate::scene::{project, Clock, DrawCommand, Frame, Rgba, Scene, SceneInputs, SceneKind, Viewport};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that reschedules itself until dropped.
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    /// `on_frame` receives the frame timestamp in milliseconds.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let handle = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next = callback.clone();
        let next_handle = handle.clone();
        let next_window = win.clone();
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            on_frame(timestamp);
            if let Some(closure) = next.borrow().as_ref() {
                next_handle.set(
                    next_window
                        .request_animation_frame(closure.as_ref().unchecked_ref())
                        .ok(),
                );
            }
        }));

        if let Some(closure) = callback.borrow().as_ref() {
            handle.set(Some(
                win.request_animation_frame(closure.as_ref().unchecked_ref())?,
            ));
        }
        Ok(Self { handle, callback })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(win), Some(id)) = (window(), self.handle.take()) {
            let _ = win.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself.
        self.callback.borrow_mut().take();
    }
}

pub(super) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Matches the backing store to the element's CSS size; returns that size.
pub(super) fn fit_to_display(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) -> (f64, f64) {
    let ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0).min(2.0);
    let width = f64::from(canvas.client_width());
    let height = f64::from(canvas.client_height());
    let backing_width = (width * ratio).round() as u32;
    let backing_height = (height * ratio).round() as u32;
    if canvas.width() != backing_width || canvas.height() != backing_height {
        canvas.set_width(backing_width);
        canvas.set_height(backing_height);
    }
    let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    (width, height)
}

pub fn paint(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    background: Option<Rgba>,
    commands: &[DrawCommand],
) {
    match background {
        Some(color) => {
            ctx.set_fill_style_str(&color.css());
            ctx.fill_rect(0.0, 0.0, width, height);
        }
        None => ctx.clear_rect(0.0, 0.0, width, height),
    }

    for command in commands {
        match command {
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(f64::from(*width));
                ctx.begin_path();
                ctx.move_to(f64::from(from.x), f64::from(from.y));
                ctx.line_to(f64::from(to.x), f64::from(to.y));
                ctx.stroke();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&color.css());
                ctx.begin_path();
                let _ = ctx.arc(
                    f64::from(center.x),
                    f64::from(center.y),
                    f64::from(*radius),
                    0.0,
                    TAU,
                );
                ctx.fill();
            }
            DrawCommand::Text {
                at,
                text,
                size,
                color,
            } => {
                ctx.set_fill_style_str(&color.css());
                ctx.set_font(&format!("{:.1}px ui-monospace, monospace", size));
                let _ = ctx.fill_text(text, f64::from(at.x), f64::from(at.y));
            }
        }
    }
}

struct Stage {
    scene: Box<dyn Scene>,
    clock: Clock,
    frame: Frame,
    last_timestamp: Option<f64>,
}

impl Stage {
    fn render(
        &mut self,
        timestamp: f64,
        canvas: &HtmlCanvasElement,
        ctx: &CanvasRenderingContext2d,
        inputs: &mut SceneInputs,
    ) {
        let delta = self
            .last_timestamp
            .map_or(0.0, |last| ((timestamp - last) / 1000.0) as f32);
        self.last_timestamp = Some(timestamp);
        self.clock.advance(delta);

        let (width, height) = fit_to_display(canvas, ctx);
        if width < 1.0 || height < 1.0 {
            return;
        }
        let viewport = Viewport::new(width as f32, height as f32);
        inputs.aspect = viewport.aspect();

        self.scene.update(&self.clock, inputs);
        self.frame.clear();
        self.scene.draw(&mut self.frame);
        let commands = project(&self.frame, &self.scene.camera(), viewport);
        paint(ctx, width, height, self.scene.background(), &commands);
    }
}

#[derive(Properties, PartialEq)]
pub struct SceneCanvasProps {
    pub kind: SceneKind,
    #[prop_or(1)]
    pub seed: u64,
    #[prop_or_default]
    pub scroll_progress: f32,
    #[prop_or_default]
    pub hovered: bool,
    #[prop_or(true)]
    pub dark: bool,
    /// Set false to freeze the scene without tearing it down.
    #[prop_or(true)]
    pub active: bool,
    /// Receives the scene clock's elapsed seconds after each drawn frame.
    #[prop_or_default]
    pub on_tick: Callback<f32>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onmouseenter: Callback<MouseEvent>,
    #[prop_or_default]
    pub onmouseleave: Callback<MouseEvent>,
}

/// Hosts one [`Scene`] on a 2D canvas, redrawn every animation frame while
/// the canvas is on screen.
#[function_component(SceneCanvas)]
pub fn scene_canvas(props: &SceneCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let on_screen = use_intersection(canvas_ref.clone(), "0px", false);
    let inputs = use_mut_ref(SceneInputs::default);
    let on_tick = use_mut_ref(Callback::<f32>::noop);
    let running = use_mut_ref(|| true);

    {
        let mut inputs = inputs.borrow_mut();
        inputs.scroll_progress = props.scroll_progress;
        inputs.hovered = props.hovered;
        inputs.dark = props.dark;
    }
    *on_tick.borrow_mut() = props.on_tick.clone();
    *running.borrow_mut() = props.active && on_screen;

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((props.kind, props.seed), move |&(kind, seed)| {
            let started = canvas_ref
                .cast::<HtmlCanvasElement>()
                .ok_or_else(|| JsValue::from_str("canvas not mounted"))
                .and_then(|canvas| {
                    let ctx = context_2d(&canvas)?;
                    let mut stage = Stage {
                        scene: kind.build(seed),
                        clock: Clock::default(),
                        frame: Frame::new(),
                        last_timestamp: None,
                    };
                    log::debug!("scene {} started", stage.scene.name());
                    AnimationLoop::start(move |timestamp| {
                        if !*running.borrow() {
                            stage.last_timestamp = None;
                            return;
                        }
                        stage.render(timestamp, &canvas, &ctx, &mut inputs.borrow_mut());
                        on_tick.borrow().emit(stage.clock.elapsed);
                    })
                });
            if let Err(err) = &started {
                log::warn!("scene {kind:?} failed to start: {err:?}");
            }
            move || {
                if started.is_ok() {
                    log::debug!("scene {kind:?} stopped");
                }
                drop(started);
            }
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            class={classes!("scene-canvas", props.class.clone())}
            onmouseenter={props.onmouseenter.clone()}
            onmouseleave={props.onmouseleave.clone()}
        />
    }
}
