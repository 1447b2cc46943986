use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::{rngs::StdRng, SeedableRng};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};
use yew::prelude::*;

use crate::utils::particles::{Bounds, ParticleField, PARTICLE_COUNT};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn fit_to_viewport(window: &Window, canvas: &HtmlCanvasElement) {
    let width = window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
}

fn bounds_of(canvas: &HtmlCanvasElement) -> Bounds {
    Bounds {
        width: canvas.width() as f64,
        height: canvas.height() as f64,
    }
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
    let callback = callback.borrow();
    let callback = callback.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

/// Starts the resize listener and the redraw loop. The returned closure
/// undoes both.
fn start_animation(canvas: HtmlCanvasElement) -> Option<Box<dyn FnOnce()>> {
    let window = web_sys::window()?;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;

    let on_resize = Closure::<dyn Fn()>::new({
        let canvas = canvas.clone();
        move || {
            if let Some(win) = web_sys::window() {
                fit_to_viewport(&win, &canvas);
            }
        }
    });
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .ok()?;
    fit_to_viewport(&window, &canvas);

    // Particles are not respawned on resize; the next update resets any that
    // ended up outside the new bounds.
    let mut field = ParticleField::new(PARTICLE_COUNT, bounds_of(&canvas), StdRng::from_entropy());
    let frame_id = Rc::new(Cell::new(None::<i32>));
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    {
        let tick_handle = tick.clone();
        let frame_id = frame_id.clone();
        let window = window.clone();
        *tick.borrow_mut() = Some(Closure::new(move || {
            let bounds = bounds_of(&canvas);
            field.step(bounds);
            if let Err(e) = field.draw(&ctx, bounds) {
                gloo_console::error!("Failed to draw particles:", e);
            }
            frame_id.set(request_frame(&window, &tick_handle));
        }));
    }
    frame_id.set(request_frame(&window, &tick));

    Some(Box::new(move || {
        if let Some(id) = frame_id.take() {
            let _ = window.cancel_animation_frame(id);
        }
        let _ = window.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        // Breaks the closure's reference to itself.
        tick.borrow_mut().take();
    }))
}

#[function_component]
pub fn AnimatedBackground() -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |_| {
                let teardown = canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .and_then(start_animation);
                move || {
                    if let Some(teardown) = teardown {
                        teardown();
                    }
                }
            },
            (),
        );
    }

    html! {
        <canvas ref={canvas_ref} style="position: absolute; inset: 0;"></canvas>
    }
}
