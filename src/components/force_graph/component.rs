use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::ForceGraphState;
use super::types::{GraphController, LayoutParams, Theme};
use crate::graph::{NodeKey, ResolvedGraph};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn canvas_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	let inner = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	if fullscreen {
		return (
			inner(window.inner_width(), 800.0),
			inner(window.inner_height(), 600.0),
		);
	}
	(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(600.0)
		}),
	)
}

/// Detach the resize listener and release both closures. Dropping the frame closure
/// breaks its `Rc` cycle; wasm-bindgen defers the free until the current call returns.
fn teardown(animate: &FrameCallback, resize: &FrameCallback) {
	if let (Some(cb), Some(win)) = (resize.borrow_mut().take(), web_sys::window()) {
		let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
	animate.borrow_mut().take();
	debug!("graph canvas unmounted; frame loop stopped");
}

fn pointer_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed mentor/mentee graph drawn on a canvas.
///
/// A fresh simulation is built for every `data` value; the frame loop starts once
/// and stops when the component is cleaned up, so nothing scheduled against an
/// old load touches a torn-down view.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<ResolvedGraph>,
	#[prop(into)] selected: Signal<Option<NodeKey>>,
	/// Hover shared with the rest of the page; pointer hover is reported through `on_hover`.
	#[prop(into)]
	hovered: Signal<Option<NodeKey>>,
	#[prop(into)] theme: Signal<Theme>,
	#[prop(into)] on_node_click: Callback<NodeKey>,
	#[prop(into)] on_hover: Callback<Option<NodeKey>>,
	#[prop(optional)] controller: GraphController,
	#[prop(default = LayoutParams::default())] params: LayoutParams,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let disposed = Arc::new(AtomicBool::new(false));
	let (state_init, animate_init, resize_cb_init, disposed_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		disposed.clone(),
	);

	on_cleanup({
		let disposed = disposed.clone();
		move || disposed.store(true, Ordering::Relaxed)
	});

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas_size(&window, &canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
		let mut next = ForceGraphState::new(&graph, w, h, params, theme.get_untracked(), seed);
		next.select(selected.get_untracked().as_ref());
		debug!(
			"graph laid out: {} nodes, {} edges",
			graph.nodes().len(),
			graph.edges().len()
		);
		*state_init.borrow_mut() = Some(next);

		// The frame loop survives reloads; only start it once.
		if animate_init.borrow().is_some() {
			return;
		}

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("canvas has no 2d context");
				return;
			}
		};

		if fullscreen {
			let (state_resize, canvas_resize, disposed_resize) =
				(state_init.clone(), canvas.clone(), disposed_init.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				if disposed_resize.load(Ordering::Relaxed) {
					return;
				}
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = canvas_size(&win, &canvas_resize, true, None, None);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, resize_anim, disposed_anim, controller) = (
			state_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			disposed_init.clone(),
			controller.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if disposed_anim.load(Ordering::Relaxed) {
				teardown(&animate_inner, &resize_anim);
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				for command in controller.drain() {
					s.apply(command);
				}
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let key = selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.select(key.as_ref());
		}
	});

	let state_hov = state.clone();
	Effect::new(move |_| {
		let key = hovered.get();
		if let Some(ref mut s) = *state_hov.borrow_mut() {
			s.hover_key(key.as_ref());
		}
	});

	let state_theme = state.clone();
	Effect::new(move |_| {
		let theme = theme.get();
		if let Some(ref mut s) = *state_theme.borrow_mut() {
			s.set_theme(theme);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_pointer(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let hover_change = state_mm.borrow_mut().as_mut().and_then(|s| s.move_pointer(x, y));
		if let Some(key) = hover_change {
			on_hover.run(key);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.end_pointer());
		if let Some(key) = clicked {
			on_node_click.run(key);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave_pointer();
		}
		on_hover.run(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
