use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{EMPHASIS_SCALE, ForceGraphState};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.palette.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

/// Current radius of a node, enlarged when hovered or selected.
fn node_radius(state: &ForceGraphState, idx: DefaultNodeIdx, base: f64) -> f64 {
	if state.is_emphasized(idx) {
		base * EMPHASIS_SCALE
	} else {
		base
	}
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let edge_rgb = state.palette.edge;

	let mut nodes: HashMap<DefaultNodeIdx, (f64, f64, f64)> = HashMap::new();
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let radius = node_radius(state, idx, node.data.user_data.radius());
		nodes.insert(idx, (node.x() as f64, node.y() as f64, radius));
	});

	// Stored pairs keep mentor -> mentee direction for the arrow heads.
	for &(src, tgt) in state.edges() {
		let (Some(&(x1, y1, r1)), Some(&(x2, y2, r2))) = (nodes.get(&src), nodes.get(&tgt)) else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted = (state.is_highlighted(src) && state.is_highlighted(tgt))
			|| state.selected == Some(src)
			|| state.selected == Some(tgt);

		// t=0: all edges at base (0.6), t=1: highlighted at 0.9, others at 0.15
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba({edge_rgb}, {edge_alpha})"));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba({edge_rgb}, {arrow_alpha})"));
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let palette = &state.palette;

	// Resting nodes first, dimmed while something else is highlighted.
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if state.is_emphasized(idx) || (has_highlight && state.is_highlighted(idx)) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let alpha = if has_highlight { 1.0 - 0.7 * t } else { 1.0 };

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius(), 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color(palette));
		ctx.fill();
		ctx.set_global_alpha(1.0);
	});

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let emphasized = state.is_emphasized(idx);
		if !emphasized && !(has_highlight && state.is_highlighted(idx)) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let radius = node_radius(state, idx, info.radius());
		let is_hovered = state.is_hovered(idx);

		if is_hovered && t > 0.01 {
			let glow_radius = radius * (1.8 + 1.2 * t);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = 0.35 * t;
				let _ = gradient.add_color_stop(0.0, &format!("rgba({}, {alpha})", palette.edge));
				let _ = gradient.add_color_stop(1.0, &format!("rgba({}, 0)", palette.edge));
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		// Emphasized nodes invert: foreground fill, ringed in their base colour.
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		if emphasized {
			ctx.set_fill_style_str(palette.foreground);
			ctx.fill();
			ctx.set_stroke_style_str(info.color(palette));
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		} else {
			ctx.set_fill_style_str(info.color(palette));
			ctx.fill();
		}

		if emphasized {
			ctx.set_fill_style_str(palette.foreground);
			ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
			let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);
		}
	});
}
