use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ConstellationState;

const BACKGROUND: &str = "#12121c";
const SATELLITE_RADIUS: f64 = 4.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let (dash, gap) = (6.0 / k, 6.0 / k);
	let dash_offset = -(state.time * 12.0) % (dash + gap);

	state.graph.visit_edges(|n1, n2, edge| {
		let lit = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		// Dim everything but the hovered neighbourhood.
		let alpha = if lit { 0.5 + 0.4 * t } else { 0.5 - 0.35 * t };
		let both_selected = state.is_selected(&n1.data.user_data.id)
			&& state.is_selected(&n2.data.user_data.id);

		ctx.set_stroke_style_str(&format!("rgba(200, 200, 255, {})", alpha));
		ctx.set_line_width(edge.user_data.max(1.0).sqrt() / k);
		if both_selected {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	});
}

fn draw_nodes(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	let (t, k) = (ease_out_cubic(state.hover.highlight_t), state.transform.k);
	let has_hover = state.hover.node.is_some();

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let lit = state.is_highlighted(node.index());
		let alpha = if has_hover && !lit { 1.0 - 0.6 * t } else { 1.0 };
		let radius = if state.hover.node == Some(node.index()) {
			info.radius * (1.0 + 0.2 * t)
		} else {
			info.radius
		};

		ctx.set_global_alpha(alpha);

		if state.is_selected(&info.id) {
			let glow = ctx
				.create_radial_gradient(x, y, radius * 0.5, x, y, radius * 2.2)
				.ok();
			if let Some(glow) = glow {
				let _ = glow.add_color_stop(0.0, "rgba(255, 255, 255, 0.35)");
				let _ = glow.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius * 2.2, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&glow);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if state.is_selected(&info.id) {
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(3.0 / k);
			ctx.stroke();
		}

		let satellites: Vec<_> = state.satellites_of(&info.id).collect();
		let orbit = radius + 8.0;
		for (i, sat) in satellites.iter().enumerate() {
			let angle = state.time * 0.8 + i as f64 * 2.0 * PI / satellites.len() as f64;
			ctx.begin_path();
			let _ = ctx.arc(
				x + orbit * angle.cos(),
				y + orbit * angle.sin(),
				SATELLITE_RADIUS,
				0.0,
				2.0 * PI,
			);
			ctx.set_fill_style_str(&sat.color);
			ctx.fill();
		}

		ctx.set_fill_style_str("#ffffff");
		ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&info.label, x, y - radius - 6.0);
		ctx.set_global_alpha(1.0);
	});
}
