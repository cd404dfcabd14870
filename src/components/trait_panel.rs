use leptos::prelude::*;

use crate::catalog::TraitNode;

pub fn selection_label(selected: bool) -> &'static str {
	if selected {
		"Remove from Selection"
	} else {
		"Add to Selection"
	}
}

/// Side panel for one primary trait: toggles the trait itself and each of
/// its sub-traits.
#[component]
pub fn TraitPanel(
	category: TraitNode,
	#[prop(into)] selected: Signal<Vec<String>>,
	#[prop(into)] on_toggle: Callback<TraitNode>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	let primary = category.as_selection();
	let primary_id = category.id.clone();
	let is_selected = move |id: &str| selected.with(|ids| ids.iter().any(|s| s == id));

	let header_style = format!(
		"background: linear-gradient(to right, {c}22, {c}44);",
		c = category.color
	);

	let subs = category
		.secondary
		.iter()
		.cloned()
		.map(|sub| {
			let style = {
				let sub_id = sub.id.clone();
				let color = sub.color.clone();
				move || {
					if is_selected(&sub_id) {
						format!("background-color: {color}33; border: 1px solid {color};")
					} else {
						"border: 1px solid transparent;".to_string()
					}
				}
			};
			let name = sub.name.clone();
			let dot = format!("background-color: {};", sub.color);
			view! {
				<div
					class="sub-trait"
					style=style
					on:click=move |ev| {
						ev.stop_propagation();
						on_toggle.run(sub.clone());
					}
				>
					<div class="dot" style=dot />
					<span>{name}</span>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="trait-panel" on:click=|ev| ev.stop_propagation()>
			<div class="trait-panel-header" style=header_style>
				<div class="trait-panel-title">
					<div class="dot" style=format!("background-color: {};", category.color) />
					<h3>{category.name.clone()}</h3>
					<button class="close" on:click=move |_| on_close.run(())>
						"×"
					</button>
				</div>
				<p class="description">{category.description.clone().unwrap_or_default()}</p>
				<button
					class="select-primary"
					style=format!("background-color: {};", category.color)
					on:click=move |_| on_toggle.run(primary.clone())
				>
					{move || selection_label(is_selected(&primary_id))}
				</button>
			</div>
			<div class="trait-panel-body">
				<h4>"Sub-traits"</h4>
				<div class="sub-traits">{subs}</div>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn button_label_follows_selection() {
		assert_eq!(selection_label(false), "Add to Selection");
		assert_eq!(selection_label(true), "Remove from Selection");
	}
}
