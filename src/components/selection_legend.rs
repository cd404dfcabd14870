use leptos::prelude::*;

use crate::catalog::TraitNode;

const FALLBACK_COLOR: &str = "#7047ff";

/// A selected node and how many characters carry it.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
	pub node: TraitNode,
	pub matches: usize,
}

/// Chips for the current selection, each removable, plus a clear-all button.
#[component]
pub fn SelectionLegend(
	#[prop(into)] entries: Signal<Vec<LegendEntry>>,
	#[prop(into)] on_remove: Callback<TraitNode>,
	#[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
	let chips = move || {
		entries
			.get()
			.into_iter()
			.map(|entry| {
				let color = if entry.node.color.is_empty() {
					FALLBACK_COLOR.to_string()
				} else {
					entry.node.color.clone()
				};
				let name = entry.node.name.clone();
				let node = entry.node;
				view! {
					<div class="legend-chip">
						<div class="dot" style=format!("background-color: {color};") />
						<span>{name}</span>
						<span class="match-count">{entry.matches}</span>
						<button on:click=move |_| on_remove.run(node.clone())>"×"</button>
					</div>
				}
			})
			.collect_view()
	};

	view! {
		<div class="selection-legend">
			<span class="legend-title">"Selected traits:"</span>
			<Show
				when=move || entries.with(|e| !e.is_empty())
				fallback=|| view! { <span class="legend-empty">"None - showing all characters"</span> }
			>
				<div class="legend-chips">{chips}</div>
				<button class="clear-filters" on:click=move |_| on_clear.run(())>
					"Clear filters"
				</button>
			</Show>
		</div>
	}
}
