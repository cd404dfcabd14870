use leptos::prelude::*;

use crate::catalog::{CatalogStore, TraitNode};
use crate::components::character_card::CharacterCard;
use crate::components::constellation::{ConstellationMap, MapData};
use crate::components::selection_legend::{LegendEntry, SelectionLegend};
use crate::components::trait_panel::TraitPanel;
use crate::engine::DiscoveryEngine;

/// Heading above the character grid.
pub fn grid_title(selected: usize, shown: usize) -> String {
	if selected == 0 {
		"All Characters".to_string()
	} else {
		format!("Characters ({shown})")
	}
}

/// The map collapses once the page scrolls past a third of its height.
pub fn should_minimize(scroll_y: f64, map_height: f64) -> bool {
	scroll_y > map_height / 3.0
}

/// Trait map, selection legend and the ranked character grid.
#[component]
fn Discovery(catalog: CatalogStore) -> impl IntoView {
	let map_data = MapData::from_catalog(&catalog);
	let engine = RwSignal::new(DiscoveryEngine::new(catalog));
	let (active_category, set_active_category) = signal(None::<TraitNode>);

	let selection = Signal::derive(move || engine.with(|e| e.selection().to_vec()));
	let selected_ids = Signal::derive(move || {
		engine.with(|e| e.selection().iter().map(|n| n.id.clone()).collect::<Vec<_>>())
	});
	let legend = Signal::derive(move || {
		engine.with(|e| {
			e.selection()
				.iter()
				.map(|n| LegendEntry {
					node: n.clone(),
					matches: e.match_count(&n.id),
				})
				.collect::<Vec<_>>()
		})
	});

	let toggle = Callback::new(move |node: TraitNode| engine.update(|e| e.toggle_node(&node)));
	let clear = Callback::new(move |_: ()| engine.update(|e| e.clear_selection()));
	let open_category = Callback::new(move |id: String| {
		let node = engine.with_untracked(|e| e.catalog().find_node(&id).cloned());
		set_active_category.set(node);
	});
	let close_category = Callback::new(move |_: ()| set_active_category.set(None));

	let cards = move || {
		engine
			.with(|e| e.active_characters().to_vec())
			.into_iter()
			.map(|scored| {
				view! {
					<CharacterCard
						character=scored.character
						relevance=scored.relevance
						selected=selected_ids
					/>
				}
			})
			.collect_view()
	};
	let shown = move || engine.with(|e| e.active_characters().len());

	let map_section = NodeRef::<leptos::html::Section>::new();
	let (minimized, set_minimized) = signal(false);
	// Height of the expanded map, refreshed while it is expanded.
	let map_height = StoredValue::new(0.0_f64);
	let scroll_handle = window_event_listener(leptos::ev::scroll, move |_| {
		if !minimized.get_untracked() {
			if let Some(section) = map_section.get_untracked() {
				map_height.set_value(section.offset_height() as f64);
			}
		}
		let scroll_y = window().scroll_y().unwrap_or(0.0);
		let next = should_minimize(scroll_y, map_height.get_value());
		if next != minimized.get_untracked() {
			set_minimized.set(next);
		}
	});
	on_cleanup(move || scroll_handle.remove());

	let map_signal = Signal::derive(move || map_data.clone());
	let section_class = move || {
		if minimized.get() {
			"constellation-section minimized"
		} else {
			"constellation-section"
		}
	};

	view! {
		<div class="discovery-page">
			<section node_ref=map_section class=section_class>
				<button
					class="map-toggle"
					title="Toggle map"
					on:click=move |_| set_minimized.update(|m| *m = !*m)
				>
					{move || if minimized.get() { "\u{25BE}" } else { "\u{25B4}" }}
				</button>
				<Show when=move || !minimized.get()>
					<ConstellationMap
						data=map_signal
						selection=selection
						on_node_click=open_category
						on_background_click=close_category
					/>
					<Show when=move || active_category.with(Option::is_none)>
						<div class="map-hint">"Click on traits to explore sub-traits"</div>
					</Show>
					{move || {
						active_category
							.get()
							.map(|category| {
								view! {
									<TraitPanel
										category=category
										selected=selected_ids
										on_toggle=toggle
										on_close=close_category
									/>
								}
							})
					}}
				</Show>
				<SelectionLegend entries=legend on_remove=toggle on_clear=clear />
			</section>
			<section class="character-grid">
				<div class="grid-header">
					{move || grid_title(selected_ids.with(Vec::len), shown())}
				</div>
				<Show
					when=move || { shown() > 0 }
					fallback=move || {
						view! {
							<div class="no-matches">
								<div>"No matching characters found"</div>
								<button on:click=move |_| clear.run(())>"Reset filters"</button>
							</div>
						}
					}
				>
					<div class="cards">{cards}</div>
				</Show>
			</section>
		</div>
	}
}

/// Discovery route. Reports a broken bundled catalog instead of rendering.
#[component]
pub fn DiscoveryPage() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{CatalogStore::bundled().map(|catalog| view! { <Discovery catalog=catalog /> })}
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn title_reflects_filtering() {
		assert_eq!(grid_title(0, 8), "All Characters");
		assert_eq!(grid_title(2, 8), "Characters (8)");
	}

	#[test]
	fn map_minimizes_past_a_third_of_its_height() {
		assert!(!should_minimize(0.0, 384.0));
		assert!(!should_minimize(128.0, 384.0));
		assert!(should_minimize(129.0, 384.0));
	}
}
