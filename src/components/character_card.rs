use std::sync::Arc;
use std::time::Duration;

use leptos::prelude::*;

use crate::catalog::Character;

/// Cards never fade below this, so unmatched characters stay readable.
pub const MIN_CARD_OPACITY: f64 = 0.4;
const MAX_BADGES: usize = 3;
const DIALOGUE_ROTATION: Duration = Duration::from_secs(5);
const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

pub fn card_opacity(relevance: f64) -> f64 {
	relevance.max(MIN_CARD_OPACITY)
}

/// "4.6 (4600 ratings)": the ratings count scales with the score.
pub fn popularity_label(popularity: f64) -> String {
	format!(
		"{popularity} ({} ratings)",
		(popularity * 1000.0).round() as u64
	)
}

/// Up to three of the character's traits, flagged when currently selected.
pub fn trait_badges(character: &Character, selected: &[String]) -> Vec<(String, bool)> {
	character
		.traits
		.iter()
		.take(MAX_BADGES)
		.map(|t| (t.clone(), selected.contains(t)))
		.collect()
}

fn fade(visible: bool) -> &'static str {
	if visible { "opacity: 1;" } else { "opacity: 0;" }
}

/// Character card. The still image gives way to the video clip on hover.
#[component]
pub fn CharacterCard(
	character: Arc<Character>,
	relevance: f64,
	#[prop(into)] selected: Signal<Vec<String>>,
) -> impl IntoView {
	let (line, set_line) = signal(0usize);
	let lines = character.sample_dialogue.len();
	if lines > 1 {
		match set_interval_with_handle(
			move || set_line.update(|i| *i = (*i + 1) % lines),
			DIALOGUE_ROTATION,
		) {
			Ok(handle) => on_cleanup(move || handle.clear()),
			Err(err) => log::warn!("Dialogue rotation unavailable: {:?}", err),
		}
	}

	let video_ref = NodeRef::<leptos::html::Video>::new();
	let (hovered, set_hovered) = signal(false);
	let on_enter = move |_: web_sys::MouseEvent| {
		set_hovered.set(true);
		if let Some(video) = video_ref.get() {
			if let Err(err) = video.play() {
				log::debug!("Video playback prevented: {:?}", err);
			}
		}
	};
	let on_leave = move |_: web_sys::MouseEvent| {
		set_hovered.set(false);
		if let Some(video) = video_ref.get() {
			let _ = video.pause();
			video.set_current_time(0.0);
		}
	};

	let badge_source = character.clone();
	let badges = move || {
		trait_badges(&badge_source, &selected.get())
			.into_iter()
			.map(|(id, on)| {
				let class = if on { "trait-badge selected" } else { "trait-badge" };
				view! { <span class=class title=id.clone()>{id.clone()}</span> }
			})
			.collect_view()
	};

	let dialogue = character.clone();
	let current_line = move || dialogue.sample_dialogue.get(line.get()).cloned();
	let image = character
		.image_src
		.clone()
		.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
	let video = character.video_src.clone().map(|src| {
		view! {
			<video
				node_ref=video_ref
				class="character-card-video"
				src=src
				muted=true
				loop=true
				playsinline=true
				style=move || fade(hovered.get())
			/>
		}
	});
	let popularity = character.popularity.map(|p| {
		view! { <div class="popularity">"\u{2605} "{popularity_label(p)}</div> }
	});

	view! {
		<div
			class="character-card"
			style=format!("opacity: {:.2};", card_opacity(relevance))
			on:mouseenter=on_enter
			on:mouseleave=on_leave
		>
			<img
				class="character-card-image"
				src=image
				alt=character.name.clone()
				style=move || fade(!hovered.get())
			/>
			{video}
			<div class="trait-badges">{badges}</div>
			{character.is_new.then(|| view! { <div class="new-badge">"New"</div> })}
			<div class="character-card-body">
				<h3>{character.name.clone()}</h3>
				<p class="description">{character.description.clone()}</p>
				{move || current_line().map(|l| view! { <p class="dialogue">{format!("\u{201c}{l}\u{201d}")}</p> })}
				{popularity}
				<div class="match">{format!("{:.0}% match", relevance * 100.0)}</div>
			</div>
		</div>
	}
}
