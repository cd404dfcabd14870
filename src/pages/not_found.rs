use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Lost among the stars"</h1>
			<p>"This page is not part of the constellation."</p>
			<a href="/">"Back to discovery"</a>
		</div>
	}
}
