use leptos::prelude::*;

use crate::graph::table::{MenteeRow, MentorRow, TableProjection};
use crate::graph::{InteractionState, ResolvedGraph};
use crate::model::non_blank;

fn mentor_row(row: MentorRow, interaction: RwSignal<InteractionState>) -> impl IntoView {
	let MentorRow { mentor, mentees } = row;
	let key = mentor.key();
	let (hover_key, emphasis_key) = (key.clone(), key.clone());
	let id = mentor.id.clone();
	let expanded = {
		let id = id.clone();
		move || interaction.with(|s| s.is_expanded(&id))
	};
	let is_open = expanded.clone();
	let count = mentees.len();

	view! {
		<tr
			class="mentor-row"
			class:emphasized=move || interaction.with(|s| s.is_emphasized(&emphasis_key))
			on:mouseenter=move |_| interaction.update(|s| s.hover(Some(hover_key.clone())))
			on:mouseleave=move |_| interaction.update(|s| s.hover(None))
		>
			<td>
				<button class="row-toggle" on:click=move |_| interaction.update(|s| s.toggle_row(&id))>
					{move || if is_open() { "▾" } else { "▸" }}
				</button>
			</td>
			<td class="name" on:click=move |_| interaction.update(|s| s.click(key.clone()))>
				{mentor.name.clone()}
			</td>
			<td>{non_blank(&mentor.profile.university).map(str::to_owned)}</td>
			<td>{count}</td>
		</tr>
		{move || {
			expanded()
				.then(|| {
					view! {
						<tr class="mentee-sublist">
							<td></td>
							<td colspan="3">
								<ul>
									{mentees
										.iter()
										.map(|m| view! { <li>{m.name.clone()}</li> })
										.collect_view()}
								</ul>
							</td>
						</tr>
					}
				})
		}}
	}
}

fn mentee_row(row: MenteeRow, interaction: RwSignal<InteractionState>) -> impl IntoView {
	let MenteeRow {
		mentee,
		mentor_name,
	} = row;
	let key = mentee.key();
	let (hover_key, emphasis_key) = (key.clone(), key.clone());

	view! {
		<tr
			class="mentee-row"
			class:emphasized=move || interaction.with(|s| s.is_emphasized(&emphasis_key))
			on:mouseenter=move |_| interaction.update(|s| s.hover(Some(hover_key.clone())))
			on:mouseleave=move |_| interaction.update(|s| s.hover(None))
		>
			<td class="name" on:click=move |_| interaction.update(|s| s.click(key.clone()))>
				{mentee.name.clone()}
			</td>
			<td>{non_blank(&mentee.profile.university).map(str::to_owned)}</td>
			<td>{mentor_name.unwrap_or_else(|| "No mentor assigned".to_owned())}</td>
		</tr>
	}
}

/// Flat alternative to the canvas: mentors with expandable mentee lists, then mentees.
#[component]
pub fn TableView(
	#[prop(into)] graph: Signal<ResolvedGraph>,
	/// Rows to show, after the tag filter.
	#[prop(into)]
	shown: Signal<ResolvedGraph>,
	interaction: RwSignal<InteractionState>,
) -> impl IntoView {
	let search = RwSignal::new(String::new());
	let projection = Memo::new(move |_| {
		let term = search.get();
		graph.with(|g| shown.with(|s| TableProjection::build(g, s, &term)))
	});

	view! {
		<div class="table-view">
			<input
				type="search"
				placeholder="Search by name, email or university"
				prop:value=move || search.get()
				on:input=move |ev| search.set(event_target_value(&ev))
			/>
			<h2>"Mentors"</h2>
			<table class="mentor-table">
				<thead>
					<tr>
						<th></th>
						<th>"Name"</th>
						<th>"University"</th>
						<th>"Mentees"</th>
					</tr>
				</thead>
				<tbody>
					{move || {
						projection
							.get()
							.mentors
							.into_iter()
							.map(|row| mentor_row(row, interaction))
							.collect_view()
					}}
				</tbody>
			</table>
			<h2>"Mentees"</h2>
			<table class="mentee-table">
				<thead>
					<tr>
						<th>"Name"</th>
						<th>"University"</th>
						<th>"Mentor"</th>
					</tr>
				</thead>
				<tbody>
					{move || {
						projection
							.get()
							.mentees
							.into_iter()
							.map(|row| mentee_row(row, interaction))
							.collect_view()
					}}
				</tbody>
			</table>
		</div>
	}
}
