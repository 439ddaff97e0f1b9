//! Side panel for the selected node.
//!
//! Contact details and the admin edits render only for privileged callers. The
//! caller's flag is the only gate here; the API is expected to enforce its own.

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{Event, File, FileReader, HtmlInputElement, ProgressEvent};

use crate::graph::details::{MentorLine, NodeDetails};
use crate::graph::{NodeKey, NodeKind};
use crate::store::AdminEdit;

/// Read a picked file into memory, then hand the bytes to `done`.
fn read_file(file: File, done: impl FnOnce(Vec<u8>) + 'static) {
	let reader = match FileReader::new() {
		Ok(reader) => reader,
		Err(err) => {
			error!("cannot create FileReader: {err:?}");
			return;
		}
	};
	let loaded = reader.clone();
	let onload = Closure::once_into_js(move |_: ProgressEvent| match loaded.result() {
		Ok(buffer) => done(js_sys::Uint8Array::new(&buffer).to_vec()),
		Err(err) => error!("reading picture failed: {err:?}"),
	});
	reader.set_onload(Some(onload.unchecked_ref()));
	if let Err(err) = reader.read_as_array_buffer(&file) {
		error!("reading picture failed: {err:?}");
	}
}

fn mentor_section(line: MentorLine) -> impl IntoView {
	match line {
		MentorLine::Assigned {
			name,
			university,
			picture,
			..
		} => view! {
			<div class="detail-mentor">
				<h3>"Mentor"</h3>
				{picture.map(|src| view! { <img class="avatar small" src=src alt=name.clone() /> })}
				<p class="name">{name.clone()}</p>
				{university.map(|u| view! { <p class="university">{u}</p> })}
			</div>
		}
		.into_any(),
		MentorLine::Unassigned => view! {
			<div class="detail-mentor">
				<h3>"Mentor"</h3>
				<p class="muted">"No mentor assigned"</p>
			</div>
		}
		.into_any(),
	}
}

fn admin_section(
	key: NodeKey,
	current_mentor: Option<String>,
	mentors: Vec<(String, String)>,
	tag_choices: Vec<(String, String, bool)>,
	on_edit: Callback<AdminEdit>,
) -> impl IntoView {
	let reassign = (key.kind == NodeKind::Mentee).then(|| {
		let mentee = key.id.clone();
		let options = mentors
			.into_iter()
			.map(|(id, name)| {
				let selected = current_mentor.as_deref() == Some(id.as_str());
				view! { <option value=id selected=selected>{name}</option> }
			})
			.collect_view();
		view! {
			<label>
				"Mentor "
				<select on:change=move |ev| {
					let value = event_target_value(&ev);
					on_edit
						.run(AdminEdit::Reassign {
							mentee: mentee.clone(),
							mentor: (!value.is_empty()).then_some(value),
						});
				}>
					<option value="" selected=current_mentor.is_none()>
						"No mentor"
					</option>
					{options}
				</select>
			</label>
		}
	});

	let assigned: Vec<String> = tag_choices
		.iter()
		.filter(|(_, _, on)| *on)
		.map(|(id, _, _)| id.clone())
		.collect();
	let tag_boxes = tag_choices
		.into_iter()
		.map(|(id, name, on)| {
			let key = key.clone();
			let assigned = assigned.clone();
			let toggle = move |ev: Event| {
				let mut tags = assigned.clone();
				if event_target_checked(&ev) {
					tags.push(id.clone());
				} else {
					tags.retain(|t| t != &id);
				}
				on_edit.run(AdminEdit::Tags {
					key: key.clone(),
					tags,
				});
			};
			view! {
				<label class="tag-choice">
					<input type="checkbox" checked=on on:change=toggle />
					{name}
				</label>
			}
		})
		.collect_view();

	let on_file = move |ev: Event| {
		let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
			return;
		};
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		let key = key.clone();
		read_file(file, move |bytes| on_edit.run(AdminEdit::Picture { key, bytes }));
	};

	view! {
		<div class="detail-admin">
			<h3>"Admin"</h3>
			{reassign}
			<fieldset class="tags">
				<legend>"Tags"</legend>
				{tag_boxes}
			</fieldset>
			<label>"Picture " <input type="file" accept="image/*" on:change=on_file /></label>
		</div>
	}
}

#[component]
pub fn DetailPanel(
	details: NodeDetails,
	privileged: bool,
	/// `(id, name)` of every known mentor, for reassignment.
	#[prop(optional)]
	mentors: Vec<(String, String)>,
	/// `(id, name, assigned)` of every known tag.
	#[prop(optional)]
	tag_choices: Vec<(String, String, bool)>,
	#[prop(into)] on_edit: Callback<AdminEdit>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	let NodeDetails {
		key,
		name,
		kind,
		university,
		picture,
		links,
		contact,
		mentor,
		mentee_count,
	} = details;
	let current_mentor = match &mentor {
		Some(MentorLine::Assigned { id, .. }) => Some(id.clone()),
		_ => None,
	};

	view! {
		<aside class="detail-panel">
			<button class="close" title="Close" on:click=move |_| on_close.run(())>
				"×"
			</button>
			{picture.map(|src| view! { <img class="avatar" src=src alt=name.clone() /> })}
			<h2>{name.clone()}</h2>
			<p class=format!("badge {}", kind.label().to_lowercase())>{kind.label()}</p>
			{university.map(|u| view! { <p class="university">{u}</p> })}
			{mentee_count.map(|n| view! { <p class="count">{n} " mentees"</p> })}
			<ul class="links">
				{links
					.into_iter()
					.map(|link| {
						view! {
							<li>
								<a href=link.url target="_blank" rel="noopener noreferrer">
									{link.label}
								</a>
							</li>
						}
					})
					.collect_view()}
			</ul>
			{contact
				.map(|c| {
					view! {
						<dl class="contact">
							{c.email.map(|e| view! { <dt>"Email"</dt><dd>{e}</dd> })}
							{c.phone.map(|p| view! { <dt>"Phone"</dt><dd>{p}</dd> })}
						</dl>
					}
				})}
			{mentor.map(mentor_section)}
			{privileged.then(|| admin_section(key, current_mentor, mentors, tag_choices, on_edit))}
		</aside>
	}
}
