use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Html;
use log::{debug, error, info, warn};

use crate::components::detail_panel::DetailPanel;
use crate::components::force_graph::{ForceGraphCanvas, GraphController, Theme};
use crate::components::graph_controls::GraphControls;
use crate::components::table_view::TableView;
use crate::config::AppConfig;
use crate::graph::details::describe_shown;
use crate::graph::{InteractionState, NodeKey, ResolvedGraph, ViewMode, resolve};
use crate::model::Tag;
use crate::store::{
	AdminEdit, Authorizer, CachedDirectory, Directory, HttpAuthorizer, HttpDirectory,
	HttpImageHost, ImageHost, InlineImageHost, MemoryDirectory, StaticAuthorizer, apply_edit,
	fetch_snapshot,
};

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
	Loading,
	Ready,
	Failed(String),
}

/// Capabilities the page talks to.
struct Backend {
	directory: Rc<dyn Directory>,
	images: Rc<dyn ImageHost>,
	auth: Rc<dyn Authorizer>,
}

impl Backend {
	fn from_config(config: &AppConfig) -> Self {
		match &config.api_base {
			Some(base) => {
				info!("using mentorship API at {base}");
				Self {
					directory: Rc::new(CachedDirectory::new(HttpDirectory::new(base.clone()))),
					images: Rc::new(HttpImageHost::new(base)),
					auth: Rc::new(HttpAuthorizer::new(base)),
				}
			}
			None => {
				info!("no API configured, using the demo directory");
				Self {
					directory: Rc::new(CachedDirectory::new(MemoryDirectory::demo())),
					images: Rc::new(InlineImageHost),
					auth: Rc::new(StaticAuthorizer(config.demo_admin)),
				}
			}
		}
	}
}

/// Mentorship page: graph or table view of every mentor/mentee pair.
#[component]
pub fn Home() -> impl IntoView {
	let config = AppConfig::from_build_env();
	let layout = config.layout;
	let backend = StoredValue::new_local(Backend::from_config(&config));
	let controller = StoredValue::new_local(GraphController::new());

	let graph = RwSignal::new(ResolvedGraph::default());
	let tags = RwSignal::new(Vec::<Tag>::new());
	let load = RwSignal::new(LoadState::Loading);
	let reload = RwSignal::new(0_u32);
	let privileged = RwSignal::new(false);
	let notice = RwSignal::new(None::<String>);
	let interaction = RwSignal::new(InteractionState::default());
	let tag_filter = RwSignal::new(None::<String>);
	let theme = RwSignal::new(Theme::default());

	let disposed = Arc::new(AtomicBool::new(false));
	on_cleanup({
		let disposed = disposed.clone();
		move || disposed.store(true, Ordering::Relaxed)
	});

	let auth = backend.with_value(|b| b.auth.clone());
	spawn_local(async move {
		let flag = auth.is_privileged_caller().await;
		debug!("caller privileged: {flag}");
		privileged.try_set(flag);
	});

	// One fetch per reload tick. Results from a torn-down page or a superseded
	// load are dropped.
	Effect::new(move |_| {
		let generation = reload.get();
		let directory = backend.with_value(|b| b.directory.clone());
		let disposed = disposed.clone();
		info!("fetching mentorship graph (load {generation})");
		spawn_local(async move {
			let result = fetch_snapshot(directory.as_ref()).await;
			if disposed.load(Ordering::Relaxed) {
				debug!("page unmounted, dropping load {generation}");
				return;
			}
			if reload.get_untracked() != generation {
				debug!("load {generation} superseded");
				return;
			}
			match result {
				Ok(snapshot) => {
					let resolved = resolve(&snapshot.mentors, &snapshot.mentees);
					info!(
						"loaded {} mentors, {} mentees, {} tags",
						snapshot.mentors.len(),
						snapshot.mentees.len(),
						snapshot.tags.len()
					);
					interaction.update(|s| s.retain_known(|key| resolved.node(key).is_some()));
					graph.set(resolved);
					tags.set(snapshot.tags);
					load.set(LoadState::Ready);
				}
				Err(err) => {
					error!("failed to load mentorship graph: {err}");
					load.set(LoadState::Failed(err.to_string()));
				}
			}
		});
	});

	let load_state = Memo::new(move |_| load.get());
	let view_mode = Memo::new(move |_| interaction.with(|s| s.view));
	let visible = Memo::new(move |_| {
		let filter = tag_filter.get();
		graph.with(|g| match filter {
			Some(tag) => g.retain_tagged(&tag),
			None => g.clone(),
		})
	});
	let selected = Signal::derive(move || interaction.with(|s| s.selected().cloned()));
	let hovered = Signal::derive(move || interaction.with(|s| s.hovered().cloned()));
	// Only shown nodes open the panel; enrichment reads the unfiltered graph.
	let details = Memo::new(move |_| {
		let privileged = privileged.get();
		let key = selected.get()?;
		visible.with(|shown| graph.with(|g| describe_shown(&key, shown, g, privileged)))
	});
	let mentor_options = Memo::new(move |_| {
		graph.with(|g| {
			g.mentors()
				.map(|m| (m.id.clone(), m.name.clone()))
				.collect::<Vec<_>>()
		})
	});
	// `(id, name, assigned)` for every known tag, against the selected node.
	let tag_choices = Memo::new(move |_| {
		let Some(key) = selected.get() else {
			return Vec::new();
		};
		let assigned = graph.with(|g| g.node(&key).map(|n| n.tags.clone()).unwrap_or_default());
		tags.with(|all| {
			all.iter()
				.map(|t| (t.id.clone(), t.name.clone(), assigned.contains(&t.id)))
				.collect::<Vec<_>>()
		})
	});

	let on_node_click = Callback::new(move |key: NodeKey| interaction.update(|s| s.click(key)));
	let on_hover = Callback::new(move |key: Option<NodeKey>| interaction.update(|s| s.hover(key)));
	let on_close = Callback::new(move |()| interaction.update(|s| s.clear_selection()));
	let on_edit = Callback::new(move |edit: AdminEdit| {
		if !privileged.get_untracked() {
			warn!("ignoring admin edit from an unprivileged caller");
			return;
		}
		let (directory, images) = backend.with_value(|b| (b.directory.clone(), b.images.clone()));
		spawn_local(async move {
			match apply_edit(directory.as_ref(), images.as_ref(), edit).await {
				Ok(()) => {
					notice.try_set(None);
					reload.try_update(|n| *n += 1);
				}
				Err(err) => {
					error!("admin edit failed: {err}");
					notice.try_set(Some(err.to_string()));
				}
			}
		});
	});
	let retry = move |_| {
		load.set(LoadState::Loading);
		reload.update(|n| *n += 1);
	};

	view! {
		<Html attr:data-theme=move || theme.get().as_str() />
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

			<div class="fullscreen-graph">
				{move || match load_state.get() {
					LoadState::Loading => {
						view! { <p class="status">"Loading mentorship graph…"</p> }.into_any()
					}
					LoadState::Failed(message) => {
						view! {
							<div class="status error">
								<p>"Could not load the mentorship graph: " {message}</p>
								<button on:click=retry>"Retry"</button>
							</div>
						}
							.into_any()
					}
					LoadState::Ready => {
						match view_mode.get() {
							ViewMode::Graph => {
								view! {
									<ForceGraphCanvas
										data=visible
										selected=selected
										hovered=hovered
										theme=theme
										on_node_click=on_node_click
										on_hover=on_hover
										controller=controller.get_value()
										params=layout
										fullscreen=true
									/>
									<GraphControls controller=controller.get_value() />
									{move || {
										visible
											.with(|g| g.is_empty())
											.then(|| {
												view! {
													<p class="status">"No mentors or mentees to show."</p>
												}
											})
									}}
								}
									.into_any()
							}
							ViewMode::Table => {
								view! { <TableView graph=graph shown=visible interaction=interaction /> }.into_any()
							}
						}
					}
				}}
				<div class="graph-overlay">
					<h1>"Mentorship Graph"</h1>
					<p class="subtitle">
						"Click a node for details. Drag nodes to reposition. Scroll to zoom. Drag background to pan."
					</p>
					<div class="toolbar">
						<select
							class="tag-filter"
							on:change=move |ev| {
								let value = event_target_value(&ev);
								tag_filter.set((!value.is_empty()).then_some(value));
							}
						>
							<option value="">"All tags"</option>
							{move || {
								tags.get()
									.into_iter()
									.map(|tag| view! { <option value=tag.id>{tag.name}</option> })
									.collect_view()
							}}
						</select>
						<button on:click=move |_| interaction.update(|s| s.toggle_view())>
							{move || match view_mode.get() {
								ViewMode::Graph => "Table view",
								ViewMode::Table => "Graph view",
							}}
						</button>
						<button on:click=move |_| theme.update(|t| *t = t.toggled())>
							{move || match theme.get() {
								Theme::Light => "Dark theme",
								Theme::Dark => "Light theme",
							}}
						</button>
					</div>
					{move || notice.get().map(|message| view! { <p class="notice">{message}</p> })}
				</div>
				{move || {
					details
						.get()
						.map(|details| {
							view! {
								<DetailPanel
									details=details
									privileged=privileged.get()
									mentors=mentor_options.get()
									tag_choices=tag_choices.get()
									on_edit=on_edit
									on_close=on_close
								/>
							}
						})
				}}
			</div>
		</ErrorBoundary>
	}
}
