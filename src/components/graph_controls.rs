use leptos::prelude::*;

use super::force_graph::{GraphCommand, GraphController};

/// Camera buttons. Each press queues one command for the canvas to apply on its next frame.
#[component]
pub fn GraphControls(controller: GraphController) -> impl IntoView {
	let button = move |label: &'static str, title: &'static str, command: GraphCommand| {
		let controller = controller.clone();
		view! {
			<button class="graph-control" title=title on:click=move |_| controller.send(command)>
				{label}
			</button>
		}
	};

	view! {
		<div class="graph-controls">
			{button("+", "Zoom in", GraphCommand::ZoomIn)}
			{button("−", "Zoom out", GraphCommand::ZoomOut)}
			{button("◎", "Center", GraphCommand::Center)}
			{button("⤢", "Fit to view", GraphCommand::Fit)}
			{button("↺", "Reset", GraphCommand::Reset)}
		</div>
	}
}
