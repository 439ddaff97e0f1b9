pub mod detail_panel;
pub mod force_graph;
pub mod graph_controls;
pub mod table_view;
