//! Static JS shell embedded at compile time for the force-directed graph
//! page — the one surface kept from the live-serving teacher, repurposed
//! for a static, written-to-disk HTML page instead of an axum handler.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "../../viz-assets"]
pub struct VizAssets;

pub fn force_graph_script() -> String {
    VizAssets::get("force-graph.js")
        .map(|f| String::from_utf8_lossy(&f.data).into_owned())
        .unwrap_or_default()
}
