// src/render/mod.rs
pub mod renderer;
pub mod score;
pub mod view;

pub use renderer::{RenderOutcome, RenderTiming, ResultRenderer};
pub use score::{format_score, ScoreCounter};
pub use view::{EntranceCue, Panel, ResultsView};
