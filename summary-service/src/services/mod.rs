pub mod prompt;
pub mod providers;

pub use prompt::{build_chart_prompt, CHART_SECTIONS};
