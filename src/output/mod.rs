pub mod formatter;
pub mod summary;

pub use formatter::{
    format_industries, format_result_detail, format_score, format_scored_table, format_tsv,
    should_use_colors,
};
pub use summary::{BatchSummary, TopTarget, DEFAULT_TOP_TARGETS};
