pub mod formatter;

pub use formatter::{
    format_eur, format_json, format_progress, format_result, format_saved, format_vertical_list,
    parse_hex_color, progress_bar_width, should_use_colors,
};
