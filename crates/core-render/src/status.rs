//! Status and message bar composition.
//!
//! The status bar is padded or truncated to exactly the viewport width,
//! with the `line/total` counter right-aligned and emitted only when it
//! lands flush against the right edge; otherwise padding wins and the
//! counter is dropped for this frame.

use core_state::StatusMessage;
use std::path::Path;
use std::time::Instant;

/// Longest file name prefix shown before the line count.
const NAME_WIDTH: usize = 20;

/// What the status bar needs to render one frame.
pub struct StatusContext<'a> {
    pub file_name: Option<&'a Path>,
    pub row_count: usize,
    /// 0-based cursor row, displayed 1-based.
    pub cy: usize,
    pub width: usize,
}

pub fn format_status(ctx: &StatusContext<'_>) -> String {
    let name = ctx
        .file_name
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "[No Name]".to_string());
    let name: String = name.chars().take(NAME_WIDTH).collect();

    let left = format!("{name} - {} lines", ctx.row_count);
    let right = format!("{}/{}", ctx.cy + 1, ctx.row_count);

    let mut bar: String = left.chars().take(ctx.width).collect();
    let mut len = bar.chars().count();
    while len < ctx.width {
        if ctx.width - len == right.len() {
            bar.push_str(&right);
            break;
        }
        bar.push(' ');
        len += 1;
    }
    bar
}

/// The message line: the last status message while it is fresh, else blank.
pub fn format_message(message: Option<&StatusMessage>, now: Instant, width: usize) -> String {
    match message {
        Some(msg) if msg.is_visible_at(now) => msg.text().chars().take(width).collect(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn pads_between_name_and_counter() {
        let s = format_status(&StatusContext {
            file_name: Some(Path::new("main.rs")),
            row_count: 3,
            cy: 0,
            width: 30,
        });
        assert_eq!(s, "main.rs - 3 lines          1/3");
        assert_eq!(s.len(), 30);
    }

    #[test]
    fn placeholder_for_unnamed_buffer() {
        let s = format_status(&StatusContext {
            file_name: None,
            row_count: 0,
            cy: 0,
            width: 40,
        });
        assert!(s.starts_with("[No Name] - 0 lines"));
        assert!(s.ends_with("1/0"));
        assert_eq!(s.len(), 40);
    }

    #[test]
    fn counter_dropped_when_it_cannot_land_flush() {
        // width 18 leaves one cell after the left segment; "1/3" never fits.
        let s = format_status(&StatusContext {
            file_name: Some(Path::new("main.rs")),
            row_count: 3,
            cy: 0,
            width: 18,
        });
        assert_eq!(s, "main.rs - 3 lines ");
        assert_eq!(s.len(), 18);
    }

    #[test]
    fn left_segment_truncates_to_width() {
        let s = format_status(&StatusContext {
            file_name: Some(Path::new("main.rs")),
            row_count: 3,
            cy: 0,
            width: 10,
        });
        assert_eq!(s, "main.rs - ");
    }

    #[test]
    fn long_file_names_cut_at_twenty_chars() {
        let s = format_status(&StatusContext {
            file_name: Some(Path::new("a_very_long_file_name_indeed.txt")),
            row_count: 1,
            cy: 0,
            width: 60,
        });
        assert!(s.starts_with("a_very_long_file_nam - 1 lines"));
    }

    #[test]
    fn counter_reflects_cursor_row() {
        let s = format_status(&StatusContext {
            file_name: None,
            row_count: 12,
            cy: 7,
            width: 40,
        });
        assert!(s.ends_with("8/12"));
    }

    #[test]
    fn message_shown_only_while_fresh() {
        let msg = StatusMessage::new("saved");
        assert_eq!(format_message(Some(&msg), msg.created(), 80), "saved");
        assert_eq!(
            format_message(Some(&msg), msg.created() + Duration::from_secs(6), 80),
            ""
        );
        assert_eq!(format_message(None, Instant::now(), 80), "");
    }

    #[test]
    fn message_truncates_to_width() {
        let msg = StatusMessage::new("a rather verbose notification");
        assert_eq!(format_message(Some(&msg), msg.created(), 8), "a rather");
    }
}
