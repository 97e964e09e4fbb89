// src/terminal.rs
use crate::command::Launch;
use crate::config::{Config, UrlMatch};
use crate::constants::{MATCH_CURSOR_NAME, PCRE2_MULTILINE};
use crate::error::{TerminalError, TerminalResult};

use gtk4::gio;
use gtk4::prelude::*;
use tracing::{debug, info};
use vte4::prelude::*;
use vte4::{CursorBlinkMode, CursorShape, PtyFlags, Terminal};

/// Create the terminal widget with the configured appearance and behavior.
pub fn build(config: &Config) -> Terminal {
    let terminal = Terminal::new();
    terminal.set_hexpand(true);
    terminal.set_vexpand(true);

    terminal.set_scroll_on_output(config.scroll_on_output);
    terminal.set_scroll_on_keystroke(config.scroll_on_keystroke);
    terminal.set_mouse_autohide(config.mouse_autohide);
    terminal.set_cursor_blink_mode(CursorBlinkMode::Off);
    terminal.set_cursor_shape(CursorShape::Block);

    if config.lines != 0 {
        terminal.set_scrollback_lines(config.lines);
    }

    if let Some(palette) = &config.palette {
        let colors: Vec<&gtk4::gdk::RGBA> = palette.colors.iter().collect();
        terminal.set_colors(Some(&palette.foreground), Some(&palette.background), &colors);
    }
    if let Some(highlight) = &config.highlight {
        terminal.set_color_highlight(Some(highlight));
    }
    if let Some(highlight_fg) = &config.highlight_foreground {
        terminal.set_color_highlight_foreground(Some(highlight_fg));
    }

    if let Some(font) = &config.font {
        let desc = pango::FontDescription::from_string(font);
        terminal.set_font(Some(&desc));
    }

    debug!(
        lines = config.lines,
        font = ?config.font,
        palette = config.palette.as_ref().map_or(0, |p| p.colors.len()),
        "terminal configured"
    );
    terminal
}

/// Register the URL regex so matches are highlighted under the pointer.
/// Returns the match tag.
pub fn add_url_match(terminal: &Terminal, url_match: &UrlMatch) -> TerminalResult<i32> {
    let regex = compile_url_regex(url_match)?;
    let tag = terminal.match_add_regex(&regex, 0);
    terminal.match_set_cursor_name(tag, MATCH_CURSOR_NAME);
    debug!(tag, regex = %url_match.regex, program = %url_match.program, "url matching enabled");
    Ok(tag)
}

/// Compile the configured pattern as a multiline PCRE2 match regex.
pub fn compile_url_regex(url_match: &UrlMatch) -> TerminalResult<vte4::Regex> {
    vte4::Regex::for_match(&url_match.regex, PCRE2_MULTILINE).map_err(|source| TerminalError::Regex {
        pattern: url_match.regex.clone(),
        source,
    })
}

/// Start `launch` on the terminal's pty. `on_done` runs on the main loop
/// once the child is running or has failed to start.
pub fn spawn<F>(terminal: &Terminal, launch: &Launch, on_done: F)
where
    F: FnOnce(TerminalResult<glib::Pid>) + 'static,
{
    let argv: Vec<&str> = launch.argv.iter().map(String::as_str).collect();
    let program = launch.program().to_string();
    info!(argv = ?launch.argv, "spawning child");

    terminal.spawn_async(
        PtyFlags::DEFAULT,
        None,
        &argv,
        &[],
        glib::SpawnFlags::SEARCH_PATH,
        || {},
        -1,
        None::<&gio::Cancellable>,
        move |result| {
            on_done(result.map_err(|source| TerminalError::Spawn { program, source }));
        },
    );
}
