// src/input.rs
use crate::constants::{FONT_SCALE_STEP, KEYCODE_MINUS, KEYCODE_PLUS};
use crate::error::{TerminalError, TerminalResult};
use crate::window;

use glib::Propagation;
use gtk4::prelude::*;
use gtk4::{gdk, ApplicationWindow, EventControllerKey, GestureClick, PropagationPhase};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, warn};
use vte4::prelude::*;
use vte4::{Format, Terminal};

/// Ctrl+Shift keyboard shortcuts handled before the terminal sees the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    IncreaseFontSize,
    DecreaseFontSize,
    Copy,
    Paste,
}

/// Font size keys go by hardware keycode so they work regardless of what
/// the shifted symbol is; copy and paste go by key symbol. Only modifiers
/// in `accel_mods` count, so lock keys do not get in the way.
pub fn shortcut_for(
    keyval: gdk::Key,
    keycode: u32,
    state: gdk::ModifierType,
    accel_mods: gdk::ModifierType,
) -> Option<Shortcut> {
    let wanted = gdk::ModifierType::CONTROL_MASK | gdk::ModifierType::SHIFT_MASK;
    if state & accel_mods != wanted {
        return None;
    }

    match keycode {
        KEYCODE_PLUS => return Some(Shortcut::IncreaseFontSize),
        KEYCODE_MINUS => return Some(Shortcut::DecreaseFontSize),
        _ => {}
    }

    let key = keyval.to_lower();
    if key == gdk::Key::c {
        Some(Shortcut::Copy)
    } else if key == gdk::Key::v {
        Some(Shortcut::Paste)
    } else {
        None
    }
}

pub fn connect_shortcuts(terminal: &Terminal, window: &ApplicationWindow) {
    let controller = EventControllerKey::new();
    controller.set_propagation_phase(PropagationPhase::Capture);

    let terminal_weak = terminal.downgrade();
    let window_weak = window.downgrade();
    controller.connect_key_pressed(move |_, keyval, keycode, state| {
        let accel_mods = gtk4::accelerator_get_default_mod_mask();
        let Some(shortcut) = shortcut_for(keyval, keycode, state, accel_mods) else {
            return Propagation::Proceed;
        };
        let (Some(terminal), Some(window)) = (terminal_weak.upgrade(), window_weak.upgrade()) else {
            return Propagation::Proceed;
        };

        debug!(?shortcut, "shortcut");
        match shortcut {
            Shortcut::IncreaseFontSize => window::adjust_font_scale(&terminal, &window, FONT_SCALE_STEP),
            Shortcut::DecreaseFontSize => window::adjust_font_scale(&terminal, &window, 1.0 / FONT_SCALE_STEP),
            Shortcut::Copy => terminal.copy_clipboard_format(Format::Text),
            Shortcut::Paste => terminal.paste_clipboard(),
        }
        Propagation::Stop
    });

    terminal.add_controller(controller);
}

/// Right-clicking a URL match runs `program <match>`. The click still
/// reaches the terminal.
pub fn connect_url_click(terminal: &Terminal, program: String) {
    let gesture = GestureClick::new();
    // secondary button
    gesture.set_button(3);
    gesture.set_propagation_phase(PropagationPhase::Capture);

    let terminal_weak = terminal.downgrade();
    gesture.connect_pressed(move |_, _n_press, x, y| {
        let Some(terminal) = terminal_weak.upgrade() else {
            return;
        };
        let (matched, _tag) = terminal.check_match_at(x, y);
        if let Some(matched) = matched {
            if let Err(err) = open_match(&program, &matched) {
                warn!("{err}");
            }
        }
    });

    terminal.add_controller(gesture);
}

/// Run `program` on a matched string, searched in `PATH`, with stdout
/// discarded. The child is reaped on a background thread.
pub fn open_match(program: &str, matched: &str) -> TerminalResult<()> {
    let mut child = Command::new(program)
        .arg(matched)
        .stdout(Stdio::null())
        .spawn()
        .map_err(|source| TerminalError::Launch {
            program: program.to_string(),
            source,
        })?;

    debug!(program, matched, pid = child.id(), "opened match");
    thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

/// Mirror every new selection into the clipboard.
pub fn connect_selection_sync(terminal: &Terminal) {
    terminal.connect_selection_changed(|terminal| {
        if terminal.has_selection() {
            terminal.copy_clipboard_format(Format::Text);
        }
    });
}
