// src/window.rs
//! Forwarding of the terminal's window-manager requests to the toplevel.

use crate::command::exit_code_from_wait_status;
use crate::constants::{EXIT_FAILURE, EXIT_SUCCESS, FONT_SCALE_STEP};
use crate::geometry::{self, CellGrid, WindowSize};

use glib::Propagation;
use gtk4::ApplicationWindow;
use gtk4::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use vte4::Terminal;
use vte4::prelude::*;

pub fn cell_grid(terminal: &Terminal) -> CellGrid {
    CellGrid {
        columns: terminal.column_count() as i64,
        rows: terminal.row_count() as i64,
        char_width: terminal.char_width() as i64,
        char_height: terminal.char_height() as i64,
    }
}

pub fn window_size(window: &ApplicationWindow) -> WindowSize {
    WindowSize {
        width: window.width(),
        height: window.height(),
    }
}

/// Scale the font by `factor` and grow or shrink the window so the grid
/// keeps its columns and rows.
pub fn adjust_font_scale(terminal: &Terminal, window: &ApplicationWindow, factor: f64) {
    let before = cell_grid(terminal);
    let size = window_size(window);

    terminal.set_font_scale(terminal.font_scale() * factor);

    // The cell size changes with the scale.
    let after = cell_grid(terminal);
    let target = geometry::rescale(size, before, after);
    debug!(scale = terminal.font_scale(), ?target, "font scale changed");
    window.set_default_size(target.width, target.height);
}

#[allow(deprecated)]
pub fn connect_title(terminal: &Terminal, window: &ApplicationWindow) {
    let window_weak = window.downgrade();
    terminal.connect_window_title_changed(move |terminal| {
        if let Some(window) = window_weak.upgrade() {
            window.set_title(terminal.window_title().as_deref());
        }
    });
}

/// Requests the child makes through escape sequences: iconify, raise,
/// resize and friends, plus the font size keybindings of the widget.
pub fn connect_requests(terminal: &Terminal, window: &ApplicationWindow) {
    let win = window.downgrade();
    terminal.connect_iconify_window(move |_| {
        if let Some(window) = win.upgrade() {
            window.minimize();
        }
    });

    let win = window.downgrade();
    terminal.connect_deiconify_window(move |_| {
        if let Some(window) = win.upgrade() {
            window.unminimize();
        }
    });

    let win = window.downgrade();
    terminal.connect_raise_window(move |_| {
        if let Some(window) = win.upgrade() {
            window.present();
        }
    });

    // GTK4 gives no control over stacking order or position.
    terminal.connect_lower_window(|_| debug!("lower-window request ignored"));
    terminal.connect_move_window(|_, x, y| debug!(x, y, "move-window request ignored"));

    let win = window.downgrade();
    terminal.connect_maximize_window(move |_| {
        if let Some(window) = win.upgrade() {
            window.maximize();
        }
    });

    let win = window.downgrade();
    terminal.connect_restore_window(move |_| {
        if let Some(window) = win.upgrade() {
            window.unmaximize();
        }
    });

    terminal.connect_refresh_window(|terminal| terminal.queue_draw());

    let win = window.downgrade();
    terminal.connect_resize_window(move |terminal, columns, rows| {
        if let Some(window) = win.upgrade() {
            let target = geometry::resize_for_cells(window_size(&window), cell_grid(terminal), columns, rows);
            debug!(columns, rows, ?target, "resize-window");
            window.set_default_size(target.width, target.height);
        }
    });

    let win = window.downgrade();
    terminal.connect_increase_font_size(move |terminal| {
        if let Some(window) = win.upgrade() {
            adjust_font_scale(terminal, &window, FONT_SCALE_STEP);
        }
    });

    let win = window.downgrade();
    terminal.connect_decrease_font_size(move |terminal| {
        if let Some(window) = win.upgrade() {
            adjust_font_scale(terminal, &window, 1.0 / FONT_SCALE_STEP);
        }
    });
}

/// Whether this build can set the urgency hint at all.
pub const URGENCY_HINT_SUPPORTED: bool = cfg!(feature = "x11");

/// Mark the window urgent on bell until it is focused again.
pub fn connect_bell(terminal: &Terminal, window: &ApplicationWindow) {
    if !URGENCY_HINT_SUPPORTED {
        warn!("urgent-on-bell has no effect: built without the x11 feature");
        return;
    }

    let win = window.downgrade();
    terminal.connect_bell(move |_| {
        if let Some(window) = win.upgrade() {
            set_urgent(&window, true);
        }
    });

    window.connect_is_active_notify(|window| {
        if window.is_active() {
            set_urgent(window, false);
        }
    });
}

#[cfg(feature = "x11")]
fn set_urgent(window: &ApplicationWindow, urgent: bool) {
    use gdk4_x11::X11Surface;

    match window.surface().and_downcast::<X11Surface>() {
        Some(surface) => surface.set_urgency_hint(urgent),
        None => debug!(urgent, "urgency hint needs an X11 surface"),
    }
}

#[cfg(not(feature = "x11"))]
fn set_urgent(_window: &ApplicationWindow, _urgent: bool) {}

/// Once the child runs, the window closing or the child exiting ends the
/// program. `exit_code` receives the code to exit with.
pub fn connect_lifecycle(terminal: &Terminal, window: &ApplicationWindow, exit_code: Rc<Cell<u8>>) {
    let win = window.downgrade();
    let child_code = Rc::clone(&exit_code);
    terminal.connect_child_exited(move |_, status| {
        let code = exit_code_from_wait_status(status).unwrap_or_else(|err| {
            warn!("{err}");
            EXIT_FAILURE
        });
        info!(status, code, "child exited");
        child_code.set(code);
        if let Some(window) = win.upgrade() {
            window.destroy();
        }
    });

    window.connect_close_request(move |_| {
        info!("window closed");
        exit_code.set(EXIT_SUCCESS);
        Propagation::Proceed
    });
}
