// src/app.rs
use crate::command::Launch;
use crate::config::Config;
use crate::constants::{APP_ID, EXIT_FAILURE};
use crate::{input, terminal, window};

use gtk4::prelude::*;
use gtk4::{gio, Application, ApplicationWindow};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{error, warn};

/// Build the window, start the child and run the main loop. Returns the
/// exit code for the process.
pub fn run(config: Config) -> u8 {
    // GTK4 has no window roles; the program name is what the window
    // manager sees as the window's class.
    if let Some(role) = &config.role {
        glib::set_prgname(Some(role.as_str()));
    }

    let mut builder = Application::builder().flags(gio::ApplicationFlags::NON_UNIQUE);
    if let Some(id) = application_id(config.role.as_deref()) {
        builder = builder.application_id(id);
    }
    let app = builder.build();

    let exit_code = Rc::new(Cell::new(EXIT_FAILURE));
    let pending = RefCell::new(Some(config));
    let code = Rc::clone(&exit_code);
    app.connect_activate(move |app| {
        if let Some(config) = pending.borrow_mut().take() {
            build_ui(app, config, Rc::clone(&code));
        }
    });

    // Arguments were already parsed; keep GApplication away from them.
    app.run_with_args::<&str>(&[]);
    exit_code.get()
}

/// The role doubles as the application id (the Wayland app-id) when it is
/// a valid one. Otherwise no id is set and GTK falls back to the program
/// name.
pub fn application_id(role: Option<&str>) -> Option<&str> {
    match role {
        None => Some(APP_ID),
        Some(role) if gio::Application::id_is_valid(role) => Some(role),
        Some(_) => None,
    }
}

fn build_ui(app: &Application, config: Config, exit_code: Rc<Cell<u8>>) {
    let window = ApplicationWindow::builder().application(app).build();
    let terminal = terminal::build(&config);
    window.set_child(Some(&terminal));

    window::connect_title(&terminal, &window);

    if let Some(url_match) = &config.url_match {
        match terminal::add_url_match(&terminal, url_match) {
            Ok(_) => input::connect_url_click(&terminal, url_match.program.clone()),
            Err(err) => warn!("{err}"),
        }
    }

    window::connect_requests(&terminal, &window);
    input::connect_shortcuts(&terminal, &window);

    if config.urgent_on_bell {
        window::connect_bell(&terminal, &window);
    }
    if config.sync_clipboard {
        input::connect_selection_sync(&terminal);
    }

    let launch = Launch::resolve(config.command);
    if let Some(title) = &launch.title {
        window.set_title(Some(title));
    }

    let spawned_terminal = terminal.clone();
    terminal::spawn(&terminal, &launch, move |result| match result {
        Ok(_pid) => {
            window::connect_lifecycle(&spawned_terminal, &window, exit_code);
            spawned_terminal.grab_focus();
            window.present();
        }
        Err(err) => {
            error!("{err}");
            window.destroy();
        }
    });
}
