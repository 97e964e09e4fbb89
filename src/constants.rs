// src/constants.rs

pub const APP_ID: &str = "org.stupidterm.StupidTerm";

// Config file
pub const CONFIG_FILE_NAME: &str = "stupidterm.ini";
pub const OPTIONS_GROUP: &str = "options";
pub const COLORS_GROUP: &str = "colors";
pub const URLMATCH_GROUP: &str = "urlmatch";

/// Upper bound on `color0` .. `colorN` entries read from `[colors]`.
pub const PALETTE_MAX: usize = 16;

// Font scaling
pub const FONT_SCALE_STEP: f64 = 1.125;

/// Smallest grid a resize request may ask for, per axis.
pub const MIN_RESIZE_CELLS: u32 = 2;

// Hardware keycodes on US keyboards
pub const KEYCODE_PLUS: u32 = 21;
pub const KEYCODE_MINUS: u32 = 20;

/// PCRE2_MULTILINE
pub const PCRE2_MULTILINE: u32 = 0x0000_0400;

pub const MATCH_CURSOR_NAME: &str = "pointer";

pub const FALLBACK_SHELL: &str = "/bin/sh";

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
