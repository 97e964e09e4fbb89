// src/config.rs
//! Configuration record built from the command line and `stupidterm.ini`.
//!
//! The file is a GLib key file with three sections:
//!
//! ```ini
//! [options]
//! font = Monospace 9
//! lines = 10000
//! scroll-on-keystroke = true
//!
//! [colors]
//! foreground = #dcdccc
//! background = #3f3f3f
//! color0 = #1f1f1f
//!
//! [urlmatch]
//! program = xdg-open
//! regex = https?://[^\s]+
//! ```
//!
//! Flags given on the command line take precedence over the file, except
//! for the boolean options, where a flag toggles the file's value.

use crate::cli::Cli;
use crate::constants::{COLORS_GROUP, CONFIG_FILE_NAME, OPTIONS_GROUP, PALETTE_MAX, URLMATCH_GROUP};
use crate::error::ConfigError;

use glib::{FileError, KeyFile, KeyFileError, KeyFileFlags};
use gtk4::gdk::RGBA;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Foreground, background and the leading entries of the 16-color palette.
#[derive(Clone, Debug)]
pub struct Palette {
    pub foreground: RGBA,
    pub background: RGBA,
    pub colors: Vec<RGBA>,
}

/// Right-clicking text matching `regex` runs `program <match>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlMatch {
    pub program: String,
    pub regex: String,
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub font: Option<String>,
    /// Scrollback lines; 0 keeps the widget's default.
    pub lines: i64,
    pub role: Option<String>,
    pub scroll_on_output: bool,
    pub scroll_on_keystroke: bool,
    pub mouse_autohide: bool,
    pub sync_clipboard: bool,
    pub urgent_on_bell: bool,
    pub command: Vec<String>,
    pub palette: Option<Palette>,
    pub highlight: Option<RGBA>,
    pub highlight_foreground: Option<RGBA>,
    pub url_match: Option<UrlMatch>,
}

impl Config {
    /// Config from flags alone, as if no file existed.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            font: cli.font,
            lines: cli.lines.unwrap_or(0),
            role: cli.role,
            scroll_on_output: cli.scroll_on_output,
            scroll_on_keystroke: cli.scroll_on_keystroke,
            mouse_autohide: cli.mouse_autohide,
            sync_clipboard: cli.sync_clipboard,
            urgent_on_bell: cli.urgent_on_bell,
            command: cli.command,
            ..Self::default()
        }
    }

    /// Merge the flags with the config file. Problems with the file are
    /// logged and skipped.
    pub fn load(cli: Cli) -> Self {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        let mut config = Self::from_cli(cli);

        match read_key_file(&path) {
            Ok(Some(file)) => {
                debug!(path = %path.display(), "loaded config file");
                for err in config.merge_key_file(&file, &path) {
                    warn!("{err}");
                }
            }
            Ok(None) => debug!(path = %path.display(), "no config file"),
            Err(err) => warn!("{err}"),
        }

        config
    }

    /// Apply a loaded key file on top of the flag values and return every
    /// problem found along the way.
    pub fn merge_key_file(&mut self, file: &KeyFile, path: &Path) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        self.scroll_on_output = toggle(file, path, "scroll-on-output", self.scroll_on_output, &mut errors);
        self.scroll_on_keystroke =
            toggle(file, path, "scroll-on-keystroke", self.scroll_on_keystroke, &mut errors);
        self.mouse_autohide = toggle(file, path, "mouse-autohide", self.mouse_autohide, &mut errors);
        self.sync_clipboard = toggle(file, path, "sync-clipboard", self.sync_clipboard, &mut errors);
        self.urgent_on_bell = toggle(file, path, "urgent-on-bell", self.urgent_on_bell, &mut errors);

        if self.lines == 0 {
            match file.integer(OPTIONS_GROUP, "lines") {
                Ok(lines) => self.lines = i64::from(lines),
                Err(err) => note_option_error(err, path, &mut errors),
            }
        }
        if self.font.is_none() {
            self.font = option_string(file, path, "font", &mut errors);
        }
        if self.role.is_none() {
            self.role = option_string(file, path, "role", &mut errors);
        }

        if file.has_group(COLORS_GROUP) {
            self.merge_colors(file, path, &mut errors);
        }
        if file.has_group(URLMATCH_GROUP) {
            match read_url_match(file, path) {
                Ok(url_match) => self.url_match = Some(url_match),
                Err(err) => errors.push(err),
            }
        }

        errors
    }

    fn merge_colors(&mut self, file: &KeyFile, path: &Path, errors: &mut Vec<ConfigError>) {
        let background = match require_color(file, path, "background") {
            Ok(color) => color,
            Err(err) => return errors.push(err),
        };
        let foreground = match require_color(file, path, "foreground") {
            Ok(color) => color,
            Err(err) => return errors.push(err),
        };

        // Fully transparent highlights count as unset.
        match read_color(file, path, "highlight") {
            Ok(color) => self.highlight = color.filter(|c| c.alpha() > 0.0),
            Err(err) => errors.push(err),
        }
        match read_color(file, path, "highlight-foreground") {
            Ok(color) => self.highlight_foreground = color.filter(|c| c.alpha() > 0.0),
            Err(err) => errors.push(err),
        }

        // The palette ends at the first entry that is missing or bad.
        let mut colors = Vec::with_capacity(PALETTE_MAX);
        for i in 0..PALETTE_MAX {
            match read_color(file, path, &format!("color{i}")) {
                Ok(Some(color)) => colors.push(color),
                Ok(None) => break,
                Err(err) => {
                    errors.push(err);
                    break;
                }
            }
        }

        self.palette = Some(Palette {
            foreground,
            background,
            colors,
        });
    }
}

pub fn default_config_path() -> PathBuf {
    glib::user_config_dir().join(CONFIG_FILE_NAME)
}

/// Load `path` as a key file. A file that does not exist is not an error.
pub fn read_key_file(path: &Path) -> Result<Option<KeyFile>, ConfigError> {
    let file = KeyFile::new();
    match file.load_from_file(path, KeyFileFlags::NONE) {
        Ok(()) => Ok(Some(file)),
        Err(err) if err.matches(FileError::Noent) || err.matches(KeyFileError::NotFound) => Ok(None),
        Err(source) => Err(ConfigError::Open {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse a color in any syntax GDK understands.
pub fn parse_color(value: &str, path: &Path) -> Result<RGBA, ConfigError> {
    RGBA::parse(value).map_err(|_| ConfigError::InvalidColor {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}

fn is_missing(err: &glib::Error) -> bool {
    err.matches(KeyFileError::GroupNotFound) || err.matches(KeyFileError::KeyNotFound)
}

fn note_option_error(err: glib::Error, path: &Path, errors: &mut Vec<ConfigError>) {
    if !is_missing(&err) {
        errors.push(ConfigError::Value {
            path: path.to_path_buf(),
            source: err,
        });
    }
}

/// A boolean option: the flag inverts whatever the file says.
fn toggle(file: &KeyFile, path: &Path, key: &str, flag: bool, errors: &mut Vec<ConfigError>) -> bool {
    let value = match file.boolean(OPTIONS_GROUP, key) {
        Ok(value) => value,
        Err(err) => {
            note_option_error(err, path, errors);
            false
        }
    };
    flag ^ value
}

fn option_string(file: &KeyFile, path: &Path, key: &str, errors: &mut Vec<ConfigError>) -> Option<String> {
    match file.string(OPTIONS_GROUP, key) {
        Ok(value) => Some(value.into()),
        Err(err) => {
            note_option_error(err, path, errors);
            None
        }
    }
}

fn read_color(file: &KeyFile, path: &Path, key: &str) -> Result<Option<RGBA>, ConfigError> {
    match file.string(COLORS_GROUP, key) {
        Ok(value) => parse_color(value.as_str(), path).map(Some),
        Err(err) if err.matches(KeyFileError::KeyNotFound) => Ok(None),
        Err(source) => Err(ConfigError::Value {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn require_color(file: &KeyFile, path: &Path, key: &str) -> Result<RGBA, ConfigError> {
    read_color(file, path, key)?.ok_or_else(|| ConfigError::MissingKey {
        path: path.to_path_buf(),
        section: COLORS_GROUP,
        key: key.to_string(),
    })
}

fn required_key(err: glib::Error, path: &Path, key: &str) -> ConfigError {
    if err.matches(KeyFileError::KeyNotFound) {
        ConfigError::MissingKey {
            path: path.to_path_buf(),
            section: URLMATCH_GROUP,
            key: key.to_string(),
        }
    } else {
        ConfigError::Value {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

fn read_url_match(file: &KeyFile, path: &Path) -> Result<UrlMatch, ConfigError> {
    let program = file
        .string(URLMATCH_GROUP, "program")
        .map_err(|err| required_key(err, path, "program"))?;
    // Raw value: the regex keeps its backslashes.
    let regex = file
        .value(URLMATCH_GROUP, "regex")
        .map_err(|err| required_key(err, path, "regex"))?;

    Ok(UrlMatch {
        program: program.into(),
        regex: regex.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_file(data: &str) -> KeyFile {
        let file = KeyFile::new();
        file.load_from_data(data, KeyFileFlags::NONE).unwrap();
        file
    }

    fn merged(cli: Cli, data: &str) -> (Config, Vec<ConfigError>) {
        let mut config = Config::from_cli(cli);
        let errors = config.merge_key_file(&key_file(data), Path::new("test.ini"));
        (config, errors)
    }

    fn assert_rgb(color: &RGBA, r: f32, g: f32, b: f32) {
        assert!((color.red() - r).abs() < 1e-3, "red {} != {}", color.red(), r);
        assert!((color.green() - g).abs() < 1e-3, "green {} != {}", color.green(), g);
        assert!((color.blue() - b).abs() < 1e-3, "blue {} != {}", color.blue(), b);
    }

    #[test]
    fn test_empty_file_keeps_flags() {
        let cli = Cli {
            font: Some("Mono 12".into()),
            lines: Some(42),
            mouse_autohide: true,
            ..Cli::default()
        };
        let (config, errors) = merged(cli, "");
        assert!(errors.is_empty());
        assert_eq!(config.font.as_deref(), Some("Mono 12"));
        assert_eq!(config.lines, 42);
        assert!(config.mouse_autohide);
        assert!(!config.scroll_on_output);
        assert!(config.palette.is_none());
        assert!(config.url_match.is_none());
    }

    #[test]
    fn test_flag_toggles_file_value() {
        let data = "[options]\nscroll-on-output = true\nscroll-on-keystroke = true\n";
        let cli = Cli {
            scroll_on_keystroke: true,
            sync_clipboard: true,
            ..Cli::default()
        };
        let (config, errors) = merged(cli, data);
        assert!(errors.is_empty());
        assert!(config.scroll_on_output);
        assert!(!config.scroll_on_keystroke);
        assert!(config.sync_clipboard);
        assert!(!config.urgent_on_bell);
    }

    #[test]
    fn test_bad_boolean_is_reported() {
        let (config, errors) = merged(
            Cli { urgent_on_bell: true, ..Cli::default() },
            "[options]\nurgent-on-bell = sometimes\n",
        );
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigError::Value { .. }));
        assert!(config.urgent_on_bell);
    }

    #[test]
    fn test_flags_win_over_file_values() {
        let data = "[options]\nfont = Terminus 9\nlines = 1000\nrole = file-role\n";
        let (config, _) = merged(
            Cli {
                font: Some("Mono 10".into()),
                lines: Some(20),
                ..Cli::default()
            },
            data,
        );
        assert_eq!(config.font.as_deref(), Some("Mono 10"));
        assert_eq!(config.lines, 20);
        assert_eq!(config.role.as_deref(), Some("file-role"));

        let (config, _) = merged(Cli::default(), data);
        assert_eq!(config.font.as_deref(), Some("Terminus 9"));
        assert_eq!(config.lines, 1000);
    }

    #[test]
    fn test_zero_lines_flag_falls_back_to_file() {
        let (config, _) = merged(Cli { lines: Some(0), ..Cli::default() }, "[options]\nlines = 300\n");
        assert_eq!(config.lines, 300);
    }

    #[test]
    fn test_bad_lines_value() {
        let (config, errors) = merged(Cli::default(), "[options]\nlines = many\n");
        assert_eq!(config.lines, 0);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_full_colors_section() {
        let data = "[colors]\n\
                    background = #000000\n\
                    foreground = #ffffff\n\
                    highlight = rgb(255,0,0)\n\
                    highlight-foreground = blue\n\
                    color0 = #000\n\
                    color1 = #ff0000\n\
                    color2 = #00ff00\n";
        let (config, errors) = merged(Cli::default(), data);
        assert!(errors.is_empty());

        let palette = config.palette.unwrap();
        assert_rgb(&palette.background, 0.0, 0.0, 0.0);
        assert_rgb(&palette.foreground, 1.0, 1.0, 1.0);
        assert_eq!(palette.colors.len(), 3);
        assert_rgb(&palette.colors[1], 1.0, 0.0, 0.0);
        assert_rgb(&config.highlight.unwrap(), 1.0, 0.0, 0.0);
        assert_rgb(&config.highlight_foreground.unwrap(), 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_transparent_highlight_is_ignored() {
        let data = "[colors]\nbackground = black\nforeground = white\n\
                    highlight = rgba(255,0,0,0)\nhighlight-foreground = rgba(0,0,255,0.5)\n";
        let (config, errors) = merged(Cli::default(), data);
        assert!(errors.is_empty());
        assert!(config.highlight.is_none());
        assert_rgb(&config.highlight_foreground.unwrap(), 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_palette_stops_at_gap() {
        let data = "[colors]\nbackground = black\nforeground = white\n\
                    color0 = #111111\ncolor1 = #222222\ncolor3 = #444444\n";
        let (config, errors) = merged(Cli::default(), data);
        assert!(errors.is_empty());
        assert_eq!(config.palette.unwrap().colors.len(), 2);
        assert!(config.highlight.is_none());
    }

    #[test]
    fn test_palette_stops_at_invalid_color() {
        let data = "[colors]\nbackground = black\nforeground = white\n\
                    color0 = #111111\ncolor1 = notacolor\ncolor2 = #333333\n";
        let (config, errors) = merged(Cli::default(), data);
        assert_eq!(config.palette.unwrap().colors.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ConfigError::InvalidColor { value, .. } if value == "notacolor"));
    }

    #[test]
    fn test_colors_need_background_and_foreground() {
        let (config, errors) = merged(Cli::default(), "[colors]\nforeground = white\nhighlight = red\n");
        assert!(config.palette.is_none());
        assert!(config.highlight.is_none());
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ConfigError::MissingKey { key, .. } if key == "background"));

        let (config, errors) = merged(Cli::default(), "[colors]\nbackground = black\nforeground = #zz\n");
        assert!(config.palette.is_none());
        assert!(matches!(errors[0], ConfigError::InvalidColor { .. }));
    }

    #[test]
    fn test_palette_is_capped() {
        let mut data = String::from("[colors]\nbackground = black\nforeground = white\n");
        for i in 0..20 {
            data.push_str(&format!("color{i} = #0000{:02x}\n", i * 10));
        }
        let (config, _) = merged(Cli::default(), &data);
        assert_eq!(config.palette.unwrap().colors.len(), PALETTE_MAX);
    }

    #[test]
    fn test_urlmatch_keeps_raw_regex() {
        let data = "[urlmatch]\nprogram = xdg-open\nregex = https?://[^\\s]+\n";
        let (config, errors) = merged(Cli::default(), data);
        assert!(errors.is_empty());
        assert_eq!(
            config.url_match,
            Some(UrlMatch {
                program: "xdg-open".into(),
                regex: r"https?://[^\s]+".into(),
            })
        );
    }

    #[test]
    fn test_urlmatch_needs_both_keys() {
        let (config, errors) = merged(Cli::default(), "[urlmatch]\nregex = foo\n");
        assert!(config.url_match.is_none());
        assert!(matches!(&errors[0], ConfigError::MissingKey { key, .. } if key == "program"));

        let (config, errors) = merged(Cli::default(), "[urlmatch]\nprogram = firefox\n");
        assert!(config.url_match.is_none());
        assert!(matches!(&errors[0], ConfigError::MissingKey { key, .. } if key == "regex"));
    }

    #[test]
    fn test_error_messages() {
        let (_, errors) = merged(Cli::default(), "[urlmatch]\nregex = foo\n");
        assert_eq!(
            errors[0].to_string(),
            "Error parsing 'test.ini': section [urlmatch] must specify program"
        );
    }

    #[test]
    fn test_missing_file_is_silent() {
        let result = read_key_file(Path::new("/nonexistent/stupidterm.ini")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_default_path_name() {
        assert!(default_config_path().ends_with(CONFIG_FILE_NAME));
    }
}
