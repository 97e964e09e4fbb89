// src/cli.rs
use clap::Parser;
use std::path::PathBuf;

/// Command-line flags. Boolean flags toggle the value from the config file.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "stupidterm")]
#[command(version)]
#[command(about = "stupid terminal", long_about = None)]
#[command(override_usage = "stupidterm [OPTIONS] [-- COMMAND...]")]
pub struct Cli {
    /// Specify alternative config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Specify a font to use
    #[arg(short, long, value_name = "FONT")]
    pub font: Option<String>,

    /// Specify the number of scrollback lines
    #[arg(short = 'n', long, value_name = "LINES", allow_negative_numbers = true)]
    pub lines: Option<i64>,

    /// Set window role
    #[arg(short, long, value_name = "ROLE")]
    pub role: Option<String>,

    /// Toggle scroll on output
    #[arg(long)]
    pub scroll_on_output: bool,

    /// Toggle scroll on keystroke
    #[arg(long)]
    pub scroll_on_keystroke: bool,

    /// Toggle autohiding the mouse cursor
    #[arg(long)]
    pub mouse_autohide: bool,

    /// Update both primary and clipboard on selection
    #[arg(long)]
    pub sync_clipboard: bool,

    /// Set window urgency hint on bell
    #[arg(long)]
    pub urgent_on_bell: bool,

    /// Command to run instead of the user's shell
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["stupidterm", "-c", "/tmp/x.ini", "-f", "Mono 10", "-n", "5000", "-r", "scratch"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.ini")));
        assert_eq!(cli.font.as_deref(), Some("Mono 10"));
        assert_eq!(cli.lines, Some(5000));
        assert_eq!(cli.role.as_deref(), Some("scratch"));
        assert!(cli.command.is_empty());
    }

    #[test]
    fn test_toggles() {
        let cli = Cli::try_parse_from(["stupidterm", "--scroll-on-output", "--urgent-on-bell"]).unwrap();
        assert!(cli.scroll_on_output);
        assert!(cli.urgent_on_bell);
        assert!(!cli.scroll_on_keystroke);
        assert!(!cli.mouse_autohide);
        assert!(!cli.sync_clipboard);
    }

    #[test]
    fn test_command_after_separator() {
        let cli = Cli::try_parse_from(["stupidterm", "-f", "Mono", "--", "vim", "-u", "NONE"]).unwrap();
        assert_eq!(cli.command, ["vim", "-u", "NONE"]);
    }

    #[test]
    fn test_command_without_separator_keeps_its_flags() {
        let cli = Cli::try_parse_from(["stupidterm", "htop", "-d", "10"]).unwrap();
        assert_eq!(cli.command, ["htop", "-d", "10"]);
        assert_eq!(cli.font, None);
    }

    #[test]
    fn test_negative_lines() {
        let cli = Cli::try_parse_from(["stupidterm", "--lines", "-1"]).unwrap();
        assert_eq!(cli.lines, Some(-1));
    }
}
