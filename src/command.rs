// src/command.rs
use crate::constants::FALLBACK_SHELL;
use crate::error::{TerminalError, TerminalResult};

use nix::sys::wait::WaitStatus;
use nix::unistd::{Pid, Uid, User};

/// What to run in the terminal, and the title to show until the child
/// sets its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub argv: Vec<String>,
    pub title: Option<String>,
}

impl Launch {
    /// Resolve the command against the user's shell and `$SHELL`.
    pub fn resolve(command: Vec<String>) -> Self {
        Self::resolve_with(command, user_shell(), std::env::var("SHELL").ok())
    }

    /// An explicit command runs as given and names the window. Otherwise
    /// the first non-empty shell among the passwd entry, `$SHELL` and
    /// `/bin/sh` is used.
    pub fn resolve_with(command: Vec<String>, user_shell: Option<String>, env_shell: Option<String>) -> Self {
        if !command.is_empty() {
            let title = command.join(" ");
            return Self {
                argv: command,
                title: Some(title),
            };
        }

        let shell = [user_shell, env_shell]
            .into_iter()
            .flatten()
            .find(|shell| !shell.is_empty())
            .unwrap_or_else(|| FALLBACK_SHELL.to_string());

        Self {
            argv: vec![shell],
            title: None,
        }
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or(FALLBACK_SHELL)
    }
}

/// Login shell from the passwd database.
pub fn user_shell() -> Option<String> {
    let user = User::from_uid(Uid::current()).ok().flatten()?;
    Some(user.shell.to_string_lossy().into_owned())
}

/// Turn a raw wait status into the exit code this process should return.
/// Death by signal maps to `128 + signal`, as shells report it.
pub fn exit_code_from_wait_status(status: i32) -> TerminalResult<u8> {
    let code = match WaitStatus::from_raw(Pid::from_raw(0), status) {
        Ok(WaitStatus::Exited(_, code)) => code,
        Ok(WaitStatus::Signaled(_, signal, _)) => 128 + signal as i32,
        _ => return Err(TerminalError::WaitStatus(status)),
    };
    Ok(code.clamp(0, 255) as u8)
}
