use owo_colors::OwoColorize;
use std::sync::OnceLock;
use supports_color::Stream;
use tracing_subscriber::EnvFilter;

static ANSI_ENABLED: OnceLock<bool> = OnceLock::new();

/// Install the fmt subscriber; `RUST_LOG` overrides `default_directive`.
pub fn init(default_directive: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ansi = detect_ansi();
    let _ = ANSI_ENABLED.set(ansi);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(())
}

pub fn category_match() -> String {
    if ansi_enabled() {
        format!("{}", "MATCH".bright_green().bold())
    } else {
        "MATCH".to_string()
    }
}

pub fn category_mismatch() -> String {
    if ansi_enabled() {
        format!("{}", "NO MATCH".bright_yellow().bold())
    } else {
        "NO MATCH".to_string()
    }
}

pub fn category_scope() -> String {
    if ansi_enabled() {
        format!("{}", "SCOPE".bright_cyan().bold())
    } else {
        "SCOPE".to_string()
    }
}

pub fn clause_label(tag: crate::ClauseTag, text: &str) -> String {
    if !ansi_enabled() {
        return text.to_string();
    }

    match tag {
        crate::ClauseTag::None => format!("{}", text.bright_white()),
        crate::ClauseTag::Rename => format!("{}", text.bright_magenta()),
        crate::ClauseTag::OnlyEmpty | crate::ClauseTag::OnlyList => {
            format!("{}", text.bright_blue())
        }
    }
}

fn ansi_enabled() -> bool {
    *ANSI_ENABLED.get_or_init(detect_ansi)
}

fn detect_ansi() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        let _ = enable_ansi_support();
        return true;
    }

    let windows_vt = enable_ansi_support().is_ok();
    windows_vt || supports_color::on_cached(Stream::Stdout).is_some()
}

#[cfg(windows)]
fn enable_ansi_support() -> windows::core::Result<()> {
    use windows::Win32::Foundation::HANDLE;
    use windows::Win32::System::Console::{
        ENABLE_VIRTUAL_TERMINAL_PROCESSING, GetConsoleMode, GetStdHandle, STD_OUTPUT_HANDLE,
        SetConsoleMode,
    };

    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE)?;
        if handle == HANDLE::default() {
            return Ok(());
        }

        let mut mode = std::mem::zeroed();
        GetConsoleMode(handle, &mut mode)?;
        SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING)?;
        Ok(())
    }
}

#[cfg(not(windows))]
fn enable_ansi_support() -> Result<(), ()> {
    Err(())
}
