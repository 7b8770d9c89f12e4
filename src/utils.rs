use std::io;
use std::process::{Command, Stdio};

/**
Open a URL in the user's default browser

# Notes
Uses the platform opener (`open` on macOS, `start` on Windows, `xdg-open` elsewhere)
and does not wait for the browser to exit

# Arguments
- `url`: Must be an http(s) URL, anything else is refused

# Returns
An error if the URL was refused or the opener could not be spawned
*/
pub fn open_in_browser(url: &str) -> io::Result<()> {
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to open non-http URL {:?}", url),
        ));
    }

    let mut command = opener_command(url);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    tracing::debug!(url, "opened profile in browser");
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    // empty title argument, otherwise `start` takes the URL as the window title
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
