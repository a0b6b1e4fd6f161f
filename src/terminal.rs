//! Input mode switching around each key read.
//!
//! The terminal only leaves canonical/echo mode while we are blocked waiting
//! for a key; everything else (drawing, saving) runs with the user's normal
//! settings. `InputGuard` restores them on drop, and the SIGINT handler
//! installed by `InputMode::install_interrupt_handler` covers the one path
//! a drop never sees.

use std::io::{self, Write};

use crossterm::{cursor, execute};
use tracing::{debug, warn};

#[cfg(unix)]
type Saved = libc::termios;
#[cfg(not(unix))]
type Saved = ();

/// Snapshot of the terminal settings taken at startup.
///
/// A detached mode (stdin is not a terminal, or tests) never touches the
/// terminal settings; it still hides and shows the cursor.
#[derive(Clone, Copy)]
pub struct InputMode {
    saved: Option<Saved>,
}

/// Keeps the terminal in key-at-a-time mode with a hidden cursor until dropped.
pub struct InputGuard<'a, W: Write> {
    out: &'a mut W,
    saved: Option<Saved>,
}

impl InputMode {
    pub fn capture() -> InputMode {
        match platform::get_attr() {
            Ok(saved) => InputMode { saved: Some(saved) },
            Err(e) => {
                warn!(target: "bitflip.input", error = %e, "stdin is not a terminal, input mode left alone");
                InputMode::detached()
            }
        }
    }

    pub fn detached() -> InputMode {
        InputMode { saved: None }
    }

    pub fn is_detached(&self) -> bool {
        self.saved.is_none()
    }

    /// Switches off line buffering and echo, hides the cursor.
    pub fn enter<'a, W: Write>(&self, out: &'a mut W) -> io::Result<InputGuard<'a, W>> {
        if let Some(saved) = self.saved.as_ref() {
            platform::make_raw(saved)?;
        }
        let guard = InputGuard {
            out,
            saved: self.saved,
        };
        execute!(guard.out, cursor::Hide)?;
        Ok(guard)
    }

    /// Makes Ctrl-C leave the terminal usable before the process dies.
    pub fn install_interrupt_handler(&self) -> io::Result<()> {
        platform::on_interrupt(self.saved)?;
        debug!(target: "bitflip.runtime", "interrupt handler installed");
        Ok(())
    }
}

impl<'a, W: Write> Drop for InputGuard<'a, W> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.as_ref() {
            if let Err(e) = platform::restore(saved) {
                warn!(target: "bitflip.input", error = %e, "failed to restore terminal settings");
            }
        }
        let _ = execute!(self.out, cursor::Show);
    }
}

#[cfg(unix)]
mod platform {
    use std::io;
    use std::mem::MaybeUninit;

    use super::Saved;

    const SHOW_CURSOR: &[u8] = b"\x1b[?25h\n";

    fn check(rc: libc::c_int) -> io::Result<()> {
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    pub fn get_attr() -> io::Result<Saved> {
        let mut termios = MaybeUninit::<libc::termios>::uninit();
        check(unsafe { libc::tcgetattr(libc::STDIN_FILENO, termios.as_mut_ptr()) })?;
        Ok(unsafe { termios.assume_init() })
    }

    pub fn make_raw(saved: &Saved) -> io::Result<()> {
        let mut raw = *saved;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        check(unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw) })
    }

    pub fn restore(saved: &Saved) -> io::Result<()> {
        check(unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, saved) })
    }

    pub fn on_interrupt(saved: Option<Saved>) -> io::Result<()> {
        // Only async-signal-safe calls in here: tcsetattr, write, _exit.
        let action = move || {
            if let Some(saved) = saved.as_ref() {
                unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, saved) };
            }
            unsafe {
                libc::write(
                    libc::STDOUT_FILENO,
                    SHOW_CURSOR.as_ptr().cast(),
                    SHOW_CURSOR.len(),
                )
            };
            let _ = signal_hook::low_level::emulate_default_handler(signal_hook::consts::SIGINT);
        };
        unsafe { signal_hook::low_level::register(signal_hook::consts::SIGINT, action) }?;
        Ok(())
    }
}

#[cfg(not(unix))]
mod platform {
    use std::io;

    use crossterm::terminal;

    use super::Saved;

    pub fn get_attr() -> io::Result<Saved> {
        Ok(())
    }

    pub fn make_raw(_: &Saved) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    pub fn restore(_: &Saved) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    pub fn on_interrupt(_: Option<Saved>) -> io::Result<()> {
        Ok(())
    }
}
