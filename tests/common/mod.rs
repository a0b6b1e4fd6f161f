use bitflip::{BitView, FileStorage, InputMode};

/// Drops CSI sequences so frames can be compared as plain text.
/// Same helper as the `bit_view::render` unit tests; change both together.
pub fn strip_ansi(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let mut out = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Runs a whole session over `input` and returns the raw terminal output.
pub fn run_session(storage: FileStorage, input: &[u8]) -> Vec<u8> {
    let view = BitView::with_storage(storage).expect("load");
    let mut input = input;
    let mut out = Vec::new();
    view.run_event_loop(&mut input, &mut out, InputMode::detached())
        .expect("session");
    out
}
