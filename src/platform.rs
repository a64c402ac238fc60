//! Key hints shown in the status bar

/// Next/Finish shortcut display. Terminals rarely forward Cmd, so Ctrl+S is
/// the binding on every platform.
pub const PROCEED_SHORTCUT: &str = "^S";
