/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Logged total color:
/// \>0 → reset
/// \<0 → red (a correction pushed the day below zero)
/// 0 → grey
pub fn color_for_logged(value: i64) -> &'static str {
    if value < 0 {
        RED
    } else if value == 0 {
        GREY
    } else {
        RESET
    }
}

/// Running timers are highlighted in green.
pub fn colorize_state(label: &str, running: bool) -> String {
    if running {
        format!("{GREEN}{label}{RESET}")
    } else {
        format!("{GREY}{label}{RESET}")
    }
}
