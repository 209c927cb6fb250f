use liblogtools::{log_debug, LogTools};

/// Logs directly and returns the line of the call.
pub fn direct(tools: &LogTools) -> u32 {
    log_debug!(tools = tools, "direct");
    line!() - 1
}

/// Logs through the crate's wrapper and returns the line of the call.
pub fn through_wrapper(tools: &LogTools) -> u32 {
    crate::report(tools, "wrapped");
    line!() - 1
}
