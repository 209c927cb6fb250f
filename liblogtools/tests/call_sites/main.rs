//! Wrapper functions that log on behalf of their caller resolve the caller's
//! module, so group levels apply to them in granular mode.

#[path = "../common/mod.rs"]
mod common;
mod client;

use common::from_properties;
use liblogtools::{log_debug, CallerLocation, LevelFilter, LogTools};

#[track_caller]
pub fn report(tools: &LogTools, message: &str) {
    log_debug!(tools = tools, caller = CallerLocation::caller_in(module_path!()), "{}", message);
}

#[test]
fn wrapper_calls_follow_the_callers_group_level() {
    let (tools, capture) = from_properties(&[
        ("log.level", "warn"),
        ("log.level.call_sites.client", "debug"),
    ]);
    assert!(tools.is_granular());
    capture.clear();

    let direct = client::direct(&tools);
    let wrapped = client::through_wrapper(&tools);
    // the crate root stays at the root level
    report(&tools, "from the root");

    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].message, format!("(client:{}): direct", direct));
    assert_eq!(lines[1].message, format!("(client:{}): wrapped", wrapped));
    assert!(lines.iter().all(|line| line.logger == "call_sites::client"));
    assert_eq!(
        tools.registry().names(),
        vec!["call_sites", "call_sites::client", liblogtools::DEFAULT_LOGGER]
    );
}

#[test]
fn wrapper_call_from_crate_root_uses_root_module_logger() {
    let (tools, capture) = from_properties(&[("log.granular", "true")]);
    capture.clear();
    tools.set_level("call_sites", LevelFilter::Debug);

    let line = line!() + 1;
    report(&tools, "from the root");

    assert_eq!(capture.messages(), vec![format!("(call_sites:{}): from the root", line)]);
    assert_eq!(capture.lines()[0].logger, "call_sites");
}
