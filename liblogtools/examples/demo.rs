//! Walks through the facade from a small program.
//!
//! Try it with different settings, e.g.
//!   env 'log.level=debug' cargo run -p liblogtools --example demo
//!   env 'log.level.demo.setup=trace' cargo run -p liblogtools --example demo
//!   LOG_LEVEL=off cargo run -p liblogtools --example demo
//!   cargo run -p liblogtools --features tracing --example demo

use liblogtools::{
    log_debug, log_enabled, log_error, log_info, log_trace, log_warn, CallerLocation, Level,
    LogTools,
};

mod setup {
    use liblogtools::log_debug;

    pub fn run() {
        log_debug!("Hello from the setup module");
        wizard::run();
    }

    pub mod wizard {
        use liblogtools::log_trace;

        pub fn run() {
            log_trace!("Hi, I'm two modules deep");
        }
    }
}

// With the tracing feature, lines go through a tracing subscriber instead of stdout
#[cfg(feature = "tracing")]
fn install() -> &'static LogTools {
    use liblogtools::{LogToolsConfig, TracingBackend};
    use std::sync::Arc;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();
    let tools = LogTools::new(LogToolsConfig::from_env(), Arc::new(TracingBackend::new()));
    LogTools::install(tools).unwrap_or_else(|_| LogTools::global())
}

#[cfg(not(feature = "tracing"))]
fn install() -> &'static LogTools {
    LogTools::global()
}

#[track_caller]
fn warn_for_caller(message: &str) {
    log_warn!(caller = CallerLocation::caller_in(module_path!()), "{}", message);
}

fn main() {
    let tools = install();
    log_info!("granular mode: {}", tools.is_granular());

    let demo_there = "Demo there";
    log_error!("{}", demo_there);
    log_warn!("var1: {}, var2: {}", 9, false);
    log_info!("{}", demo_there);
    log_debug!("{}", demo_there);
    log_trace!("{}", demo_there);

    if log_enabled!(Level::Debug) {
        let summary: Vec<String> = (0..3).map(|i| format!("item-{}", i)).collect();
        log_debug!("expensive summary: {:?}", summary);
    }

    tools.log_lazy(Level::Info, &liblogtools::caller_location!(), || {
        let mut builder = String::new();
        builder.push_str("string");
        builder.push_str("builder");
        builder
    });

    warn_for_caller("reported at the line that called the wrapper");
    setup::run();
}
