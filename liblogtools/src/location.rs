//! Call-site identification.
//!
//! Every logging macro captures `module_path!()`, `file!()` and `line!()` at the
//! call expression, so nothing is resolved at runtime. Wrapper functions that
//! log on behalf of their own caller mark themselves `#[track_caller]` and pass
//! `CallerLocation::caller_in(module_path!())` through the `caller = ...` macro
//! argument.
//!
//! `#[track_caller]` only reports a file and line. The module path of such a
//! location is rebuilt from the file path, relative to the wrapper's crate, and
//! interned so later calls from the same file do not allocate. Inline `mod`
//! blocks are not visible in a file path, so calls from them resolve to the
//! enclosing file's module.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::panic::Location;
use std::path::{Component, Path};

// Directories whose contents map onto a crate's module tree
const SOURCE_DIRS: [&str; 4] = ["src", "tests", "examples", "benches"];

// (crate root, file) -> module path, leaked once per source file
static FILE_MODULES: Lazy<DashMap<(&'static str, &'static str), &'static str>> =
    Lazy::new(DashMap::new);

/// Source position of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerLocation {
    module_path: &'static str,
    file: &'static str,
    line: u32,
}

impl CallerLocation {
    pub const fn new(module_path: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            module_path,
            file,
            line,
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`.
    ///
    /// `module_path` is the wrapper's own `module_path!()`. Its first segment
    /// names the crate the caller's file is resolved against, so the caller
    /// must live in the same crate as the wrapper.
    #[track_caller]
    pub fn caller_in(module_path: &'static str) -> Self {
        let location = Location::caller();
        let crate_root = module_path.split("::").next().unwrap_or(module_path);
        Self {
            module_path: file_module(crate_root, location.file()),
            file: location.file(),
            line: location.line(),
        }
    }

    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Last segment of the module path, e.g. `client` for `my_app::net::client`.
    pub fn simple_name(&self) -> &'static str {
        match self.module_path.rsplit("::").next() {
            Some(name) if !name.is_empty() => name,
            _ => file_stem(self.file),
        }
    }

    /// Name of the logger this call resolves to in granular mode.
    pub fn logger_name(&self) -> &'static str {
        if self.module_path.is_empty() {
            file_stem(self.file)
        } else {
            self.module_path
        }
    }
}

/// Renders the `(<SimpleName>:<Line>)` part of the line prefix.
impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.simple_name(), self.line)
    }
}

fn file_module(crate_root: &'static str, file: &'static str) -> &'static str {
    if let Some(module) = FILE_MODULES.get(&(crate_root, file)) {
        return *module;
    }
    *FILE_MODULES.entry((crate_root, file)).or_insert_with(|| {
        let module = module_from_file(crate_root, file);
        if module == crate_root {
            crate_root
        } else {
            let leaked: &'static str = Box::leak(module.into_boxed_str());
            leaked
        }
    })
}

/// Maps a source file onto the module it defines, e.g. `my_app::net::client`
/// for `src/net/client.rs` or `my_app` for `src/lib.rs`.
fn module_from_file(crate_root: &str, file: &str) -> String {
    let path = Path::new(file).with_extension("");
    let parts: Vec<&str> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let (dir, mut segments) = match parts.iter().rposition(|part| SOURCE_DIRS.contains(part)) {
        Some(dir) => (parts[dir], &parts[dir + 1..]),
        None => ("", &parts[parts.len().saturating_sub(1)..]),
    };
    // Target roots: src/bin/<name>.rs, tests/<name>.rs, tests/<name>/main.rs
    if dir == "src" {
        if segments.len() > 1 && segments[0] == "bin" {
            segments = &segments[2..];
        }
    } else if segments
        .first()
        .is_some_and(|first| first.replace('-', "_") == crate_root)
    {
        segments = &segments[1..];
    }
    if let Some((last, rest)) = segments.split_last() {
        let root_file = rest.is_empty() && (*last == "lib" || *last == "main");
        if *last == "mod" || root_file {
            segments = rest;
        }
    }

    let mut module = crate_root.to_string();
    for segment in segments {
        module.push_str("::");
        module.push_str(segment);
    }
    module
}

fn file_stem(file: &'static str) -> &'static str {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
}

/// Captures the location of the expression it is written in.
#[macro_export]
macro_rules! caller_location {
    () => {
        $crate::CallerLocation::new(module_path!(), file!(), line!())
    };
}
