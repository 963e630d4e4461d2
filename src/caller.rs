// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller location suffixes, e.g. `main.rs:L12:run`.

use std::panic::Location;
use std::path::Path;

/// Where a log call was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    function: Option<&'static str>,
}

impl CallSite {
    /// The location of the caller, via `#[track_caller]`.
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            function: None,
        }
    }

    /**
    Attaches the path of the enclosing function, as produced by the logging
    macros, e.g. `my_crate::server::run::{{closure}}`.
    */
    pub fn with_function(mut self, function: &'static str) -> Self {
        self.function = Some(function);
        self
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

/// Which caller details to append to each line. `None` means "inherit".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallerSettings {
    pub file: Option<bool>,
    pub line: Option<bool>,
    pub func: Option<bool>,
}

impl CallerSettings {
    pub fn set_defaults(&mut self) {
        self.file.get_or_insert(false);
        self.line.get_or_insert(false);
        self.func.get_or_insert(false);
    }

    /// Takes every flag `other` sets, keeps the rest.
    pub fn override_with(&mut self, other: &CallerSettings) {
        self.file = other.file.or(self.file);
        self.line = other.line.or(self.line);
        self.func = other.func.or(self.func);
    }

    pub fn any(&self) -> bool {
        self.file == Some(true) || self.line == Some(true) || self.func == Some(true)
    }
}

/**
Renders the caller suffix: the file name, `L<line>` and the function name,
each only if enabled, joined by `:`. Empty if nothing is enabled.

The function part needs a call site that went through one of the logging
macros; plain method calls carry no function name and the part is left out.
*/
pub fn line(settings: &CallerSettings, site: &CallSite) -> String {
    if !settings.any() {
        return String::new();
    }

    let mut fields = Vec::with_capacity(3);

    if settings.file == Some(true) {
        let base = Path::new(site.file)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| site.file.to_string());
        fields.push(base);
    }

    if settings.line == Some(true) {
        fields.push(format!("L{}", site.line));
    }

    if settings.func == Some(true) {
        if let Some(function) = site.function {
            fields.push(short_function_name(function).to_string());
        }
    }

    fields.join(":")
}

/// `a::b::run::{{closure}}::{{closure}}` -> `run`
fn short_function_name(path: &str) -> &str {
    let mut path = path;
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit("::").next().unwrap_or(path)
}
