//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# sharedlog

sharedlog is a leveled logger for programs that hand different loggers to
different parts of themselves, and let all of them write to the same places.

# The problem

A program usually wants one logger per component: the HTTP layer tags its
lines `[http]`, the database layer `[db]`, and the noisy one gets turned down
to `WARN` at runtime. All of them still write to the same stdout, or the same
file.

That leaves two ways for things to go wrong:

* Changing one logger changes the others. If a child logger holds a live
  reference to its parent's configuration, turning the parent down turns
  everybody down.
* Loggers sharing a destination step on each other. Two threads writing one
  line each through two different loggers to one file can produce half of one
  line followed by half of the other.

# The model

A [`Logger`] owns its settings outright. [`Logger::child`] copies the current
settings and applies the child's options on top; after that there is no link
between the two. [`Logger::patch`] changes only the logger it is called on.

What loggers *do* share is a write guard per destination. Every [`Writer`] has an
identity, and a [`WriterRegistry`] hands out exactly one guard per identity, so
every logger writing to the same writer takes the same lock around each line.

```
use sharedlog::{Level, Logger, LoggerOption, MemoryWriter};
use std::sync::Arc;

colored::control::set_override(false);
let buffer = Arc::new(MemoryWriter::new());
let root = Logger::new([
    LoggerOption::Writers(vec![buffer.clone().into()]),
    LoggerOption::TimeFormat(String::new()),
]);
let http = root.child([LoggerOption::Component("http".to_string())]);
let db = root.child([LoggerOption::Component("db".to_string())]);

db.patch([LoggerOption::Level(Level::Warn)]);

http.info("listening");
db.info("connected");      // filtered: db is at WARN now
db.warn("slow query");
root.info("ready");

assert_eq!(
    buffer.lines(),
    vec!["INFO [http] listening", "WARN [db] slow query", "INFO ready"],
);
```

# Levels

[`Level::Error`] < [`Level::Warn`] < [`Level::Info`] < [`Level::Debug`]. A logger
at level `L` writes every message at `L` or below. The default is `INFO`.

# Line format

```text
2024-03-29T07:35:08Z INFO [component] message	file.rs:L12:function
```

The timestamp is UTC and uses a `chrono` strftime format ([`RFC3339`] by
default, empty to leave it out). The component is left out when empty, and the
caller suffix shows whichever of file, line and function are turned on. Level
names and the caller suffix are colored on a terminal; see
[`Level::colored_string`].

# Multithreading

Every method takes `&self`, so a logger is shared with `Arc<Logger>` or by
reference into scoped threads. Emitting and patching the same logger from
many threads at once is fine. Writes to one writer are serialized across every
logger that holds it; writes to different writers are not ordered with respect
to each other.

Logging never fails: write errors are dropped.
*/

mod level;
mod writer;
mod memory_writer;
mod registry;
mod caller;
mod options;
mod settings;
mod log_line;
mod logger;
mod interfaces;
mod macros;
pub mod env;

pub use level::{Level, ParseLevelError, parse_level};
pub use writer::{Sink, Writer};
pub use memory_writer::MemoryWriter;
pub use registry::{Guard, WriterRegistry};
pub use caller::{CallSite, CallerSettings};
pub use options::{KITCHEN, LoggerOption, RFC822, RFC1123, RFC3339};
pub use settings::Settings;
pub use logger::Logger;
pub use interfaces::{ChildConstructor, LeveledLogger, LoggerPatcher};
