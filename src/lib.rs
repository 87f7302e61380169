#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
extern crate docopt;
extern crate itertools;
extern crate serde;
#[cfg(test)]
extern crate tempfile;

use docopt::Docopt;
use serde::de::DeserializeOwned;

use util::Result;

pub mod util;
pub mod config;
pub mod format;
pub mod metric;
pub mod eval;

pub fn version() -> String {
    format!("treceval {}", env!("CARGO_PKG_VERSION"))
}

/// Parse `argv` against the docopt `usage` and run `exec` with the
/// result. Help, version and usage errors exit the process.
pub fn call_entry_with_args<Flags, F>(
    exec: F,
    usage: &str,
    argv: &[String],
    options_first: bool,
) -> Result<()>
where
    Flags: DeserializeOwned,
    F: FnOnce(Flags) -> Result<()>,
{
    let flags: Flags = Docopt::new(usage)
        .and_then(|d| {
            d.options_first(options_first)
                .argv(argv.iter())
                .help(true)
                .version(Some(version()))
                .deserialize()
        })
        .unwrap_or_else(|e| e.exit());

    exec(flags)
}
