#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate env_logger;
extern crate treceval;

use std::env;

use treceval::config::Config;
use treceval::util::Result;

#[derive(Debug, Deserialize)]
pub struct Args {
    arg_run: Option<String>,
    arg_qrels: Option<String>,
    arg_output: Option<String>,
}

const USAGE: &'static str = "
Evaluate a TREC run against relevance judgments

Usage:
    treceval [<run> [<qrels> [<output>]]]
    treceval (-h | --help | --version)

Options:
    -h, --help              Display this message
    --version               Print version info and exit

Arguments:
    <run>       Run file, defaults to msmarcosmall-bm25.trecrun
    <qrels>     Judgment file, defaults to msmarco.qrels
    <output>    Output file, defaults to my-msmarcosmall-bm25.eval

Set RUST_LOG=info to see progress.
";

fn main() {
    env_logger::init();

    let argv = env::args().collect::<Vec<_>>();

    debug!("treceval command arguments: {:?}", argv);

    if let Err(e) = treceval::call_entry_with_args(execute, USAGE, &argv, false) {
        error!("Error occured {}", e);
        std::process::exit(1);
    }
}

pub fn execute(args: Args) -> Result<()> {
    debug!("treceval args: {:?}", args);
    let config = Config::from_args(args.arg_run, args.arg_qrels, args.arg_output);
    treceval::eval::execute(&config)?;
    Ok(())
}
