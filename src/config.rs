use std::path::PathBuf;

pub const DEFAULT_RUN_FILE: &'static str = "msmarcosmall-bm25.trecrun";
pub const DEFAULT_QRELS_FILE: &'static str = "msmarco.qrels";
pub const DEFAULT_OUTPUT_FILE: &'static str = "my-msmarcosmall-bm25.eval";

/// Input and output paths of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub run_file: PathBuf,
    pub qrels_file: PathBuf,
    pub output_file: PathBuf,
}

impl Default for Config {
    fn default() -> Config {
        Config::from_args(None, None, None)
    }
}

impl Config {
    /// Missing arguments fall back to the default file names.
    pub fn from_args(
        run_file: Option<String>,
        qrels_file: Option<String>,
        output_file: Option<String>,
    ) -> Config {
        Config {
            run_file: run_file.unwrap_or(DEFAULT_RUN_FILE.to_string()).into(),
            qrels_file: qrels_file
                .unwrap_or(DEFAULT_QRELS_FILE.to_string())
                .into(),
            output_file: output_file
                .unwrap_or(DEFAULT_OUTPUT_FILE.to_string())
                .into(),
        }
    }
}
