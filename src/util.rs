use std::error::Error;

pub type Result<T> = ::std::result::Result<T, Box<dyn Error>>;

/// Type for query id.
pub type Qid = String;

/// Type for document id.
pub type DocId = String;

/// Type for graded relevance.
pub type Grade = i32;

/// Prefix an error with the file and line it came from.
pub fn at_line<T>(
    result: Result<T>,
    file: &str,
    line_index: usize,
) -> Result<T> {
    result.map_err(|e| format!("{}:{}: {}", file, line_index + 1, e).into())
}
