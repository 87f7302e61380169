use std;
use std::collections::HashMap;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use util::{at_line, DocId, Grade, Qid, Result};

// Format of the relevance judgment file.
// <line> .=. <qid> <iteration> <docid> <grade>
// <grade> .=. <integer>

/// Log a progress message after this many lines.
const PROGRESS_LINES: usize = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Judgment {
    qid: Qid,
    docid: DocId,
    grade: Grade,
}

impl Judgment {
    pub fn new(qid: &str, docid: &str, grade: Grade) -> Judgment {
        Judgment {
            qid: qid.to_string(),
            docid: docid.to_string(),
            grade: grade,
        }
    }

    pub fn qid(&self) -> &str {
        &self.qid
    }

    pub fn docid(&self) -> &str {
        &self.docid
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }
}

impl FromStr for Judgment {
    type Err = Box<dyn std::error::Error>;

    fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 4 {
            Err(format!(
                "Expected 4 fields in judgment, found {}",
                fields.len()
            ))?;
        }

        let grade = fields[3]
            .parse::<Grade>()
            .map_err(|e| format!("Invalid grade {}: {}", fields[3], e))?;

        Ok(Judgment::new(fields[0], fields[2], grade))
    }
}

/// Graded relevance judgments, query id -> document id -> grade.
#[derive(Debug, Default)]
pub struct RelevanceTable {
    queries: HashMap<Qid, HashMap<DocId, Grade>>,
}

impl RelevanceTable {
    pub fn new() -> RelevanceTable {
        RelevanceTable::default()
    }

    /// Insert a judgment. A later judgment on the same pair wins.
    pub fn insert(&mut self, judgment: Judgment) {
        self.queries
            .entry(judgment.qid)
            .or_insert_with(HashMap::new)
            .insert(judgment.docid, judgment.grade);
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<RelevanceTable> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| format!("Failed to open {}: {}", name, e))?;
        RelevanceTable::load(file, &name)
    }

    /// Read judgments from `reader`. `name` is only used in messages.
    pub fn load<R: Read>(reader: R, name: &str) -> Result<RelevanceTable> {
        let mut table = RelevanceTable::new();
        for (line_index, line) in BufReader::new(reader).lines().enumerate() {
            let line = at_line(line.map_err(|e| e.into()), name, line_index)?;
            if line.trim().is_empty() {
                continue;
            }

            let judgment = at_line(Judgment::from_str(&line), name, line_index)?;
            table.insert(judgment);

            if (line_index + 1) % PROGRESS_LINES == 0 {
                info!("Processed {} lines of {}", line_index + 1, name);
            }
        }

        info!(
            "Loaded {} queries ({} judgments) from {}",
            table.query_count(),
            table.judgment_count(),
            name
        );
        Ok(table)
    }

    /// All judgments of a query, if the query was judged at all.
    pub fn judgments(&self, qid: &str) -> Option<&HashMap<DocId, Grade>> {
        self.queries.get(qid)
    }

    /// Grade of a document for a query. Unjudged pairs are 0.
    pub fn grade(&self, qid: &str, docid: &str) -> Grade {
        self.judgments(qid)
            .and_then(|docs| docs.get(docid))
            .map_or(0, |grade| *grade)
    }

    pub fn query_count(&self) -> usize {
        self.queries.len()
    }

    pub fn judgment_count(&self) -> usize {
        self.queries.values().map(|docs| docs.len()).sum()
    }
}
