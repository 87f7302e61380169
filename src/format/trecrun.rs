use std;
use std::collections::HashMap;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;
use std::slice;
use std::str::FromStr;
use util::{at_line, DocId, Qid, Result};

// Format of the TREC run file.
// <line> .=. <qid> <iteration> <docid> <rank> <score> <tag>
// <rank> .=. <integer>
// <score> .=. <float>

/// Log a progress message after this many lines.
const PROGRESS_LINES: usize = 100_000;

/// One retrieved document of a ranked list.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    rank: i64,
    docid: DocId,
    score: f64,
}

impl Entry {
    pub fn new(rank: i64, docid: &str, score: f64) -> Entry {
        Entry {
            rank: rank,
            docid: docid.to_string(),
            score: score,
        }
    }

    pub fn rank(&self) -> i64 {
        self.rank
    }

    pub fn docid(&self) -> &str {
        &self.docid
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

/// A parsed line of a run file.
#[derive(Debug, PartialEq)]
pub struct RunLine {
    qid: Qid,
    entry: Entry,
}

impl FromStr for RunLine {
    type Err = Box<dyn std::error::Error>;

    fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 6 {
            Err(format!(
                "Expected 6 fields in run line, found {}",
                fields.len()
            ))?;
        }

        let rank = fields[3]
            .parse::<i64>()
            .map_err(|e| format!("Invalid rank {}: {}", fields[3], e))?;
        let score = fields[4]
            .parse::<f64>()
            .map_err(|e| format!("Invalid score {}: {}", fields[4], e))?;

        Ok(RunLine {
            qid: fields[0].to_string(),
            entry: Entry::new(rank, fields[2], score),
        })
    }
}

/// Retrieved documents of one query, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedList {
    qid: Qid,
    entries: Vec<Entry>,
}

impl RankedList {
    pub fn new(qid: &str) -> RankedList {
        RankedList {
            qid: qid.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn qid(&self) -> &str {
        &self.qid
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> slice::Iter<Entry> {
        self.entries.iter()
    }

    /// Document ids in ranking order.
    pub fn docids<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().map(|entry| entry.docid())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All ranked lists of a run, ordered by first appearance of the query.
#[derive(Debug, Default)]
pub struct Run {
    lists: Vec<RankedList>,
    index: HashMap<Qid, usize>,
}

impl Run {
    pub fn new() -> Run {
        Run::default()
    }

    pub fn insert(&mut self, line: RunLine) {
        let lists = &mut self.lists;
        let position = *self.index.entry(line.qid).or_insert_with_key(|qid| {
            lists.push(RankedList::new(qid));
            lists.len() - 1
        });
        lists[position].push(line.entry);
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Run> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| format!("Failed to open {}: {}", name, e))?;
        Run::load(file, &name)
    }

    /// Read a run from `reader`. `name` is only used in messages.
    pub fn load<R: Read>(reader: R, name: &str) -> Result<Run> {
        let mut run = Run::new();
        for (line_index, line) in BufReader::new(reader).lines().enumerate() {
            let line = at_line(line.map_err(|e| e.into()), name, line_index)?;
            if line.trim().is_empty() {
                continue;
            }

            let line = at_line(RunLine::from_str(&line), name, line_index)?;
            run.insert(line);

            if (line_index + 1) % PROGRESS_LINES == 0 {
                info!("Processed {} lines of {}", line_index + 1, name);
            }
        }

        info!("Loaded {} queries from {}", run.len(), name);
        Ok(run)
    }

    pub fn get(&self, qid: &str) -> Option<&RankedList> {
        self.index.get(qid).map(|&position| &self.lists[position])
    }

    pub fn lists(&self) -> slice::Iter<RankedList> {
        self.lists.iter()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
