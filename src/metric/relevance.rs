use std::collections::HashSet;

use format::qrels::RelevanceTable;
use util::Grade;

/// Documents judged relevant (grade > 0) for one query.
#[derive(Debug, Default)]
pub struct RelevantSet<'a> {
    docs: HashSet<&'a str>,
    grades: Vec<Grade>,
}

impl<'a> RelevantSet<'a> {
    /// Unjudged queries give an empty set.
    pub fn new(qid: &str, table: &'a RelevanceTable) -> RelevantSet<'a> {
        let mut set = RelevantSet::default();
        if let Some(judgments) = table.judgments(qid) {
            for (docid, &grade) in judgments.iter().filter(|&(_, &g)| g > 0) {
                set.docs.insert(docid.as_str());
                set.grades.push(grade);
            }
        }
        set
    }

    pub fn contains(&self, docid: &str) -> bool {
        self.docs.contains(docid)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Grades of the relevant documents, in no particular order.
    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }
}
