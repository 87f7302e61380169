use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;

use config::Config;
use format::qrels::RelevanceTable;
use format::report;
use format::trecrun::{RankedList, Run};
use metric::{GAIN_CUTOFF, RANK_CUTOFF};
use metric::{MetricScorer, NDCGScorer, RankScorer, RelevantSet};
use util::{Qid, Result};

/// Metrics of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct PerQueryStats {
    pub qid: Qid,
    pub ndcg: f64,
    pub num_relevant: usize,
    pub num_relevant_found: usize,
    pub reciprocal_rank: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub average_precision: f64,
}

/// Metrics over all queries. Counts are summed, the rest averaged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusStats {
    pub num_queries: usize,
    pub ndcg: f64,
    pub num_relevant: usize,
    pub num_relevant_found: usize,
    pub mean_reciprocal_rank: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub mean_average_precision: f64,
}

impl CorpusStats {
    /// Aggregate per-query stats. No queries gives all zeros.
    pub fn aggregate<'a, I>(stats: I) -> CorpusStats
    where
        I: IntoIterator<Item = &'a PerQueryStats>,
    {
        let mut sums = CorpusStats::default();
        for stat in stats {
            sums.num_queries += 1;
            sums.ndcg += stat.ndcg;
            sums.num_relevant += stat.num_relevant;
            sums.num_relevant_found += stat.num_relevant_found;
            sums.mean_reciprocal_rank += stat.reciprocal_rank;
            sums.precision += stat.precision;
            sums.recall += stat.recall;
            sums.f1 += stat.f1;
            sums.mean_average_precision += stat.average_precision;
        }

        if sums.num_queries == 0 {
            warn!("No queries to aggregate");
            return sums;
        }

        let n = sums.num_queries as f64;
        CorpusStats {
            ndcg: sums.ndcg / n,
            mean_reciprocal_rank: sums.mean_reciprocal_rank / n,
            precision: sums.precision / n,
            recall: sums.recall / n,
            f1: sums.f1 / n,
            mean_average_precision: sums.mean_average_precision / n,
            ..sums
        }
    }
}

/// Per-query stats in run order together with their aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub queries: Vec<PerQueryStats>,
    pub all: CorpusStats,
    /// Name of the gain metric, e.g. NDCG@20.
    pub ndcg_name: String,
    /// Cutoff of the rank metrics.
    pub rank_cutoff: usize,
}

pub struct MetricsEngine<'a> {
    qrels: &'a RelevanceTable,
    rank: RankScorer,
    ndcg: NDCGScorer,
}

impl<'a> MetricsEngine<'a> {
    pub fn new(qrels: &'a RelevanceTable) -> MetricsEngine<'a> {
        MetricsEngine::with_cutoffs(qrels, RANK_CUTOFF, GAIN_CUTOFF)
    }

    fn with_cutoffs(
        qrels: &'a RelevanceTable,
        rank_cutoff: usize,
        gain_cutoff: usize,
    ) -> MetricsEngine<'a> {
        MetricsEngine {
            qrels: qrels,
            rank: RankScorer::new(rank_cutoff),
            ndcg: NDCGScorer::new(gain_cutoff),
        }
    }

    pub fn evaluate_query(&self, list: &RankedList) -> PerQueryStats {
        let qid = list.qid();
        if self.qrels.judgments(qid).is_none() {
            warn!("No judgments for query {}", qid);
        }
        if list.is_empty() {
            warn!("No retrieved documents for query {}", qid);
        }

        let relevant = RelevantSet::new(qid, self.qrels);
        let rank = self.rank.score(list.docids(), &relevant);
        let ndcg = self.gain(list, &relevant);
        debug!(
            "Query {}: {} documents, {} = {}",
            qid,
            list.len(),
            self.ndcg.name(),
            ndcg
        );

        PerQueryStats {
            qid: qid.to_string(),
            ndcg: ndcg,
            num_relevant: relevant.len(),
            num_relevant_found: rank.found,
            reciprocal_rank: rank.reciprocal_rank,
            precision: rank.precision,
            recall: rank.recall,
            f1: rank.f1,
            average_precision: rank.average_precision,
        }
    }

    fn gain(&self, list: &RankedList, relevant: &RelevantSet) -> f64 {
        let mut seen = HashSet::new();
        let labels: Vec<f64> = list.docids()
            .take(self.ndcg.get_k())
            .map(|docid| if relevant.contains(docid) && seen.insert(docid) {
                self.qrels.grade(list.qid(), docid) as f64
            } else {
                0.0
            })
            .collect();
        let judged: Vec<f64> =
            relevant.grades().iter().map(|&grade| grade as f64).collect();

        self.ndcg.score_against(&labels, &judged)
    }

    pub fn evaluate(&self, run: &Run) -> Evaluation {
        let queries: Vec<PerQueryStats> =
            run.lists().map(|list| self.evaluate_query(list)).collect();
        info!("Evaluated {} queries", queries.len());

        let all = CorpusStats::aggregate(&queries);
        Evaluation {
            queries: queries,
            all: all,
            ndcg_name: self.ndcg.name(),
            rank_cutoff: self.rank.get_k(),
        }
    }
}

/// Evaluate the run file against the judgments and write the report.
pub fn execute(config: &Config) -> Result<Evaluation> {
    let qrels = RelevanceTable::open(&config.qrels_file)?;
    let run = Run::open(&config.run_file)?;
    if run.is_empty() {
        warn!("No queries in {}", config.run_file.display());
    }

    let evaluation = MetricsEngine::new(&qrels).evaluate(&run);

    let output = File::create(&config.output_file).map_err(|e| {
        format!("Failed to create {}: {}", config.output_file.display(), e)
    })?;
    report::write_report(BufWriter::new(output), &evaluation)?;
    info!("Wrote evaluation to {}", config.output_file.display());

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.0001
    }

    fn qrels() -> RelevanceTable {
        let data = "q1 0 d1 2\n\
                    q1 0 d2 0\n\
                    q1 0 d3 1\n\
                    q2 0 a 3\n\
                    q3 0 z 0\n";
        RelevanceTable::load(data.as_bytes(), "qrels").unwrap()
    }

    fn run() -> Run {
        let data = "q1 Q0 d2 1 9.0 t\n\
                    q1 Q0 d1 2 8.0 t\n\
                    q1 Q0 d3 3 7.0 t\n\
                    q2 Q0 a 1 5.0 t\n\
                    q3 Q0 z 1 1.0 t\n";
        Run::load(data.as_bytes(), "run").unwrap()
    }

    #[test]
    fn test_evaluate_query_example() {
        let qrels = qrels();
        let run = run();
        let engine = MetricsEngine::new(&qrels);
        let stats = engine.evaluate_query(run.get("q1").unwrap());

        assert_eq!(stats.qid, "q1");
        assert_eq!(stats.num_relevant, 2);
        assert_eq!(stats.num_relevant_found, 2);
        assert!(approx(stats.ndcg, 0.8770));
        assert!(approx(stats.reciprocal_rank, 0.5));
        assert!(approx(stats.precision, 0.2));
        assert!(approx(stats.recall, 1.0));
        assert!(approx(stats.f1, 0.3333));
        assert!(approx(stats.average_precision, 0.5833));
    }

    #[test]
    fn test_evaluate_query_no_relevant() {
        let qrels = qrels();
        let run = run();
        let engine = MetricsEngine::new(&qrels);
        let stats = engine.evaluate_query(run.get("q3").unwrap());

        assert_eq!(stats.num_relevant, 0);
        assert_eq!(stats.ndcg, 0.0);
        assert_eq!(stats.recall, 0.0);
        assert_eq!(stats.average_precision, 0.0);
        assert_eq!(stats.reciprocal_rank, 0.0);
    }

    #[test]
    fn test_evaluate_query_unjudged() {
        let qrels = qrels();
        let run = Run::load("q9 Q0 d1 1 1.0 t\n".as_bytes(), "run").unwrap();
        let engine = MetricsEngine::new(&qrels);
        let stats = engine.evaluate_query(run.get("q9").unwrap());

        assert_eq!(stats.num_relevant, 0);
        assert_eq!(stats.ndcg, 0.0);
    }

    #[test]
    fn test_evaluate_query_repeated_document() {
        let qrels = qrels();
        let run = Run::load("q2 Q0 a 1 2.0 t\nq2 Q0 a 2 1.0 t\n".as_bytes(), "run")
            .unwrap();
        let engine = MetricsEngine::new(&qrels);
        let stats = engine.evaluate_query(run.get("q2").unwrap());

        assert_eq!(stats.ndcg, 1.0);
        assert_eq!(stats.num_relevant_found, 1);
    }

    #[test]
    fn test_evaluate_aggregate() {
        let qrels = qrels();
        let run = run();
        let evaluation = MetricsEngine::new(&qrels).evaluate(&run);
        let queries = &evaluation.queries;

        let qids: Vec<&str> = queries.iter().map(|s| s.qid.as_str()).collect();
        assert_eq!(qids, vec!["q1", "q2", "q3"]);

        let all = &evaluation.all;
        let mean = |f: fn(&PerQueryStats) -> f64| {
            queries.iter().map(f).sum::<f64>() / queries.len() as f64
        };
        assert_eq!(all.num_queries, 3);
        assert_eq!(all.num_relevant, 3);
        assert_eq!(all.num_relevant_found, 3);
        assert_eq!(all.ndcg, mean(|s| s.ndcg));
        assert_eq!(all.mean_reciprocal_rank, mean(|s| s.reciprocal_rank));
        assert_eq!(all.precision, mean(|s| s.precision));
        assert_eq!(all.recall, mean(|s| s.recall));
        assert_eq!(all.f1, mean(|s| s.f1));
        assert_eq!(all.mean_average_precision, mean(|s| s.average_precision));
        assert!(approx(all.mean_reciprocal_rank, 0.5));
        assert_eq!(evaluation.ndcg_name, "NDCG@20");
        assert_eq!(evaluation.rank_cutoff, 10);
    }

    #[test]
    fn test_evaluate_query_zero_cutoffs() {
        let qrels = qrels();
        let run = run();
        let engine = MetricsEngine::with_cutoffs(&qrels, 0, 0);
        let stats = engine.evaluate_query(run.get("q1").unwrap());

        assert_eq!(stats.precision, 0.0);
        assert_eq!(stats.f1, 0.0);
        assert_eq!(stats.ndcg, 0.0);
        assert!(!stats.precision.is_nan());
        assert_eq!(stats.num_relevant_found, 2);
    }

    #[test]
    fn test_evaluate_query_empty_list() {
        let qrels = qrels();
        let list = RankedList::new("q1");
        let stats = MetricsEngine::new(&qrels).evaluate_query(&list);

        assert_eq!(stats.num_relevant, 2);
        assert_eq!(stats.num_relevant_found, 0);
        assert_eq!(format!("{:.4}", stats.ndcg), "0.0000");
        assert_eq!(format!("{:.4}", stats.average_precision), "0.0000");
    }

    #[test]
    fn test_aggregate_empty() {
        let all = CorpusStats::aggregate(&Vec::<PerQueryStats>::new());
        assert_eq!(all, CorpusStats::default());
    }

    fn write(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_execute_is_deterministic() {
        let dir = tempdir().unwrap();
        let qrels = write(dir.path(), "test.qrels", "q1 0 d1 2\nq1 0 d3 1\nq2 0 a 1\n");
        let run = write(
            dir.path(),
            "test.trecrun",
            "q2 Q0 b 1 2.0 t\nq2 Q0 a 2 1.0 t\nq1 Q0 d1 1 2.0 t\n",
        );

        let first = dir.path().join("first.eval");
        let second = dir.path().join("second.eval");
        for output in &[&first, &second] {
            let config = Config::from_args(
                Some(run.clone()),
                Some(qrels.clone()),
                Some(output.to_str().unwrap().to_string()),
            );
            execute(&config).unwrap();
        }

        let first = fs::read(first).unwrap();
        let second = fs::read(second).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);

        let text = String::from_utf8(first).unwrap();
        assert!(text.starts_with("NDCG@20  q2       "));
        assert!(text.contains("MAP      all      "));
    }

    #[test]
    fn test_execute_report() {
        let dir = tempdir().unwrap();
        let qrels = write(
            dir.path(),
            "test.qrels",
            "q1 0 d1 2\nq1 0 d2 0\nq1 0 d3 1\nq2 0 r 3\nq3 0 x 0\n",
        );
        // q2 has its only relevant document at rank 11.
        let mut lines = String::from(
            "q1 Q0 d2 1 9.0 t\nq1 Q0 d1 2 8.0 t\nq1 Q0 d3 3 7.0 t\n",
        );
        for i in 1..11 {
            lines.push_str(&format!("q2 Q0 n{} {} {}.0 t\n", i, i, 20 - i));
        }
        lines.push_str("q2 Q0 r 11 1.0 t\nq3 Q0 x 1 1.0 t\n");
        let run = write(dir.path(), "test.trecrun", &lines);
        let output = dir.path().join("test.eval");

        let config = Config::from_args(
            Some(run),
            Some(qrels),
            Some(output.to_str().unwrap().to_string()),
        );
        execute(&config).unwrap();

        let expected = "\
NDCG@20  q1       0.8770
numRel   q1       2
relFound q1       2
RR       q1       0.5000
P@10     q1       0.2000
R@10     q1       1.0000
F1@10    q1       0.3333
AP       q1       0.5833
NDCG@20  q2       0.2891
numRel   q2       1
relFound q2       1
RR       q2       0.0909
P@10     q2       0.0000
R@10     q2       0.0000
F1@10    q2       0.0000
AP       q2       0.0000
NDCG@20  q3       0.0000
numRel   q3       0
relFound q3       0
RR       q3       0.0000
P@10     q3       0.0000
R@10     q3       0.0000
F1@10    q3       0.0000
AP       q3       0.0000
NDCG@20  all      0.3887
numRel   all      3
relFound all      3
MRR      all      0.1970
P@10     all      0.0667
R@10     all      0.3333
F1@10    all      0.1111
MAP      all      0.1944
";
        assert_eq!(fs::read_to_string(output).unwrap(), expected);
    }

    #[test]
    fn test_execute_empty_run() {
        let dir = tempdir().unwrap();
        let qrels = write(dir.path(), "test.qrels", "q1 0 d1 1\n");
        let run = write(dir.path(), "test.trecrun", "\n");
        let output = dir.path().join("test.eval");

        let config = Config::from_args(
            Some(run),
            Some(qrels),
            Some(output.to_str().unwrap().to_string()),
        );
        let evaluation = execute(&config).unwrap();
        assert!(evaluation.queries.is_empty());

        let text = fs::read_to_string(output).unwrap();
        assert_eq!(text.lines().count(), 8);
        assert!(text.ends_with("MAP      all      0.0000\n"));
    }

    #[test]
    fn test_execute_missing_file() {
        let dir = tempdir().unwrap();
        let config = Config::from_args(
            Some(dir.path().join("missing.trecrun").to_str().unwrap().to_string()),
            Some(dir.path().join("missing.qrels").to_str().unwrap().to_string()),
            Some(dir.path().join("out.eval").to_str().unwrap().to_string()),
        );
        assert!(execute(&config).is_err());
    }
}
