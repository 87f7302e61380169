use std::fmt::Display;
use std::io::Write;

use eval::Evaluation;
use util::Result;

// Format of the evaluation file, one metric per line.
// <line> .=. <metric> <qid> <value>
// <metric> is padded to 9 columns and <qid> to 8. Counts are written as
// integers, everything else with 4 decimals. Query blocks come in run
// order and are followed by the "all" block.

const AGGREGATE_QID: &'static str = "all";

fn write_line<W: Write, V: Display>(
    output: &mut W,
    metric: &str,
    qid: &str,
    value: V,
) -> Result<()> {
    writeln!(output, "{:<9}{:<8} {}", metric, qid, value)?;
    Ok(())
}

fn fixed(value: f64) -> String {
    format!("{:.4}", value)
}

pub fn write_report<W: Write>(
    mut output: W,
    evaluation: &Evaluation,
) -> Result<()> {
    let k = evaluation.rank_cutoff;
    let ndcg = evaluation.ndcg_name.as_str();
    let precision = format!("P@{}", k);
    let recall = format!("R@{}", k);
    let f1 = format!("F1@{}", k);

    for stats in &evaluation.queries {
        let qid = stats.qid.as_str();
        write_line(&mut output, ndcg, qid, fixed(stats.ndcg))?;
        write_line(&mut output, "numRel", qid, stats.num_relevant)?;
        write_line(&mut output, "relFound", qid, stats.num_relevant_found)?;
        write_line(&mut output, "RR", qid, fixed(stats.reciprocal_rank))?;
        write_line(&mut output, &precision, qid, fixed(stats.precision))?;
        write_line(&mut output, &recall, qid, fixed(stats.recall))?;
        write_line(&mut output, &f1, qid, fixed(stats.f1))?;
        write_line(&mut output, "AP", qid, fixed(stats.average_precision))?;
    }

    let all = &evaluation.all;
    let qid = AGGREGATE_QID;
    write_line(&mut output, ndcg, qid, fixed(all.ndcg))?;
    write_line(&mut output, "numRel", qid, all.num_relevant)?;
    write_line(&mut output, "relFound", qid, all.num_relevant_found)?;
    write_line(&mut output, "MRR", qid, fixed(all.mean_reciprocal_rank))?;
    write_line(&mut output, &precision, qid, fixed(all.precision))?;
    write_line(&mut output, &recall, qid, fixed(all.recall))?;
    write_line(&mut output, &f1, qid, fixed(all.f1))?;
    write_line(&mut output, "MAP", qid, fixed(all.mean_average_precision))?;

    output.flush()?;
    Ok(())
}
