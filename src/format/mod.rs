pub mod qrels;
pub mod report;
pub mod trecrun;
