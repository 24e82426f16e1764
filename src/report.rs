//! Console reporting of evaluations and k sweeps.
//!
//! Text output follows the verbosity ladder:
//! - 0: bare MSE
//! - 1: MSE with its k
//! - 2: plus every sweep candidate
//! - 3: plus every test row
//!
//! JSON output carries the same information as one document; per-row
//! diagnostics are only included at verbosity 3.

use knnreg_core::{Evaluation, KSearch, RowDiagnostic};
use serde::Serialize;
use std::io::{self, Write};

pub const VERBOSITY_QUIET: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_CANDIDATES: u8 = 2;
pub const VERBOSITY_ROWS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum JsonReport<'a> {
    Fixed {
        k: usize,
        mse: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        rows: Option<&'a [RowDiagnostic]>,
    },
    Sweep {
        best_k: usize,
        best_mse: f32,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        candidates: Vec<JsonCandidate<'a>>,
    },
}

#[derive(Serialize)]
struct JsonCandidate<'a> {
    k: usize,
    mse: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<&'a [RowDiagnostic]>,
}

pub struct Reporter<W: Write> {
    out: W,
    verbosity: u8,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, verbosity: u8, format: OutputFormat) -> Self {
        Self { out, verbosity, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Report a single fixed-k evaluation
    pub fn evaluation(&mut self, eval: &Evaluation) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let report = JsonReport::Fixed {
                    k: eval.k,
                    mse: eval.mse,
                    rows: self.rows_for_json(eval),
                };
                self.write_json(&report)
            }
            OutputFormat::Text => {
                self.rows(eval)?;
                if self.verbosity >= VERBOSITY_SUMMARY {
                    writeln!(self.out, "MSE: {} (k={})", eval.mse, eval.k)
                } else {
                    writeln!(self.out, "{}", eval.mse)
                }
            }
        }
    }

    /// Report a k sweep: candidates first, then the winner
    pub fn search(&mut self, search: &KSearch) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let candidates = if self.verbosity >= VERBOSITY_CANDIDATES {
                    search
                        .candidates
                        .iter()
                        .map(|c| JsonCandidate {
                            k: c.k,
                            mse: c.mse,
                            rows: self.rows_for_json(c),
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                let report = JsonReport::Sweep {
                    best_k: search.best_k,
                    best_mse: search.best_mse,
                    candidates,
                };
                self.write_json(&report)
            }
            OutputFormat::Text => {
                for candidate in &search.candidates {
                    self.rows(candidate)?;
                    if self.verbosity >= VERBOSITY_CANDIDATES {
                        writeln!(
                            self.out,
                            "Mean Squared Error: {} (k={})",
                            candidate.mse, candidate.k
                        )?;
                    }
                }
                if self.verbosity >= VERBOSITY_SUMMARY {
                    writeln!(self.out, "Best MSE: {} (k={})", search.best_mse, search.best_k)
                } else {
                    writeln!(self.out, "{}", search.best_mse)
                }
            }
        }
    }

    fn rows(&mut self, eval: &Evaluation) -> io::Result<()> {
        if self.verbosity < VERBOSITY_ROWS {
            return Ok(());
        }
        for r in &eval.rows {
            writeln!(
                self.out,
                "Row {}: {} -- error: {} (Truth data: {})",
                r.row, r.prediction, r.error, r.truth
            )?;
        }
        Ok(())
    }

    fn rows_for_json<'a>(&self, eval: &'a Evaluation) -> Option<&'a [RowDiagnostic]> {
        (self.verbosity >= VERBOSITY_ROWS).then_some(eval.rows.as_slice())
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(k: usize, mse: f32) -> Evaluation {
        Evaluation {
            k,
            mse,
            rows: vec![
                RowDiagnostic { row: 0, prediction: 1.5, error: 0.5, truth: 1.0 },
                RowDiagnostic { row: 1, prediction: 2.0, error: -1.0, truth: 3.0 },
            ],
        }
    }

    fn sweep() -> KSearch {
        KSearch {
            best_k: 3,
            best_mse: 0.25,
            candidates: vec![eval(2, 0.5), eval(3, 0.25)],
        }
    }

    fn render(verbosity: u8, format: OutputFormat, f: impl FnOnce(&mut Reporter<Vec<u8>>)) -> String {
        let mut reporter = Reporter::new(Vec::new(), verbosity, format);
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_quiet_prints_bare_mse() {
        let out = render(0, OutputFormat::Text, |r| r.evaluation(&eval(3, 0.625)).unwrap());
        assert_eq!(out, "0.625\n");

        let out = render(0, OutputFormat::Text, |r| r.search(&sweep()).unwrap());
        assert_eq!(out, "0.25\n");
    }

    #[test]
    fn test_summary_line() {
        let out = render(1, OutputFormat::Text, |r| r.evaluation(&eval(3, 0.625)).unwrap());
        assert_eq!(out, "MSE: 0.625 (k=3)\n");

        let out = render(1, OutputFormat::Text, |r| r.search(&sweep()).unwrap());
        assert_eq!(out, "Best MSE: 0.25 (k=3)\n");
    }

    #[test]
    fn test_candidates_listed_at_level_two() {
        let out = render(2, OutputFormat::Text, |r| r.search(&sweep()).unwrap());
        assert_eq!(
            out,
            "Mean Squared Error: 0.5 (k=2)\nMean Squared Error: 0.25 (k=3)\nBest MSE: 0.25 (k=3)\n"
        );
    }

    #[test]
    fn test_rows_listed_at_level_three() {
        let out = render(3, OutputFormat::Text, |r| r.evaluation(&eval(3, 0.625)).unwrap());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Row 0: 1.5 -- error: 0.5 (Truth data: 1)");
        assert_eq!(lines[1], "Row 1: 2 -- error: -1 (Truth data: 3)");
        assert_eq!(lines[2], "MSE: 0.625 (k=3)");
    }

    #[test]
    fn test_json_fixed() {
        let out = render(1, OutputFormat::Json, |r| r.evaluation(&eval(3, 0.625)).unwrap());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["mode"], "fixed");
        assert_eq!(value["k"], 3);
        assert_eq!(value["mse"], 0.625);
        assert!(value.get("rows").is_none());

        let out = render(3, OutputFormat::Json, |r| r.evaluation(&eval(3, 0.625)).unwrap());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_sweep() {
        let out = render(2, OutputFormat::Json, |r| r.search(&sweep()).unwrap());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["mode"], "sweep");
        assert_eq!(value["best_k"], 3);
        assert_eq!(value["candidates"].as_array().unwrap().len(), 2);
        assert!(value["candidates"][0].get("rows").is_none());
    }
}
