//! Benchmark datasets with known embedding counts.
//!
//! A dataset `name` under `root` is laid out as:
//!
//! ```text
//! <root>/<name>/data_graph/<name>.graph
//! <root>/<name>/query_graph/<query files>
//! <root>/<name>/<name>_ans.txt
//! ```
//!
//! Every line of the answer file reads `<query file> <time> <count>`.

use crate::error::{Error, Result};
use log::info;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    data_graph: PathBuf,
    query_dir: PathBuf,
    answer_file: PathBuf,
}

/// A query with its true number of embeddings.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub query: String,
    pub count: f64,
}

impl Dataset {
    pub fn new<P: AsRef<Path>>(root: P, name: &str) -> Self {
        let dir = root.as_ref().join(name);
        Self {
            name: String::from(name),
            data_graph: dir.join("data_graph").join(format!("{}.graph", name)),
            query_dir: dir.join("query_graph"),
            answer_file: dir.join(format!("{}_ans.txt", name)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_graph(&self) -> &Path {
        &self.data_graph
    }

    pub fn query_dir(&self) -> &Path {
        &self.query_dir
    }

    pub fn answer_file(&self) -> &Path {
        &self.answer_file
    }

    pub fn query_path(&self, query: &str) -> PathBuf {
        self.query_dir.join(query)
    }

    pub fn read_answers(&self) -> Result<Vec<Answer>> {
        let answers = parse_answers(BufReader::new(File::open(&self.answer_file)?))?;
        info!("{}: {} queries", self.name, answers.len());
        Ok(answers)
    }
}

/// Parses an answer file, skipping lines with fewer than three fields.
pub fn parse_answers<R: BufRead>(reader: R) -> Result<Vec<Answer>> {
    let mut answers = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<_> = line.split_whitespace().collect();
        if let [query, _time, count, ..] = tokens[..] {
            let count = count.parse().map_err(|_| Error::Parse {
                line: i + 1,
                message: format!("invalid count `{}`", count),
            })?;
            answers.push(Answer {
                query: String::from(query),
                count,
            });
        }
    }
    Ok(answers)
}

/// Returns `max(estimate / truth, truth / estimate)` with both sides raised to at least 1.
pub fn q_error(estimate: f64, truth: f64) -> f64 {
    let (estimate, truth) = (estimate.max(1.0), truth.max(1.0));
    (estimate / truth).max(truth / estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let dataset = Dataset::new("/data", "yeast");
        assert_eq!(
            dataset.data_graph(),
            Path::new("/data/yeast/data_graph/yeast.graph")
        );
        assert_eq!(dataset.answer_file(), Path::new("/data/yeast/yeast_ans.txt"));
        assert_eq!(
            dataset.query_path("q_4_1.graph"),
            Path::new("/data/yeast/query_graph/q_4_1.graph")
        );
    }

    #[test]
    fn test_parse_answers() {
        let answers = parse_answers("q1.graph 0.5 120\n\nq2.graph 1\nq3.graph 3.2 7\n".as_bytes())
            .unwrap();
        assert_eq!(
            answers,
            [
                Answer {
                    query: String::from("q1.graph"),
                    count: 120.0
                },
                Answer {
                    query: String::from("q3.graph"),
                    count: 7.0
                }
            ]
        );
        assert_eq!(
            parse_answers("q1.graph 0.5 many\n".as_bytes()).unwrap_err(),
            Error::Parse {
                line: 1,
                message: String::from("invalid count `many`")
            }
        );
    }

    #[test]
    fn test_read_answers() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("toy")).unwrap();
        std::fs::write(root.path().join("toy/toy_ans.txt"), "a.graph 1 2\n").unwrap();
        let answers = Dataset::new(root.path(), "toy").read_answers().unwrap();
        assert_eq!(answers.len(), 1);
        assert!(matches!(
            Dataset::new(root.path(), "none").read_answers(),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_q_error() {
        assert_eq!(q_error(10.0, 10.0), 1.0);
        assert_eq!(q_error(5.0, 20.0), 4.0);
        assert_eq!(q_error(20.0, 5.0), 4.0);
        assert_eq!(q_error(0.0, 8.0), 8.0);
        assert_eq!(q_error(0.0, 0.0), 1.0);
    }
}
