use super::{Graph, LabelMap};
use crate::{
    error::{Error, Result},
    types::{VId, VLabel},
};
use log::info;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::{FromStr, SplitWhitespace},
};

/// The records of a graph file.
///
/// The file format is:
///
/// ```text
/// t <num_vertices> <num_edges>
/// v <vid> <vlabel> [<degree>]
/// e <vid> <vid> [<elabel>]
/// ```
///
/// Blank lines and lines starting with `#` are skipped. Edge labels are ignored.
#[derive(Debug, Default, PartialEq)]
pub struct GraphRecords {
    pub vertices: Vec<(VId, VLabel)>,
    pub degrees: Vec<(VId, usize)>,
    pub edges: Vec<(VId, VId)>,
}

impl GraphRecords {
    /// Loads the records into a graph, checking the degrees listed in the file.
    pub fn into_graph(self, label_map: LabelMap) -> Result<Graph> {
        let graph = Graph::with_label_map(label_map, self.vertices, self.edges)?;
        for (v, degree) in self.degrees {
            if graph.degree(v) != degree {
                return Err(Error::CountMismatch {
                    what: "neighbors",
                    expected: degree,
                    found: graph.degree(v),
                });
            }
        }
        Ok(graph)
    }
}

/// Parses the graph file format from `reader`.
pub fn parse_graph<R: BufRead>(reader: R) -> Result<GraphRecords> {
    let mut header: Option<(usize, usize)> = None;
    let mut records = GraphRecords::default();
    for (i, line) in reader.lines().enumerate() {
        let (line, lineno) = (line?, i + 1);
        let mut tokens = line.split_whitespace();
        let record = match tokens.next() {
            Some(record) if !record.starts_with('#') => record,
            _ => continue,
        };
        if record != "t" && header.is_none() {
            return Err(parse_error(lineno, "missing header"));
        }
        match record {
            "t" if header.is_some() => return Err(parse_error(lineno, "repeated header")),
            "t" => {
                header = Some((
                    field(&mut tokens, lineno, "number of vertices")?,
                    field(&mut tokens, lineno, "number of edges")?,
                ));
            }
            "v" => {
                let vid = field(&mut tokens, lineno, "vertex id")?;
                records
                    .vertices
                    .push((vid, field(&mut tokens, lineno, "vertex label")?));
                if tokens.clone().next().is_some() {
                    records
                        .degrees
                        .push((vid, field(&mut tokens, lineno, "degree")?));
                }
            }
            "e" => {
                records.edges.push((
                    field(&mut tokens, lineno, "source vertex")?,
                    field(&mut tokens, lineno, "target vertex")?,
                ));
            }
            other => return Err(parse_error(lineno, &format!("unknown record `{}`", other))),
        }
    }
    let (num_vertices, num_edges) = header.ok_or_else(|| parse_error(1, "missing header"))?;
    check_count("vertices", num_vertices, records.vertices.len())?;
    check_count("edges", num_edges, records.edges.len())?;
    Ok(records)
}

/// Reads a data graph from the file at `path`.
pub fn read_graph<P: AsRef<Path>>(path: P) -> Result<Graph> {
    read_graph_with_label_map(path, LabelMap::new())
}

/// Reads a graph from the file at `path`, numbering its labels with `label_map`.
pub fn read_graph_with_label_map<P: AsRef<Path>>(path: P, label_map: LabelMap) -> Result<Graph> {
    let path = path.as_ref();
    info!("loading {}", path.display());
    let graph = parse_graph(BufReader::new(File::open(path)?))?.into_graph(label_map)?;
    info!(
        "loaded {} vertices, {} edges, {} labels",
        graph.num_vertices(),
        graph.num_edges(),
        graph.num_labels()
    );
    Ok(graph)
}

fn field<T: FromStr>(tokens: &mut SplitWhitespace, line: usize, name: &str) -> Result<T> {
    let token = tokens
        .next()
        .ok_or_else(|| parse_error(line, &format!("missing {}", name)))?;
    token
        .parse()
        .map_err(|_| parse_error(line, &format!("invalid {} `{}`", name, token)))
}

fn parse_error(line: usize, message: &str) -> Error {
    Error::Parse {
        line,
        message: String::from(message),
    }
}

fn check_count(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::CountMismatch {
            what,
            expected,
            found,
        })
    }
}
