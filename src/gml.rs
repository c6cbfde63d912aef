//! Reading graphs in the GML format.
//!
//! Only the part of the format used by graph datasets is supported:
//! a top-level `graph [ ... ]` list containing `node [ id ... label ... ]`
//! and `edge [ source ... target ... ]` entries. Other keys are ignored.

use crate::graph::{Graph, GraphError, NodeId};
use flate2::read::GzDecoder;
use log::*;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GmlError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },
    #[error("no top-level graph list")]
    NoGraph,
    #[error("{0} without integer `{1}` attribute")]
    MissingAttribute(&'static str, &'static str),
    #[error("node id {0} is declared twice")]
    DuplicateId(i64),
    #[error("edge refers to undeclared node id {0}")]
    UnknownNode(i64),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A value in a GML file.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<(String, Value)>),
}

impl Value {
    fn int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

fn get<'a>(list: &'a [(String, Value)], key: &str) -> Option<&'a Value> {
    list.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Value(Value),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, msg: impl Into<String>) -> GmlError {
        GmlError::Syntax {
            line: self.line,
            msg: msg.into(),
        }
    }

    fn skip_blank(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                self.line += 1;
                let _ = self.chars.next();
            } else if c.is_whitespace() {
                let _ = self.chars.next();
            } else if c == '#' {
                // Comment until the end of the line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    let _ = self.chars.next();
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<(usize, Token)>, GmlError> {
        self.skip_blank();
        let line = self.line;
        let c = match self.chars.peek() {
            None => return Ok(None),
            Some(&c) => c,
        };
        let token = if c == '[' {
            let _ = self.chars.next();
            Token::Open
        } else if c == ']' {
            let _ = self.chars.next();
            Token::Close
        } else if c == '"' {
            let _ = self.chars.next();
            let mut s = String::new();
            loop {
                match self.chars.next() {
                    None => return Err(self.error("unterminated string")),
                    Some('"') => break,
                    Some(c) => {
                        if c == '\n' {
                            self.line += 1
                        }
                        s.push(c)
                    }
                }
            }
            Token::Value(Value::Str(s))
        } else if c.is_ascii_alphabetic() || c == '_' {
            let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
            Token::Key(word)
        } else if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' {
            let word = self.take_while(|c| {
                c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
            });
            Token::Value(parse_number(&word).ok_or_else(|| self.error(format!("invalid number `{word}`")))?)
        } else {
            return Err(self.error(format!("unexpected character `{c}`")));
        };
        Ok(Some((line, token)))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            s.push(c);
            let _ = self.chars.next();
        }
        s
    }
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse() {
        Some(Value::Int(i))
    } else {
        s.parse().ok().map(Value::Float)
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl Parser<'_> {
    // Parse key-value pairs until `]` (when `nested`) or the end of input.
    fn list(&mut self, nested: bool) -> Result<Vec<(String, Value)>, GmlError> {
        let mut res = Vec::new();
        loop {
            let key = match self.lexer.next_token()? {
                None if nested => return Err(self.lexer.error("missing `]`")),
                None => return Ok(res),
                Some((_, Token::Close)) if nested => return Ok(res),
                Some((line, Token::Close)) => {
                    return Err(GmlError::Syntax {
                        line,
                        msg: "unbalanced `]`".into(),
                    });
                }
                Some((_, Token::Key(k))) => k,
                Some((line, tok)) => {
                    return Err(GmlError::Syntax {
                        line,
                        msg: format!("expected a key, found {tok:?}"),
                    });
                }
            };
            let value = match self.lexer.next_token()? {
                Some((_, Token::Value(v))) => v,
                Some((_, Token::Open)) => Value::List(self.list(true)?),
                Some((line, tok)) => {
                    return Err(GmlError::Syntax {
                        line,
                        msg: format!("expected a value for `{key}`, found {tok:?}"),
                    });
                }
                None => return Err(self.lexer.error(format!("missing value for `{key}`"))),
            };
            res.push((key, value))
        }
    }
}

/// Parse a GML document into its list of top-level key-value pairs.
pub fn parse(s: &str) -> Result<Vec<(String, Value)>, GmlError> {
    Parser {
        lexer: Lexer::new(s),
    }
    .list(false)
}

/// Build a graph from a parsed GML document.
///
/// Node identifiers are the `label` attributes when present,
/// and the `id` attributes otherwise.
pub fn to_graph(document: &[(String, Value)]) -> Result<Graph, GmlError> {
    let items = match get(document, "graph") {
        Some(Value::List(items)) => items,
        _ => return Err(GmlError::NoGraph),
    };
    if get(items, "directed").and_then(Value::int) == Some(1) {
        warn!("Directed graph read as undirected");
    }
    let mut ids = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut edges = Vec::new();
    for (key, value) in items {
        let Value::List(attrs) = value else { continue };
        match key.as_str() {
            "node" => {
                let id = get(attrs, "id")
                    .and_then(Value::int)
                    .ok_or(GmlError::MissingAttribute("node", "id"))?;
                if index.insert(id, ids.len()).is_some() {
                    return Err(GmlError::DuplicateId(id));
                }
                let node_id = match get(attrs, "label") {
                    Some(Value::Str(s)) => NodeId(s.clone()),
                    Some(Value::Int(i)) => NodeId(i.to_string()),
                    _ => NodeId(id.to_string()),
                };
                ids.push(node_id)
            }
            "edge" => {
                let endpoint = |name: &'static str| {
                    get(attrs, name)
                        .and_then(Value::int)
                        .ok_or(GmlError::MissingAttribute("edge", name))
                };
                edges.push((endpoint("source")?, endpoint("target")?))
            }
            _ => (),
        }
    }
    let resolve = |id: i64| index.get(&id).copied().ok_or(GmlError::UnknownNode(id));
    let edges = edges
        .into_iter()
        .map(|(s, t)| Ok((resolve(s)?, resolve(t)?)))
        .collect::<Result<Vec<_>, GmlError>>()?;
    let graph = Graph::with_nodes(ids, &edges)?;
    if graph.edge_count() < edges.len() {
        debug!(
            "{} duplicated edges merged",
            edges.len() - graph.edge_count()
        );
    }
    Ok(graph)
}

impl FromStr for Graph {
    type Err = GmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        to_graph(&parse(s)?)
    }
}

/// Load a graph from a GML file. Files ending in `.gz` are decompressed.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Graph, GmlError> {
    let path = path.as_ref();
    debug!("Loading {}", path.display());
    let mut file = BufReader::new(File::open(path)?);
    let mut content = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        let _ = GzDecoder::new(file).read_to_string(&mut content)?;
    } else {
        let _ = file.read_to_string(&mut content)?;
    }
    let graph: Graph = content.parse()?;
    info!(
        "Loaded {}: {} nodes, {} edges",
        path.display(),
        graph.size(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Name of a dataset: its file name without the `.gml` and `.gz` extensions.
pub fn dataset_name(path: &Path) -> String {
    let mut name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    for ext in [".gz", ".gml"] {
        if let Some(stripped) = name.strip_suffix(ext) {
            name = stripped.to_owned()
        }
    }
    name
}
