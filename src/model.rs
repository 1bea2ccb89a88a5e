use std::fmt;
use std::str::FromStr;
use serde::Serialize;
use crate::error::{WorkloadError, WorkloadResult};

// Fixed width of the vectors stored as plain text in the no_vectors baseline
pub const TEXT_VECTOR_DIM: usize = 64;

pub const TABLE_NAME: &str = "x";
pub const INDEX_NAME: &str = "x_idx";

pub const INSERTS_DELIMITER: &str = "---inserts";
pub const SEARCH_DELIMITER: &str = "---search";

/// The benchmark baselines this generator knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ids plus vectors stored as opaque text, queried by primary key.
    NoVectors,
    /// FLOAT32 vector column with a similarity index, queried by top-1 ANN.
    SimpleWorkload,
}

const MODES: [(&str, Mode); 2] = [
    ("no_vectors", Mode::NoVectors),
    ("simple_workload", Mode::SimpleWorkload),
];

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::NoVectors => "no_vectors",
            Mode::SimpleWorkload => "simple_workload",
        }
    }

    /// Positional parameters, in invocation order.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            Mode::NoVectors => &["n", "q"],
            Mode::SimpleWorkload => &["dim", "n", "q"],
        }
    }

    pub fn all() -> impl Iterator<Item = Mode> {
        MODES.iter().map(|(_, mode)| *mode)
    }
}

impl FromStr for Mode {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MODES
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, mode)| *mode)
            .ok_or_else(|| WorkloadError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully validated generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    NoVectors { n: usize, q: usize },
    SimpleWorkload { dim: usize, n: usize, q: usize },
}

impl Workload {
    /// Resolve a mode name and its raw string parameters.
    /// Everything is validated here so that a bad invocation fails before
    /// the first line is written.
    pub fn from_args<S: AsRef<str>>(mode_name: &str, params: &[S]) -> WorkloadResult<Self> {
        let mode: Mode = mode_name.parse()?;
        let names = mode.param_names();

        if params.len() > names.len() {
            return Err(WorkloadError::UnexpectedParameter {
                mode: mode.name(),
                value: params[names.len()].as_ref().to_string(),
                expected: names.len(),
            });
        }

        let mut values = Vec::with_capacity(names.len());
        for (i, &name) in names.iter().enumerate() {
            let raw = params
                .get(i)
                .ok_or(WorkloadError::MissingParameter { mode: mode.name(), name })?
                .as_ref();
            values.push(parse_param(name, raw)?);
        }

        let workload = match mode {
            Mode::NoVectors => Workload::NoVectors { n: values[0], q: values[1] },
            Mode::SimpleWorkload => Workload::SimpleWorkload {
                dim: values[0],
                n: values[1],
                q: values[2],
            },
        };
        workload.validate()?;
        Ok(workload)
    }

    pub fn validate(&self) -> WorkloadResult<()> {
        match *self {
            Workload::NoVectors { n: 0, q } if q > 0 => Err(WorkloadError::EmptyLookupDomain { q }),
            Workload::SimpleWorkload { dim: 0, .. } => Err(WorkloadError::ZeroDimension),
            _ => Ok(()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Workload::NoVectors { .. } => Mode::NoVectors,
            Workload::SimpleWorkload { .. } => Mode::SimpleWorkload,
        }
    }

    pub fn record_count(&self) -> usize {
        match *self {
            Workload::NoVectors { n, .. } | Workload::SimpleWorkload { n, .. } => n,
        }
    }

    pub fn query_count(&self) -> usize {
        match *self {
            Workload::NoVectors { q, .. } | Workload::SimpleWorkload { q, .. } => q,
        }
    }

    /// Width of every vector literal in the script.
    pub fn dimension(&self) -> usize {
        match *self {
            Workload::NoVectors { .. } => TEXT_VECTOR_DIM,
            Workload::SimpleWorkload { dim, .. } => dim,
        }
    }

    /// The statement counts a complete script for this workload must have.
    pub fn expected_shape(&self) -> ScriptShape {
        let indexed = matches!(self, Workload::SimpleWorkload { .. });
        ScriptShape {
            pragmas: 1,
            tables: 1,
            indexes: usize::from(indexed),
            inserts: self.record_count(),
            lookups: if indexed { 0 } else { self.query_count() },
            nearest: if indexed { self.query_count() } else { 0 },
            delimiters: 2,
        }
    }
}

fn parse_param(name: &'static str, raw: &str) -> WorkloadResult<usize> {
    raw.trim().parse::<usize>().map_err(|source| WorkloadError::Parameter {
        name,
        value: raw.to_string(),
        source,
    })
}

/// Statement counts per kind. Two scripts with equal shapes differ only in
/// their random content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptShape {
    pub pragmas: usize,
    pub tables: usize,
    pub indexes: usize,
    pub inserts: usize,
    pub lookups: usize,
    pub nearest: usize,
    pub delimiters: usize,
}

impl ScriptShape {
    pub fn total_lines(&self) -> usize {
        self.pragmas
            + self.tables
            + self.indexes
            + self.inserts
            + self.lookups
            + self.nearest
            + self.delimiters
    }
}
