use std::io::Write;
use rand::Rng;
use tracing::debug;

use crate::error::WorkloadResult;
use crate::model::{
    ScriptShape, Workload, INDEX_NAME, INSERTS_DELIMITER, SEARCH_DELIMITER, TABLE_NAME,
};
use crate::vector::{random_vector, VectorLiteral};

pub const PRAGMA_WAL: &str = "PRAGMA journal_mode=WAL;";

/// Emits benchmark scripts in a single pass.
///
/// Statement structure depends only on the workload parameters; the RNG
/// supplies vector components and lookup ids.
pub struct WorkloadGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> WorkloadGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Write the complete script for `workload` to `out`, one statement per
    /// line, and return the shape that was written.
    pub fn generate<W: Write>(&mut self, workload: &Workload, out: &mut W) -> WorkloadResult<ScriptShape> {
        workload.validate()?;
        debug!("Generating {} workload: {:?}", workload.mode(), workload);

        let shape = match *workload {
            Workload::NoVectors { n, q } => self.no_vectors(workload.dimension(), n, q, out)?,
            Workload::SimpleWorkload { dim, n, q } => self.simple_workload(dim, n, q, out)?,
        };
        out.flush()?;
        Ok(shape)
    }

    fn no_vectors<W: Write>(
        &mut self,
        dim: usize,
        n: usize,
        q: usize,
        out: &mut W,
    ) -> WorkloadResult<ScriptShape> {
        let mut shape = ScriptShape::default();

        writeln!(out, "{}", PRAGMA_WAL)?;
        shape.pragmas += 1;
        writeln!(out, "CREATE TABLE {} ( id INTEGER PRIMARY KEY, value TEXT );", TABLE_NAME)?;
        shape.tables += 1;

        for i in 0..n {
            let vector = random_vector(&mut self.rng, dim);
            writeln!(out, "INSERT INTO {} VALUES ({}, '{}');", TABLE_NAME, i, VectorLiteral(&vector))?;
            shape.inserts += 1;
        }
        writeln!(out, "{}", INSERTS_DELIMITER)?;
        shape.delimiters += 1;
        debug!("Insert phase done ({} rows)", n);

        for _ in 0..q {
            // With replacement; validate() guarantees n > 0 here
            let id = self.rng.gen_range(0..n);
            writeln!(out, "SELECT id, value FROM {} WHERE id = {};", TABLE_NAME, id)?;
            shape.lookups += 1;
        }
        writeln!(out, "{}", SEARCH_DELIMITER)?;
        shape.delimiters += 1;

        Ok(shape)
    }

    fn simple_workload<W: Write>(
        &mut self,
        dim: usize,
        n: usize,
        q: usize,
        out: &mut W,
    ) -> WorkloadResult<ScriptShape> {
        let mut shape = ScriptShape::default();

        writeln!(out, "{}", PRAGMA_WAL)?;
        shape.pragmas += 1;
        writeln!(
            out,
            "CREATE TABLE {} ( id INTEGER PRIMARY KEY, embedding FLOAT32({}) );",
            TABLE_NAME, dim
        )?;
        shape.tables += 1;
        writeln!(
            out,
            "CREATE INDEX {} ON {}( libsql_vector_idx(embedding) );",
            INDEX_NAME, TABLE_NAME
        )?;
        shape.indexes += 1;

        for i in 0..n {
            let vector = random_vector(&mut self.rng, dim);
            writeln!(
                out,
                "INSERT INTO {} VALUES ({}, vector('{}'));",
                TABLE_NAME,
                i,
                VectorLiteral(&vector)
            )?;
            shape.inserts += 1;
        }
        writeln!(out, "{}", INSERTS_DELIMITER)?;
        shape.delimiters += 1;
        debug!("Insert phase done ({} rows, dim {})", n, dim);

        for _ in 0..q {
            // Fresh probe, unrelated to any stored row
            let probe = random_vector(&mut self.rng, dim);
            writeln!(
                out,
                "SELECT id FROM vector_top_k('{}', '{}', 1);",
                INDEX_NAME,
                VectorLiteral(&probe)
            )?;
            shape.nearest += 1;
        }
        writeln!(out, "{}", SEARCH_DELIMITER)?;
        shape.delimiters += 1;

        Ok(shape)
    }
}
