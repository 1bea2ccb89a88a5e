pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod vector;

use std::io::Write;

pub use crate::config::GeneratorConfig;
pub use crate::error::{WorkloadError, WorkloadResult};
pub use crate::generator::WorkloadGenerator;
pub use crate::model::{Mode, ScriptShape, Workload};

/// Generate the script for `workload` into `out` using the RNG described by
/// `config`.
pub fn generate_to<W: Write>(
    workload: &Workload,
    config: &GeneratorConfig,
    out: &mut W,
) -> WorkloadResult<ScriptShape> {
    WorkloadGenerator::new(config.rng()).generate(workload, out)
}

/// Same as [`generate_to`], collected into a `String`.
pub fn generate_script(workload: &Workload, config: &GeneratorConfig) -> WorkloadResult<String> {
    let mut buf = Vec::new();
    generate_to(workload, config, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| WorkloadError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
