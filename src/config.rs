// src/config.rs
//
// Run provenance: config.json describes the problem that was solved,
// results.json the RunReport it produced. Both are write-only artefacts.

use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::driver::RunReport;
use crate::error::Result;
use crate::params::ProblemParams;

#[derive(Serialize)]
pub struct RunConfig {
    pub geometry: GeometryConfig,
    pub physics: PhysicsConfig,
    pub numerics: NumericsConfig,
    pub run: RunInfo,
}

#[derive(Serialize)]
pub struct GeometryConfig {
    pub n: usize,
    pub dx: f64,
    pub length: f64,
}

#[derive(Serialize)]
pub struct PhysicsConfig {
    pub alpha: f64,
    pub boundary: String,
}

#[derive(Serialize)]
pub struct NumericsConfig {
    pub scheme: String,
    pub nsteps: usize,
    pub dt: f64,
    pub total_time: f64,
    /// Stability ratio alpha*dt/dx^2 (explicit 2D scheme needs <= 0.5).
    pub r: f64,
    pub stable: bool,
}

#[derive(Serialize)]
pub struct RunInfo {
    pub binary: String,
    pub run_id: String,
    pub device: String,
    pub lanes: usize,
    pub timestamp_utc: Option<String>,
}

impl RunConfig {
    pub fn new(p: &ProblemParams, binary: &str, run_id: &str, device: &str, lanes: usize) -> Self {
        Self {
            geometry: GeometryConfig {
                n: p.n,
                dx: p.dx(),
                length: p.length,
            },
            physics: PhysicsConfig {
                alpha: p.alpha,
                boundary: "dirichlet-zero".to_string(),
            },
            numerics: NumericsConfig {
                scheme: "ftcs-5pt".to_string(),
                nsteps: p.nsteps,
                dt: p.dt(),
                total_time: p.total_time(),
                r: p.r(),
                stable: p.is_stable(),
            },
            run: RunInfo {
                binary: binary.to_string(),
                run_id: run_id.to_string(),
                device: device.to_string(),
                lanes,
                timestamp_utc: Some(chrono::Utc::now().to_rfc3339()),
            },
        }
    }

    pub fn write_to_dir(&self, out_dir: &Path) -> Result<()> {
        write_json(&out_dir.join("config.json"), self)
    }
}

pub fn write_report(report: &RunReport, out_dir: &Path) -> Result<()> {
    write_json(&out_dir.join("results.json"), report)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
