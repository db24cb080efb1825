// Tue Jan 13 2026 - Alex

use crate::generator::{GenerationResult, PackageOutput};
use crate::output::{FileKind, OutputError, SdkPrinter};
use crate::policy::GenerationPolicy;
use crate::reflection::{ObjectId, TypeGraph};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SDK_DIR: &str = "SDK";
pub const UMBRELLA_HEADER: &str = "SDK.hpp";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize)]
pub struct PackageEntry {
    pub name: String,
    pub enums: usize,
    pub constants: usize,
    pub script_structs: usize,
    pub classes: usize,
    pub methods: usize,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleEntry {
    pub referencer: String,
    pub dependency: String,
}

/// Summary of a run, written next to `SDK.hpp`.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub game: String,
    /// Saved packages in emission order.
    pub packages: Vec<PackageEntry>,
    pub skipped: Vec<String>,
    pub cycles: Vec<CycleEntry>,
}

impl Manifest {
    pub fn build(result: &GenerationResult, graph: &dyn TypeGraph, printer: &SdkPrinter, game: &str) -> Self {
        let name_of = |id: ObjectId| {
            graph
                .get(id)
                .map(|object| object.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        let packages = result
            .ordered()
            .into_iter()
            .map(|package| PackageEntry {
                name: package.name.clone(),
                enums: package.enums.len(),
                constants: package.constants.len(),
                script_structs: package.script_structs.len(),
                classes: package.classes.len(),
                methods: package.method_count(),
                files: [FileKind::Structs, FileKind::Classes, FileKind::Functions]
                    .iter()
                    .map(|&kind| format!("{}/{}", SDK_DIR, printer.file_name(&package.name, kind)))
                    .collect(),
            })
            .collect();

        let cycles = result
            .cycles
            .iter()
            .map(|cycle| CycleEntry {
                referencer: name_of(cycle.referencer),
                dependency: name_of(cycle.dependency),
            })
            .collect();

        Self {
            game: game.to_string(),
            packages,
            skipped: result.skipped.clone(),
            cycles,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    pub files_written: usize,
    pub bytes_written: usize,
    pub packages: usize,
}

/// Writes rendered packages below an output root:
/// `<root>/SDK/<short>_<package>_*.{hpp,cpp}`, `<root>/SDK.hpp` and
/// optionally `<root>/manifest.json`.
pub struct SdkWriter<'p> {
    root: PathBuf,
    policy: &'p dyn GenerationPolicy,
    write_manifest: bool,
}

impl<'p> SdkWriter<'p> {
    pub fn new(root: impl Into<PathBuf>, policy: &'p dyn GenerationPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
            write_manifest: true,
        }
    }

    pub fn with_manifest(mut self, enabled: bool) -> Self {
        self.write_manifest = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Renders every saved package in parallel. Must only be called once
    /// resolution has finished for all packages.
    pub fn write(&self, result: &GenerationResult, graph: &dyn TypeGraph) -> Result<WriteSummary, OutputError> {
        let sdk_dir = self.root.join(SDK_DIR);
        fs::create_dir_all(&sdk_dir).map_err(|e| OutputError::io(&sdk_dir, e))?;

        let printer = SdkPrinter::new(self.policy);
        let ordered = result.ordered();

        let sizes = ordered
            .par_iter()
            .map(|package| self.write_package(&printer, &sdk_dir, package))
            .collect::<Result<Vec<usize>, OutputError>>()?;

        let mut summary = WriteSummary {
            files_written: sizes.len() * 3,
            bytes_written: sizes.iter().sum(),
            packages: ordered.len(),
        };

        let header = printer.sdk_header(&ordered);
        summary.bytes_written += write_file(&self.root.join(UMBRELLA_HEADER), &header)?;
        summary.files_written += 1;

        if self.write_manifest {
            let manifest = Manifest::build(result, graph, &printer, self.policy.game_name_short());
            let json = serde_json::to_string_pretty(&manifest)?;
            summary.bytes_written += write_file(&self.root.join(MANIFEST_FILE), &json)?;
            summary.files_written += 1;
        }

        log::info!(
            "Wrote {} files ({} bytes) to {}",
            summary.files_written,
            summary.bytes_written,
            self.root.display()
        );
        Ok(summary)
    }

    fn write_package(&self, printer: &SdkPrinter, dir: &Path, package: &PackageOutput) -> Result<usize, OutputError> {
        log::debug!("Rendering package {}", package.name);
        let mut written = 0;
        written += write_file(
            &dir.join(printer.file_name(&package.name, FileKind::Structs)),
            &printer.structs_header(package),
        )?;
        written += write_file(
            &dir.join(printer.file_name(&package.name, FileKind::Classes)),
            &printer.classes_header(package),
        )?;
        written += write_file(
            &dir.join(printer.file_name(&package.name, FileKind::Functions)),
            &printer.functions_source(package),
        )?;
        Ok(written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, OutputError> {
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| OutputError::io(path, e))?;
    Ok(content.len())
}
