// Tue Jan 13 2026 - Alex

use crate::generator::{CycleDiagnostic, GenerationContext, PackageBuilder, PackageOutput, ResolutionState};
use crate::reflection::{ObjectId, ObjectKind, ReflectedObject};
use crate::utils::logging::ScopedTimer;
use indexmap::IndexMap;

/// Result of a full run: saved packages plus the final package order.
#[derive(Debug, Default)]
pub struct GenerationResult {
    /// Saved packages, in processing order.
    pub packages: Vec<PackageOutput>,
    /// Names of packages suppressed as empty.
    pub skipped: Vec<String>,
    pub order: Vec<ObjectId>,
    pub cycles: Vec<CycleDiagnostic>,
}

impl GenerationResult {
    /// Saved packages in emission order. Packages that never took part in
    /// struct or class resolution have no position and come first.
    pub fn ordered(&self) -> Vec<&PackageOutput> {
        let position = |id: ObjectId| self.order.iter().position(|&p| p == id);
        let mut ordered: Vec<&PackageOutput> = self.packages.iter().filter(|p| position(p.id).is_none()).collect();
        let mut placed: Vec<(usize, &PackageOutput)> = self
            .packages
            .iter()
            .filter_map(|p| position(p.id).map(|pos| (pos, p)))
            .collect();
        placed.sort_by_key(|(pos, _)| *pos);
        ordered.extend(placed.into_iter().map(|(_, p)| p));
        ordered
    }

    pub fn struct_count(&self) -> usize {
        self.packages.iter().map(|p| p.script_structs.len()).sum()
    }

    pub fn class_count(&self) -> usize {
        self.packages.iter().map(|p| p.classes.len()).sum()
    }
}

/// Runs package builders over every package of the graph, sharing one
/// [`ResolutionState`].
pub struct Generator<'a> {
    ctx: GenerationContext<'a>,
}

impl<'a> Generator<'a> {
    pub fn new(ctx: GenerationContext<'a>) -> Self {
        Self { ctx }
    }

    /// Package objects in graph order.
    pub fn packages(&self) -> Vec<&'a ReflectedObject> {
        self.ctx
            .graph
            .objects()
            .filter(|object| matches!(object.kind, ObjectKind::Package) && !object.is_placeholder())
            .collect()
    }

    pub fn run(&self, state: &mut ResolutionState) -> GenerationResult {
        self.run_with_progress(state, |_, _| {})
    }

    /// Like [`Generator::run`], calling `on_package` with each processed
    /// package and whether it is saved.
    pub fn run_with_progress<F>(&self, state: &mut ResolutionState, mut on_package: F) -> GenerationResult
    where
        F: FnMut(&ReflectedObject, bool),
    {
        let _timer = ScopedTimer::new("package generation");
        let graph = self.ctx.graph;

        let mut members: IndexMap<ObjectId, Vec<ObjectId>> = IndexMap::new();
        for object in graph.objects() {
            if let Some(package) = graph.package_of(object.id) {
                members.entry(package).or_default().push(object.id);
            }
        }

        let mut result = GenerationResult::default();
        for package in self.packages() {
            let mut builder = PackageBuilder::new(self.ctx, state, package);
            if let Some(objects) = members.get(&package.id) {
                builder.process_objects(objects);
            }

            let save = builder.should_save();
            let output = builder.into_output();
            on_package(package, save);

            if save {
                log::debug!(
                    "package {}: {} enums, {} structs, {} classes",
                    output.name,
                    output.enums.len(),
                    output.script_structs.len(),
                    output.classes.len()
                );
                result.packages.push(output);
            } else {
                log::info!("skip empty package: {}", package.name);
                result.skipped.push(package.name.clone());
            }
        }

        result.order = state.order.as_slice().to_vec();
        result.cycles = state.order.cycles().to_vec();
        if !result.cycles.is_empty() {
            log::warn!("{} package cycle(s) found, package order is best effort", result.cycles.len());
        }
        result
    }
}
