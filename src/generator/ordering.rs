// Tue Jan 13 2026 - Alex

use crate::reflection::ObjectId;
use ahash::{AHashMap, AHashSet};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefineStatus {
    NotStarted,
    InProgress,
    Done,
}

/// Resolution status of every struct and class seen during a run.
#[derive(Debug, Default)]
pub struct DefinedSet {
    status: AHashMap<ObjectId, DefineStatus>,
}

impl DefinedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, id: ObjectId) -> Option<DefineStatus> {
        self.status.get(&id).copied()
    }

    /// Records `id` as seen. Existing entries are left untouched.
    pub fn mark_seen(&mut self, id: ObjectId) {
        self.status.entry(id).or_insert(DefineStatus::NotStarted);
    }

    /// Moves `id` from `NotStarted` to `InProgress`. Returns false when the
    /// type was already entered, which is what stops self-referential
    /// hierarchies from recursing.
    pub fn begin(&mut self, id: ObjectId) -> bool {
        match self.status.get_mut(&id) {
            Some(status @ DefineStatus::NotStarted) => {
                *status = DefineStatus::InProgress;
                true
            }
            Some(_) => false,
            None => {
                self.status.insert(id, DefineStatus::InProgress);
                true
            }
        }
    }

    pub fn finish(&mut self, id: ObjectId) {
        self.status.insert(id, DefineStatus::Done);
    }

    pub fn is_done(&self, id: ObjectId) -> bool {
        self.status(id) == Some(DefineStatus::Done)
    }

    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }
}

/// Outcome of [`PackageOrder::require`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Dependency already precedes the referencer.
    Present,
    Inserted,
    Relocated,
    /// The reference closes a package cycle not reported before. The
    /// dependency is still pulled in front of the referencer.
    Cycle,
}

/// Two packages that reference each other, directly or through others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleDiagnostic {
    pub referencer: ObjectId,
    pub dependency: ObjectId,
}

/// Global emission order of packages.
///
/// Every cross-package reference is recorded as an edge. Pulling a package
/// in front of its referencer re-places the packages it depends on in front
/// of it as well, so the order stays topological as long as the recorded
/// edges form no cycle. Edges that would close a cycle are reported and not
/// recorded.
#[derive(Debug, Default)]
pub struct PackageOrder {
    order: Vec<ObjectId>,
    dependencies: IndexMap<ObjectId, IndexSet<ObjectId>>,
    reported: AHashSet<(ObjectId, ObjectId)>,
    cycles: Vec<CycleDiagnostic>,
}

impl PackageOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.order
    }

    pub fn position(&self, package: ObjectId) -> Option<usize> {
        self.order.iter().position(|&p| p == package)
    }

    pub fn contains(&self, package: ObjectId) -> bool {
        self.position(package).is_some()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cycles(&self) -> &[CycleDiagnostic] {
        &self.cycles
    }

    /// Recorded dependencies of `package`, in discovery order.
    pub fn dependencies_of(&self, package: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.dependencies
            .get(&package)
            .into_iter()
            .flat_map(|deps| deps.iter().copied())
    }

    /// Appends `package` if it has not been placed yet.
    pub fn ensure(&mut self, package: ObjectId) {
        if !self.contains(package) {
            self.order.push(package);
        }
    }

    /// Makes `dependency` precede `referencer`.
    pub fn require(&mut self, dependency: ObjectId, referencer: ObjectId) -> Placement {
        if dependency == referencer {
            return Placement::Present;
        }
        self.ensure(referencer);

        let mut cycle = false;
        if self.depends_on(dependency, referencer) {
            let key = (dependency.min(referencer), dependency.max(referencer));
            if self.reported.insert(key) {
                self.cycles.push(CycleDiagnostic { referencer, dependency });
                cycle = true;
            }
        } else {
            self.dependencies.entry(referencer).or_default().insert(dependency);
        }

        let placement = match (self.position(dependency), self.position(referencer)) {
            (Some(dep), Some(cur)) if dep < cur => Placement::Present,
            (existing, _) => {
                let mut stack = vec![referencer];
                self.place_before(dependency, referencer, &mut stack);
                if existing.is_some() {
                    Placement::Relocated
                } else {
                    Placement::Inserted
                }
            }
        };

        if cycle {
            Placement::Cycle
        } else {
            placement
        }
    }

    /// Whether `target` is reachable from `from` over recorded edges.
    fn depends_on(&self, from: ObjectId, target: ObjectId) -> bool {
        let mut seen = AHashSet::new();
        let mut pending = vec![from];
        while let Some(package) = pending.pop() {
            if package == target {
                return true;
            }
            if seen.insert(package) {
                pending.extend(self.dependencies_of(package));
            }
        }
        false
    }

    fn place_before(&mut self, package: ObjectId, anchor: ObjectId, stack: &mut Vec<ObjectId>) {
        if stack.contains(&package) {
            return;
        }
        let Some(anchor_pos) = self.position(anchor) else {
            return;
        };
        match self.position(package) {
            Some(pos) if pos < anchor_pos => return,
            Some(pos) => {
                self.order.remove(pos);
            }
            None => {}
        }
        // Removal happened behind the anchor, its index is unchanged.
        self.order.insert(anchor_pos, package);

        stack.push(package);
        let deps: Vec<ObjectId> = self.dependencies_of(package).collect();
        for dep in deps {
            self.place_before(dep, package, stack);
        }
        stack.pop();
    }
}

/// Cross-package state shared by every package builder of one run.
#[derive(Debug, Default)]
pub struct ResolutionState {
    pub defined: DefinedSet,
    pub order: PackageOrder,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }
}
