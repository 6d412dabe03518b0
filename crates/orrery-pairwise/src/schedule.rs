//! Planning and materialising the pairwise engine sequence.

use std::sync::Arc;

use smallvec::SmallVec;

use orrery_core::{Calculation, Engine, EngineId};
use orrery_engine::{Sandbox, SandboxError};

use crate::group::{group_entities, Group};

/// A symmetric per-pair interaction over entity indices.
///
/// `interact(i, j)` is called exactly once per unordered pair `{i, j}`
/// and must accumulate onto both entities' state (or neither). It must
/// confine its writes to state owned by entities `i` and `j`: that is
/// the contract the group-disjointness guarantee is built on.
///
/// `Sync` because one kernel instance is shared by every calculation of
/// the schedule, across workers.
pub trait PairKernel: Send + Sync + 'static {
    /// Compute the interaction between entities `i` and `j`.
    fn interact(&self, i: usize, j: usize);
}

/// One unit of pairwise work, in group terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairTask {
    /// All unordered pairs strictly inside one group, computed serially
    /// by a single calculation.
    Intra(usize),
    /// All pairs between two distinct groups.
    Cross(usize, usize),
}

impl PairTask {
    /// The group indices this task references.
    #[cfg(test)]
    fn groups(&self) -> SmallVec<[usize; 2]> {
        match *self {
            Self::Intra(g) => SmallVec::from_slice(&[g]),
            Self::Cross(a, b) => SmallVec::from_slice(&[a, b]),
        }
    }
}

/// The tasks of one engine-to-be: groups referenced are pairwise
/// disjoint, so the tasks may run concurrently.
#[derive(Clone, Debug, Default)]
pub struct PairRound {
    tasks: SmallVec<[PairTask; 8]>,
}

impl PairRound {
    /// The tasks in this round.
    pub fn tasks(&self) -> &[PairTask] {
        &self.tasks
    }
}

/// A planned sequence of race-free pairwise rounds.
///
/// Pure data: planning touches no threads and no store, so the
/// combinatorial invariants are directly testable. Materialise with
/// [`into_engines`](PairSchedule::into_engines) or register in one step
/// with [`register_pairwise`].
#[derive(Clone, Debug)]
pub struct PairSchedule {
    groups: Vec<Group>,
    rounds: Vec<PairRound>,
}

impl PairSchedule {
    /// Plan the schedule for `entity_count` entities on a pool of
    /// `pool_size` workers.
    ///
    /// Group count is `G = min(N, 2·W)`: enough groups that cross-group
    /// rounds can occupy every worker with a two-group pair, falling
    /// back to one group per entity when N is small. An intra-group
    /// round is emitted first iff some group holds at least two
    /// entities (exactly when `G < N`). Cross-group rounds then cover
    /// every unordered pair of distinct groups exactly once.
    ///
    /// `entity_count <= 1` plans an empty schedule.
    pub fn plan(entity_count: usize, pool_size: usize) -> Self {
        let width = pool_size.max(1);
        let group_count = entity_count.min(2 * width);
        let groups = group_entities(entity_count, group_count);

        if entity_count <= 1 {
            return Self {
                groups,
                rounds: Vec::new(),
            };
        }

        let mut rounds = Vec::new();

        // Intra-group pairs exist only when a group holds >= 2 entities.
        // The tasks reference distinct groups, so one round covers them
        // all.
        if group_count < entity_count {
            let tasks: SmallVec<[PairTask; 8]> = (0..group_count)
                .filter(|&g| groups[g].len() >= 2)
                .map(PairTask::Intra)
                .collect();
            debug_assert!(!tasks.is_empty());
            rounds.push(PairRound { tasks });
        }

        rounds.extend(cross_rounds(group_count));

        Self { groups, rounds }
    }

    /// The planned groups, partitioning `[0, entity_count)`.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The planned rounds, in execution order.
    pub fn rounds(&self) -> &[PairRound] {
        &self.rounds
    }

    /// Materialise one engine per round, all driving the same kernel.
    ///
    /// Engine names are `"{name}: round {k}"` for diagnostics. The
    /// kernel is shared; each calculation owns its group bounds.
    pub fn into_engines<K: PairKernel>(&self, name: &str, kernel: &Arc<K>) -> Vec<Engine> {
        self.rounds
            .iter()
            .enumerate()
            .map(|(k, round)| {
                let mut engine = Engine::new(format!("{name}: round {k}"));
                for task in round.tasks() {
                    let calc: Box<dyn Calculation> = match *task {
                        PairTask::Intra(g) => Box::new(IntraCalc {
                            group: self.groups[g],
                            kernel: Arc::clone(kernel),
                        }),
                        PairTask::Cross(a, b) => Box::new(CrossCalc {
                            a: self.groups[a],
                            b: self.groups[b],
                            kernel: Arc::clone(kernel),
                        }),
                    };
                    engine.push(calc);
                }
                engine
            })
            .collect()
    }
}

/// Enumerate the complete graph on `group_count` groups as a sequence
/// of matchings, by the circle method.
///
/// For each separation `skip = 1..=G/2`, walks start at every offset
/// `0..=skip` and advance by `skip + 1` around the circle, pairing each
/// position with the one `skip` ahead. The walks revisit edges (mirror
/// pairs at `skip = G/2`, overlapping cosets), so a `done` matrix keeps
/// every edge exactly once. A greedy `used` set closes the current
/// round the first time a group would repeat in it — the closed round
/// is a matching by construction.
fn cross_rounds(group_count: usize) -> Vec<PairRound> {
    let g = group_count;
    let mut rounds = Vec::new();
    if g < 2 {
        return rounds;
    }

    let mut done = vec![vec![false; g]; g];
    let mut used = vec![false; g];
    let mut current: SmallVec<[PairTask; 8]> = SmallVec::new();

    for skip in 1..=g / 2 {
        for offset in 0..=skip {
            let start = offset;
            let mut i = offset;
            let mut j = (offset + skip) % g;
            loop {
                if !done[i][j] {
                    done[i][j] = true;
                    done[j][i] = true;
                    if used[i] || used[j] {
                        if !current.is_empty() {
                            rounds.push(PairRound {
                                tasks: std::mem::take(&mut current),
                            });
                        }
                        used.fill(false);
                    }
                    used[i] = true;
                    used[j] = true;
                    current.push(PairTask::Cross(i, j));
                }
                i = (i + skip + 1) % g;
                j = (j + skip + 1) % g;
                if i == start {
                    break;
                }
            }
        }
    }

    if !current.is_empty() {
        rounds.push(PairRound { tasks: current });
    }
    rounds
}

/// Cross-group calculation: the full A×B product.
struct CrossCalc<K: PairKernel> {
    a: Group,
    b: Group,
    kernel: Arc<K>,
}

impl<K: PairKernel> Calculation for CrossCalc<K> {
    fn run(&mut self) {
        for i in self.a.indices() {
            for j in self.b.indices() {
                self.kernel.interact(i, j);
            }
        }
    }
}

/// Intra-group calculation: unordered pairs `i < j` inside one group.
struct IntraCalc<K: PairKernel> {
    group: Group,
    kernel: Arc<K>,
}

impl<K: PairKernel> Calculation for IntraCalc<K> {
    fn run(&mut self) {
        for i in self.group.indices() {
            for j in (i + 1)..self.group.stop {
                self.kernel.interact(i, j);
            }
        }
    }
}

/// Plan against a sandbox's entity count and pool size, materialise the
/// engines, and register them in order.
///
/// Returns the registered [`EngineId`]s. Fails with
/// [`SandboxError::Running`] if the sandbox is running.
pub fn register_pairwise<K: PairKernel>(
    sandbox: &mut Sandbox,
    name: &str,
    kernel: &Arc<K>,
) -> Result<Vec<EngineId>, SandboxError> {
    let schedule = PairSchedule::plan(sandbox.entity_count(), sandbox.workers());
    let mut ids = Vec::with_capacity(schedule.rounds().len());
    for engine in schedule.into_engines(name, kernel) {
        ids.push(sandbox.register(engine)?);
    }
    Ok(ids)
}
