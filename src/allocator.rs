use crate::error::NodeGridError;
use serde::{Deserialize, Serialize};

/// Static description of the cooperating processes sharing one global node space.
///
/// Obtained once from whatever launches the processes and treated as read-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRank {
    pub num_procs: usize,
    pub rank: usize,
}

impl ProcessRank {
    pub fn new(num_procs: usize, rank: usize) -> Result<Self, NodeGridError> {
        let r = Self { num_procs, rank };
        r.validate()?;
        Ok(r)
    }

    /// The rank of a process that runs alone.
    pub fn single() -> Self {
        Self { num_procs: 1, rank: 0 }
    }

    pub fn validate(&self) -> Result<(), NodeGridError> {
        if self.num_procs == 0 || self.rank >= self.num_procs {
            return Err(NodeGridError::InvalidProcessRank {
                rank: self.rank,
                num_procs: self.num_procs,
            });
        }
        Ok(())
    }
}

impl Default for ProcessRank {
    fn default() -> Self {
        Self::single()
    }
}

/// Issues globally unique node ids without talking to other processes.
///
/// The k-th id issued on rank `r` of `P` processes is `k * P + r`. Ids from
/// different ranks therefore never collide and ids from one rank strictly
/// increase. Ids are never handed out twice, even after the node is deleted.
#[derive(Clone, Debug)]
pub struct GlobalIndexAllocator {
    counter: usize,
    process: ProcessRank,
}

impl GlobalIndexAllocator {
    pub fn new(process: ProcessRank) -> Self {
        Self { counter: 0, process }
    }

    /// Restores an allocator that has already issued `counter` ids.
    pub fn with_counter(process: ProcessRank, counter: usize) -> Self {
        Self { counter, process }
    }

    pub fn next_index(&mut self) -> usize {
        let k = self.counter;
        self.counter += 1;
        k * self.process.num_procs + self.process.rank
    }

    /// Records that `n` local ids were handed out outside the stream (contiguous construction).
    pub(crate) fn advance(&mut self, n: usize) {
        self.counter += n;
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn process(&self) -> ProcessRank {
        self.process
    }

    pub(crate) fn reset(&mut self) {
        self.counter = 0;
    }
}
