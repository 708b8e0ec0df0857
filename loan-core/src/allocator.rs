//! Unique loan id allocation against the application store.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::db::{ApplicationRepository, RepositoryError};
use crate::models::{LOAN_ID_FALLBACK_LEN, LOAN_ID_LEN, LoanId};

/// Verified candidates tried before falling back.
pub const MAX_ATTEMPTS: u32 = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// The existence check failed. Never treated as "id is free".
    #[error("could not check loan id availability: {0}")]
    Store(#[from] RepositoryError),
}

impl AllocationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(err) => err.code(),
        }
    }
}

/// Source of random candidate ids.
pub trait CandidateSource: Send + Sync {
    fn candidate(
        &self,
        len: usize,
    ) -> LoanId;
}

/// Draws from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngCandidates;

impl CandidateSource for ThreadRngCandidates {
    fn candidate(
        &self,
        len: usize,
    ) -> LoanId {
        LoanId::random(&mut rand::thread_rng(), len)
    }
}

/// Reproducible candidates from a fixed seed.
#[derive(Debug)]
pub struct SeededCandidates {
    rng: Mutex<StdRng>,
}

impl SeededCandidates {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CandidateSource for SeededCandidates {
    fn candidate(
        &self,
        len: usize,
    ) -> LoanId {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        LoanId::random(&mut *rng, len)
    }
}

/// Hands out a fixed list of ids in order, then random ones.
///
/// Lets tests and demos force collisions deterministically.
#[derive(Debug, Default)]
pub struct ScriptedCandidates {
    script: Mutex<VecDeque<LoanId>>,
}

impl ScriptedCandidates {
    pub fn new(ids: impl IntoIterator<Item = LoanId>) -> Self {
        Self {
            script: Mutex::new(ids.into_iter().collect()),
        }
    }

    /// Ids not yet handed out.
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .map(|script| script.len())
            .unwrap_or(0)
    }
}

impl CandidateSource for ScriptedCandidates {
    fn candidate(
        &self,
        len: usize,
    ) -> LoanId {
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        next.unwrap_or_else(|| ThreadRngCandidates.candidate(len))
    }
}

/// Outcome of a successful allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub id: LoanId,
    /// Existence checks performed.
    pub attempts: u32,
    /// `false` for the unchecked long fallback id.
    pub verified: bool,
}

pub struct IdAllocator<C = ThreadRngCandidates> {
    candidates: C,
}

impl IdAllocator<ThreadRngCandidates> {
    pub fn new() -> Self {
        Self {
            candidates: ThreadRngCandidates,
        }
    }
}

impl Default for IdAllocator<ThreadRngCandidates> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CandidateSource> IdAllocator<C> {
    pub fn with_source(candidates: C) -> Self {
        Self { candidates }
    }

    /// Tries up to [`MAX_ATTEMPTS`] short ids, returning the first one the
    /// store does not hold. After that many collisions, returns one long id
    /// without checking it.
    pub async fn allocate(
        &self,
        repo: &dyn ApplicationRepository,
    ) -> Result<Allocation, AllocationError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let id = self.candidates.candidate(LOAN_ID_LEN);
            if !repo.exists(&id).await? {
                debug!(%id, attempt, "allocated loan id");
                return Ok(Allocation {
                    id,
                    attempts: attempt,
                    verified: true,
                });
            }
            debug!(%id, attempt, "loan id collision");
        }

        let id = self.candidates.candidate(LOAN_ID_FALLBACK_LEN);
        warn!(%id, attempts = MAX_ATTEMPTS, "all short loan ids collided, using unverified long id");
        Ok(Allocation {
            id,
            attempts: MAX_ATTEMPTS,
            verified: false,
        })
    }
}
