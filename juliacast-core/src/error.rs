use thiserror::Error;

/// Fatal conditions of the analysis pipeline.
///
/// None of these are recoverable: the driver aborts the run after logging.
/// "No interior found up to the last level" is *not* an error — it is the
/// ordinary negative outcome, reported as level 0.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no critical points found (Newton located no roots of p')")]
    NoCriticalPoints,

    #[error("no bounded critical orbit found (does an attractor exist at all?)")]
    NoCriticalOrbits,

    #[error("critical point table overflow")]
    TooManyRoots,

    #[error("arena exhausted: block table is full")]
    ArenaExhausted,
}
