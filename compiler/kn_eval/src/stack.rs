//! Native stack guard for recursive parsing and evaluation.
//!
//! Knight programs nest arbitrarily deep (`; ; ; ...`, `+ + + ...`), and both
//! the parser and `run` recurse once per level. The guard grows the stack on
//! demand through `stacker` instead of overflowing.

/// Run `f`, first growing the native stack if fewer than the red-zone bytes
/// remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// wasm32 manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
