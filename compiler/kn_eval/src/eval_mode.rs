//! Evaluation modes for the Knight interpreter.
//!
//! `EvalMode` decides which side-effecting builtins a program may use and
//! the default nesting limit. The CLI maps `--sandbox` onto
//! [`EvalMode::Sandboxed`].

/// Evaluation mode, checked by builtins through policy methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode: shell-out, input, and output all enabled.
    #[default]
    Interpret,
    /// Untrusted programs: no `SYSTEM`, bounded nesting.
    Sandboxed,
}

impl EvalMode {
    /// Whether `` ` `` / `SYSTEM` may spawn a shell.
    #[inline]
    pub fn allows_system(self) -> bool {
        self.allows_capability("system")
    }

    /// Whether this mode allows the named capability.
    ///
    /// `Sandboxed` denies only `system`; reading input and printing stay
    /// available so ordinary programs still run.
    #[inline]
    pub fn allows_capability(self, cap: &str) -> bool {
        match self {
            Self::Interpret => true,
            Self::Sandboxed => cap != "system",
        }
    }

    /// Default builtin nesting limit, or `None` for unlimited (the native
    /// stack grows through `stacker` instead).
    ///
    /// - `Interpret`: `None` on native, 10 000 on WASM
    /// - `Sandboxed`: always 10 000
    #[inline]
    pub fn max_recursion_depth(self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(10_000)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::Sandboxed => Some(10_000),
        }
    }
}
