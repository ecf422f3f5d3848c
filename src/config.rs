//! Engine configuration.
//!
//! The only knob is whether precondition checks run. It is fixed at compile
//! time by the `unchecked` cargo feature so that checks in the hot path cost
//! nothing when disabled.

/// Whether operations validate their preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Every precondition is validated and reported as a `ConstructError`.
    Checked,
    /// Precondition checks are compiled out.
    ///
    /// A violated precondition is no longer reported. The engine stays memory
    /// safe: slice accesses underneath still panic on out-of-range offsets, and
    /// violations that stay in range silently read or write the wrong bytes.
    Unchecked,
}

impl CheckMode {
    #[must_use]
    pub const fn is_checked(self) -> bool {
        matches!(self, CheckMode::Checked)
    }
}

/// Check mode this crate was compiled with.
#[cfg(not(feature = "unchecked"))]
pub const CHECK_MODE: CheckMode = CheckMode::Checked;

/// Check mode this crate was compiled with.
#[cfg(feature = "unchecked")]
pub const CHECK_MODE: CheckMode = CheckMode::Unchecked;

/// Returns early with `$err` when checks are enabled and `$cond` does not hold.
macro_rules! check {
    ($cond:expr, $err:expr) => {
        if $crate::config::CHECK_MODE.is_checked() && !($cond) {
            return Err($err);
        }
    };
}

pub(crate) use check;
