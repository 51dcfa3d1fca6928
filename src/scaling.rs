//! Scaling modes
//!
//! [`ScaleMode`] is a bitmask in lp_solve's numbering: a base algorithm in the
//! low three bits, optionally combined with a weighting and any number of mode
//! flags. The value is passed to the solver unmodified; backends that do not
//! use lp_solve numbering translate what they can.
//!
//! See also <https://lpsolve.sourceforge.net/5.5/set_scaling.htm>

use std::fmt;
use std::ops::BitOr;

/// Scaling options for the solver, see [`crate::model::Model::set_scaling`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScaleMode(i32);

impl ScaleMode {
    // Scaling algorithms

    /// No scaling is applied.
    pub const NONE: Self = Self(0);
    /// Scale to convergence using largest absolute value.
    pub const EXTREME: Self = Self(1);
    /// Scale based on the simple numerical range.
    pub const RANGE: Self = Self(2);
    /// Numerical range-based scaling.
    pub const MEAN: Self = Self(3);
    /// Geometric scaling.
    pub const GEOMETRIC: Self = Self(4);
    /// Curtis-Reid "optimal" scaling.
    pub const CURTIS_REID: Self = Self(7);

    // Alternative scaling weights

    pub const LINEAR: Self = Self(0);
    pub const QUADRATIC: Self = Self(8);
    /// Scale using logarithmic mean of all values.
    pub const LOGARITHMIC: Self = Self(16);
    /// User-specified weights.
    pub const USER_WEIGHT: Self = Self(31);

    // Scaling modes

    /// Scale rounded to power of 2.
    pub const POWER2: Self = Self(32);
    /// Ensure no scaled number is above 1.
    pub const EQUILIBRATE: Self = Self(64);
    /// Apply scaling to integer columns/variables.
    pub const INTEGERS: Self = Self(128);
    /// Incrementally apply scaling for every solve.
    pub const DYN_UPDATE: Self = Self(256);
    /// Scale only the rows.
    pub const ROWS_ONLY: Self = Self(512);
    /// Scale only the columns.
    pub const COLS_ONLY: Self = Self(1024);

    // Predefined scaling models

    pub const MODEL_EQUILIBRATED: Self = Self(Self::EXTREME.0 | Self::INTEGERS.0);
    pub const MODEL_GEOMETRIC: Self = Self(Self::GEOMETRIC.0 | Self::INTEGERS.0);
    pub const MODEL_ARITHMETIC: Self = Self(Self::MEAN.0 | Self::INTEGERS.0);
    pub const MODEL_DYNAMIC: Self = Self(Self::MODEL_GEOMETRIC.0 | Self::EQUILIBRATE.0);
    pub const MODEL_CURTIS_REID: Self =
        Self(Self::CURTIS_REID.0 | Self::INTEGERS.0 | Self::POWER2.0);

    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> i32 {
        self.0
    }

    /// The base scaling algorithm (low three bits)
    pub const fn algorithm(self) -> Self {
        Self(self.0 & 7)
    }

    /// True if every bit of `flag` is set
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl BitOr for ScaleMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScaleMode({})", self.0)
    }
}
