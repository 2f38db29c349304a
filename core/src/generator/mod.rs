use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

pub trait FieldGenerator {
    /// Builds a field for `config`, which is checked again before anything is placed.
    fn generate(self, config: FieldConfig) -> Result<Field>;
}

/// Which positions random hazard placement may pick from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HazardSampling {
    /// Rows in `[0, height)` and columns in `[0, width)`.
    #[default]
    FullField,
    /// Rows in `[0, height - 1)` and columns in `[0, width - 1)`, so the last row and column are
    /// always safe. Kept for parity with fields generated by earlier releases.
    ExcludeLastRowAndColumn,
}

impl HazardSampling {
    /// The `(rows, cols)` extent positions are sampled from.
    pub const fn sample_area(self, (height, width): Size) -> Size {
        match self {
            Self::FullField => (height, width),
            Self::ExcludeLastRowAndColumn => (height.saturating_sub(1), width.saturating_sub(1)),
        }
    }
}
