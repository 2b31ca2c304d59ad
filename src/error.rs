use std::fmt;

/// Error returned by rank-indexed access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The rank was not in `0..len`.
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            IndexError::OutOfRange { index, len } => {
                write!(f, "no element at index {} (len {})", index, len)
            }
        };
    }
}

impl std::error::Error for IndexError {}
