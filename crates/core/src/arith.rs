//! Arithmetics helpers

/// Error returned by checked arithmetic. Any of these aborts the enclosing
/// state transition; a value is never wrapped or rounded to continue.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Arithmetic underflow")]
    Underflow,
    #[error("Division by zero")]
    DivisionByZero,
}

/// Turn the `None` of a checked operation into an [`Error`].
pub trait OptionExt<T> {
    /// Map `None` to [`Error::Overflow`].
    fn or_overflow(self) -> Result<T, Error>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline]
    fn or_overflow(self) -> Result<T, Error> {
        self.ok_or(Error::Overflow)
    }
}
