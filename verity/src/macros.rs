/// Implements [Numeric](crate::Numeric) for primitive types
/// with the given zero value.
macro_rules! impl_numeric {
    ($zero:literal => $($ty:ty),* $(,)?) => {
        $(
            impl $crate::Numeric for $ty {
                const ZERO: Self = $zero;
            }
        )*
    };
}

/// Early return with a [Violation](crate::Error::Violation)
/// built from a format string.
macro_rules! violation {
    ($($arg:tt)*) => {
        return Err($crate::Error::Violation(format!($($arg)*)))
    };
}
