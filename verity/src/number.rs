use crate::{Error, Schema, Validator};

/// Numeric types that can be validated by a [NumberSchema](NumberSchema).
///
/// Values are compared with the type's own ordering, there is no
/// conversion between numeric types.
pub trait Numeric: Copy + PartialOrd + core::fmt::Display + Send + Sync + 'static {
    /// The value treated as absent by [required](NumberSchema::required).
    const ZERO: Self;
}

impl_numeric!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric!(0.0 => f32, f64);

/// Schema for numeric values.
#[derive(Debug)]
pub struct NumberSchema<N: Numeric> {
    schema: Schema<N>,
    required: bool,
}

impl<N: Numeric> NumberSchema<N> {
    pub fn new() -> Self {
        Self {
            schema: Schema::new(),
            required: false,
        }
    }

    /// Reject zero with [Required](Error::Required).
    ///
    /// There is no separate absent state for plain numbers, zero stands in for it
    /// even where it is a meaningful value. Use an [OptionalSchema](crate::OptionalSchema)
    /// when absence has to be told apart from zero.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The value must not be less than `min`.
    pub fn min(mut self, min: N) -> Self {
        self.schema.attach(move |v: &N| {
            if *v < min {
                violation!("value must be at least {}", min);
            }
            Ok(())
        });
        self
    }

    /// The value must not be more than `max`.
    pub fn max(mut self, max: N) -> Self {
        self.schema.attach(move |v: &N| {
            if *v > max {
                violation!("value must be at most {}", max);
            }
            Ok(())
        });
        self
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&N) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.schema.attach(predicate);
        self
    }
}

impl<N: Numeric> Default for NumberSchema<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Numeric> Validator<N> for NumberSchema<N> {
    fn validate(&self, value: &N) -> Result<(), Error> {
        if self.required && *value == N::ZERO {
            return Err(Error::Required);
        }
        self.schema.validate(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn message<N: Numeric>(schema: &NumberSchema<N>, value: N) -> Option<String> {
        schema.validate(&value).err().map(|e| e.to_string())
    }

    #[test]
    fn range() {
        let schema = NumberSchema::<i32>::new().min(18).max(120);

        assert_eq!(message(&schema, 25), None);
        assert_eq!(
            message(&schema, 15).as_deref(),
            Some("value must be at least 18")
        );
        assert_eq!(
            message(&schema, 150).as_deref(),
            Some("value must be at most 120")
        );
    }

    #[test]
    fn required_treats_zero_as_absent() {
        let schema = NumberSchema::<i32>::new().required();
        assert!(schema.validate(&0).unwrap_err().is_required());
        assert!(schema.validate(&-1).is_ok());

        let floats = NumberSchema::<f64>::new().required().min(-5.0);
        assert!(floats.validate(&0.0).unwrap_err().is_required());
    }

    #[test]
    fn floats_and_unsigned() {
        let floats = NumberSchema::<f64>::new().min(0.5);
        assert_eq!(message(&floats, 1.0), None);
        assert_eq!(
            message(&floats, 0.1).as_deref(),
            Some("value must be at least 0.5")
        );

        let unsigned = NumberSchema::<u64>::new().max(100);
        assert_eq!(message(&unsigned, 50), None);
        assert_eq!(
            message(&unsigned, 200).as_deref(),
            Some("value must be at most 100")
        );
    }

    #[test]
    fn custom_predicate() {
        let schema = NumberSchema::<i64>::new().custom(|n| {
            if *n < 0 {
                return Err(Error::violation("value must be positive"));
            }
            Ok(())
        });

        assert_eq!(message(&schema, 10), None);
        assert_eq!(
            message(&schema, -1).as_deref(),
            Some("value must be positive")
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn valid_iff_within_bounds(a in -1000i64..1000, span in 0i64..1000, v in -3000i64..3000) {
            let b = a + span;
            let schema = NumberSchema::<i64>::new().min(a).max(b);
            prop_assert_eq!(schema.validate(&v).is_ok(), a <= v && v <= b);
        }

        #[test]
        fn out_of_bounds_names_the_bound(a in -1000i64..1000, span in 0i64..1000) {
            let b = a + span;
            let schema = NumberSchema::<i64>::new().min(a).max(b);
            prop_assert_eq!(
                message(&schema, a - 1),
                Some(format!("value must be at least {}", a))
            );
            prop_assert_eq!(
                message(&schema, b + 1),
                Some(format!("value must be at most {}", b))
            );
        }
    }
}
