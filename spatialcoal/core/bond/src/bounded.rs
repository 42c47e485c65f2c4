/// Declares a `Copy` wrapper around an `f64` that is known to lie in
/// `$range`, together with its construction error.
///
/// The wrapper is totally ordered, deserializes through its checked
/// constructor and compares directly with plain `f64`s.
macro_rules! bounded_f64 {
    ($(#[$meta:meta])* $name:ident, $error:ident, $range:expr, $describe:literal) => {
        #[derive(Debug)]
        #[allow(clippy::module_name_repetitions)]
        pub struct $error(f64);

        impl core::fmt::Display for $error {
            fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(fmt, "{} is not {}.", self.0, $describe)
            }
        }

        $(#[$meta])*
        #[derive(Copy, Clone, serde::Serialize, serde::Deserialize)]
        #[repr(transparent)]
        #[serde(try_from = "f64")]
        pub struct $name(f64);

        impl $name {
            /// # Errors
            ///
            #[doc = concat!("Returns `", stringify!($error), "` if `value` is not ", $describe, ".")]
            pub fn new(value: f64) -> Result<Self, $error> {
                if $range.contains(&value) {
                    Ok(Self(value))
                } else {
                    Err($error(value))
                }
            }

            #[must_use]
            pub fn get(self) -> f64 {
                self.0
            }
        }

        impl core::convert::TryFrom<f64> for $name {
            type Error = $error;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(fmt, "{}({} in {:?})", stringify!($name), self.0, $range)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, fmt)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.cmp(other) == core::cmp::Ordering::Equal
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0.eq(other)
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<core::cmp::Ordering> {
                self.0.partial_cmp(other)
            }
        }
    };
}
