//! Macro for the non-empty string newtypes used for names in records.
//!
//! Every generated type rejects the empty string at construction and at
//! deserialization, so an engine function never sees a record whose model,
//! user, or owner is blank.

/// Error returned when an empty string is used where a name is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyNameError {
    /// Name of the newtype that rejected the value
    pub type_name: &'static str,
}

impl std::fmt::Display for EmptyNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must not be empty", self.type_name)
    }
}

impl std::error::Error for EmptyNameError {}

/// Define a strongly-typed, non-empty string newtype.
///
/// Generates the struct (ordered, hashable, serde-transparent with an
/// emptiness check on the way in), `new()` which panics on empty input,
/// `try_new()`, `as_str()`, `into_inner()`, plus `Display`, `Deref<Target=str>`,
/// `AsRef<str>`, `Borrow<str>`, `TryFrom<String>`, `TryFrom<&str>` and
/// comparisons against `str` and `String`.
macro_rules! define_newtype_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        $vis struct $Name(String);

        impl $Name {
            /// Create a new instance, panicking if the value is empty.
            ///
            /// Prefer [`try_new`](Self::try_new) for values read from a warehouse or file.
            pub fn new(value: impl Into<String>) -> Self {
                match Self::try_new(value) {
                    Some(name) => name,
                    None => panic!(concat!(stringify!($Name), " must not be empty")),
                }
            }

            /// Create a new instance, returning `None` for an empty value.
            pub fn try_new(value: impl Into<String>) -> Option<Self> {
                let s = value.into();
                (!s.is_empty()).then_some(Self(s))
            }

            /// Borrow the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl TryFrom<String> for $Name {
            type Error = $crate::newtype_string::EmptyNameError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::try_new(s).ok_or($crate::newtype_string::EmptyNameError {
                    type_name: stringify!($Name),
                })
            }
        }

        impl TryFrom<&str> for $Name {
            type Error = $crate::newtype_string::EmptyNameError;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::try_from(s.to_string())
            }
        }

        impl From<$Name> for String {
            fn from(name: $Name) -> String { name.0 }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool { self.0 == other }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool { self.0 == *other }
        }

        impl PartialEq<String> for $Name {
            fn eq(&self, other: &String) -> bool { self.0 == *other }
        }
    };
}

pub(crate) use define_newtype_string;
