use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CourseId(i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct LearnerId(i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct EnrolmentId(i64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    InvalidFormat { value: String },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { value } => write!(f, "invalid id format: {value}"),
        }
    }
}

impl std::error::Error for IdError {}

macro_rules! id_type {
    ($name:ident) => {
        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            /// Parses a decimal id, ignoring surrounding whitespace.
            pub fn parse(value: &str) -> Result<Self, IdError> {
                value
                    .trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdError::InvalidFormat {
                        value: value.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_type!(CourseId);
id_type!(LearnerId);
id_type!(EnrolmentId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_padded_integers() {
        assert_eq!(CourseId::parse(" 12 ").unwrap(), CourseId::new(12));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        let err = LearnerId::parse("abc").unwrap_err();
        assert_eq!(
            err,
            IdError::InvalidFormat {
                value: "abc".to_string()
            }
        );
        assert!(CourseId::parse("").is_err());
        assert!(CourseId::parse("1.5").is_err());
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&EnrolmentId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
