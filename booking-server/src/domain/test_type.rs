//! Theory test categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when parsing an unknown test type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test type: {0}")]
pub struct InvalidTestType(pub String);

/// The category of theory test being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestType {
    Car,
    Motorcycle,
    Lgv,
    Pcv,
    /// The instructor re-sit class. Re-scheduling it must not be
    /// constrained by the original eligibility dates, so any eligibility
    /// window supplied for it is ignored.
    InstructorRetest,
}

impl TestType {
    /// True for the test type whose eligibility window is never applied.
    pub fn ignores_eligibility_window(self) -> bool {
        matches!(self, TestType::InstructorRetest)
    }

    /// Parse from the wire representation.
    pub fn parse(s: &str) -> Result<Self, InvalidTestType> {
        match s {
            "car" => Ok(TestType::Car),
            "motorcycle" => Ok(TestType::Motorcycle),
            "lgv" => Ok(TestType::Lgv),
            "pcv" => Ok(TestType::Pcv),
            "instructor-retest" => Ok(TestType::InstructorRetest),
            other => Err(InvalidTestType(other.to_string())),
        }
    }

    /// The wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TestType::Car => "car",
            TestType::Motorcycle => "motorcycle",
            TestType::Lgv => "lgv",
            TestType::Pcv => "pcv",
            TestType::InstructorRetest => "instructor-retest",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
