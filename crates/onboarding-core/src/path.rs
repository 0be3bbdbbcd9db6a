//! Field names and dotted field paths
//!
//! [`Field`] is a top-level key of the record; steps gate fields. [`FieldPath`]
//! addresses one value inside the record (`experiences.2.years`,
//! `emergencyContact.phoneNumber`) and is what errors are attached to.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Top-level record fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FullName,
    Email,
    PhoneNumber,
    Dob,
    ProfilePicture,
    Department,
    PositionTitle,
    StartDate,
    JobType,
    MaxSalary,
    MinSalary,
    Manager,
    Skills,
    Experiences,
    WorkingHours,
    RemotePreference,
    Notes,
    EmergencyContact,
    ConfirmInformation,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::PhoneNumber => "phoneNumber",
            Field::Dob => "dob",
            Field::ProfilePicture => "profilePicture",
            Field::Department => "department",
            Field::PositionTitle => "positionTitle",
            Field::StartDate => "startDate",
            Field::JobType => "jobType",
            Field::MaxSalary => "maxSalary",
            Field::MinSalary => "minSalary",
            Field::Manager => "manager",
            Field::Skills => "skills",
            Field::Experiences => "experiences",
            Field::WorkingHours => "workingHours",
            Field::RemotePreference => "remotePreference",
            Field::Notes => "notes",
            Field::EmergencyContact => "emergencyContact",
            Field::ConfirmInformation => "confirmInformation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A dotted path to one value of the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    FullName,
    Email,
    PhoneNumber,
    Dob,
    ProfilePicture,
    Department,
    PositionTitle,
    StartDate,
    JobType,
    MaxSalary,
    MinSalary,
    Manager,
    Skills,
    Experiences,
    ExperienceSkill(usize),
    ExperienceYears(usize),
    WorkingHours,
    WorkingHoursStart,
    WorkingHoursEnd,
    RemotePreference,
    Notes,
    EmergencyContact,
    ContactName,
    Relation,
    ContactPhone,
    GuardianName,
    GuardianPhone,
    ConfirmInformation,
}

impl FieldPath {
    /// The top-level field this path lives under
    pub fn field(&self) -> Field {
        match self {
            FieldPath::FullName => Field::FullName,
            FieldPath::Email => Field::Email,
            FieldPath::PhoneNumber => Field::PhoneNumber,
            FieldPath::Dob => Field::Dob,
            FieldPath::ProfilePicture => Field::ProfilePicture,
            FieldPath::Department => Field::Department,
            FieldPath::PositionTitle => Field::PositionTitle,
            FieldPath::StartDate => Field::StartDate,
            FieldPath::JobType => Field::JobType,
            FieldPath::MaxSalary => Field::MaxSalary,
            FieldPath::MinSalary => Field::MinSalary,
            FieldPath::Manager => Field::Manager,
            FieldPath::Skills => Field::Skills,
            FieldPath::Experiences
            | FieldPath::ExperienceSkill(_)
            | FieldPath::ExperienceYears(_) => Field::Experiences,
            FieldPath::WorkingHours | FieldPath::WorkingHoursStart | FieldPath::WorkingHoursEnd => {
                Field::WorkingHours
            }
            FieldPath::RemotePreference => Field::RemotePreference,
            FieldPath::Notes => Field::Notes,
            FieldPath::EmergencyContact
            | FieldPath::ContactName
            | FieldPath::Relation
            | FieldPath::ContactPhone
            | FieldPath::GuardianName
            | FieldPath::GuardianPhone => Field::EmergencyContact,
            FieldPath::ConfirmInformation => Field::ConfirmInformation,
        }
    }

    /// Parse a dotted path such as `experiences.0.years`
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.trim().split('.').collect();
        let parsed = match segments.as_slice() {
            ["fullName"] => FieldPath::FullName,
            ["email"] => FieldPath::Email,
            ["phoneNumber"] => FieldPath::PhoneNumber,
            ["dob"] => FieldPath::Dob,
            ["profilePicture"] => FieldPath::ProfilePicture,
            ["department"] => FieldPath::Department,
            ["positionTitle"] => FieldPath::PositionTitle,
            ["startDate"] => FieldPath::StartDate,
            ["jobType"] => FieldPath::JobType,
            ["maxSalary"] => FieldPath::MaxSalary,
            ["minSalary"] => FieldPath::MinSalary,
            ["manager"] => FieldPath::Manager,
            ["skills"] => FieldPath::Skills,
            ["experiences"] => FieldPath::Experiences,
            ["experiences", index, "skill"] => FieldPath::ExperienceSkill(index.parse().ok()?),
            ["experiences", index, "years"] => FieldPath::ExperienceYears(index.parse().ok()?),
            ["workingHours"] => FieldPath::WorkingHours,
            ["workingHours", "start"] => FieldPath::WorkingHoursStart,
            ["workingHours", "end"] => FieldPath::WorkingHoursEnd,
            ["remotePreference"] => FieldPath::RemotePreference,
            ["notes"] => FieldPath::Notes,
            ["emergencyContact"] => FieldPath::EmergencyContact,
            ["emergencyContact", "contactName"] => FieldPath::ContactName,
            ["emergencyContact", "relation"] => FieldPath::Relation,
            ["emergencyContact", "phoneNumber"] => FieldPath::ContactPhone,
            ["emergencyContact", "guardianContactName"] => FieldPath::GuardianName,
            ["emergencyContact", "guardianContactPhone"] => FieldPath::GuardianPhone,
            ["confirmInformation"] => FieldPath::ConfirmInformation,
            _ => return None,
        };
        Some(parsed)
    }

    /// Whether this path is, or lives under, `other`
    pub fn is_within(&self, other: &FieldPath) -> bool {
        if self == other {
            return true;
        }
        match other {
            FieldPath::Experiences => self.field() == Field::Experiences,
            FieldPath::WorkingHours => self.field() == Field::WorkingHours,
            FieldPath::EmergencyContact => self.field() == Field::EmergencyContact,
            _ => false,
        }
    }
}

impl From<Field> for FieldPath {
    fn from(field: Field) -> Self {
        match field {
            Field::FullName => FieldPath::FullName,
            Field::Email => FieldPath::Email,
            Field::PhoneNumber => FieldPath::PhoneNumber,
            Field::Dob => FieldPath::Dob,
            Field::ProfilePicture => FieldPath::ProfilePicture,
            Field::Department => FieldPath::Department,
            Field::PositionTitle => FieldPath::PositionTitle,
            Field::StartDate => FieldPath::StartDate,
            Field::JobType => FieldPath::JobType,
            Field::MaxSalary => FieldPath::MaxSalary,
            Field::MinSalary => FieldPath::MinSalary,
            Field::Manager => FieldPath::Manager,
            Field::Skills => FieldPath::Skills,
            Field::Experiences => FieldPath::Experiences,
            Field::WorkingHours => FieldPath::WorkingHours,
            Field::RemotePreference => FieldPath::RemotePreference,
            Field::Notes => FieldPath::Notes,
            Field::EmergencyContact => FieldPath::EmergencyContact,
            Field::ConfirmInformation => FieldPath::ConfirmInformation,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::ExperienceSkill(i) => write!(f, "experiences.{}.skill", i),
            FieldPath::ExperienceYears(i) => write!(f, "experiences.{}.years", i),
            FieldPath::WorkingHoursStart => f.write_str("workingHours.start"),
            FieldPath::WorkingHoursEnd => f.write_str("workingHours.end"),
            FieldPath::ContactName => f.write_str("emergencyContact.contactName"),
            FieldPath::Relation => f.write_str("emergencyContact.relation"),
            FieldPath::ContactPhone => f.write_str("emergencyContact.phoneNumber"),
            FieldPath::GuardianName => f.write_str("emergencyContact.guardianContactName"),
            FieldPath::GuardianPhone => f.write_str("emergencyContact.guardianContactPhone"),
            other => f.write_str(other.field().as_str()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = crate::error::FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::error::FormError::UnknownField(s.to_string()))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
