//! Homework domain types

/// Review status reported by the homework API
///
/// The set is closed: any other value coming from the API is a contract
/// violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Every known status, in API order
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Parses the wire representation of a status
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Wire representation of the status
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the chat
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            Self::Reviewing => "The work has been taken for review by the reviewer.",
            Self::Rejected => "The work has been reviewed: the reviewer has comments.",
        }
    }
}

/// A single homework entry once its fields have been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    pub fn new(homework_name: impl Into<String>, status: HomeworkStatus) -> Self {
        Self {
            homework_name: homework_name.into(),
            status,
        }
    }

    /// Renders the chat notification for this record
    pub fn message(&self) -> String {
        format!(
            "Status changed for \"{}\": {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}
