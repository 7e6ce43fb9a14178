/// Review status of a submitted homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Parse the wire representation. Returns `None` for statuses outside the known set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    /// Reviewer verdict shown to the user.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// What the relay remembers between polls.
///
/// Lives only in memory; a restart begins again from the configured initial watermark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Text of the last notification delivered to the chat
    pub last_notified_status: Option<String>,
    /// `from_date` sent with the next request (unix seconds)
    pub watermark_timestamp: i64,
}

impl PollState {
    pub fn new(initial_watermark: i64) -> Self {
        Self {
            last_notified_status: None,
            watermark_timestamp: initial_watermark,
        }
    }
}

/// Status line and body returned by the homework API transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}
