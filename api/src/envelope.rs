use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    /// The request was understood but addressed nothing or was malformed.
    Fail,
    Error,
}

/// Body shape shared by every response of the API:
/// `{status, results?, data?, message?}`.
#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope {
            status: Status::Success,
            results: None,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_results(mut self, results: usize) -> Self {
        self.results = Some(results);
        self
    }
}

impl Envelope<()> {
    pub fn message(status: Status, message: impl Into<String>) -> Self {
        Envelope {
            status,
            results: None,
            data: None,
            message: Some(message.into()),
        }
    }
}
