use crate::context::CollectionKey;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ContextError {
    #[error("{0} was already collected in this cycle")]
    AlreadyCollected(CollectionKey),
}

/// Why a parser produced no values.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("{0} was not collected")]
    NotCollected(CollectionKey),
    #[error("{0} could not be fetched")]
    Unavailable(CollectionKey),
    #[error("{key} holds {found}, expected {expected}")]
    WrongShape {
        key: CollectionKey,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{key}: `{path}` is missing or not a non-negative integer")]
    InvalidField { key: CollectionKey, path: String },
    #[error("{0}: none of the nodes could be reached")]
    NoReachableNodes(CollectionKey),
}

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
