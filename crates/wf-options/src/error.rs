use thiserror::Error;

use wf_core::{OptionId, TransportMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("no route option with id {0}")]
    UnknownOption(OptionId),

    #[error("no route option was produced for mode {0}")]
    UnsupportedMode(TransportMode),
}

pub type OptionsResult<T> = Result<T, OptionsError>;
