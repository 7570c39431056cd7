use thiserror::Error;

/// Failure to obtain the raw dataset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("could not read {path}: {reason}")]
    Io { path: String, reason: String },
}

/// A single field of a race result that could not be coerced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid time {0:?}, expected MM:SS")]
    Time(String),

    #[error("invalid year {0:?}")]
    Year(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("record {index} ({name}): {source}")]
    Record {
        index: usize,
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot compute scales for an empty dataset")]
    EmptyDataset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_names_the_offending_rider() {
        let err = PlotError::Record {
            index: 3,
            name: "Marco Pantani".to_string(),
            source: ParseError::Year("abc".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "record 3 (Marco Pantani): invalid year \"abc\""
        );
    }

    #[test]
    fn load_error_is_transparent_inside_plot_error() {
        let err: PlotError = LoadError::Payload("expected an array".to_string()).into();
        assert_eq!(err.to_string(), "malformed payload: expected an array");
    }
}
