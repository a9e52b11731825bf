//! Domain error types.

/// Top-level error type for tickmill.
#[derive(Debug, thiserror::Error)]
pub enum TickmillError {
    #[error("invalid argument '{param}': {reason}")]
    InvalidArgument { param: String, reason: String },

    #[error("symbol '{symbol}' not supported")]
    UnknownSymbol { symbol: String },

    #[error("no fixed dividend set for preferred stock '{symbol}'")]
    MissingFixedDividend { symbol: String },

    #[error("market price for '{symbol}' is zero")]
    ZeroMarketPrice { symbol: String },

    #[error("cannot calculate a P/E ratio when the last dividend price was zero")]
    ZeroLastDividend,

    #[error("no trades for '{symbol}' in the last {range_minutes} minutes")]
    NoTradesInRange { symbol: String, range_minutes: i64 },

    #[error("no stocks with a positive market price to index")]
    NoEligibleStocks,

    #[error("invalid trade: {reason}")]
    InvalidTrade { reason: String },

    #[error("catalog error: {reason}")]
    Catalog { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("{context}")]
    Operation {
        context: String,
        #[source]
        source: Box<TickmillError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TickmillError {
    /// Wrap a failure in an operation-named outer error, keeping the cause.
    pub fn wrap(context: impl Into<String>, cause: TickmillError) -> Self {
        TickmillError::Operation {
            context: context.into(),
            source: Box::new(cause),
        }
    }

    pub fn invalid_argument(param: &str, reason: &str) -> Self {
        TickmillError::InvalidArgument {
            param: param.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The innermost error in an [`TickmillError::Operation`] chain.
    pub fn root_cause(&self) -> &TickmillError {
        match self {
            TickmillError::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<&TickmillError> for std::process::ExitCode {
    fn from(err: &TickmillError) -> Self {
        let code: u8 = match err {
            TickmillError::Io(_) => 1,
            TickmillError::ConfigParse { .. }
            | TickmillError::ConfigMissing { .. }
            | TickmillError::ConfigInvalid { .. } => 2,
            TickmillError::Catalog { .. } => 3,
            TickmillError::InvalidArgument { .. } | TickmillError::InvalidTrade { .. } => 4,
            TickmillError::UnknownSymbol { .. }
            | TickmillError::MissingFixedDividend { .. }
            | TickmillError::ZeroMarketPrice { .. }
            | TickmillError::ZeroLastDividend
            | TickmillError::NoTradesInRange { .. }
            | TickmillError::NoEligibleStocks => 5,
            TickmillError::Operation { source, .. } => return Self::from(source.as_ref()),
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn wrap_preserves_cause() {
        let inner = TickmillError::UnknownSymbol {
            symbol: "XYZ".into(),
        };
        let outer = TickmillError::wrap("failure updating market price", inner);

        assert_eq!(outer.to_string(), "failure updating market price");
        let cause = outer.source().expect("wrapped error must have a source");
        assert_eq!(cause.to_string(), "symbol 'XYZ' not supported");
    }

    #[test]
    fn root_cause_unwinds_nested_wrapping() {
        let inner = TickmillError::ZeroLastDividend;
        let mid = TickmillError::wrap("failure calculating the P/E ratio", inner);
        let outer = TickmillError::wrap("demo step failed", mid);

        assert!(matches!(
            outer.root_cause(),
            TickmillError::ZeroLastDividend
        ));
    }

    #[test]
    fn exit_code_follows_operation_chain() {
        let err = TickmillError::wrap(
            "failure calculating the index price",
            TickmillError::NoEligibleStocks,
        );
        let code = std::process::ExitCode::from(&err);
        // ExitCode has no accessor; equality with the expected mapping is enough.
        assert_eq!(
            format!("{code:?}"),
            format!("{:?}", std::process::ExitCode::from(5u8))
        );
    }
}
