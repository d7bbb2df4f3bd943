//! Response validation: success criteria and fixture comparison.

use serde_json::Value;

use crate::compare::deep_compare;
use crate::error::ValidationError;
use crate::response::ResponseEnvelope;

/// How strictly a response must behave to count as successful.
///
/// The two checks are distinct, explicitly chosen behaviors; the harness
/// never conflates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessMode {
    /// HTTP status 200 is enough.
    Transport,
    /// HTTP status 200 and no request-level `errors` in the body.
    #[default]
    Protocol,
}

/// How an expected fixture is interpreted against the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Inspect the fixture: an object with a top-level `data` or
    /// `errors` key is root-rooted, anything else compares against
    /// `body.data`.
    #[default]
    Auto,
    /// The fixture is the full root-level response object.
    Root,
    /// The fixture is the value expected under `body.data`.
    Data,
}

/// Checks the envelope against the chosen success mode.
///
/// # Errors
///
/// [`ValidationError::ProtocolFailure`] when the status is not 200;
/// [`ValidationError::ResponseError`] when [`SuccessMode::Protocol`] is
/// selected and the body carries request-level errors.
pub fn check_success(
    envelope: &ResponseEnvelope,
    mode: SuccessMode,
) -> Result<(), ValidationError> {
    if envelope.status != 200 {
        return Err(ValidationError::ProtocolFailure {
            status: envelope.status,
        });
    }
    if mode == SuccessMode::Protocol && envelope.has_errors() {
        return Err(ValidationError::ResponseError {
            errors: envelope.errors().cloned().unwrap_or(Value::Null),
        });
    }
    Ok(())
}

/// Compares the response body against a resolved expected value.
///
/// Under [`CompareMode::Data`] the comparison target is `body.data`
/// specifically; a body without `data` compares as `null` there.
///
/// # Errors
///
/// [`ValidationError::AssertionMismatch`] carrying the path of the
/// first divergence plus both full payloads.
pub fn compare_to_expected(
    body: &Value,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), ValidationError> {
    let rooted = match mode {
        CompareMode::Root => true,
        CompareMode::Data => false,
        CompareMode::Auto => is_root_rooted(expected),
    };

    let (actual, base_path) = if rooted {
        (body, "")
    } else {
        (body.get("data").unwrap_or(&Value::Null), "/data")
    };

    deep_compare(actual, expected).map_err(|divergence| ValidationError::AssertionMismatch {
        path: format!("{base_path}{}", divergence.path),
        expected: expected.clone(),
        actual: actual.clone(),
    })
}

/// Returns true if the fixture includes the top-level response envelope.
#[must_use]
pub fn is_root_rooted(expected: &Value) -> bool {
    expected
        .as_object()
        .is_some_and(|map| map.contains_key("data") || map.contains_key("errors"))
}
