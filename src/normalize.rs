//! Input normalization: pick the input convention a request follows.
//!
//! Selection is positional:
//!
//! 1. The current location does not exist yet: `NewNode`.
//! 2. Either deprecated parameter (`space`, `page`) is present: `LegacyUi`,
//!    even if canonical parameters are present too.
//! 3. Otherwise: `CanonicalUi`.

use crate::model::{DocRef, InputMode, RequestParams, param};

/// Classify a request. Pure; absent parameters stay `None`.
#[must_use]
pub fn normalize(current: &DocRef, exists: bool, params: &RequestParams) -> InputMode {
    if !exists {
        return InputMode::NewNode {
            current: current.clone(),
        };
    }

    if params.contains(param::SPACE) || params.contains(param::PAGE) {
        return InputMode::LegacyUi {
            space_param: params.get(param::SPACE).map(String::from),
            page_param: params.get(param::PAGE).map(String::from),
        };
    }

    InputMode::CanonicalUi {
        space_param: params.get(param::SPACE_REFERENCE).map(String::from),
        name_param: params.get(param::NAME).map(String::from),
    }
}
