//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/payment-due/{id}', use [format_endpoint].

/// The root route which responds with a welcome message.
pub const ROOT: &str = "/";
/// The route for registering a new user.
pub const SIGN_UP: &str = "/auth/signup";
/// The route for logging in a user.
pub const LOG_IN: &str = "/auth/login";
/// The route to create a manual expense entry.
pub const MANUAL_ENTRY: &str = "/manual-entry";
/// The route to list a user's manual expense entries.
pub const GET_MANUAL_ENTRY: &str = "/get-manual-entry";
/// The route to create a payment due.
pub const PAYMENT_DUES: &str = "/payment-due";
/// The route to access a payment due by ID.
///
/// GET reads the parameter as a user ID and lists that user's payment dues,
/// PUT and DELETE read it as the ID of a single payment due.
pub const PAYMENT_DUE: &str = "/payment-due/{id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::SIGN_UP);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::MANUAL_ENTRY);
        assert_endpoint_is_valid_uri(endpoints::GET_MANUAL_ENTRY);
        assert_endpoint_is_valid_uri(endpoints::PAYMENT_DUES);
        assert_endpoint_is_valid_uri(endpoints::PAYMENT_DUE);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::PAYMENT_DUE, 1);

        assert_eq!(formatted_path, "/payment-due/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(endpoints::PAYMENT_DUES, 1);

        assert_eq!(formatted_path, "/payment-due");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
