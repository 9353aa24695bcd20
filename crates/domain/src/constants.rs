//! Application constants
//!
//! Centralized location for the endpoint paths, header names and user-facing
//! messages used by the client.

// Service defaults
pub const DEFAULT_API_BASE_URL: &str = "https://api-jxxf26wq5q-nw.a.run.app";
pub const DEFAULT_REFRESH_URL: &str = "https://securetoken.googleapis.com/v1/token";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("beagle-client/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const KEYCHAIN_SERVICE: &str = "beagle-flipper";
pub const KEYCHAIN_ACCOUNT: &str = "session";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const APP_DIR_NAME: &str = "beagle";

// Endpoint paths
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const REFRESH_TOKEN_PATH: &str = "/refresh-token";
pub const SUGGESTION_PATH: &str = "/suggestion";
pub const CLIENT_TRANSACTIONS_PATH: &str = "/profit-tracking/client-transactions";
pub const PRICES_PATH: &str = "/prices";
pub const PREMIUM_STATUS_PATH: &str = "/premium-instances/status";
pub const PREMIUM_UPDATE_PATH: &str = "/premium-instances/update-assignments";
pub const ACCOUNT_NAMES_PATH: &str = "/profit-tracking/rs-account-names";
pub const CLIENT_FLIPS_PATH: &str = "/profit-tracking/client-flips";
pub const DEBUG_DATA_PATH: &str = "/debug-data";
pub const DISPLAY_NAME_PARAM: &str = "display_name";

// Headers and content types
pub const CONTENT_LENGTH_HEADER: &str = "content-length";
pub const PRIMARY_LENGTH_HEADER: &str = "x-suggestion-content-length";
pub const CONTENT_TYPE_HEADER: &str = "content-type";
pub const MSGPACK_CONTENT_TYPE: &str = "application/x-msgpack";
pub const JSON_CONTENT_TYPE: &str = "application/json";

// Request pipeline limits
pub const MAX_AUTH_RETRIES: u32 = 1;
pub const MAX_ERROR_BODY_BYTES: usize = 1_048_576;
pub const DEBUG_DATA_MIN_INTERVAL_SECS: u64 = 5;
pub const TRANSPORT_FAILURE_STATUS: i32 = -1;

// User-facing messages
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";
pub const NETWORK_ERROR_MESSAGE: &str = "Network or server error";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not logged in. Please log in first.";
pub const UNREADABLE_RESPONSE_MESSAGE: &str =
    "Unknown server error (possible system update)";
pub const NO_RESPONSE_BODY_MESSAGE: &str = "Unknown server error (no response body)";
pub const SERVER_RESPONDED_PREFIX: &str = "Server responded with: ";
pub const SERVER_ERROR_PREFIX: &str = "Server error: ";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const INVALID_LOGIN_RESPONSE_MESSAGE: &str = "Invalid response from server";
pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful";
pub const UNKNOWN_SUBJECT_ID: &str = "unknown";
pub const SECONDARY_NOT_AVAILABLE_MESSAGE: &str = "No graph data loaded for this item.";
pub const SECONDARY_LOAD_FAILED_MESSAGE: &str =
    "There was an issue loading the graph data for this item.";
pub const SECONDARY_UNSUPPORTED_MESSAGE: &str =
    "Graph data is not available for this response format.";
pub const PRICE_UNAVAILABLE_MESSAGE: &str =
    "Unable to fetch price copilot price (possible server update)";
pub const PREMIUM_INSTANCE_ERROR_MESSAGE: &str =
    "Error loading premium instance data (possible system update)";
