pub const FILES_URL_PREFIX: &str = "files";
pub const BEARER_PREFIX: &str = "Bearer ";

pub const MONGO_ACTIVITY_COLLECTION: &str = "activities";

pub const MSG_VALIDATION_FAILS: &str = "Validation fails.";
pub const MSG_USER_ALREADY_EXISTS: &str = "User already exists.";
pub const MSG_USER_NOT_FOUND: &str = "User not found.";
pub const MSG_PASSWORD_MISMATCH: &str = "Password does not match.";
pub const MSG_TOKEN_NOT_PROVIDED: &str = "Token not provided.";
pub const MSG_TOKEN_INVALID: &str = "Token invalid.";
pub const MSG_NOT_FOUND: &str = "Resource not found.";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error.";

pub const ALLOWED_METHODS: [&str; 4] = ["GET", "HEAD", "POST", "OPTIONS"];
