/// Name of the HTTP-only session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Session token lifetime. Tokens are stateless, so this is also the
/// effective logout horizon: clearing the cookie does not revoke the token.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Hard cap on uploaded resume size, checked before any network call.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// The only accepted upload mime type.
pub const PDF_MIME: &str = "application/pdf";

/// How much raw text a resume detail response previews.
pub const TEXT_PREVIEW_CHARS: usize = 1000;

/// Timeout for a single call to the extraction service.
pub const PARSER_TIMEOUT_SECS: u64 = 30;

/// Path on the extraction service that accepts a multipart PDF.
pub const PARSER_ENDPOINT: &str = "/parse-resume";
