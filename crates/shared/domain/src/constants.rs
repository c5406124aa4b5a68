//! Domain-level constants.
//!
//! Fixed values the portal expects from a client, and the canonical
//! messages carried by failure results.

// =============================================================================
// Login Fingerprint
// =============================================================================

/// Device identification sent with every login. The portal only exposes its
/// mobile login surface to this client string.
pub const MOBILE_USER_AGENT: &str = "Direk Android App";

/// Value of the `forceMobile` login field
pub const FORCE_MOBILE: &str = "mobile";

/// Login form field carrying the student ID
pub const FIELD_STUDENT_ID: &str = "muid";

/// Login form field carrying the password
pub const FIELD_PASSWORD: &str = "mpassword";

/// Login form field selecting the mobile surface
pub const FIELD_FORCE_MOBILE: &str = "forceMobile";

// =============================================================================
// Result Messages
// =============================================================================

/// Status used when a year/semester selector matches nothing
pub const NO_DATA_STATUS: u16 = 400;

/// Message used when a year/semester selector matches nothing
pub const NO_DATA_MESSAGE: &str = "no data for the given academic year or semester";

/// Status used when the portal rejects the credentials
pub const INVALID_CREDENTIALS_STATUS: u16 = 401;

/// Message used when the portal rejects the credentials
pub const INVALID_CREDENTIALS_MESSAGE: &str = "incorrect student ID or password";
