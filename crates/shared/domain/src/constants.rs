//! Keys of the configuration document and the signed envelope.

// Document root
pub const SETTINGS: &str = "settings";
pub const DEPRECATED_KEYS: &str = "deprecatedKeys";
pub const OVERRIDES: &str = "overrides";
pub const META: &str = "meta";

// Override
pub const MATCHING: &str = "matching";
pub const SCHEDULE: &str = "schedule";

// Schedule
pub const FROM: &str = "from";
pub const UNTIL: &str = "until";

// Condition
pub const PLATFORM: &str = "platform";
pub const PLATFORM_VERSION: &str = "platformVersion";
pub const APP_VERSION: &str = "appVersion";
pub const VARIANT: &str = "variant";
pub const BUILD_VARIANT: &str = "buildVariant";
pub const LANGUAGE: &str = "language";

/// Every key a condition object may carry. Anything else disables the condition.
pub const CONDITION_KEYS: [&str; 6] =
    [PLATFORM, PLATFORM_VERSION, APP_VERSION, VARIANT, BUILD_VARIANT, LANGUAGE];

// Signed envelope
pub const ENVELOPE_DATA: &str = "d";
pub const ENVELOPE_SIGNATURE: &str = "sig";

/// Error-path key used when the document root is not an object.
pub const ROOT: &str = "root";
