// Env values used by the basic scheme.
pub const REQAUTH_BASIC_USERNAME: &str = "REQAUTH_BASIC_USERNAME";
pub const REQAUTH_BASIC_PASSWORD: &str = "REQAUTH_BASIC_PASSWORD";
