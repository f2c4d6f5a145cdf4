/// Encoded polyline of `(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)`
pub const TEST_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

/// Password of every fixture user
pub const TEST_PASSWORD: &str = "password123";

pub const TEST_GEMINI_API_KEY: &str = "test-gemini-key";
pub const TEST_RESEND_API_KEY: &str = "re_test";
