pub const HOME_URL: &str = "/";
pub const PROFILE_URL: &str = "/profile";
pub const RETRY_URL: &str = "/questions/retry";
pub const ANSWERS_URL: &str = "/answers";
pub const RESET_URL: &str = "/reset";
pub const CHAT_URL: &str = "/chat";
pub const HEALTH_URL: &str = "/health";

pub const SESSION_COOKIE_NAME: &str = "talentscout_session";

/// Form field name for the answer to the zero-based question `index`.
pub fn answer_field(index: usize) -> String {
    format!("q{index}")
}
