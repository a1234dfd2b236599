use serde_derive::Serialize;
use kmrl_fahrplan::FahrplanError;
use kmrl_fahrplan::types::NotificationLevel;

/// A transient message shown at the top of a page.
#[derive(Serialize, Debug, Clone)]
pub struct NotificationView {
    pub level: &'static str,
    pub message: String
}
impl NotificationView {
    pub fn new<T: Into<String>>(level: NotificationLevel, message: T) -> Self {
        Self {
            level: level.as_str(),
            message: message.into()
        }
    }
    pub fn success<T: Into<String>>(message: T) -> Self {
        Self::new(NotificationLevel::Success, message)
    }
}
impl<'a> From<&'a FahrplanError> for NotificationView {
    fn from(e: &'a FahrplanError) -> Self {
        Self::new(e.level(), e.user_message())
    }
}
