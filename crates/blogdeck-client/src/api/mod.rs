//! API endpoint implementations.

mod articles;
mod captcha;
mod categories;
mod comments;
mod dashboard;
mod settings;
mod tags;
mod uploads;
mod users;
mod weather;

pub use articles::ArticlesApi;
pub use captcha::CaptchaApi;
pub use categories::CategoriesApi;
pub use comments::CommentsApi;
pub use dashboard::DashboardApi;
pub use settings::SettingsApi;
pub use tags::TagsApi;
pub use uploads::{UploadKind, UploadsApi};
pub use users::UsersApi;
pub use weather::WeatherApi;
