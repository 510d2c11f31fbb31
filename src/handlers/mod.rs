pub mod default;
pub mod global_404;
pub mod user;

pub use default::default_route_handler;

pub use global_404::global_404_handler;

pub use user::create::create_user_handler;
pub use user::delete::delete_user_handler;
pub use user::update::update_user_handler;
