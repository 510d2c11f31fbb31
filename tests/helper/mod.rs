pub mod helper;

pub use helper::build_delete_request;
pub use helper::build_post_request;
pub use helper::build_put_request;
pub use helper::get_app;
pub use helper::GenericResponse;
