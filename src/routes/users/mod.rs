pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::{create_user, insert_user_into_db};
pub use delete::{delete_user, delete_user_from_db};
pub use get::{get_user, get_user_from_db};
pub use list::{get_all_users_from_db, list_users};
pub use update::{update_user, update_user_in_db};

pub fn users_routes_config(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(list::list_users)
        .service(create::create_user)
        .service(get::get_user)
        .service(update::update_user)
        .service(delete::delete_user);
}
