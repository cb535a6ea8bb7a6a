pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{web, Scope};

use crate::auth::AuthGuard;
use crate::config::AuthConfig;

/// Builds the `/api` scope. The access guard wraps only the protected
/// scopes; register and login stay public.
pub fn api(auth: AuthConfig) -> Scope {
    web::scope("/api")
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login)
                .service(
                    web::scope("/profile")
                        .wrap(AuthGuard::new(auth.clone()))
                        .service(auth::profile)
                        .service(auth::update_profile)
                        .service(auth::delete_account),
                ),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthGuard::new(auth))
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::set_task_status)
                .service(tasks::delete_task),
        )
}
