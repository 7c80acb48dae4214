pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::signup)
            .service(users::login)
            .service(users::update_profile)
            .service(users::delete_account),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::set_completion_status)
            .service(tasks::replace_task)
            .service(tasks::delete_task),
    );
}
