pub mod controller;
pub mod database;
pub mod memory;

pub mod router {
    use std::sync::Arc;

    use salvo::{logging::Logger, Router};

    use super::controller::*;
    use crate::{app::use_case::catalog::UserService, domain::repository::UserRepository};

    pub fn app<R: UserRepository>(service: Arc<UserService<R>>) -> Router {
        Router::new()
            .push(users(service))
            .push(Router::with_path("<**rest>").handle(RouteNotFoundController))
            .hoop(Logger)
    }

    pub fn users<R: UserRepository>(service: Arc<UserService<R>>) -> Router {
        Router::with_path("users")
            .post(CreateUserController::new(service.clone()))
            .get(ListUsersController::new(service.clone()))
            .push(
                Router::with_path("search/name").get(SearchUserByNameController::new(service.clone())),
            )
            .push(Router::with_path("stats/total").get(CountUsersController::new(service.clone())))
            .push(
                Router::with_path("<id>")
                    .get(GetUserController::new(service.clone()))
                    .put(UpdateUserController::new(service.clone()))
                    .delete(DeleteUserController::new(service)),
            )
    }
}
