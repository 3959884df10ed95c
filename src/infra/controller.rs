use std::sync::Arc;

use async_trait::async_trait;
use salvo::{http::StatusCode, writer::Json, Depot, FlowCtrl, Handler, Request, Response};

use crate::{
    app::{
        resource::catalog::{CreateUser, UpdateUser, UserResponse},
        use_case::catalog::UserService,
    },
    domain::{
        entity::{catalog::User, EntityId},
        repository::UserRepository,
        validation::Validate,
    },
    error::{
        app::ApplicationError,
        http::{BadRequest, NotFound},
        resource::NotFoundError,
    },
};

macro_rules! map_res_err {
    ($result:ident, $response:ident) => {
        match $result {
            Err(err) => {
                $response.render(err);
                return;
            }
            Ok(ok) => ok,
        }
    };
}

/// Id addressed operations report an unknown id as `404 Not Found`.
macro_rules! map_not_found {
    ($result:ident, $response:ident) => {
        match $result {
            Err(ApplicationError::NotFound(err)) => {
                $response.render(NotFound::from(err));
                return;
            }
            other => map_res_err!(other, $response),
        }
    };
}

macro_rules! user_controller {
    ($name:ident) => {
        pub struct $name<R> {
            service: Arc<UserService<R>>,
        }

        impl<R> $name<R> {
            pub fn new(service: Arc<UserService<R>>) -> Self {
                Self { service }
            }
        }
    };
}

/// Extract the user id from the route params.
///
/// Anything that is not an `i64` is reported as an unknown user.
fn extract_id(req: &Request) -> Result<EntityId, NotFound> {
    let param = req
        .params()
        .get("id")
        .ok_or(NotFound::Query("user id"))?;
    param.parse().map_err(|_| NotFound::Query("user id"))
}

user_controller!(CreateUserController);

#[async_trait]
impl<R: UserRepository> Handler for CreateUserController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<CreateUser, _> = req.parse_json().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result = dto.validate().map_err(ApplicationError::from);
        map_res_err!(result, res);

        let result = self.service.create(dto).await;
        let user = map_res_err!(result, res);

        res.render(Json(UserResponse::from(user)));
        res.set_status_code(StatusCode::CREATED);
    }
}

user_controller!(ListUsersController);

#[async_trait]
impl<R: UserRepository> Handler for ListUsersController<R> {
    async fn handle(&self, _: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = self.service.list_all().await;
        let users = map_res_err!(result, res);

        let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
        res.render(Json(users));
        res.set_status_code(StatusCode::OK);
    }
}

user_controller!(GetUserController);

#[async_trait]
impl<R: UserRepository> Handler for GetUserController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_id(req);
        let id = map_res_err!(result, res);

        let result = self
            .service
            .get_by_id(id)
            .await
            .and_then(|user| user.ok_or_else(|| NotFoundError::from_resource::<User>(id).into()));
        let user = map_not_found!(result, res);

        res.render(Json(UserResponse::from(user)));
        res.set_status_code(StatusCode::OK);
    }
}

user_controller!(SearchUserByNameController);

#[async_trait]
impl<R: UserRepository> Handler for SearchUserByNameController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = req
            .query::<String>("name")
            .or_else(|| req.query::<String>("nome"))
            .ok_or(BadRequest::MissingParameter("name"));
        let name = map_res_err!(result, res);

        let result = self.service.get_by_name(&name).await;
        let user = map_res_err!(result, res);

        match user {
            Some(user) => {
                res.render(Json(UserResponse::from(user)));
                res.set_status_code(StatusCode::OK);
            }
            None => res.render(NotFound::Query("user name")),
        }
    }
}

user_controller!(UpdateUserController);

#[async_trait]
impl<R: UserRepository> Handler for UpdateUserController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_id(req);
        let id = map_res_err!(result, res);

        let result: Result<UpdateUser, _> = req.parse_json().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result = dto.validate().map_err(ApplicationError::from);
        map_res_err!(result, res);

        let result = self.service.update(id, dto).await;
        let user = map_not_found!(result, res);

        res.render(Json(UserResponse::from(user)));
        res.set_status_code(StatusCode::OK);
    }
}

user_controller!(DeleteUserController);

#[async_trait]
impl<R: UserRepository> Handler for DeleteUserController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_id(req);
        let id = map_res_err!(result, res);

        let result = self.service.delete(id).await;
        map_not_found!(result, res);

        res.set_status_code(StatusCode::NO_CONTENT);
    }
}

user_controller!(CountUsersController);

#[async_trait]
impl<R: UserRepository> Handler for CountUsersController<R> {
    async fn handle(&self, _: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = self.service.count().await;
        let total = map_res_err!(result, res);

        res.render(Json(total));
        res.set_status_code(StatusCode::OK);
    }
}

/// Renders the uniform not found body for paths no route matches.
pub struct RouteNotFoundController;

#[async_trait]
impl Handler for RouteNotFoundController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        res.render(NotFound::Route(req.uri().path().to_owned()));
    }
}
