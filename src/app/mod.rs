pub mod resource;
pub mod use_case;

pub mod transform {
    pub mod user {
        use crate::{
            app::resource::catalog::UserResponse,
            domain::entity::{catalog::User, Entity},
        };

        impl From<User> for UserResponse {
            fn from(user: User) -> Self {
                Self {
                    id: user.ident(),
                    name: user.name().clone(),
                    age: *user.age(),
                    address: user.address().clone(),
                }
            }
        }
    }
}
