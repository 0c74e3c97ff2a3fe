use crate::actor_framework::ResourceClient;
use crate::domain::User;
use crate::error::EntityKind;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, EntityKind::User, user);
