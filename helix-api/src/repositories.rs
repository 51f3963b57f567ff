use crate::endpoints::users::GetUsers;

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    /// Without filters, Helix resolves the user from the bearer token
    pub fn current(&self) -> GetUsers {
        GetUsers::default()
    }

    pub fn by_id(&self, id: impl Into<String>) -> GetUsers {
        GetUsers::new().id(id)
    }
}
