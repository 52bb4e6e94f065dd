use bikeflow::repository::Repository;

/// Immutable after startup, every request reads from the same repository.
pub struct AppState {
    pub repository: Repository,
}

impl AppState {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }
}
