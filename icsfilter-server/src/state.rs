use icsfilter_core::Fetcher;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Requests share the fetcher's connection pool and nothing else
    pub fetcher: Fetcher,
}

impl AppState {
    pub fn new(fetcher: Fetcher) -> Self {
        AppState { fetcher }
    }
}
