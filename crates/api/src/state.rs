use blogpost_db::Store;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone. The store handle owns no connection; every handler call
/// opens its own through the store.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Store,
}
