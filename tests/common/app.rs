use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use skyvocab_backend::routes::build_router;
use skyvocab_backend::state::AppState;
use skyvocab_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

pub async fn spawn_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("skyvocab-test.sled");

    let store = Arc::new(Store::open(sled_path.to_str().expect("utf8 path")).expect("open store"));
    store.run_migrations().expect("run migrations");

    let state = AppState::new(store);
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        _temp_dir: temp_dir,
    }
}
