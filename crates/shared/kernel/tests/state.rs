#![cfg(feature = "server")]

use hhub_kernel::domain::registry::{FeatureSlice, InitializedSlice};
use hhub_kernel::server::{ApiState, ApiStateError};
use hhub_database::Database;
use std::any::Any;

#[derive(Debug)]
struct Counter(u32);

impl FeatureSlice for Counter {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Unregistered;

impl FeatureSlice for Unregistered {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

async fn memory_db() -> Database {
    Database::builder().url("sqlite::memory:").init().await.expect("memory database")
}

#[tokio::test]
async fn registered_slices_are_found_by_type() {
    let state = ApiState::builder()
        .db(memory_db().await)
        .register_slices([InitializedSlice::new(Counter(7))])
        .build()
        .expect("state");

    assert_eq!(state.try_get_slice::<Counter>().expect("counter").0, 7);
    assert!(matches!(
        state.try_get_slice::<Unregistered>(),
        Err(ApiStateError::MissingSlice { .. })
    ));
}

#[test]
fn building_without_database_fails() {
    let err = ApiState::builder().build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
}
