use userstore_binding::boundary::database;
use userstore_binding::error::BindingError;

#[test]
fn test_database_before_init_is_rejected() {
    assert!(matches!(database(), Err(BindingError::NotInitialised)));
}
