use allowance_core::errors::*;

#[test]
fn remote_error_carries_status_and_message() {
    let err = SyncError::Remote {
        status: 503,
        message: "service unavailable".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("503"));
    assert!(msg.contains("service unavailable"));
}

#[test]
fn link_not_found_carries_external_id() {
    let err = SyncError::LinkNotFound {
        external_id: "child-42".into(),
    };
    assert!(err.to_string().contains("child-42"));
}

// --- Retry classification ---

#[test]
fn server_errors_are_retryable() {
    for status in [500, 502, 503, 504] {
        let err = SyncError::Remote {
            status,
            message: String::new(),
        };
        assert!(err.is_retryable(), "{status} should be retryable");
    }
}

#[test]
fn timeouts_and_network_failures_are_retryable() {
    assert!(SyncError::Timeout { after_ms: 30_000 }.is_retryable());
    assert!(SyncError::Network {
        reason: "connection reset".into()
    }
    .is_retryable());
}

#[test]
fn client_errors_are_terminal() {
    let err = SyncError::Remote {
        status: 400,
        message: "bad request".into(),
    };
    assert!(!err.is_retryable());
    assert!(!SyncError::PushRejected {
        external_id: "c".into()
    }
    .is_retryable());
}

#[test]
fn auth_failure_is_not_retried_but_needs_reauth() {
    let err = SyncError::NotAuthenticated;
    assert!(!err.is_retryable());
    assert!(err.needs_reauthentication());
}

// --- From impls ---

#[test]
fn storage_error_converts_to_sync_error() {
    let err: SyncError = StorageError::Sqlite {
        message: "disk full".into(),
    }
    .into();
    assert!(matches!(err, SyncError::Storage(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn config_error_converts_to_sync_error() {
    let err: SyncError = ConfigError::Invalid {
        field: "sync.tick_interval_secs".into(),
        reason: "must be greater than zero".into(),
    }
    .into();
    assert!(matches!(err, SyncError::Config(_)));
    assert!(err.to_string().contains("tick_interval_secs"));
}
