use super::*;

fn limiter(per_client: usize, global: usize) -> RateLimiter {
    RateLimiter {
        inner: std::sync::Arc::new(Mutex::new(RateLimiterInner {
            client_requests: HashMap::new(),
            global_requests: VecDeque::new(),
        })),
        config: RateLimitConfig {
            per_client_limit: per_client,
            per_client_window: Duration::from_secs(60),
            global_limit: global,
            global_window: Duration::from_secs(60),
        },
    }
}

// =============================================================================
// per-client limit
// =============================================================================

#[test]
fn allows_up_to_per_client_limit() {
    let rl = limiter(3, 100);
    let client = Uuid::new_v4();
    let now = Instant::now();

    for _ in 0..3 {
        assert!(rl.check_and_record_at(client, now).is_ok());
    }
    assert!(matches!(
        rl.check_and_record_at(client, now),
        Err(RateLimitError::PerClientExceeded { limit: 3, .. })
    ));
}

#[test]
fn clients_have_independent_buckets() {
    let rl = limiter(1, 100);
    let now = Instant::now();

    assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_ok());
    assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_ok());
}

#[test]
fn per_client_window_slides() {
    let rl = limiter(1, 100);
    let client = Uuid::new_v4();
    let start = Instant::now();

    assert!(rl.check_and_record_at(client, start).is_ok());
    assert!(rl.check_and_record_at(client, start).is_err());
    // After the window passes, the old entry is pruned.
    let later = start + Duration::from_secs(61);
    assert!(rl.check_and_record_at(client, later).is_ok());
}

// =============================================================================
// global limit
// =============================================================================

#[test]
fn global_limit_spans_all_clients() {
    let rl = limiter(10, 2);
    let now = Instant::now();

    assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_ok());
    assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_ok());
    assert!(matches!(
        rl.check_and_record_at(Uuid::new_v4(), now),
        Err(RateLimitError::GlobalExceeded { limit: 2, .. })
    ));
}

#[test]
fn rejected_request_is_not_recorded() {
    let rl = limiter(1, 100);
    let client = Uuid::new_v4();
    let start = Instant::now();

    assert!(rl.check_and_record_at(client, start).is_ok());
    // Two rejected attempts must not extend the window occupancy.
    assert!(rl.check_and_record_at(client, start).is_err());
    assert!(rl.check_and_record_at(client, start).is_err());
    let later = start + Duration::from_secs(61);
    assert!(rl.check_and_record_at(client, later).is_ok());
}

// =============================================================================
// error messages
// =============================================================================

#[test]
fn error_messages_include_limits() {
    let err = RateLimitError::PerClientExceeded { limit: 10, window_secs: 60 };
    assert!(err.to_string().contains("10"));
    assert!(err.to_string().contains("60"));
}
