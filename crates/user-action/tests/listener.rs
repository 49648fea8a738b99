//! End-to-end dispatch through `ActionDispatchListener` with a mocked executor.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mockall::mock;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use tollgate_action::{
    ActionExecutionError, ActionExecutionRequest, ActionExecutor, ActionExecutorRegistry,
    ActionType, ExecutionOutcome, Flow, FlowName, IdentityContext, InitiatingPersona,
};
use tollgate_config::{EventListenerConfig, InMemoryConfigSource, ListenerKey, TomlConfigSource};
use tollgate_credential::{CredentialMaterial, RawCredential};
use tollgate_user_action::{
    ActionDispatchListener, DEFAULT_LISTENER_ORDER, LISTENER_NAME, LISTENER_TYPE,
    UserActionErrorCode, UserOperationError, UserStore,
};

mock! {
    pub Executor {}

    impl ActionExecutor for Executor {
        fn supported_action_type(&self) -> ActionType;
        fn execute(
            &self,
            request: &ActionExecutionRequest,
        ) -> Result<ExecutionOutcome, ActionExecutionError>;
    }
}

const USER_ID: &str = "USER_ID";
const PASSWORD: &str = "PASSWORD";
const TENANT: &str = "carbon.super";

struct Harness {
    registry: Arc<ActionExecutorRegistry>,
    config: Arc<InMemoryConfigSource>,
    listener: ActionDispatchListener,
}

impl Harness {
    fn register(&self, executor: MockExecutor) {
        self.registry.register(Arc::new(executor));
    }

    fn intercept(&self, credential: RawCredential) -> Result<bool, UserOperationError> {
        self.listener
            .intercept_pre_credential_update(USER_ID, credential, &UserStore::primary())
    }
}

fn password() -> RawCredential {
    Box::new(String::from(PASSWORD))
}

fn reset_flow() -> Flow {
    Flow::new(FlowName::PasswordReset, InitiatingPersona::User)
}

fn key() -> ListenerKey {
    ListenerKey::new(LISTENER_TYPE, LISTENER_NAME)
}

/// Executor that answers every call with `outcome`.
fn executor_returning(
    outcome: Result<ExecutionOutcome, ActionExecutionError>,
) -> MockExecutor {
    let mut executor = MockExecutor::new();
    executor
        .expect_supported_action_type()
        .return_const(ActionType::PreUpdatePassword);
    executor
        .expect_execute()
        .times(1)
        .returning(move |_| outcome.clone());
    executor
}

/// Executor that must never be invoked.
fn untouched_executor() -> MockExecutor {
    let mut executor = MockExecutor::new();
    executor
        .expect_supported_action_type()
        .return_const(ActionType::PreUpdatePassword);
    executor.expect_execute().never();
    executor
}

#[fixture]
fn harness() -> Harness {
    tollgate_log::init_test();

    let registry = Arc::new(ActionExecutorRegistry::new());
    let config = Arc::new(InMemoryConfigSource::new());
    let context = IdentityContext::new()
        .with_flow(reset_flow())
        .with_tenant_domain(TENANT);
    let listener = ActionDispatchListener::builder()
        .registry(Arc::clone(&registry))
        .config_source(config.clone())
        .ambient_context(Arc::new(context))
        .build();

    Harness {
        registry,
        config,
        listener,
    }
}

#[rstest]
fn proceeds_when_no_executor_registered(harness: Harness) {
    assert_eq!(harness.intercept(password()), Ok(true));
}

#[rstest]
fn proceeds_when_executor_registered_for_other_type(harness: Harness) {
    let mut executor = MockExecutor::new();
    executor
        .expect_supported_action_type()
        .return_const(ActionType::PreUpdateProfile);
    executor.expect_execute().never();
    harness.register(executor);

    assert_eq!(harness.intercept(password()), Ok(true));
}

#[rstest]
fn disabled_listener_never_invokes_executor(harness: Harness) {
    harness
        .config
        .insert(EventListenerConfig::new(key()).with_enable("false"));
    harness.register(untouched_executor());

    assert_eq!(harness.intercept(password()), Ok(true));
}

#[rstest]
fn disabled_listener_skips_credential_validation(harness: Harness) {
    harness
        .config
        .insert(EventListenerConfig::new(key()).with_enable("false"));

    assert_eq!(harness.intercept(Box::new(10_i32)), Ok(true));
}

#[rstest]
fn unparsable_enable_flag_counts_as_enabled(harness: Harness) {
    harness
        .config
        .insert(EventListenerConfig::new(key()).with_enable("sometimes"));
    harness.register(executor_returning(Ok(ExecutionOutcome::success())));

    assert!(harness.listener.is_enabled());
    assert_eq!(harness.intercept(password()), Ok(true));
}

#[rstest]
fn unsupported_credential_is_rejected_without_executor(harness: Harness) {
    let err = harness.intercept(Box::new(10_i32)).unwrap_err();

    assert_eq!(err.code(), UserActionErrorCode::UnsupportedSecret);
    assert_eq!(err.error_code(), "UNSUPPORTED_SECRET");
    assert!(err.is_client_error());
    assert_eq!(err.message(), "Credential is not in the expected format.");
}

#[rstest]
fn unsupported_credential_is_rejected_before_executor(harness: Harness) {
    harness.register(untouched_executor());

    let err = harness.intercept(Box::new(10_i32)).unwrap_err();
    assert_eq!(err.code(), UserActionErrorCode::UnsupportedSecret);
}

#[rstest]
#[case::string(Box::new(String::from(PASSWORD)) as RawCredential)]
#[case::static_str(Box::new(PASSWORD) as RawCredential)]
#[case::chars(Box::new(PASSWORD.chars().collect::<Vec<char>>()) as RawCredential)]
#[case::bytes(Box::new(PASSWORD.as_bytes().to_vec()) as RawCredential)]
#[case::material(Box::new(CredentialMaterial::from_text(PASSWORD)) as RawCredential)]
fn supported_credentials_reach_executor_as_bytes(
    harness: Harness,
    #[case] credential: RawCredential,
) {
    let mut executor = MockExecutor::new();
    executor
        .expect_supported_action_type()
        .return_const(ActionType::PreUpdatePassword);
    executor
        .expect_execute()
        .withf(|request| request.credential() == PASSWORD.as_bytes())
        .times(1)
        .returning(|_| Ok(ExecutionOutcome::success()));
    harness.register(executor);

    assert_eq!(harness.intercept(credential), Ok(true));
}

#[rstest]
fn request_carries_user_flow_and_tenant(harness: Harness) {
    let mut executor = MockExecutor::new();
    executor
        .expect_supported_action_type()
        .return_const(ActionType::PreUpdatePassword);
    executor
        .expect_execute()
        .withf(|request| {
            request.action_type() == ActionType::PreUpdatePassword
                && request.user().id == USER_ID
                && request.user().user_store_domain.as_deref() == Some("PRIMARY")
                && request.tenant_domain() == Some(TENANT)
                && request.flow() == Some(reset_flow())
        })
        .times(1)
        .returning(|_| Ok(ExecutionOutcome::success()));
    harness.register(executor);

    assert_eq!(harness.intercept(password()), Ok(true));
}

#[rstest]
fn request_carries_secondary_user_store(harness: Harness) {
    let mut executor = MockExecutor::new();
    executor
        .expect_supported_action_type()
        .return_const(ActionType::PreUpdatePassword);
    executor
        .expect_execute()
        .withf(|request| request.user().user_store_domain.as_deref() == Some("SECONDARY"))
        .times(1)
        .returning(|_| Ok(ExecutionOutcome::success()));
    harness.register(executor);

    let result = harness.listener.intercept_pre_credential_update(
        USER_ID,
        password(),
        &UserStore::with_domain("SECONDARY"),
    );
    assert_eq!(result, Ok(true));
}

#[rstest]
fn success_proceeds(harness: Harness) {
    harness.register(executor_returning(Ok(ExecutionOutcome::success())));
    assert_eq!(harness.intercept(password()), Ok(true));
}

#[rstest]
fn unknown_outcome_blocks_without_fault(harness: Harness) {
    harness.register(executor_returning(Ok(ExecutionOutcome::Unknown)));
    assert_eq!(harness.intercept(password()), Ok(false));
}

#[rstest]
#[case::reason_only(ExecutionOutcome::failed("Weak password"), "Weak password")]
#[case::empty_description(
    ExecutionOutcome::failed_with_description("Weak password", ""),
    "Weak password. "
)]
#[case::with_description(
    ExecutionOutcome::failed_with_description("Weak password", "Add a digit"),
    "Weak password. Add a digit"
)]
fn failed_outcome_is_client_fault(
    harness: Harness,
    #[case] outcome: ExecutionOutcome,
    #[case] expected: &str,
) {
    harness.register(executor_returning(Ok(outcome)));

    let err = harness.intercept(password()).unwrap_err();
    assert_eq!(err.code(), UserActionErrorCode::ExecutionFailed);
    assert_eq!(err.error_code(), "EXECUTION_FAILED");
    assert!(err.is_client_error());
    assert_eq!(err.message(), expected);
}

#[rstest]
#[case::message_only(ExecutionOutcome::error("Upstream unavailable"), "Upstream unavailable")]
#[case::with_description(
    ExecutionOutcome::error_with_description("Upstream unavailable", "Try later"),
    "Upstream unavailable. Try later"
)]
fn error_outcome_is_server_fault(
    harness: Harness,
    #[case] outcome: ExecutionOutcome,
    #[case] expected: &str,
) {
    harness.register(executor_returning(Ok(outcome)));

    let err = harness.intercept(password()).unwrap_err();
    assert_eq!(err.code(), UserActionErrorCode::ExecutionError);
    assert_eq!(err.error_code(), "EXECUTION_ERROR");
    assert!(err.is_server_error());
    assert_eq!(err.message(), expected);
}

#[rstest]
#[case::execution(ActionExecutionError::execution("Execution error"))]
#[case::transport(ActionExecutionError::transport("connection refused"))]
#[case::invalid_response(ActionExecutionError::invalid_response("missing failureReason"))]
fn invocation_fault_hides_raw_message(harness: Harness, #[case] fault: ActionExecutionError) {
    let raw = fault.to_string();
    harness.register(executor_returning(Err(fault)));

    let err = harness.intercept(password()).unwrap_err();
    assert_eq!(err.code(), UserActionErrorCode::ServerError);
    assert_eq!(err.error_code(), "SERVER_ERROR");
    assert!(err.is_server_error());
    assert_eq!(err.message(), "Error while executing pre update password action.");
    assert!(!err.message().contains(&raw));
}

#[rstest]
fn unregistered_executor_is_no_longer_consulted(harness: Harness) {
    let executor: Arc<dyn ActionExecutor> = Arc::new(untouched_executor());
    harness.registry.register(Arc::clone(&executor));
    assert!(harness.registry.unregister(&executor));

    assert_eq!(harness.intercept(password()), Ok(true));
}

#[rstest]
fn unregistering_another_instance_keeps_registration(harness: Harness) {
    harness.register(executor_returning(Ok(ExecutionOutcome::Unknown)));
    let stranger: Arc<dyn ActionExecutor> = Arc::new(untouched_executor());

    assert!(!harness.registry.unregister(&stranger));
    assert_eq!(harness.intercept(password()), Ok(false));
}

#[rstest]
fn execution_order_falls_back_to_default(harness: Harness) {
    assert_eq!(harness.listener.execution_order_id(), DEFAULT_LISTENER_ORDER);

    harness
        .config
        .insert(EventListenerConfig::new(key()).with_order(-1));
    assert_eq!(harness.listener.execution_order_id(), 10000);

    harness
        .config
        .insert(EventListenerConfig::new(key()).with_order(5000));
    assert_eq!(harness.listener.execution_order_id(), 5000);
}

#[test]
fn listener_reads_toml_configuration() {
    let source = TomlConfigSource::from_toml_str(
        r#"
        [[event_listener]]
        type = "user-operation"
        name = "action-user-operation"
        enable = false
        order = 7000
        "#,
    )
    .unwrap();
    let listener = ActionDispatchListener::builder()
        .registry(Arc::new(ActionExecutorRegistry::new()))
        .config_source(Arc::new(source))
        .build();

    assert!(!listener.is_enabled());
    assert_eq!(listener.execution_order_id(), 7000);
}

#[test]
fn thread_local_context_is_attached_to_request() {
    let registry = Arc::new(ActionExecutorRegistry::new());
    let mut executor = MockExecutor::new();
    executor
        .expect_supported_action_type()
        .return_const(ActionType::PreUpdatePassword);
    executor
        .expect_execute()
        .withf(|request| {
            request.tenant_domain() == Some("tenant.example")
                && request.flow()
                    == Some(Flow::new(FlowName::ProfileUpdate, InitiatingPersona::Admin))
        })
        .times(1)
        .returning(|_| Ok(ExecutionOutcome::success()));
    registry.register(Arc::new(executor));

    let listener = ActionDispatchListener::builder().registry(registry).build();
    let context = IdentityContext::new()
        .with_flow(Flow::new(FlowName::ProfileUpdate, InitiatingPersona::Admin))
        .with_tenant_domain("tenant.example");

    let result = context.scope_sync(|| {
        listener.intercept_pre_credential_update(USER_ID, password(), &UserStore::primary())
    });
    assert_eq!(result, Ok(true));
}

struct CountingExecutor {
    calls: AtomicUsize,
}

impl ActionExecutor for CountingExecutor {
    fn supported_action_type(&self) -> ActionType {
        ActionType::PreUpdatePassword
    }

    fn execute(
        &self,
        request: &ActionExecutionRequest,
    ) -> Result<ExecutionOutcome, ActionExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.credential() == PASSWORD.as_bytes() {
            Ok(ExecutionOutcome::success())
        } else {
            Ok(ExecutionOutcome::failed("Unexpected credential"))
        }
    }
}

#[test]
fn concurrent_callers_share_one_listener() {
    let registry = Arc::new(ActionExecutorRegistry::new());
    let executor = Arc::new(CountingExecutor {
        calls: AtomicUsize::new(0),
    });
    registry.register(executor.clone());
    let listener = ActionDispatchListener::builder().registry(registry).build();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let result = listener.intercept_pre_credential_update(
                        USER_ID,
                        password(),
                        &UserStore::primary(),
                    );
                    assert_eq!(result, Ok(true));
                }
            });
        }
    });

    assert_eq!(executor.calls.load(Ordering::SeqCst), 400);
}
