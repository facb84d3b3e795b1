//! Shared test helpers wiring the full in-memory service stack.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use norbot::api::services::ApiDispatchService;
use norbot::board::services::{BoardFeed, KanbanService};
use norbot::ingest::{
    adapters::memory::InMemoryProcessedEventStore,
    services::{GithubImportService, SlackIngestService},
};
use norbot::task::{
    adapters::memory::{InMemoryCounterAllocator, InMemoryTaskRepository},
    services::TaskService,
};
use norbot::workspace::{
    adapters::memory::{
        InMemoryApiKeyRepository, InMemoryInvitationRepository, InMemoryWorkspaceRepository,
    },
    domain::{Project, UserId, Workspace},
    services::{ApiKeyService, InvitationService, MembershipService},
};
use rstest::fixture;
use tokio::runtime::Runtime;

/// Boxed error for test signatures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Task service over the in-memory adapters.
pub type TestTaskService = TaskService<
    InMemoryTaskRepository,
    InMemoryCounterAllocator,
    InMemoryWorkspaceRepository,
    DefaultClock,
>;

/// Slack ingestion service over the in-memory adapters.
pub type TestSlackService = SlackIngestService<
    InMemoryTaskRepository,
    InMemoryCounterAllocator,
    InMemoryWorkspaceRepository,
    DefaultClock,
    InMemoryProcessedEventStore,
>;

/// GitHub import service over the in-memory adapters.
pub type TestGithubService = GithubImportService<
    InMemoryTaskRepository,
    InMemoryCounterAllocator,
    InMemoryWorkspaceRepository,
    DefaultClock,
>;

/// External API dispatcher over the in-memory adapters.
pub type TestDispatchService = ApiDispatchService<
    InMemoryTaskRepository,
    InMemoryCounterAllocator,
    InMemoryWorkspaceRepository,
    DefaultClock,
    InMemoryApiKeyRepository,
>;

/// Membership service over the in-memory adapters.
pub type TestMembershipService = MembershipService<InMemoryWorkspaceRepository, DefaultClock>;

/// Invitation service over the in-memory adapters.
pub type TestInvitationService = InvitationService<
    InMemoryInvitationRepository,
    InMemoryWorkspaceRepository,
    DefaultClock,
>;

/// API key service over the in-memory adapters.
pub type TestApiKeyService =
    ApiKeyService<InMemoryApiKeyRepository, InMemoryWorkspaceRepository, DefaultClock>;

/// Kanban service over the in-memory repository.
pub type TestKanbanService = KanbanService<InMemoryTaskRepository>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// The full in-memory service stack, bootstrapped with one workspace and one
/// project.
pub struct Stack {
    pub tasks: TestTaskService,
    pub slack: TestSlackService,
    pub github: TestGithubService,
    pub dispatch: TestDispatchService,
    pub memberships: TestMembershipService,
    pub invitations: TestInvitationService,
    pub keys: TestApiKeyService,
    pub kanban: TestKanbanService,
    pub workspace: Workspace,
    pub project: Project,
    pub founder: UserId,
}

impl Stack {
    /// Builds the stack and seeds the "Acme" workspace (code `TM`) with its
    /// "Web" project (code `WEB`), founded by `founder`.
    ///
    /// # Errors
    ///
    /// Returns an error when bootstrap persistence fails.
    pub fn bootstrap(runtime: &Runtime) -> Result<Self, BoxError> {
        let workspaces = Arc::new(InMemoryWorkspaceRepository::new());
        let repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);

        let memberships = MembershipService::new(Arc::clone(&workspaces), Arc::clone(&clock));
        let founder = UserId::new("founder")?;
        let workspace =
            runtime.block_on(memberships.create_workspace("Acme", "TM", founder.clone()))?;
        let project = runtime.block_on(memberships.create_project(workspace.id(), "Web", "WEB"))?;

        let tasks = TaskService::new(
            Arc::clone(&repository),
            Arc::new(InMemoryCounterAllocator::new()),
            Arc::clone(&workspaces),
            Arc::clone(&clock),
            BoardFeed::default(),
        );
        let slack = SlackIngestService::new(
            tasks.clone(),
            Arc::new(InMemoryProcessedEventStore::new()),
        );
        let github = GithubImportService::new(tasks.clone());
        let keys = ApiKeyService::new(
            Arc::new(InMemoryApiKeyRepository::new()),
            Arc::clone(&workspaces),
            Arc::clone(&clock),
        );
        let dispatch =
            ApiDispatchService::new(tasks.clone(), keys.clone(), Arc::clone(&workspaces));
        let invitations = InvitationService::new(
            Arc::new(InMemoryInvitationRepository::new()),
            Arc::clone(&workspaces),
            clock,
        );
        let kanban = KanbanService::new(repository);

        Ok(Self {
            tasks,
            slack,
            github,
            dispatch,
            memberships,
            invitations,
            keys,
            kanban,
            workspace,
            project,
            founder,
        })
    }
}
