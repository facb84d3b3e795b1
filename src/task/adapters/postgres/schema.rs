//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with counter-scoped identity.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Project the task belongs to, if any.
        project_id -> Nullable<Uuid>,
        /// Connected source repository, if any.
        repository_id -> Nullable<Uuid>,
        /// Sequential number within the counter scope.
        task_number -> Int8,
        /// Derived human-readable identifier, unique and immutable.
        #[max_length = 30]
        display_id -> Varchar,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Free-form description.
        description -> Nullable<Text>,
        /// Kanban status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Work classification.
        #[max_length = 20]
        task_type -> Varchar,
        /// Provenance payload (tagged union).
        source -> Jsonb,
        /// Assigned user, if any.
        #[max_length = 255]
        assignee -> Nullable<Varchar>,
        /// Free-form labels.
        labels -> Jsonb,
        /// Code context payload, if any.
        code_context -> Nullable<Jsonb>,
        /// Attachment references.
        attachments -> Jsonb,
        /// AI-extraction metadata, if any.
        extraction -> Nullable<Jsonb>,
        /// Agent execution state (tagged union), if any.
        agent_execution -> Nullable<Jsonb>,
        /// GitHub linkage, if any.
        github_link -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp, set only while status is done.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Per-scope counters backing sequential task numbers.
    counters (scope_id, counter_type) {
        /// Workspace or project UUID owning the counter.
        scope_id -> Uuid,
        /// Kind of value handed out.
        #[max_length = 30]
        counter_type -> Varchar,
        /// Last allocated value.
        current_value -> Int8,
    }
}

diesel::table! {
    /// Append-only task activity log.
    task_activity (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the entry belongs to.
        task_id -> Uuid,
        /// Kind of change recorded.
        #[max_length = 30]
        activity_type -> Varchar,
        /// Value before the change, if captured.
        before_value -> Nullable<Text>,
        /// Value after the change, if captured.
        after_value -> Nullable<Text>,
        /// When the change was recorded.
        recorded_at -> Timestamptz,
    }
}

diesel::joinable!(task_activity -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(tasks, counters, task_activity);
