//! Diesel schema for inbound event deduplication.

diesel::table! {
    /// Claimed Slack events, keyed by workspace and event timestamp.
    processed_slack_events (workspace_id, event_ts) {
        /// Workspace the event was delivered for.
        workspace_id -> Uuid,
        /// Slack event timestamp, unique per workspace delivery.
        #[max_length = 30]
        event_ts -> Varchar,
        /// When the claim was recorded.
        processed_at -> Timestamptz,
    }
}
