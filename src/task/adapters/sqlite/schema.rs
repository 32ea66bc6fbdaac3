//! Diesel schema for task persistence.

diesel::table! {
    /// Owner-scoped reminder tasks.
    tasks (id) {
        /// Store-assigned identifier, never reused.
        id -> BigInt,
        /// Owning chat user.
        owner_id -> BigInt,
        /// Free-text task label.
        description -> Text,
        /// Due timestamp as RFC 3339 with its original offset.
        due_at -> Text,
        /// Due timestamp as fixed-width RFC 3339 UTC, used for filtering and
        /// ordering.
        due_at_utc -> Text,
        /// Reference of the mirrored calendar event.
        external_event_ref -> Nullable<Text>,
        /// Insertion timestamp as RFC 3339 UTC.
        created_at -> Text,
    }
}
