//! Domain model structs mirrored into the persisted snapshot.
//!
//! Every struct derives `Serialize` and `Deserialize` so the whole object
//! graph can be written to and read from the snapshot document unchanged.
//! Field names follow the storage document (camelCase).  Timestamps use the
//! tolerant [`flexible_timestamp`] codec: RFC 3339 text and Unix epoch
//! milliseconds both hydrate to a `DateTime<Utc>`, and a value that parses
//! as neither is coerced to the current instant rather than rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    User,
    Agent,
    Bot,
}

/// Delivery state of a message.
///
/// The store enforces no transition order; any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sending,
    Sent,
    Delivered,
    Read,
    Error,
}

/// Lifecycle status of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Archived,
    /// Marked deleted but still present in the collection.  Removal goes
    /// through the delete operation instead.
    Deleted,
}

/// Triage priority of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for ConversationPriority {
    fn default() -> Self {
        Self::Medium
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Caller-assigned identifier.  Uniqueness is not enforced; duplicate
    /// ids are stored as given.
    pub id: String,
    /// Message body.
    pub content: String,
    /// Who authored the message.
    pub sender: SenderRole,
    /// When the message was sent.
    #[serde(with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Delivery status.
    pub status: MessageStatus,
    /// Attached file metadata, if any.
    pub attachments: Option<Vec<Attachment>>,
    /// Id of the thread this message belongs to, if any.
    pub thread_id: Option<String>,
    /// Emoji reactions applied to this message.
    pub reactions: Option<Vec<Reaction>>,
    /// Human-readable description of a delivery failure.
    pub error: Option<String>,
}

/// Metadata for a file attached to a message.
///
/// Only metadata is stored; blob contents never enter the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Unique attachment identifier.
    pub id: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type as reported by the sender.
    pub mime_type: String,
    /// File size in bytes.
    pub size: u64,
    /// Download location, when the file lives somewhere fetchable.
    pub url: Option<String>,
}

/// An emoji reaction on a message.
///
/// `count` is carried as supplied by the caller and is not reconciled with
/// the length of `users` on add; the remove operation maintains the pair by
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    /// The emoji symbol.
    pub emoji: String,
    /// Aggregate count as reported by the caller.
    pub count: i64,
    /// Ids of the users who applied this reaction.
    pub users: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// A titled, ordered sequence of messages with lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Cached preview of the most recent message.
    pub last_message: String,
    /// When the conversation was last active.
    #[serde(with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Whether the conversation holds messages the user has not seen.
    pub unread: bool,
    /// Messages in the conversation, oldest first.
    pub messages: Vec<Message>,
    /// Lifecycle status.
    pub status: ConversationStatus,
    /// Triage priority.  Documents written before priorities existed omit
    /// the field; it defaults to medium.
    #[serde(default)]
    pub priority: ConversationPriority,
    /// Id of the agent this conversation is assigned to, if any.
    pub assignee: Option<String>,
    /// Labels applied to the conversation.  Kept duplicate-free by the tag
    /// operations.
    pub tags: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Thread
// ---------------------------------------------------------------------------

/// A secondary message sequence hanging off a parent message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    /// Unique thread identifier (a generated v4 UUID rendered as text).
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Id of the parent message.  Stored as given; the parent is never
    /// checked for existence.
    pub message_id: String,
    /// Messages in the thread, oldest first.
    pub messages: Vec<Message>,
    /// When the thread was created.
    #[serde(with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
    /// When the thread last changed.
    #[serde(with = "flexible_timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Ids of the users participating in the thread.
    pub participants: Vec<String>,
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

/// Partial update applied to a message by id.  `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePatch {
    pub content: Option<String>,
    pub status: Option<MessageStatus>,
    #[serde(default, with = "flexible_timestamp::option")]
    pub timestamp: Option<DateTime<Utc>>,
    pub attachments: Option<Vec<Attachment>>,
    pub thread_id: Option<String>,
    pub reactions: Option<Vec<Reaction>>,
    pub error: Option<String>,
}

/// Partial update applied to a thread by id.  `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPatch {
    pub title: Option<String>,
    pub participants: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Timestamp codec
// ---------------------------------------------------------------------------

/// Tolerant serde codec for instants.
///
/// Writes RFC 3339 text.  Reads RFC 3339 text or a Unix epoch in
/// milliseconds (integer or float); any other value, nulls and wrong
/// types included, is coerced to the current instant and reported,
/// never rejected.
pub mod flexible_timestamp {
    use std::fmt;

    use chrono::{DateTime, Utc};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }

    struct TimestampVisitor;

    impl<'de> Visitor<'de> for TimestampVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an RFC 3339 string or a Unix epoch in milliseconds")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(coerce_str(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(coerce_millis(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if value > i64::MAX as u64 {
                tracing::warn!(value = value, "timestamp out of range, substituting current time");
                Ok(Utc::now())
            } else {
                Ok(coerce_millis(value as i64))
            }
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(coerce_millis(value as i64))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            tracing::warn!("null timestamp, substituting current time");
            Ok(Utc::now())
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            tracing::warn!(value = value, "non-temporal timestamp, substituting current time");
            Ok(Utc::now())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            tracing::warn!("non-temporal timestamp, substituting current time");
            Ok(Utc::now())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
            tracing::warn!("non-temporal timestamp, substituting current time");
            Ok(Utc::now())
        }
    }

    fn coerce_str(value: &str) -> DateTime<Utc> {
        match DateTime::parse_from_rfc3339(value) {
            Ok(instant) => instant.with_timezone(&Utc),
            Err(error) => {
                tracing::warn!(
                    value = %value,
                    error = %error,
                    "unparseable timestamp, substituting current time"
                );
                Utc::now()
            }
        }
    }

    fn coerce_millis(millis: i64) -> DateTime<Utc> {
        match DateTime::from_timestamp_millis(millis) {
            Some(instant) => instant,
            None => {
                tracing::warn!(value = millis, "timestamp out of range, substituting current time");
                Utc::now()
            }
        }
    }

    /// Same codec for `Option<DateTime<Utc>>` fields.
    pub mod option {
        use std::fmt;

        use chrono::{DateTime, Utc};
        use serde::de::{self, Visitor};
        use serde::{Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(instant) => super::serialize(instant, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct OptionVisitor;

            impl<'de> Visitor<'de> for OptionVisitor {
                type Value = Option<DateTime<Utc>>;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("an optional RFC 3339 string or Unix epoch in milliseconds")
                }

                fn visit_none<E>(self) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(None)
                }

                fn visit_unit<E>(self) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(None)
                }

                fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
                where
                    D2: Deserializer<'de>,
                {
                    super::deserialize(deserializer).map(Some)
                }
            }

            deserializer.deserialize_option(OptionVisitor)
        }
    }
}
