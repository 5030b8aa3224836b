//! Support inbox: conversations grouped per user.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::HostalResult;
use crate::forms::SupportMessageForm;
use crate::models::SupportMessage;

/// All messages exchanged with one user, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub user_id: String,
    pub messages: Vec<SupportMessage>,
}

impl Conversation {
    /// Client messages the administrators have not read yet.
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| is_unread_from_client(m)).count()
    }

    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.messages.iter().filter_map(|m| m.sent_at).max()
    }

    pub fn last_message(&self) -> Option<&SupportMessage> {
        self.messages.last()
    }

    pub fn unread_ids(&self) -> Vec<i64> {
        self.messages
            .iter()
            .filter(|m| is_unread_from_client(m))
            .filter_map(|m| m.id)
            .collect()
    }
}

fn is_unread_from_client(message: &SupportMessage) -> bool {
    !message.is_from_admin() && !message.is_read()
}

/// Groups messages by user. Conversations with the most recent activity
/// come first; messages without a user are dropped.
pub fn group_conversations(messages: Vec<SupportMessage>) -> Vec<Conversation> {
    let mut by_user: BTreeMap<String, Vec<SupportMessage>> = BTreeMap::new();
    for message in messages {
        if let Some(user_id) = message.user_id.clone() {
            by_user.entry(user_id).or_default().push(message);
        }
    }

    let mut conversations: Vec<Conversation> = by_user
        .into_iter()
        .map(|(user_id, mut messages)| {
            messages.sort_by_key(|m| (m.sent_at, m.id));
            Conversation { user_id, messages }
        })
        .collect();

    conversations.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
    conversations
}

/// Total unread client messages across `messages`.
pub fn unread_count(messages: &[SupportMessage]) -> usize {
    messages.iter().filter(|m| is_unread_from_client(m)).count()
}

/// Loads every message and groups it into conversations.
pub async fn load_conversations(api: &ApiClient, page_size: u32) -> HostalResult<Vec<Conversation>> {
    let messages = api.support_messages().list_all(page_size).await?;
    Ok(group_conversations(messages))
}

pub async fn load_conversation(api: &ApiClient, user_id: &str) -> HostalResult<Conversation> {
    let messages = api.support_messages().for_user(user_id).await?;
    Ok(Conversation {
        user_id: user_id.to_string(),
        messages,
    })
}

/// Sends an administrator reply to `user_id`.
pub async fn reply(api: &ApiClient, user_id: &str, text: &str) -> HostalResult<SupportMessage> {
    let message = SupportMessageForm::new(text).into_message(user_id)?;
    let sent = api.support_messages().create(&message).await?;
    info!(user_id, message_id = ?sent.id, "Reply sent");
    Ok(sent)
}

/// Marks every unread client message in the conversation as read and
/// returns how many were updated.
pub async fn mark_conversation_read(api: &ApiClient, user_id: &str) -> HostalResult<usize> {
    let conversation = load_conversation(api, user_id).await?;
    let ids = conversation.unread_ids();
    for id in &ids {
        api.support_messages().mark_read(*id).await?;
    }
    if !ids.is_empty() {
        info!(user_id, count = ids.len(), "Conversation marked as read");
    }
    Ok(ids.len())
}
