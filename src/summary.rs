//! One-line descriptions of updates for the log.

use tgpoll_core::entities::{Message, Update, UpdateKind};

/// Longest text excerpt shown.
const MAX_EXCERPT: usize = 60;

pub fn describe(update: &Update) -> String {
    let id = update.update_id;
    let Some(kind) = update.kind() else {
        return format!("#{id} (unhandled kind)");
    };

    let detail = match kind {
        UpdateKind::Message
        | UpdateKind::EditedMessage
        | UpdateKind::ChannelPost
        | UpdateKind::EditedChannelPost => update.any_message().map(describe_message),
        UpdateKind::CallbackQuery => update.callback_query.as_ref().map(|q| {
            format!(
                "from {} data={}",
                q.from.display_name(),
                q.data.as_deref().unwrap_or("-")
            )
        }),
        UpdateKind::InlineQuery => update
            .inline_query
            .as_ref()
            .map(|q| format!("from {} query={:?}", q.from.display_name(), excerpt(&q.query))),
        UpdateKind::ChosenInlineResult => update
            .chosen_inline_result
            .as_ref()
            .map(|r| format!("from {} result={}", r.from.display_name(), r.result_id)),
        UpdateKind::MyChatMember | UpdateKind::ChatMember => update
            .my_chat_member
            .as_ref()
            .or(update.chat_member.as_ref())
            .map(|c| {
                format!(
                    "chat {} user {}: {} -> {}",
                    c.chat.id,
                    c.new_chat_member.user.display_name(),
                    c.old_chat_member.status,
                    c.new_chat_member.status
                )
            }),
    };

    format!("#{id} {kind} {}", detail.unwrap_or_default())
}

fn describe_message(msg: &Message) -> String {
    let sender = match (&msg.from, &msg.sender_chat) {
        (Some(user), _) => user.display_name(),
        (None, Some(chat)) => chat
            .title
            .clone()
            .unwrap_or_else(|| chat.id.to_string()),
        (None, None) => "unknown".to_string(),
    };
    let body = msg
        .text_or_caption()
        .map(|t| format!("{:?}", excerpt(t)))
        .unwrap_or_else(|| "(no text)".to_string());
    format!(
        "chat {} ({}) from {sender}: {body}",
        msg.chat.id,
        msg.chat.chat_type.as_str()
    )
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= MAX_EXCERPT {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_EXCERPT).collect();
    format!("{cut}…")
}
