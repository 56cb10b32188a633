//! Classification of export entries that are not ordinary text messages.
//!
//! Two different things happen here:
//! - *System events* (group membership, encryption notices) are dropped
//!   before they ever become records.
//! - *Placeholders* (omitted media, deleted messages) stay messages but
//!   contribute no words.

use crate::message::MessageKind;

/// Left-to-right mark. iOS prefixes system notices and attachments with it.
pub const LRM: char = '\u{200e}';

/// Marker WhatsApp appends to edited messages.
pub const EDITED_MARKER: &str = "<This message was edited>";

/// Bodies (lower-cased, trimmed) that stand in for a media attachment.
const MEDIA_PLACEHOLDERS: &[&str] = &[
    "<media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "gif omitted",
    "document omitted",
    "contact card omitted",
    "<video message omitted>",
    "<voice message omitted>",
    "view once message omitted",
];

/// Bodies (lower-cased, trimmed, trailing dot removed) left by a deletion.
const DELETED_PLACEHOLDERS: &[&str] = &["this message was deleted", "you deleted this message"];

/// Notices that quote user text, which may contain a colon, e.g.
/// `Alice changed the subject from "a: b"`. The colon then splits the
/// notice into a fake sender, so the phrase must be followed by an opening
/// quote inside that sender. Matched against the lower-cased sender with a
/// leading space.
///
/// Notices without quoted text (`added`, `left`, ...) never contain a colon
/// and are caught before any sender is split off.
const QUOTING_NOTICE_PHRASES: &[&str] = &[
    " changed the subject from ",
    " changed the subject to ",
    " changed the group name from ",
    " changed the group name to ",
    " changed the group description to ",
    " created group ",
];

const OPENING_QUOTES: [char; 2] = ['"', '\u{201c}'];

/// Complete notice bodies (lower-cased, trimmed, trailing dot removed).
/// A user message that merely starts like one of these is still a message.
const NOTICE_BODIES: &[&str] = &[
    "messages and calls are end-to-end encrypted",
    "messages and calls are end-to-end encrypted. no one outside of this chat, not even whatsapp, can read or listen to them",
    "messages and calls are end-to-end encrypted. no one outside of this chat, not even whatsapp, can read or listen to them. tap to learn more",
    "messages to this group are now secured with end-to-end encryption",
    "messages to this group are now secured with end-to-end encryption. tap for more info",
    "messages you send to this group are now secured with end-to-end encryption. tap for more info",
];

fn placeholder_key(body: &str) -> String {
    body.trim()
        .trim_start_matches(LRM)
        .trim()
        .trim_end_matches('.')
        .to_lowercase()
}

/// Returns `true` if `body` is an attachment marker such as `<attached: x.jpg>`.
pub fn is_attachment(body: &str) -> bool {
    body.trim().trim_start_matches(LRM).starts_with("<attached:")
}

/// Determines the kind of an accepted message from its body.
pub fn message_kind(body: &str) -> MessageKind {
    let key = placeholder_key(body);
    if is_attachment(body)
        || MEDIA_PLACEHOLDERS.contains(&key.as_str())
        || key.ends_with(" document omitted")
    {
        MessageKind::Media
    } else if DELETED_PLACEHOLDERS.contains(&key.as_str()) {
        MessageKind::Deleted
    } else {
        MessageKind::Text
    }
}

/// Removes the trailing edit marker, if any.
pub fn strip_edited_marker(body: &str) -> &str {
    let trimmed = body.trim_end();
    trimmed
        .strip_suffix(EDITED_MARKER)
        .map(|rest| rest.trim_end_matches(LRM).trim_end())
        .unwrap_or(body)
}

/// Returns `true` if the sender slot of an entry is the start of a notice
/// that quotes user text.
pub fn is_system_sender(sender: &str) -> bool {
    let padded = format!(" {}", sender.trim_start_matches(LRM).to_lowercase());
    QUOTING_NOTICE_PHRASES.iter().any(|phrase| {
        padded
            .match_indices(phrase)
            .any(|(i, _)| padded[i + phrase.len()..].starts_with(OPENING_QUOTES))
    })
}

/// Returns `true` if an entry body is a notice rather than user text.
///
/// iOS marks notices with a leading [`LRM`]; attachments carry the same mark
/// and are not notices. Without the mark only a complete notice text counts.
pub fn is_system_body(body: &str) -> bool {
    let trimmed = body.trim_start_matches(' ');
    if trimmed.starts_with(LRM) && message_kind(trimmed) == MessageKind::Text {
        return true;
    }
    let key = body.trim().trim_end_matches('.').to_lowercase();
    NOTICE_BODIES.contains(&key.as_str())
}
