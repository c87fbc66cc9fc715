//! Plain-text transcript export.

use crate::orchestrator::ConversationMap;

/// File name offered when saving a transcript.
pub const TRANSCRIPT_FILENAME: &str = "brain-conversation.txt";

/// Renders the conversation map as plain text.
///
/// Each region becomes a block headed by `"{region}:"` followed by one
/// `"{role}: {content}"` line per message. Blocks are separated by a blank
/// line and appear in catalogue order.
#[must_use]
pub fn render_transcript(conversations: &ConversationMap) -> String {
    conversations
        .iter()
        .map(|transcript| {
            let mut block = format!("{}:", transcript.region);
            for message in &transcript.messages {
                block.push('\n');
                block.push_str(message.role.as_str());
                block.push_str(": ");
                block.push_str(&message.content);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
