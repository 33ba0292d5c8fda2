// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt assembly for the chat-completion request

use crate::inference::ChatMessage;
use crate::session::{ConversationTurn, Role};
use crate::vector::RetrievedDocument;

/// System instruction for answer synthesis. Retrieved documents are stuffed
/// into the `{context}` placeholder.
pub const SYSTEM_PROMPT: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer the question. \
If you don't know the answer, say that you don't know. \
Use three sentences maximum and keep the answer concise.\n\n{context}";

const CONTEXT_PLACEHOLDER: &str = "{context}";
const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Assemble the full message list for one answer: system instruction with
/// retrieved context, prior conversation turns, then the current question.
///
/// The buffered history already ends with the just-appended user turn for
/// the current question; that trailing turn is emitted once, as the final
/// user message, not twice.
pub fn build_messages(
    system_prompt: &str,
    docs: &[RetrievedDocument],
    history: &[ConversationTurn],
    message: &str,
) -> Vec<ChatMessage> {
    let context = docs
        .iter()
        .map(|d| d.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR);

    let system = if system_prompt.contains(CONTEXT_PLACEHOLDER) {
        system_prompt.replace(CONTEXT_PLACEHOLDER, &context)
    } else {
        format!("{system_prompt}{DOCUMENT_SEPARATOR}{context}")
    };

    let prior = match history.split_last() {
        Some((last, rest)) if last.role == Role::User && last.content == message => rest,
        _ => history,
    };

    let mut messages = Vec::with_capacity(prior.len() + 2);
    messages.push(ChatMessage::system(system));
    for turn in prior {
        messages.push(ChatMessage::new(turn.role.as_str(), turn.content.clone()));
    }
    messages.push(ChatMessage::user(message));
    messages
}
