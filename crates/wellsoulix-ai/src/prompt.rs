//! Prompt construction for the companion persona

use wellsoulix_storage::{Attachment, Mode};

/// Tag every reply is expected to open with
#[must_use]
pub fn mode_tag(mode: Mode) -> String {
    format!("[Mode: {mode}]")
}

/// System instruction sent alongside every generation call.
///
/// The backend is asked to open with the mode tag and keep replies short;
/// callers must not rely on it doing so.
#[must_use]
pub fn system_instruction(mode: Mode) -> String {
    let config = mode.config();
    format!(
        "You are Wellsoulix, an AI-powered student companion.\n\
         Current Active Mode: {mode}\n\
         Tone Style: {description}. Use {color} vibes.\n\
         \n\
         SPECIAL FEATURE:\n\
         The user might send attachments (Images, Links, or Docs).\n\
         - If it's an image, describe it briefly and relate it to your mode.\n\
         - If it's a link, acknowledge it.\n\
         - If it's a doc, help them organize or summarize if they ask.\n\
         \n\
         GENERAL RULES:\n\
         1. ALWAYS start your reply with: \"{tag}\"\n\
         2. Keep responses short (2-4 sentences).\n\
         3. Be friendly, supportive, and practical.\n\
         4. Use emojis sparingly.",
        description = config.description,
        color = config.color,
        tag = mode_tag(mode),
    )
}

/// Prompt text for the user turn. Links and docs are flattened into the
/// text; images travel as inline data and leave the prompt unchanged.
#[must_use]
pub fn user_prompt(prompt: &str, attachment: Option<&Attachment>) -> String {
    match attachment {
        Some(att @ (Attachment::Link { .. } | Attachment::Doc { .. })) => {
            format!("[Attachment: {} - {}] {prompt}", att.kind(), att.data())
        }
        Some(Attachment::Image { .. }) | None => prompt.to_string(),
    }
}
