//! Terminal rendering of catalogs, history and drafts

use std::fmt::Write as _;

use domain::{
    Client, DraftMessage, IdentityNormalizer, Message, MessageSummary, Product, RoleCategory,
};

fn id_of<E: domain::HasIdentity>(entity: &E) -> String {
    IdentityNormalizer::resolve(entity).map_or_else(|| "-".to_string(), |id| id.into_inner())
}

/// One line per client
pub fn clients(clients: &[Client]) -> String {
    let mut out = String::new();
    for client in clients {
        let _ = writeln!(
            out,
            "{:<26} {:<40} {}",
            id_of(client),
            client.display_label(),
            client.role_category
        );
    }
    out
}

/// Product list with per-role benefits
pub fn products(products: &[Product]) -> String {
    let mut out = String::new();
    for product in products {
        let _ = writeln!(out, "{:<26} {}", id_of(product), product.name);
        if !product.description.is_empty() {
            let _ = writeln!(out, "    {}", product.description);
        }
        for role in RoleCategory::ALL {
            let benefits = product.benefits_for(role);
            if !benefits.is_empty() {
                let _ = writeln!(out, "    {role}: {}", benefits.join("; "));
            }
        }
    }
    out
}

/// Follow-up candidates, newest first
pub fn history(messages: &[MessageSummary]) -> String {
    if messages.is_empty() {
        return "No previous messages\n".to_string();
    }
    let mut out = String::new();
    for summary in messages {
        let _ = writeln!(out, "{:<26} {}", id_of(summary), summary.label());
    }
    out
}

/// Draft as shown for review
pub fn draft(draft: &DraftMessage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Draft {} ({})", draft.id, draft.message_type.label());
    if let Some(subject) = &draft.subject {
        let _ = writeln!(out, "Subject: {subject}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", draft.content);
    out
}

/// Saved message as the service stored it
pub fn committed(message: &Message) -> String {
    let mut out = String::new();
    if let Some(subject) = &message.subject {
        let _ = writeln!(out, "Subject: {subject}");
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "{}", message.content);
    let _ = writeln!(out);
    let _ = writeln!(out, "Saved message {} [{}]", id_of(message), message.status);
    out
}
