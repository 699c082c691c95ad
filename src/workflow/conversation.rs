use std::collections::VecDeque;

use crate::context::AppContext;
use crate::dialog::{DialogEffect, dispatch, submit_ticket};
use crate::domain::activity::Reply;
use crate::domain::intent::RecognizedIntent;
use crate::error::AppResult;

/// Runs one inbound message through the conversation's dialog.
///
/// The stored session is loaded before the step and saved (or removed once
/// the dialog ends) before any outbound call is made.
pub async fn handle_message(
    ctx: &AppContext,
    conversation_id: &str,
    text: &str,
) -> AppResult<Vec<Reply>> {
    let transition = match ctx.sessions.load(conversation_id).await? {
        Some(session) => {
            tracing::debug!(
                conversation_id,
                dialog = session.kind().as_str(),
                "resuming dialog"
            );
            session.on_reply(text)
        }
        None => {
            let intent = recognize(ctx, text).await;
            tracing::debug!(
                conversation_id,
                intent = intent.as_ref().map(|intent| intent.name.as_str()),
                "dispatching message"
            );
            dispatch(intent.as_ref(), text)
        }
    };

    match &transition.session {
        Some(session) => ctx.sessions.save(conversation_id, session).await?,
        None => ctx.sessions.remove(conversation_id).await?,
    }

    run_effects(ctx, transition.effects).await
}

async fn recognize(ctx: &AppContext, text: &str) -> Option<RecognizedIntent> {
    match ctx.recognizer.recognize(text).await {
        Ok(intent) => intent,
        Err(err) => {
            tracing::warn!("intent recognition failed, using fallback: {err}");
            None
        }
    }
}

async fn run_effects(ctx: &AppContext, effects: Vec<DialogEffect>) -> AppResult<Vec<Reply>> {
    let mut pending: VecDeque<DialogEffect> = effects.into();
    let mut replies = Vec::new();

    while let Some(effect) = pending.pop_front() {
        match effect {
            DialogEffect::Send(reply) => replies.push(reply),
            DialogEffect::SubmitTicket(request) => {
                let outcome = ctx.ticket_api.submit_ticket(&request).await;
                match &outcome {
                    Ok(ticket_id) if ticket_id.is_rejected() => {
                        tracing::warn!("ticket API rejected the ticket")
                    }
                    Ok(ticket_id) => tracing::info!(ticket_id = %ticket_id.display_text(), "ticket created"),
                    Err(err) => tracing::warn!("ticket submission failed: {err}"),
                }
                pending.extend(submit_ticket::on_submitted(request, outcome));
            }
            DialogEffect::SendTicketCard { ticket_id, request } => {
                let card = ctx.cards.render(&ticket_id, &request)?;
                replies.push(Reply::adaptive_card(card));
            }
        }
    }

    Ok(replies)
}
