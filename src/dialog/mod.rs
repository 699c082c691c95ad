//! Dialog state machines.
//!
//! Dialogs are pure: they take the stored session plus an event and return the
//! next session (if the dialog is still running) and the effects the
//! conversation runner must carry out. Nothing in here touches the network or
//! the session store.

pub mod dispatch;
pub mod help;
pub mod submit_ticket;

use serde::{Deserialize, Serialize};

use crate::domain::activity::Reply;
use crate::domain::ticket::{TicketId, TicketRequest};

pub use dispatch::{DialogKind, dispatch};
pub use submit_ticket::TicketSession;

/// Per-conversation state of the dialog that is waiting for a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dialog", rename_all = "snake_case")]
pub enum DialogSession {
    SubmitTicket(TicketSession),
}

impl DialogSession {
    pub fn kind(&self) -> DialogKind {
        match self {
            DialogSession::SubmitTicket(_) => DialogKind::SubmitTicket,
        }
    }

    pub fn on_reply(self, text: &str) -> Transition {
        match self {
            DialogSession::SubmitTicket(session) => session.on_reply(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogEffect {
    Send(Reply),
    SubmitTicket(TicketRequest),
    SendTicketCard {
        ticket_id: TicketId,
        request: TicketRequest,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// `None` once the dialog has ended and its state should be discarded.
    pub session: Option<DialogSession>,
    pub effects: Vec<DialogEffect>,
}

impl Transition {
    pub fn suspend(session: DialogSession, prompt: Reply) -> Self {
        Self {
            session: Some(session),
            effects: vec![DialogEffect::Send(prompt)],
        }
    }

    pub fn end(effects: Vec<DialogEffect>) -> Self {
        Self {
            session: None,
            effects,
        }
    }

    pub fn end_with(reply: Reply) -> Self {
        Self::end(vec![DialogEffect::Send(reply)])
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_none()
    }
}
