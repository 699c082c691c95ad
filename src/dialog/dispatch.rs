use crate::dialog::submit_ticket::TicketSession;
use crate::dialog::{Transition, help};
use crate::domain::activity::Reply;
use crate::domain::intent::RecognizedIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Help,
    SubmitTicket,
}

impl DialogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Help => "Help",
            DialogKind::SubmitTicket => "SubmitTicket",
        }
    }

    pub fn from_intent(name: &str) -> Option<Self> {
        match name {
            "Help" => Some(DialogKind::Help),
            "SubmitTicket" => Some(DialogKind::SubmitTicket),
            _ => None,
        }
    }
}

pub fn fallback_message(text: &str) -> String {
    format!("I'm sorry, I did not understand '{text}'.\nType 'help' to know more about me :)")
}

/// Starts the dialog registered for `intent`, or answers with the fallback.
pub fn dispatch(intent: Option<&RecognizedIntent>, text: &str) -> Transition {
    let matched = intent.and_then(|intent| {
        DialogKind::from_intent(&intent.name).map(|kind| (kind, intent))
    });

    match matched {
        Some((DialogKind::Help, _)) => help::run(),
        Some((DialogKind::SubmitTicket, intent)) => TicketSession::start(intent, text),
        None => Transition::end_with(Reply::text(fallback_message(text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::help::HELP_MESSAGE;
    use crate::dialog::{DialogEffect, DialogSession};

    #[test]
    fn routes_help_intent() {
        let transition = dispatch(Some(&RecognizedIntent::new("Help")), "help");
        assert!(transition.is_finished());
        assert_eq!(
            transition.effects,
            vec![DialogEffect::Send(Reply::text(HELP_MESSAGE))]
        );
    }

    #[test]
    fn routes_submit_ticket_intent() {
        let transition = dispatch(Some(&RecognizedIntent::new("SubmitTicket")), "cannot print");
        assert!(matches!(
            transition.session,
            Some(DialogSession::SubmitTicket(_))
        ));
    }

    #[test]
    fn unknown_or_missing_intent_falls_back() {
        let expected = vec![DialogEffect::Send(Reply::text(
            "I'm sorry, I did not understand 'hello'.\nType 'help' to know more about me :)",
        ))];

        let unknown = dispatch(Some(&RecognizedIntent::new("None")), "hello");
        assert!(unknown.is_finished());
        assert_eq!(unknown.effects, expected);

        let missing = dispatch(None, "hello");
        assert_eq!(missing.effects, expected);
    }

    #[test]
    fn intent_names_are_case_sensitive() {
        assert_eq!(DialogKind::from_intent("help"), None);
        assert_eq!(
            DialogKind::from_intent(DialogKind::SubmitTicket.as_str()),
            Some(DialogKind::SubmitTicket)
        );
    }
}
