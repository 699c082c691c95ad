use serde::{Deserialize, Serialize};

use crate::dialog::{DialogEffect, DialogSession, Transition};
use crate::domain::activity::Reply;
use crate::domain::intent::RecognizedIntent;
use crate::domain::ticket::{Severity, TicketId, TicketRequest};
use crate::error::AppResult;

pub const CATEGORY_ENTITY: &str = "category";
pub const SEVERITY_ENTITY: &str = "severity";

pub const SEVERITY_PROMPT: &str = "Which is the severity of this problem?";
pub const CATEGORY_PROMPT: &str =
    "Which would be the category for this ticket (software, hardware, network, and so on)?";
pub const CHOICE_RETRY_PROMPT: &str = "I didn't understand. Please choose an option from the list.";
pub const CONFIRM_RETRY_PROMPT: &str = "I didn't understand. Please answer yes or no.";
pub const CANCELLED_MESSAGE: &str =
    "Ok. The ticket was not created. You can start again if you want.";
pub const SUBMIT_FAILED_MESSAGE: &str =
    "Something went wrong while I was saving your ticket. Please try again later.";

const CONFIRM_CHOICES: [&str; 2] = ["Yes", "No"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CollectSeverity,
    CollectCategory,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSession {
    pub step: Step,
    pub category: Option<String>,
    pub severity: Option<Severity>,
    pub description: String,
}

impl TicketSession {
    /// Starts the dialog from the message that triggered it.
    ///
    /// Entities already resolved by the recognizer skip their prompts; the raw
    /// message text becomes the description.
    pub fn start(intent: &RecognizedIntent, text: &str) -> Transition {
        let session = Self {
            step: Step::CollectSeverity,
            category: intent.resolved_entity(CATEGORY_ENTITY).map(str::to_string),
            severity: intent.resolved_entity(SEVERITY_ENTITY).map(Severity::parse),
            description: text.to_string(),
        };
        session.next_prompt()
    }

    pub fn on_reply(mut self, text: &str) -> Transition {
        match self.step {
            Step::CollectSeverity => match parse_severity_choice(text) {
                Some(severity) => {
                    self.severity = Some(severity);
                    self.next_prompt()
                }
                None => self.suspend(
                    Step::CollectSeverity,
                    Reply::prompt(CHOICE_RETRY_PROMPT, severity_choices()),
                ),
            },
            Step::CollectCategory => {
                self.category = Some(text.to_string());
                self.next_prompt()
            }
            Step::Confirm => match parse_confirmation(text) {
                Some(true) => match self.request() {
                    Some(request) => Transition::end(vec![DialogEffect::SubmitTicket(request)]),
                    None => self.next_prompt(),
                },
                Some(false) => Transition::end_with(Reply::text(CANCELLED_MESSAGE)),
                None => self.suspend(
                    Step::Confirm,
                    Reply::prompt(CONFIRM_RETRY_PROMPT, confirm_choices()),
                ),
            },
        }
    }

    pub fn request(&self) -> Option<TicketRequest> {
        Some(TicketRequest {
            category: self.category.clone()?,
            severity: self.severity.clone()?,
            description: self.description.clone(),
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "Great! I'm going to create a \"{}\" severity ticket in the \"{}\" category. \
             The description I will use is \"{}\". Can you please confirm that this information is correct?",
            self.severity.as_ref().map(Severity::as_str).unwrap_or_default(),
            self.category.as_deref().unwrap_or_default(),
            self.description
        )
    }

    fn next_prompt(self) -> Transition {
        if self.severity.is_none() {
            return self.suspend(
                Step::CollectSeverity,
                Reply::prompt(SEVERITY_PROMPT, severity_choices()),
            );
        }
        if self.category.is_none() {
            return self.suspend(Step::CollectCategory, Reply::text(CATEGORY_PROMPT));
        }
        let summary = self.summary();
        self.suspend(Step::Confirm, Reply::prompt(summary, confirm_choices()))
    }

    fn suspend(mut self, step: Step, prompt: Reply) -> Transition {
        self.step = step;
        Transition::suspend(DialogSession::SubmitTicket(self), prompt)
    }
}

/// Effects that follow the ticket API call made for `request`.
pub fn on_submitted(request: TicketRequest, outcome: AppResult<TicketId>) -> Vec<DialogEffect> {
    match outcome {
        Ok(ticket_id) if !ticket_id.is_rejected() => {
            vec![DialogEffect::SendTicketCard { ticket_id, request }]
        }
        Ok(_) | Err(_) => vec![DialogEffect::Send(Reply::text(SUBMIT_FAILED_MESSAGE))],
    }
}

fn severity_choices() -> Vec<String> {
    Severity::CHOICES
        .iter()
        .map(|severity| severity.as_str().to_string())
        .collect()
}

fn confirm_choices() -> Vec<String> {
    CONFIRM_CHOICES.iter().map(|choice| choice.to_string()).collect()
}

/// Matches a reply against the severity choices by name or 1-based position.
fn parse_severity_choice(text: &str) -> Option<Severity> {
    let answer = text.trim().to_lowercase();
    if let Ok(position) = answer.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| Severity::CHOICES.get(index).cloned());
    }
    Severity::CHOICES
        .iter()
        .find(|severity| severity.as_str() == answer)
        .cloned()
}

fn parse_confirmation(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "yes" | "y" | "yep" | "sure" | "ok" | "true" | "1" => Some(true),
        "no" | "n" | "nope" | "false" | "2" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn prompts(transition: &Transition) -> Vec<&Reply> {
        transition
            .effects
            .iter()
            .filter_map(|effect| match effect {
                DialogEffect::Send(reply) => Some(reply),
                _ => None,
            })
            .collect()
    }

    fn session_of(transition: &Transition) -> TicketSession {
        match transition.session.clone() {
            Some(DialogSession::SubmitTicket(session)) => session,
            None => panic!("dialog ended unexpectedly"),
        }
    }

    #[test]
    fn prompts_for_severity_when_nothing_was_recognized() {
        let transition = TicketSession::start(&RecognizedIntent::new("SubmitTicket"), "my pc is slow");

        let session = session_of(&transition);
        assert_eq!(session.step, Step::CollectSeverity);
        assert_eq!(session.description, "my pc is slow");
        let replies = prompts(&transition);
        assert_eq!(replies[0].text.as_deref(), Some(SEVERITY_PROMPT));
        assert_eq!(replies[0].suggested_actions, vec!["high", "normal", "low"]);
    }

    #[test]
    fn skips_to_confirmation_when_entities_are_present() {
        let intent = RecognizedIntent::new("SubmitTicket")
            .with_entity(CATEGORY_ENTITY, "hardware")
            .with_entity(SEVERITY_ENTITY, "high");

        let transition = TicketSession::start(&intent, "cannot print");

        let session = session_of(&transition);
        assert_eq!(session.step, Step::Confirm);
        let replies = prompts(&transition);
        assert_eq!(replies.len(), 1);
        assert_eq!(
            replies[0].text.as_deref(),
            Some(
                "Great! I'm going to create a \"high\" severity ticket in the \"hardware\" category. \
                 The description I will use is \"cannot print\". Can you please confirm that this information is correct?"
            )
        );
        assert_eq!(replies[0].suggested_actions, vec!["Yes", "No"]);
    }

    #[test]
    fn asks_for_category_when_only_severity_is_known() {
        let intent = RecognizedIntent::new("SubmitTicket").with_entity(SEVERITY_ENTITY, "low");

        let transition = TicketSession::start(&intent, "need a new mouse");

        assert_eq!(session_of(&transition).step, Step::CollectCategory);
        assert_eq!(prompts(&transition)[0].text.as_deref(), Some(CATEGORY_PROMPT));
    }

    #[test]
    fn walks_every_step_to_submission() {
        let start = TicketSession::start(&RecognizedIntent::new("SubmitTicket"), "cannot print");

        let after_severity = session_of(&start).on_reply("High");
        assert_eq!(session_of(&after_severity).step, Step::CollectCategory);

        let after_category = session_of(&after_severity).on_reply("hardware");
        assert_eq!(session_of(&after_category).step, Step::Confirm);

        let done = session_of(&after_category).on_reply("yes");
        assert!(done.is_finished());
        assert_eq!(
            done.effects,
            vec![DialogEffect::SubmitTicket(TicketRequest {
                category: "hardware".to_string(),
                severity: Severity::High,
                description: "cannot print".to_string(),
            })]
        );
    }

    #[test]
    fn accepts_choice_by_position() {
        let start = TicketSession::start(&RecognizedIntent::new("SubmitTicket"), "x");
        let next = session_of(&start).on_reply("2");
        assert_eq!(session_of(&next).severity, Some(Severity::Normal));
    }

    #[test]
    fn reprompts_on_unknown_choice_without_losing_state() {
        let intent = RecognizedIntent::new("SubmitTicket").with_entity(CATEGORY_ENTITY, "network");
        let start = TicketSession::start(&intent, "wifi is down");

        let retry = session_of(&start).on_reply("whenever");

        let session = session_of(&retry);
        assert_eq!(session.step, Step::CollectSeverity);
        assert_eq!(session.category.as_deref(), Some("network"));
        assert_eq!(prompts(&retry)[0].text.as_deref(), Some(CHOICE_RETRY_PROMPT));

        let out_of_range = session_of(&retry).on_reply("4");
        assert_eq!(session_of(&out_of_range).step, Step::CollectSeverity);
    }

    #[test]
    fn category_reply_is_stored_verbatim() {
        let intent = RecognizedIntent::new("SubmitTicket").with_entity(SEVERITY_ENTITY, "normal");
        let start = TicketSession::start(&intent, "x");

        let next = session_of(&start).on_reply("  Office \"supplies\" ");

        assert_eq!(
            session_of(&next).category.as_deref(),
            Some("  Office \"supplies\" ")
        );
    }

    #[test]
    fn declining_ends_without_submission() {
        let intent = RecognizedIntent::new("SubmitTicket")
            .with_entity(CATEGORY_ENTITY, "software")
            .with_entity(SEVERITY_ENTITY, "normal");
        let start = TicketSession::start(&intent, "excel crashes");

        let done = session_of(&start).on_reply("No");

        assert!(done.is_finished());
        assert_eq!(
            done.effects,
            vec![DialogEffect::Send(Reply::text(CANCELLED_MESSAGE))]
        );
    }

    #[test]
    fn unclear_confirmation_reprompts() {
        let intent = RecognizedIntent::new("SubmitTicket")
            .with_entity(CATEGORY_ENTITY, "software")
            .with_entity(SEVERITY_ENTITY, "normal");
        let start = TicketSession::start(&intent, "excel crashes");

        let retry = session_of(&start).on_reply("maybe");

        assert_eq!(session_of(&retry).step, Step::Confirm);
        assert_eq!(prompts(&retry)[0].text.as_deref(), Some(CONFIRM_RETRY_PROMPT));
    }

    #[test]
    fn confirmation_with_missing_fields_resumes_collection() {
        let session = TicketSession {
            step: Step::Confirm,
            category: None,
            severity: Some(Severity::High),
            description: "x".to_string(),
        };

        let next = session.on_reply("yes");

        assert_eq!(session_of(&next).step, Step::CollectCategory);
    }

    #[test]
    fn successful_submission_sends_card() {
        let request = TicketRequest {
            category: "hardware".to_string(),
            severity: Severity::High,
            description: "cannot print".to_string(),
        };

        let effects = on_submitted(request.clone(), Ok(TicketId::from(42)));

        assert_eq!(
            effects,
            vec![DialogEffect::SendTicketCard {
                ticket_id: TicketId::from(42),
                request,
            }]
        );
    }

    #[test]
    fn rejected_or_failed_submission_sends_failure_message() {
        let request = TicketRequest {
            category: "hardware".to_string(),
            severity: Severity::High,
            description: "cannot print".to_string(),
        };
        let failure = vec![DialogEffect::Send(Reply::text(SUBMIT_FAILED_MESSAGE))];

        assert_eq!(on_submitted(request.clone(), Ok(TicketId::from(-1))), failure);
        assert_eq!(
            on_submitted(request, Err(AppError::TicketApi("timed out".to_string()))),
            failure
        );
    }
}
