use crate::dialog::Transition;
use crate::domain::activity::Reply;

pub const HELP_MESSAGE: &str = "I'm the help desk bot and I can help you create a ticket.\n\
You can tell me things like _I need to reset my password_ or _I cannot print_.";

pub fn run() -> Transition {
    Transition::end_with(Reply::text(HELP_MESSAGE))
}
