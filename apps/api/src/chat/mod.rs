// Career advisor chat: scripted keyword replies, no model behind it.

pub mod handlers;
pub mod replies;
