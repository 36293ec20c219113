//! Messaging wire types: messages, conversations, paginated list shapes.

pub mod conversation;
pub mod message;
pub mod page;

pub use conversation::{Conversation, ConversationKind};
pub use message::{
    validate_content, EditMessageRequest, MarkReadRequest, Message, MessageId, MessageStatus,
    MessageType, SendMessageRequest, Sender,
};
pub use page::{parse_page, Page};
