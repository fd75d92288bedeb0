//! The mail API the pipeline reads from.

use std::future::Future;

use mailtally_gmail::{GmailClient, Header, MessageId, MessagePage};

/// An authenticated mail API able to list messages and fetch their headers.
pub trait MailSource {
    /// Lists one page of message IDs matching `query`, starting at `page_token`.
    fn list_messages(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> impl Future<Output = mailtally_gmail::Result<MessagePage>> + Send;

    /// Fetches the header metadata of a single message.
    fn get_message_metadata(
        &self,
        id: &MessageId,
    ) -> impl Future<Output = mailtally_gmail::Result<Vec<Header>>> + Send;
}

impl MailSource for GmailClient {
    fn list_messages(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> impl Future<Output = mailtally_gmail::Result<MessagePage>> + Send {
        Self::list_messages(self, query, page_token)
    }

    fn get_message_metadata(
        &self,
        id: &MessageId,
    ) -> impl Future<Output = mailtally_gmail::Result<Vec<Header>>> + Send {
        Self::get_message_metadata(self, id)
    }
}
