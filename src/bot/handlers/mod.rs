pub mod message;

use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::bot::router::CommandRouter;

pub struct BotHandler {
    pub router: Arc<CommandRouter>,
}

impl BotHandler {
    pub fn new(router: Arc<CommandRouter>) -> Self {
        Self { router }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let router = self.router.clone();

        Update::filter_message().endpoint(move |msg: Message| {
            let router = router.clone();
            async move { message::message_handler(msg, router).await }
        })
    }
}
