use tracing::warn;

use crate::{
    client::SummarizerApi,
    controller::{Completion, Controller, Effect},
    location::Location,
};

/// Execute an effect against the backend and package the result for
/// [`Controller::apply`].
pub async fn perform<A: SummarizerApi + ?Sized>(api: &A, effect: Effect) -> Completion {
    match effect {
        Effect::Summarize { generation, url } => {
            let outcome = api.summarize(&url).await.map_err(|e| {
                warn!(generation, error = %e, "summarize exchange failed");
                e.to_string()
            });
            Completion::Summarized {
                generation,
                outcome,
            }
        }
        Effect::Ask {
            generation,
            video_id,
            question,
        } => {
            let outcome = api.ask(&video_id, &question).await.map_err(|e| {
                warn!(generation, error = %e, "chat exchange failed");
                e.to_string()
            });
            Completion::Answered {
                generation,
                outcome,
            }
        }
    }
}

/// Drives a controller one intent at a time, awaiting each request before
/// returning. Used by front ends without their own event loop.
pub struct Session<A> {
    controller: Controller,
    api: A,
}

impl<A: SummarizerApi> Session<A> {
    pub fn new(api: A, initial: Location) -> Self {
        Self {
            controller: Controller::new(initial),
            api,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn open(&mut self) {
        let effect = self.controller.open();
        self.drive(effect).await;
    }

    pub async fn navigate(&mut self, location: Location) {
        let effect = self.controller.navigate(location);
        self.drive(effect).await;
    }

    pub async fn back(&mut self) {
        let effect = self.controller.back();
        self.drive(effect).await;
    }

    pub async fn forward(&mut self) {
        let effect = self.controller.forward();
        self.drive(effect).await;
    }

    pub async fn submit(&mut self, url: &str) {
        self.controller.set_query(url);
        let effect = self.controller.submit();
        self.drive(effect).await;
    }

    pub async fn ask(&mut self, question: &str) {
        self.controller.set_followup_question(question);
        let effect = self.controller.ask();
        self.drive(effect).await;
    }

    async fn drive(&mut self, effect: Option<Effect>) {
        if let Some(effect) = effect {
            let completion = perform(&self.api, effect).await;
            self.controller.apply(completion);
        }
    }
}
