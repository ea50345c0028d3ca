use std::sync::Arc;

use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Element, Length, Task};
use tldw_core::{
    Completion, Controller, Effect, LoadedVideo, Location, Settings, SummarizerApi, TldwClient,
    aspect_padding_percent, embed_url, perform,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    iced::application(App::new, App::update, App::view)
        .title("TL;DW")
        .run()
}

struct App {
    controller: Controller,
    api: Arc<dyn SummarizerApi>,
}

#[derive(Debug, Clone)]
enum Message {
    QueryChanged(String),
    Submit,
    QuestionChanged(String),
    Ask,
    Back,
    Forward,
    Home,
    Completed(Completion),
}

impl App {
    /// Opened with an optional link such as `https://tldw.tube/?v=<id>`.
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable settings");
            Settings::default()
        });
        let initial = std::env::args()
            .nth(1)
            .map(|arg| Location::parse(&arg))
            .unwrap_or_default();

        let mut app = Self {
            controller: Controller::new(initial),
            api: Arc::new(TldwClient::new(settings.endpoint)),
        };
        let effect = app.controller.open();
        let task = app.run(effect);
        (app, task)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let effect = match message {
            Message::QueryChanged(query) => {
                self.controller.set_query(query);
                None
            }
            Message::Submit => self.controller.submit(),
            Message::QuestionChanged(question) => {
                self.controller.set_followup_question(question);
                None
            }
            Message::Ask => self.controller.ask(),
            Message::Back => self.controller.back(),
            Message::Forward => self.controller.forward(),
            Message::Home => self.controller.navigate(Location::root()),
            Message::Completed(completion) => {
                self.controller.apply(completion);
                None
            }
        };
        self.run(effect)
    }

    fn run(&self, effect: Option<Effect>) -> Task<Message> {
        let Some(effect) = effect else {
            return Task::none();
        };
        let api = Arc::clone(&self.api);
        Task::perform(
            async move { perform(api.as_ref(), effect).await },
            Message::Completed,
        )
    }

    fn view(&self) -> Element<'_, Message> {
        let controller = &self.controller;
        let history = controller.history();

        let nav = row![
            button("Back").on_press_maybe(history.can_go_back().then_some(Message::Back)),
            button("Forward").on_press_maybe(history.can_go_forward().then_some(Message::Forward)),
            button("Home").on_press(Message::Home),
            text(controller.location().to_string()).size(14),
        ]
        .spacing(8);

        let form = row![
            text_input("Paste YouTube URL here...", controller.query())
                .on_input(Message::QueryChanged)
                .on_submit(Message::Submit),
            button("→").on_press_maybe(controller.can_submit().then_some(Message::Submit)),
        ]
        .spacing(8);

        let mut content = column![
            text("TL;DW - Summarize a YouTube Video for me").size(28),
            nav,
            form,
        ]
        .spacing(16);

        if controller.is_loading() {
            content = content.push(text("Analyzing video..."));
        }
        if let Some(error) = controller.error() {
            content = content.push(text(error).style(text::danger));
        }
        if let Some(video) = controller.results() {
            content = content.push(self.results_view(video));
        }

        scrollable(container(content).padding(24).width(Length::Fill)).into()
    }

    fn results_view<'a>(&'a self, video: &'a LoadedVideo) -> Element<'a, Message> {
        let info = &video.info;
        let summary = &video.summary;
        let followup = self.controller.followup();

        let mut player = column![
            text(info.title.as_str()).size(22),
            text(format!("Watch: {}", embed_url(&info.video_id))).size(14),
            text(format!(
                "Player height: {:.1}% of width",
                aspect_padding_percent(info.aspect_ratio)
            ))
            .size(12),
        ]
        .spacing(4);
        if let Some(thumbnail) = &info.thumbnail_url {
            player = player.push(text(format!("Thumbnail: {thumbnail}")).size(12));
        }

        let mut question = text_input("Type your question...", &followup.question);
        if !followup.loading {
            question = question
                .on_input(Message::QuestionChanged)
                .on_submit(Message::Ask);
        }

        let mut ask = column![
            text("Ask a follow-up question about this video:"),
            row![
                question,
                button("Ask").on_press_maybe(self.controller.can_ask().then_some(Message::Ask)),
            ]
            .spacing(8),
        ]
        .spacing(8);
        if followup.loading {
            ask = ask.push(text("Thinking..."));
        }
        if let Some(error) = &followup.error {
            ask = ask.push(text(error.as_str()).style(text::danger));
        }
        if let Some(answer) = self.controller.visible_answer() {
            ask = ask.push(text(format!("Answer: {answer}")));
        }

        column![
            player,
            column![
                text(summary.word.as_str()).size(22),
                text(summary.wikipedia.as_str()).size(12),
                text(summary.sentence.as_str()),
            ]
            .spacing(4),
            column![text("Full summary").size(22), text(summary.paragraph.as_str())].spacing(4),
            ask,
        ]
        .spacing(24)
        .into()
    }
}
