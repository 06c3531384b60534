//! Core application state and Iced Application implementation
//!
//! Uses Iced 0.13 API with a launcher window in the Gauntlet/Raycast style:
//! a search bar over a selectable results list, arrow-key navigation, Enter
//! to open and Ctrl+. to copy.

use std::collections::HashMap;

use iced::keyboard::Key;
use iced::widget::{column, container, image, row, scrollable, text, text_input, Space};
use iced::{
    keyboard, Background, Border, Color, Element, Event, Length, Padding, Subscription, Task,
    Theme,
};

use crate::actions;
use crate::confluence::api::ConfluenceClient;
use crate::confluence::types::DisplayRecord;
use crate::settings::Settings;

// ============================================================================
// Theme Colors
// ============================================================================

mod colors {
    use iced::Color;

    pub const BACKGROUND: Color = Color::from_rgb(0.09, 0.09, 0.11);
    pub const SURFACE: Color = Color::from_rgb(0.12, 0.12, 0.14);
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);
    pub const PRIMARY: Color = Color::from_rgb(0.4, 0.55, 1.0);
    pub const TEXT: Color = Color::from_rgb(0.95, 0.95, 0.95);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.55, 0.55, 0.6);
    pub const TEXT_PLACEHOLDER: Color = Color::from_rgb(0.4, 0.4, 0.45);
    pub const SELECTION: Color = Color::from_rgb(0.2, 0.25, 0.35);
    pub const ERROR: Color = Color::from_rgb(0.9, 0.45, 0.45);
}

/// Leading glyph for every row; content items are documents.
const DOCUMENT_GLYPH: &str = "▤";

// ============================================================================
// UI State Types
// ============================================================================

/// Lifecycle of the one content query.
#[derive(Debug, Clone, Default)]
pub enum SearchState {
    #[default]
    NotStarted,
    Loading,
    Loaded(Vec<DisplayRecord>),
    Failed(String),
}

// ============================================================================
// Application State
// ============================================================================

pub struct Confly {
    prompt: String,
    search: SearchState,
    selected: usize,
    avatars: HashMap<String, image::Handle>,
    client: ConfluenceClient,
}

#[derive(Debug, Clone)]
pub enum Message {
    PromptChanged(String),
    SearchRequested,
    SearchLoaded(Result<Vec<DisplayRecord>, String>),
    AvatarLoaded(String, Result<Vec<u8>, String>),
    SelectNext,
    SelectPrevious,
    OpenSelected,
    CopySelected,
    Escape,
    IcedEvent(Event),
}

impl Confly {
    /// Build the initial state and the boot task.
    ///
    /// The content query is issued exactly once, at boot; typing afterwards
    /// only filters the already-fetched list.
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let state = Self {
            prompt: String::new(),
            search: SearchState::default(),
            selected: 0,
            avatars: HashMap::new(),
            client: ConfluenceClient::new(settings),
        };

        (state, Task::done(Message::SearchRequested))
    }

    pub fn title(&self) -> String {
        String::from("Confly")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PromptChanged(prompt) => {
                self.prompt = prompt;
                self.selected = 0;
                Task::none()
            }

            Message::SearchRequested => {
                self.search = SearchState::Loading;
                let searcher = self.client.clone();
                Task::perform(
                    async move { searcher.search().await },
                    Message::SearchLoaded,
                )
            }

            Message::SearchLoaded(Ok(records)) => {
                tracing::info!("Loaded {} content items", records.len());
                let fetches = self.fetch_avatars(&records);
                self.search = SearchState::Loaded(records);
                self.selected = 0;
                fetches
            }

            Message::SearchLoaded(Err(reason)) => {
                tracing::error!("Content search failed: {}", reason);
                self.search = SearchState::Failed(reason);
                Task::none()
            }

            Message::AvatarLoaded(id, Ok(bytes)) => {
                self.avatars.insert(id, image::Handle::from_bytes(bytes));
                Task::none()
            }

            Message::AvatarLoaded(id, Err(reason)) => {
                // Row keeps its blank avatar slot.
                tracing::debug!("Avatar fetch for {} failed: {}", id, reason);
                Task::none()
            }

            Message::SelectNext => {
                let count = self.filtered().len();
                if count > 0 {
                    self.selected = (self.selected + 1) % count;
                }
                Task::none()
            }

            Message::SelectPrevious => {
                let count = self.filtered().len();
                if count > 0 {
                    self.selected = if self.selected == 0 {
                        count - 1
                    } else {
                        self.selected - 1
                    };
                }
                Task::none()
            }

            Message::OpenSelected => {
                if let Some(url) = self.selected_url() {
                    if let Err(e) = actions::open_in_browser(&url) {
                        tracing::warn!("{}", e);
                    }
                }
                Task::none()
            }

            Message::CopySelected => {
                if let Some(url) = self.selected_url() {
                    if let Err(e) = actions::copy_to_clipboard(&url) {
                        tracing::warn!("{}", e);
                    }
                }
                Task::none()
            }

            Message::Escape => {
                self.prompt.clear();
                self.selected = 0;
                Task::none()
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event
                {
                    match key {
                        Key::Named(keyboard::key::Named::ArrowDown) => {
                            return self.update(Message::SelectNext);
                        }
                        Key::Named(keyboard::key::Named::ArrowUp) => {
                            return self.update(Message::SelectPrevious);
                        }
                        Key::Named(keyboard::key::Named::Escape) => {
                            return self.update(Message::Escape);
                        }
                        Key::Character(c) if c.as_str() == "." && modifiers.command() => {
                            return self.update(Message::CopySelected);
                        }
                        _ => {}
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        // Search bar with styling
        let search_bar = container(
            text_input("Search by name...", &self.prompt)
                .on_input(Message::PromptChanged)
                .on_submit(Message::OpenSelected)
                .padding(Padding::new(16.0))
                .size(20)
                .style(|_theme, _status| text_input::Style {
                    background: Background::Color(Color::TRANSPARENT),
                    border: Border::default(),
                    icon: colors::TEXT_MUTED,
                    placeholder: colors::TEXT_PLACEHOLDER,
                    value: colors::TEXT,
                    selection: colors::PRIMARY,
                }),
        )
        .padding(Padding::from([8.0, 16.0]))
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(colors::SURFACE)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        });

        // Build content based on the search lifecycle
        let content: Element<'_, Message> = match &self.search {
            SearchState::NotStarted | SearchState::Loading => column![
                search_bar,
                Space::with_height(16),
                container(
                    text("Loading Confluence content...")
                        .size(14)
                        .color(colors::TEXT_MUTED)
                )
                .width(Length::Fill)
                .center_x(Length::Fill)
            ]
            .spacing(0)
            .into(),

            SearchState::Failed(reason) => column![
                search_bar,
                Space::with_height(16),
                container(
                    text(format!("Search failed: {}", reason))
                        .size(14)
                        .color(colors::ERROR)
                )
                .width(Length::Fill)
                .center_x(Length::Fill)
            ]
            .spacing(0)
            .into(),

            SearchState::Loaded(_) => {
                let records = self.filtered();
                if records.is_empty() {
                    column![
                        search_bar,
                        Space::with_height(16),
                        container(
                            text("No matching content")
                                .size(14)
                                .color(colors::TEXT_MUTED)
                        )
                        .width(Length::Fill)
                        .center_x(Length::Fill)
                    ]
                    .spacing(0)
                    .into()
                } else {
                    column![
                        search_bar,
                        Space::with_height(12),
                        self.view_results(&records)
                    ]
                    .spacing(0)
                    .into()
                }
            }
        };

        // Main container with rounded corners and proper background
        container(
            container(content)
                .padding(16)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(colors::BACKGROUND)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        })
        .into()
    }

    fn view_results<'a>(&'a self, records: &[&'a DisplayRecord]) -> Element<'a, Message> {
        let items: Vec<Element<'a, Message>> = records
            .iter()
            .enumerate()
            .map(|(i, &record)| {
                let is_selected = i == self.selected;

                // Trailing avatar: the fetched image, or a blank slot until
                // it lands
                let avatar: Element<'a, Message> = match self.avatars.get(&record.id) {
                    Some(handle) => container(image(handle.clone()).width(24).height(24))
                        .width(36)
                        .center_x(36)
                        .into(),
                    None => Space::with_width(36).into(),
                };

                let item_content = row![
                    // Leading document glyph
                    container(text(DOCUMENT_GLYPH).size(20).color(colors::PRIMARY))
                        .width(36)
                        .center_x(36),
                    // Title and content type
                    column![
                        text(&record.name).size(15).color(colors::TEXT),
                        text(&record.kind).size(12).color(colors::TEXT_MUTED)
                    ]
                    .spacing(2),
                    // Spacer
                    Space::with_width(Length::Fill),
                    // Author accessory
                    text(&record.author).size(12).color(colors::TEXT_MUTED),
                    avatar,
                    // Keyboard hint for selected item
                    text(if is_selected { "↵" } else { "" })
                        .size(12)
                        .color(colors::TEXT_MUTED)
                ]
                .spacing(12)
                .align_y(iced::Alignment::Center);

                container(item_content)
                    .padding(Padding::from([10.0, 12.0]))
                    .width(Length::Fill)
                    .style(move |_theme| container::Style {
                        background: Some(Background::Color(if is_selected {
                            colors::SELECTION
                        } else {
                            Color::TRANSPARENT
                        })),
                        border: Border::default().rounded(8),
                        ..Default::default()
                    })
                    .into()
            })
            .collect();

        container(scrollable(column(items).spacing(4)).height(Length::Fill))
            .height(Length::FillPortion(1))
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ========================================================================
    // Business Logic
    // ========================================================================

    /// Records matching the current prompt, in response order.
    fn filtered(&self) -> Vec<&DisplayRecord> {
        match &self.search {
            SearchState::Loaded(records) => records
                .iter()
                .filter(|record| keyword_match(record, &self.prompt))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Absolute URL of the selected row, if any.
    fn selected_url(&self) -> Option<String> {
        let records = self.filtered();
        records
            .get(self.selected)
            .map(|record| self.client.page_url(&record.url))
    }

    /// One avatar fetch per record with a picture path.
    fn fetch_avatars(&self, records: &[DisplayRecord]) -> Task<Message> {
        Task::batch(
            records
                .iter()
                .filter(|record| !record.id.is_empty() && !record.icon.is_empty())
                .map(|record| {
                    let client = self.client.clone();
                    let id = record.id.clone();
                    let icon = record.icon.clone();
                    Task::perform(
                        async move { client.fetch_avatar(&icon).await },
                        move |result| Message::AvatarLoaded(id.clone(), result),
                    )
                }),
        )
    }
}

/// A row is matchable on its name and content type.
fn keyword_match(record: &DisplayRecord, prompt: &str) -> bool {
    if prompt.is_empty() {
        return true;
    }
    let needle = prompt.to_lowercase();
    record.name.to_lowercase().contains(&needle) || record.kind.to_lowercase().contains(&needle)
}
