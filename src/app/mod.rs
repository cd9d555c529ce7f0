// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for COSMIC Scanner
//!
//! This module contains the application state, message handling, UI rendering,
//! and business logic for the scanner application.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, ScanSession, etc.)
//! - `tab_bar`: Bottom tab bar for page selection
//! - `scanner_page`: Live scanning page (permission gate, viewport, feedback)
//! - `logs_page`: Scan log viewer
//! - `settings_page`: Settings page
//! - `view`: Main view rendering
//! - `update`: Message handling
//!
//! # Main Types
//!
//! - `AppModel`: Main application state
//! - `Message`: All possible user interactions and system events
//! - `ScanSession`: Armed/Consumed scan state machine

mod handlers;
mod logs_page;
mod scanner_page;
mod settings_page;
mod state;
mod tab_bar;
mod update;
mod view;

use crate::capture::{CaptureConfig, CaptureEvent, capture_events};
use crate::config::Config;
use crate::constants::FEEDBACK_TICK;
use crate::fl;
use crate::history::ScanHistory;
use crate::permission;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
use futures::channel::mpsc;
pub use state::{
    AppModel, ContextPage, FACING_OPTIONS, FeedbackState, LOG_LIMIT_OPTIONS, Message, Page,
    ScanResult, ScanSession,
};
use tracing::{error, info};

const REPOSITORY: &str = "https://github.com/cosmic-utils/cosmic-scanner";
const APP_ICON: &[u8] = include_bytes!(
    "../../resources/icons/hicolor/scalable/apps/io.github.cosmic-utils.cosmic-scanner.svg"
);

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic-utils.cosmic-scanner";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // Create the about widget
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            page: Page::default(),
            permission: crate::permission::PermissionStatus::default(),
            permission_requesting: false,
            session: ScanSession::default(),
            feedback: FeedbackState::default(),
            capture_resolution: None,
            capture_error: None,
            history: ScanHistory::default(),
            theme_dropdown_options: vec![
                fl!("theme-system"),
                fl!("theme-dark"),
                fl!("theme-light"),
            ],
            facing_dropdown_options: FACING_OPTIONS
                .iter()
                .map(|facing| facing.display_name().to_string())
                .collect(),
            log_limit_dropdown_options: LOG_LIMIT_OPTIONS
                .iter()
                .map(|limit| limit.to_string())
                .collect(),
        };

        // Probe camera authorization without prompting
        let permission_task = Task::perform(async { permission::check().await }, |status| {
            cosmic::Action::App(Message::PermissionChecked(status))
        });

        // Load the persisted scan log off the UI thread
        let history_task = Task::perform(
            async {
                tokio::task::spawn_blocking(ScanHistory::load)
                    .await
                    .unwrap_or_default()
            },
            |history| cosmic::Action::App(Message::HistoryLoaded(history)),
        );

        (app, Task::batch([permission_task, history_task]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
        })
    }

    /// Modal shown over the scanner while a result is being displayed.
    ///
    /// Dismissing it is the only path back to the Armed state.
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        let result = self.session.result()?;

        let dialog = widget::dialog()
            .title(fl!("scan-complete"))
            .icon(widget::icon::from_name("emblem-ok-symbolic").size(48).icon())
            .body(fl!(
                "scan-complete-body",
                symbology = result.symbology.display_name(),
                payload = result.payload.clone()
            ))
            .primary_action(
                widget::button::suggested(fl!("scan-again")).on_press(Message::ScanAgain),
            );

        Some(dialog.into())
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // The capture surface exists only while the scanner page is visible,
        // the camera is authorized, and the session is Armed. Consuming a
        // result (or navigating away) drops the subscription, which tears the
        // camera stream down.
        let capture_wired = self.page == Page::Scanner
            && self.permission.is_granted()
            && self.session.is_armed();

        let capture_sub = if capture_wired {
            let config = CaptureConfig {
                facing: self.config.facing,
                ..CaptureConfig::default()
            };

            Subscription::run_with_id(
                ("capture", config.facing),
                cosmic::iced::stream::channel(64, move |mut output| async move {
                    info!(facing = %config.facing, "Capture surface starting");

                    // The V4L2 pump blocks, so it runs on the blocking pool
                    // and feeds events back over a bounded channel. Dropping
                    // the receiver (on unsubscribe) stops the pump.
                    let (sender, mut receiver) = mpsc::channel(64);
                    let pump = tokio::task::spawn_blocking(move || {
                        capture_events(config, sender);
                    });

                    while let Some(event) = receiver.next().await {
                        let message = match event {
                            CaptureEvent::Opened { width, height } => {
                                Message::CaptureOpened { width, height }
                            }
                            CaptureEvent::Decoded(decode) => Message::CodeDecoded(decode),
                            CaptureEvent::Failed(err) => Message::CaptureFailed(err),
                        };

                        if output.send(message).await.is_err() {
                            break;
                        }
                    }

                    drop(receiver);
                    let _ = pump.await;
                    info!("Capture surface stopped");
                }),
            )
        } else {
            Subscription::none()
        };

        // Redraw ticks for the popup reveal and scan-line pulse. Present only
        // while a result is displayed; the animations stop with the session.
        let feedback_sub = if self.session.is_consumed() {
            Subscription::run_with_id(
                "feedback",
                cosmic::iced::stream::channel(4, |mut output| async move {
                    let mut ticker = tokio::time::interval(FEEDBACK_TICK);
                    loop {
                        ticker.tick().await;
                        if output.send(Message::FeedbackTick).await.is_err() {
                            break;
                        }
                    }
                }),
            )
        } else {
            Subscription::none()
        };

        Subscription::batch([config_sub, capture_sub, feedback_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.handle_message(message)
    }
}
