//! Pokédex handheld TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokedex::action::Action;
use pokedex::api::{self, PokeApi};
use pokedex::components::{Component, PokedexDevice, PokedexDeviceProps};
use pokedex::config::{self, Config};
use pokedex::effect::Effect;
use pokedex::logging;
use pokedex::navigation;
use pokedex::reducer::reducer;
use pokedex::sprite;
use pokedex::state::{AppState, TICK_MS};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Pokédex handheld: look up Pokémon by name or number
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "A handheld-style Pokédex backed by PokeAPI")]
struct Args {
    /// Number of addressable Pokémon; navigation wraps at this bound
    #[arg(long, default_value_t = config::DEFAULT_CATALOG_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    catalog_size: u32,

    /// Id shown at startup
    #[arg(long, default_value_t = config::DEFAULT_START_ID, value_parser = clap::value_parser!(u32).range(1..))]
    start: u32,

    /// PokeAPI base URL
    #[arg(long, default_value = config::DEFAULT_API_BASE)]
    api_base: String,

    /// Directory for rolling log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = config::DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn config(&self) -> Config {
        let config = Config::new(self.catalog_size, self.start, self.api_base.clone())
            .with_log_level(self.log_level.clone());
        match &self.log_dir {
            Some(dir) => config.with_log_dir(dir.clone()),
            None => config,
        }
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    Device,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    Device,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        Some(PokedexComponentId::Device)
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        None
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::Device => PokedexContext::Device,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::Device
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args.config();
    let _log_guard = logging::init(&config)?;
    api::install(PokeApi::new(config.api_base.clone()));

    let debug = DebugSession::new(args.debug);

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(&config))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("pokedex exited");
    Ok(())
}

struct PokedexUi {
    device: PokedexDevice,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            device: PokedexDevice,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        event_ctx.set_component_area(PokedexComponentId::Device, area);
        let props = PokedexDeviceProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.device.render(frame, area, props);
    }

    fn handle_device_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = PokedexDeviceProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .device
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_device = Rc::clone(&ui);
    bus.register(PokedexComponentId::Device, move |event, state| {
        ui_device
            .borrow_mut()
            .handle_device_event(&event.kind, state)
    });

    // Ctrl+C / Ctrl+Q quit; plain letters belong to the search field
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        EventKind::Key(key)
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) =>
        {
            HandlerResponse::action(Action::Quit)
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchCreature { key, seq } => {
            // One key per request: a newer lookup never cancels an older one.
            ctx.tasks()
                .spawn(TaskKey::new(format!("creature_{seq}")), async move {
                    match api::shared().fetch_creature(&key).await {
                        Ok(record) => Action::CreatureDidLoad { key, seq, record },
                        Err(error) => Action::CreatureDidError { key, seq, error },
                    }
                });
        }
        Effect::PickRandom { catalog_size } => {
            let id = navigation::random_id(&mut rand::thread_rng(), catalog_size);
            tracing::debug!(id, "random pick");
            ctx.tasks()
                .spawn(TaskKey::new("random"), async move { Action::RandomDidPick(id) });
        }
        Effect::FetchShinySprite { id } => {
            ctx.tasks()
                .spawn(TaskKey::new(format!("shiny_{id}")), async move {
                    match api::shared().fetch_shiny_sprite(id).await {
                        Ok(url) => {
                            if url.is_none() {
                                tracing::info!(id, "no shiny sprite available");
                            }
                            Action::ShinyDidLoad { id, url }
                        }
                        Err(error) => {
                            tracing::warn!(id, %error, "shiny lookup failed");
                            Action::ShinyDidError { id, error }
                        }
                    }
                });
        }
        Effect::LoadSprite { url } => {
            ctx.tasks()
                .spawn(TaskKey::new(format!("sprite_{url}")), async move {
                    let decoded = match api::shared().fetch_bytes(&url).await {
                        Ok(bytes) => sprite::decode_sprite(&bytes),
                        Err(error) => Err(error),
                    };
                    match decoded {
                        Ok(art) => Action::SpriteDidLoad { url, art },
                        Err(error) => Action::SpriteDidError { url, error },
                    }
                });
        }
    }
}
