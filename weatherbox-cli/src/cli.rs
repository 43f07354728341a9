use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use tracing::debug;
use weatherbox_core::{Config, EventKind, OutputContent, Page, RenderMode, RequestState, UiEvent};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbox", version, about = "Tint, list and weather box from the terminal")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the weather for the configured ZIP code and print the weather box.
    Show {
        /// Print a plain-text summary instead of the rendered markup.
        #[arg(long)]
        plain: bool,
    },

    /// Apply a background tint; digits only are read as a hex colour.
    Tint {
        value: String,
    },

    /// Append entries to the list.
    Add {
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Interactively set ZIP code, country, API key and render mode.
    Configure,

    /// Drive the page interactively.
    Session,
}

/// `WEATHERBOX_LOG`, then `RUST_LOG`, win over `-v` when set.
pub fn log_filter_from_verbosity(verbose: u8) -> String {
    let env_filter = std::env::var("WEATHERBOX_LOG").or_else(|_| std::env::var("RUST_LOG")).ok();
    log_filter(env_filter, verbose)
}

fn log_filter(env_filter: Option<String>, verbose: u8) -> String {
    if let Some(filter) = env_filter.filter(|f| !f.trim().is_empty()) {
        return filter;
    }

    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
    .to_string()
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            command => {
                let config = Config::load()?;
                debug!(zip = %config.query().zip_param(), endpoint = %config.endpoint, "Loaded configuration");
                let mut page = Page::from_config(&config)?;
                run_page_command(command, &mut page).await
            }
        }
    }
}

async fn run_page_command(command: Command, page: &mut Page) -> anyhow::Result<()> {
    match command {
        Command::Show { plain } => {
            let state = page.dispatch(&mut UiEvent::new(EventKind::AjaxClick)).await;
            print_weather(page, state.as_ref(), plain);
            if matches!(state, Some(RequestState::Failed)) {
                bail!("Weather request failed; rerun with -v for details");
            }
        }
        Command::Tint { value } => {
            page.tint_input_mut().set_value(value);
            page.dispatch(&mut UiEvent::new(EventKind::TintSubmit)).await;
            println!("{}", page.background_color().unwrap_or_default());
        }
        Command::Add { texts } => {
            for text in texts {
                page.text_input_mut().set_value(text);
                page.dispatch(&mut UiEvent::new(EventKind::NewItemSubmit)).await;
            }
            print_list(page);
        }
        Command::Session => session(page).await?,
        Command::Configure => configure()?,
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let zip = Text::new("ZIP code:").with_default(&config.zip).prompt()?;
    let country = Text::new("Country code:").with_default(&config.country).prompt()?;
    config.zip = zip;
    config.country = country;

    let key = Password::new("API key (leave empty for none):")
        .without_confirmation()
        .prompt()?;
    if key.trim().is_empty() {
        config.clear_api_key();
    } else {
        config.set_api_key(key.trim().to_string());
    }

    let start = RenderMode::all().iter().position(|m| *m == config.render_mode).unwrap_or(0);
    config.render_mode = Select::new("Render mode:", RenderMode::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionAction {
    Tint,
    AddItem,
    Weather,
    Quit,
}

impl SessionAction {
    const ALL: [SessionAction; 4] =
        [SessionAction::Tint, SessionAction::AddItem, SessionAction::Weather, SessionAction::Quit];
}

impl std::fmt::Display for SessionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SessionAction::Tint => "Change tint",
            SessionAction::AddItem => "Add list item",
            SessionAction::Weather => "Get the weather",
            SessionAction::Quit => "Quit",
        })
    }
}

async fn session(page: &mut Page) -> anyhow::Result<()> {
    loop {
        let action = Select::new("What next?", SessionAction::ALL.to_vec())
            .prompt()
            .context("Failed to read session action")?;

        match action {
            SessionAction::Tint => {
                let value = Text::new("Tint colour:").prompt()?;
                page.tint_input_mut().set_value(value);
                page.dispatch(&mut UiEvent::new(EventKind::TintSubmit)).await;
                println!("Background: {}", page.background_color().unwrap_or_default());
            }
            SessionAction::AddItem => {
                let text = Text::new("New item:").prompt()?;
                page.text_input_mut().set_value(text);
                page.dispatch(&mut UiEvent::new(EventKind::NewItemSubmit)).await;
                print_list(page);
            }
            SessionAction::Weather => {
                let (in_flight, state) = click_weather_showing_progress(page).await;
                println!("{in_flight}");
                print_weather(page, Some(&state), false);
            }
            SessionAction::Quit => return Ok(()),
        }
    }
}

/// Run one weather request and snapshot the weather box while it is in
/// flight. `join!` polls the request first, so the snapshot is whatever the
/// click rendered before the response arrived.
async fn click_weather_showing_progress(page: &Page) -> (OutputContent, RequestState) {
    let fetcher = page.weather_fetcher();
    let weather_box = page.weather_box().clone();
    let (state, in_flight) =
        tokio::join!(fetcher.fetch_and_render(), async { weather_box.content() });
    (in_flight, state)
}

fn print_weather(page: &Page, state: Option<&RequestState>, plain: bool) {
    match state.and_then(RequestState::summary) {
        Some(summary) if plain => println!("{}", summary.to_plain_text()),
        _ => println!("{}", page.weather_box().content()),
    }
}

fn print_list(page: &Page) {
    for item in page.list_items() {
        println!("- {item}");
    }
}
