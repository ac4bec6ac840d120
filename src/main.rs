use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, warn};

use glasscalc::calculator::Calculator;
use glasscalc::config::{Settings, SettingsStore, SettingsWatcher};
use glasscalc::input::parse_commands;
use glasscalc::logging;
use glasscalc::session::Session;
use glasscalc::ui::{ThemeName, render_frame};

#[derive(Debug, Parser)]
#[command(name = "glasscalc", version, about = "A chain calculator with persistent themes")]
struct Cli {
    /// Settings file to use instead of the platform default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colors and styling.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive calculator reading key presses line by line (default).
    Session,
    /// Evaluate a key sequence, e.g. `glasscalc eval 5 + 3 × 2 =`.
    Eval {
        #[arg(required = true, allow_negative_numbers = true)]
        keys: Vec<String>,
        /// Print the readout as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List or select the color theme.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Turn the translucent frame on or off.
    Translucency { state: Toggle },
    /// Set or clear the background image.
    Background {
        #[command(subcommand)]
        action: BackgroundAction,
    },
    /// Show the current settings.
    Settings,
}

#[derive(Debug, Subcommand)]
enum ThemeAction {
    List,
    Set { name: String },
}

#[derive(Debug, Subcommand)]
enum BackgroundAction {
    Set { path: PathBuf },
    Clear,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::default_location()?,
    };
    let settings = store.load()?;
    logging::init_with_level(&settings.log_level);
    debug!("Using settings at {}", store.path().display());

    let plain = cli.plain || !io::stdout().is_terminal();

    let output = match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => return run_session(store, settings, plain),
        Commands::Eval { keys, json } => eval(&keys.join(" "), &settings, plain, json)?,
        Commands::Theme { action } => theme(action, &store, &settings)?,
        Commands::Translucency { state } => translucency(state, &store)?,
        Commands::Background { action } => background(action, &store)?,
        Commands::Settings => show_settings(&store, &settings),
    };
    println!("{}", output);
    Ok(())
}

fn run_session(store: SettingsStore, settings: Settings, plain: bool) -> Result<()> {
    let watcher = match SettingsWatcher::new(store.path()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Settings will not reload live: {}", e);
            None
        }
    };

    let mut session = Session::new(settings, plain).with_store(store);
    session.run(io::stdin().lock(), io::stdout().lock(), watcher.as_ref())
}

fn eval(line: &str, settings: &Settings, plain: bool, json: bool) -> Result<String> {
    let commands = parse_commands(line).context("Invalid key sequence")?;

    let mut calculator = Calculator::new();
    calculator.apply_all(commands);
    let readout = calculator.readout();

    if json {
        Ok(serde_json::to_string_pretty(&readout)?)
    } else if plain {
        Ok(readout.display().to_string())
    } else {
        Ok(render_frame(
            &readout,
            &calculator.tape(),
            &settings.frame_style(false),
        ))
    }
}

fn theme(action: ThemeAction, store: &SettingsStore, settings: &Settings) -> Result<String> {
    match action {
        ThemeAction::List => Ok(ThemeName::ALL
            .iter()
            .map(|&name| {
                let marker = if name == settings.theme { "*" } else { " " };
                format!("{} {}", marker, name)
            })
            .collect::<Vec<_>>()
            .join("\n")),
        ThemeAction::Set { name } => {
            let settings = store.update(|s| s.set_theme(&name))?;
            Ok(format!("theme: {}", settings.theme))
        }
    }
}

fn translucency(state: Toggle, store: &SettingsStore) -> Result<String> {
    let settings = store.update(|s| {
        s.translucent = matches!(state, Toggle::On);
        Ok(())
    })?;
    Ok(format!("translucency: {}", on_off(settings.translucent)))
}

fn background(action: BackgroundAction, store: &SettingsStore) -> Result<String> {
    match action {
        BackgroundAction::Set { path } => {
            let mut dimensions = (0, 0);
            let settings = store.update(|s| {
                dimensions = s.set_background(&path)?;
                Ok(())
            })?;
            let shown = settings
                .background
                .as_deref()
                .map_or_else(|| path.display().to_string(), |bg| bg.display().to_string());
            Ok(format!(
                "background: {} ({}x{})",
                shown, dimensions.0, dimensions.1
            ))
        }
        BackgroundAction::Clear => {
            store.update(|s| {
                s.clear_background();
                Ok(())
            })?;
            Ok("background: none".to_string())
        }
    }
}

fn show_settings(store: &SettingsStore, settings: &Settings) -> String {
    let background = settings
        .background
        .as_deref()
        .map_or_else(|| "none".to_string(), |bg| bg.display().to_string());
    [
        format!("file:         {}", store.path().display()),
        format!("theme:        {}", settings.theme),
        format!("translucency: {}", on_off(settings.translucent)),
        format!("background:   {}", background),
        format!("log level:    {}", settings.log_level),
    ]
    .join("\n")
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("glasscalc").chain(args.iter().copied())).unwrap()
    }

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.toml"))
    }

    #[test]
    fn test_no_subcommand_means_session() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(!cli.plain);
    }

    #[test]
    fn test_eval_flags_after_keys() {
        let cli = parse(&["eval", "5", "+", "3", "=", "--json"]);
        match cli.command {
            Some(Commands::Eval { keys, json }) => {
                assert_eq!(keys, vec!["5", "+", "3", "="]);
                assert!(json);
            }
            _ => panic!("expected eval"),
        }

        let cli = parse(&["eval", "9", "-", "4", "=", "--plain"]);
        assert!(cli.plain);
        match cli.command {
            Some(Commands::Eval { keys, json }) => {
                assert_eq!(keys, vec!["9", "-", "4", "="]);
                assert!(!json);
            }
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn test_eval_accepts_signed_keys() {
        let cli = parse(&["eval", "5", "-3", "=", "--json"]);
        match cli.command {
            Some(Commands::Eval { keys, json }) => {
                assert_eq!(keys, vec!["5", "-3", "="]);
                assert!(json);
                assert_eq!(eval(&keys.join(" "), &Settings::default(), true, false).unwrap(), "2");
            }
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn test_eval_requires_keys() {
        assert!(Cli::try_parse_from(["glasscalc", "eval"]).is_err());
    }

    #[test]
    fn test_settings_subcommands_parse() {
        let cli = parse(&["--config", "/tmp/g.toml", "theme", "set", "ocean"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Theme { action: ThemeAction::Set { name } }) if name == "ocean"
        ));

        assert!(matches!(
            parse(&["translucency", "off"]).command,
            Some(Commands::Translucency { state: Toggle::Off })
        ));
        assert!(matches!(
            parse(&["background", "clear"]).command,
            Some(Commands::Background { action: BackgroundAction::Clear })
        ));
        assert!(matches!(parse(&["settings"]).command, Some(Commands::Settings)));
        assert!(Cli::try_parse_from(["glasscalc", "translucency", "maybe"]).is_err());
    }

    #[test]
    fn test_eval_output() {
        let settings = Settings::default();
        assert_eq!(eval("5 + 3 × 2 =", &settings, true, false).unwrap(), "16");
        assert_eq!(eval("1 / 0 =", &settings, true, false).unwrap(), "Error");

        let json = eval("2 + 2 =", &settings, true, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "value");
        assert_eq!(value["display"], "4");

        let framed = eval("7 +", &settings, false, false).unwrap();
        assert!(framed.contains("7 +"));
        assert!(framed.contains('╭'));

        assert!(eval("5 + q", &settings, true, false).is_err());
    }

    #[test]
    fn test_theme_commands_write_through_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let set = ThemeAction::Set {
            name: "Sunset".to_string(),
        };
        assert_eq!(theme(set, &store, &Settings::default()).unwrap(), "theme: sunset");

        let settings = store.load().unwrap();
        assert_eq!(settings.theme, ThemeName::Sunset);
        let listing = theme(ThemeAction::List, &store, &settings).unwrap();
        assert!(listing.lines().any(|l| l == "* sunset"));
        assert!(listing.lines().any(|l| l == "  classic"));

        let unknown = ThemeAction::Set {
            name: "neon".to_string(),
        };
        assert!(theme(unknown, &store, &settings).is_err());
        assert_eq!(store.load().unwrap().theme, ThemeName::Sunset);
    }

    #[test]
    fn test_translucency_and_background_commands() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(translucency(Toggle::On, &store).unwrap(), "translucency: on");
        assert!(store.load().unwrap().translucent);

        let image_path = dir.path().join("wall.png");
        image::RgbaImage::new(4, 3).save(&image_path).unwrap();
        let out = background(BackgroundAction::Set { path: image_path }, &store).unwrap();
        assert!(out.ends_with("wall.png (4x3)"));
        assert!(store.load().unwrap().background.is_some());

        let not_image = dir.path().join("notes.txt");
        std::fs::write(&not_image, "hello").unwrap();
        assert!(background(BackgroundAction::Set { path: not_image }, &store).is_err());

        assert_eq!(
            background(BackgroundAction::Clear, &store).unwrap(),
            "background: none"
        );
        let settings = store.load().unwrap();
        assert_eq!(settings.background, None);
        assert!(settings.translucent);

        let shown = show_settings(&store, &settings);
        assert!(shown.contains("translucency: on"));
        assert!(shown.contains("background:   none"));
    }
}
