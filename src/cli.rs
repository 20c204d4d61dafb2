//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::builtin_holdings::BuiltinHoldings;
use crate::adapters::canned_oracle::{CannedOracle, MOCK_API_KEY};
use crate::adapters::csv_adapter::CsvHoldingsAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::logging;
use crate::adapters::scheduler::{self, SchedulerConfig, StopReason};
use crate::adapters::system_clock::SystemClock;
use crate::domain::analyst;
use crate::domain::config_validation::validate_config;
use crate::domain::error::SmartTradeError;
use crate::domain::instrument::Instrument;
use crate::domain::notification::NotificationKind;
use crate::domain::portfolio::Portfolio;
use crate::domain::seed;
use crate::domain::session::{Session, SessionConfig, TickReport};
use crate::domain::suggestion::{self, StrategySuggestion, SuggestionConfig};
use crate::domain::summary::SummaryData;
use crate::domain::ticker::{MarketTicker, TickerConfig};
use crate::domain::universe::{parse_symbols, require_held};
use crate::ports::clock_port::Clock;
use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;
use crate::ports::oracle_port::TextOracle;

#[derive(Parser, Debug)]
#[command(name = "smarttrade", about = "Simulated trading session with AI strategy automation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the simulated session
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// CSV file with symbol,name,price,quantity,avg_price
        #[arg(long)]
        holdings: Option<PathBuf>,
        /// Stop after this many ticks
        #[arg(short, long)]
        ticks: Option<u64>,
        /// RNG seed (overrides [simulation] seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Activate the suggested strategy for these symbols (comma separated)
        #[arg(short, long)]
        strategy: Option<String>,
    },
    /// Stream the watchlist, one random instrument per tick
    Watch {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        ticks: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the suggested take-profit / stop-loss strategy for a holding
    Suggest {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
    },
    /// Ask the AI analyst a question
    Ask {
        #[arg(short, long)]
        prompt: String,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        sector: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Everything the commands need, resolved from config with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub session: SessionConfig,
    pub scheduler: SchedulerConfig,
    pub watchlist_divisor: f64,
    pub suggestion: SuggestionConfig,
    pub seed: Option<u64>,
    /// `None` only when `[oracle] require_key` is on and no key is set.
    pub api_key: Option<String>,
    pub auto_activate: Vec<String>,
    pub log_level: String,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Run {
            config,
            holdings,
            ticks,
            seed,
            strategy,
        } => run_session(
            config.as_ref(),
            holdings.as_ref(),
            ticks,
            seed,
            strategy.as_deref(),
        ),
        Command::Watch {
            config,
            ticks,
            seed,
        } => run_watch(config.as_ref(), ticks, seed),
        Command::Suggest {
            symbol,
            config,
            holdings,
        } => run_suggest(&symbol, config.as_ref(), holdings.as_ref()),
        Command::Ask {
            prompt,
            symbol,
            sector,
            config,
        } => run_ask(&prompt, symbol.as_deref(), sector.as_deref(), config.as_ref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, SmartTradeError> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| SmartTradeError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<Settings, SmartTradeError> {
    validate_config(config)?;

    let seed = match config.get_non_empty("simulation", "seed") {
        Some(s) => Some(s.parse::<u64>().map_err(|_| SmartTradeError::ConfigInvalid {
            section: "simulation".into(),
            key: "seed".into(),
            reason: "seed must be a non-negative integer".into(),
        })?),
        None => None,
    };

    let auto_activate = match config.get_non_empty("strategy", "auto_activate") {
        Some(list) => parse_symbols(&list).map_err(|e| SmartTradeError::ConfigInvalid {
            section: "strategy".into(),
            key: "auto_activate".into(),
            reason: e.to_string(),
        })?,
        None => Vec::new(),
    };

    let interval_ms = config.get_int("simulation", "tick_interval_ms", 2000);

    let require_key = config.get_bool("oracle", "require_key", false);
    let api_key = config
        .get_non_empty("oracle", "api_key")
        .or_else(|| (!require_key).then(|| MOCK_API_KEY.to_string()));

    Ok(Settings {
        session: SessionConfig {
            ticker: TickerConfig {
                update_probability: config.get_double("simulation", "update_probability", 0.6),
                volatility_divisor: config.get_double("simulation", "volatility_divisor", 200.0),
            },
            notification_capacity: config.get_int("simulation", "notification_capacity", 10)
                as usize,
        },
        scheduler: SchedulerConfig {
            interval: Duration::from_millis(interval_ms as u64),
            max_ticks: None,
        },
        watchlist_divisor: config.get_double("watchlist", "volatility_divisor", 150.0),
        suggestion: SuggestionConfig {
            profit_target_pct: config.get_double("strategy", "profit_target_pct", 10.0),
            stop_loss_pct: config.get_double("strategy", "stop_loss_pct", 5.0),
        },
        seed,
        api_key,
        auto_activate,
        log_level: config
            .get_non_empty("logging", "level")
            .unwrap_or_else(|| "info".to_string()),
    })
}

fn load_settings(config_path: Option<&PathBuf>) -> Result<Settings, SmartTradeError> {
    let adapter = load_config(config_path)?;
    let settings = build_settings(&adapter)?;
    logging::init(&settings.log_level);
    Ok(settings)
}

pub fn load_holdings(path: Option<&PathBuf>) -> Result<Vec<Instrument>, SmartTradeError> {
    let holdings = match path {
        Some(p) => {
            eprintln!("Loading holdings from {}", p.display());
            CsvHoldingsAdapter::new(p.clone()).load_holdings()?
        }
        None => BuiltinHoldings.load_holdings()?,
    };
    if holdings.is_empty() {
        return Err(SmartTradeError::HoldingsParse {
            reason: "no holdings to simulate".into(),
        });
    }
    Ok(holdings)
}

/// Symbols from config plus the command line, config first, duplicates dropped.
pub fn resolve_strategy_symbols(
    configured: &[String],
    cli_list: Option<&str>,
) -> Result<Vec<String>, SmartTradeError> {
    let mut symbols = configured.to_vec();
    if let Some(list) = cli_list {
        let extra = parse_symbols(list).map_err(|e| SmartTradeError::InvalidStrategy {
            symbol: list.to_string(),
            reason: e.to_string(),
        })?;
        for symbol in extra {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
    }
    Ok(symbols)
}

/// Suggest and activate a strategy for each symbol before the first tick.
pub fn activate_suggested(
    session: &mut Session,
    symbols: &[String],
    config: &SuggestionConfig,
    oracle: &dyn TextOracle,
    clock: &dyn Clock,
) -> Result<Vec<StrategySuggestion>, SmartTradeError> {
    if let Err(e) = require_held(session.portfolio(), symbols) {
        return Err(report_failure(session, clock, e));
    }
    let mut activated = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let Some(instrument) = session.instrument(symbol) else {
            continue;
        };
        let suggestion = match suggestion::suggest_strategy(instrument, config, oracle) {
            Ok(s) => s,
            Err(e) => return Err(report_failure(session, clock, e)),
        };
        if let Err(e) = session.activate_strategy(suggestion.params.clone(), clock.now()) {
            return Err(report_failure(session, clock, e));
        }
        activated.push(suggestion);
    }
    Ok(activated)
}

/// Log a failed activation to the session before handing the error back.
fn report_failure(session: &mut Session, clock: &dyn Clock, err: SmartTradeError) -> SmartTradeError {
    tracing::warn!(error = %err, "strategy activation failed");
    session.notify(
        NotificationKind::Error,
        format!("AI Agent: strategy activation failed. {err}"),
        clock.now(),
    );
    err
}

fn run_session(
    config_path: Option<&PathBuf>,
    holdings_path: Option<&PathBuf>,
    ticks: Option<u64>,
    seed_override: Option<u64>,
    strategy_list: Option<&str>,
) -> Result<(), SmartTradeError> {
    let settings = load_settings(config_path)?;
    let holdings = load_holdings(holdings_path)?;
    let clock = SystemClock;
    let oracle = CannedOracle::new(settings.api_key.clone());

    let mut session = Session::new(holdings, settings.session);
    let symbols = resolve_strategy_symbols(&settings.auto_activate, strategy_list)?;
    let activated = activate_suggested(
        &mut session,
        &symbols,
        &settings.suggestion,
        &oracle,
        &clock,
    )?;
    for suggestion in &activated {
        println!("{}", format_suggestion(suggestion));
    }

    let mut rng = make_rng(seed_override.or(settings.seed));
    let scheduler_config = SchedulerConfig {
        max_ticks: ticks,
        ..settings.scheduler
    };

    eprintln!(
        "Simulating {} holdings every {} ms (Ctrl-C to stop)",
        session.instruments().len(),
        scheduler_config.interval.as_millis()
    );
    println!("{}", format_summary(&session.summary()));

    let (ran, reason) = scheduler::run_until_interrupted(scheduler_config, |_| {
        let report = session.step(&mut rng, clock.now());
        println!("{}", format_tick(&report));
    })?;

    match reason {
        StopReason::TickLimit => eprintln!("\nStopped after {ran} ticks"),
        StopReason::Shutdown => eprintln!("\nInterrupted after {ran} ticks"),
    }
    print_final_state(&session);
    Ok(())
}

fn run_watch(
    config_path: Option<&PathBuf>,
    ticks: Option<u64>,
    seed_override: Option<u64>,
) -> Result<(), SmartTradeError> {
    let settings = load_settings(config_path)?;
    let mut watchlist = Portfolio::new(seed::default_watchlist());
    let ticker = MarketTicker::new(TickerConfig {
        update_probability: 1.0,
        volatility_divisor: settings.watchlist_divisor,
    });
    let mut rng = make_rng(seed_override.or(settings.seed));
    let scheduler_config = SchedulerConfig {
        max_ticks: ticks,
        ..settings.scheduler
    };

    for inst in watchlist.instruments() {
        println!("{}", format_quote(inst));
    }
    scheduler::run_until_interrupted(scheduler_config, |n| {
        ticker.tick_one(&mut watchlist, &mut rng);
        println!("-- tick {n}");
        for inst in watchlist.instruments() {
            println!("{}", format_quote(inst));
        }
    })?;
    Ok(())
}

fn run_suggest(
    symbol: &str,
    config_path: Option<&PathBuf>,
    holdings_path: Option<&PathBuf>,
) -> Result<(), SmartTradeError> {
    let settings = load_settings(config_path)?;
    let portfolio = Portfolio::new(load_holdings(holdings_path)?);
    let symbol = symbol.trim().to_uppercase();
    let instrument = portfolio
        .get(&symbol)
        .ok_or_else(|| SmartTradeError::UnknownSymbol {
            symbol: symbol.clone(),
        })?;
    let oracle = CannedOracle::new(settings.api_key);
    let suggestion = suggestion::suggest_strategy(instrument, &settings.suggestion, &oracle)?;
    println!("{}", format_suggestion(&suggestion));
    Ok(())
}

fn run_ask(
    prompt: &str,
    symbol: Option<&str>,
    sector: Option<&str>,
    config_path: Option<&PathBuf>,
) -> Result<(), SmartTradeError> {
    let settings = load_settings(config_path)?;
    let oracle = CannedOracle::new(settings.api_key);
    let answer = analyst::ask(&oracle, prompt, symbol, sector)?;
    println!("{answer}");
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), SmartTradeError> {
    let adapter = load_config(Some(config_path))?;
    let settings = build_settings(&adapter)?;

    eprintln!("Config validated successfully");
    eprintln!("  tick interval:      {} ms", settings.scheduler.interval.as_millis());
    eprintln!(
        "  update probability: {}",
        settings.session.ticker.update_probability
    );
    eprintln!(
        "  volatility divisor: {}",
        settings.session.ticker.volatility_divisor
    );
    eprintln!(
        "  strategy:           +{}% / -{}%",
        settings.suggestion.profit_target_pct, settings.suggestion.stop_loss_pct
    );
    if !settings.auto_activate.is_empty() {
        eprintln!("  auto-activate:      {}", settings.auto_activate.join(", "));
    }
    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

pub fn format_summary(summary: &SummaryData) -> String {
    format!(
        "Value: {:.2} | Today's P&L: {:+.2} ({:+.2}%) | Overall P&L: {:+.2} ({:+.2}%)",
        summary.current_value,
        summary.todays_pl,
        summary.todays_pl_pct,
        summary.total_pl,
        summary.total_pl_pct
    )
}

pub fn format_quote(inst: &Instrument) -> String {
    format!(
        "{:<12} {:>10.2} {:>+9.2} ({:+.2}%)",
        inst.symbol, inst.price, inst.change, inst.change_pct
    )
}

pub fn format_tick(report: &TickReport) -> String {
    let mut line = format!("[tick {}] {}", report.tick, format_summary(&report.summary));
    for closure in &report.closures {
        line.push_str(&format!(
            "\n  closed {} ({}) at {:.2}, P&L {:+.2}",
            closure.symbol, closure.reason, closure.exit_price, closure.pnl
        ));
    }
    line
}

pub fn format_suggestion(suggestion: &StrategySuggestion) -> String {
    let p = &suggestion.params;
    format!(
        "Strategy for {}: entry {:.2}, target {:.2}, stop-loss {:.2}, qty {}\n  {}",
        p.symbol,
        p.activation_price,
        p.target_price,
        p.stop_loss_price,
        p.quantity,
        suggestion.commentary
    )
}

fn print_final_state(session: &Session) {
    println!("\n=== Holdings ===");
    for inst in session.instruments() {
        println!(
            "{}  qty {:>5}  avg {:>10.2}  P&L {:+.2}",
            format_quote(inst),
            inst.quantity,
            inst.avg_price,
            inst.unrealized_pnl()
        );
    }

    println!("\n=== Automations ===");
    for rule in session.rules() {
        let detail = match rule.exit() {
            Some(exit) => format!("{} at {:.2}, P&L {:+.2}", exit.reason, exit.price, exit.pnl),
            None => format!(
                "target {:.2}, stop-loss {:.2}",
                rule.target_price, rule.stop_loss_price
            ),
        };
        println!("{:<12} {:<10} {}", rule.symbol, rule.status().to_string(), detail);
    }

    println!("\n=== Notifications ===");
    for event in session.notifications() {
        println!("{event}");
    }

    println!("\n{}", format_summary(&session.summary()));
}
