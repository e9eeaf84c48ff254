//! OrderDesk CLI: headless access to the same order sheets as the TUI.
//!
//! Commands:
//! - `catalog`: list parties and items with their unit prices
//! - `list`: print pending and/or executed orders
//! - `create`: record a new pending order
//! - `execute`: move a pending order to executed

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use orderdesk_core::store::row::order_to_cells;
use orderdesk_core::{
    create_order, execute_order, DeskConfig, LocalClock, Order, OrderId, OrderInput, OrderKind,
    OrderStore,
};

#[derive(Parser)]
#[command(name = "orderdesk", about = "OrderDesk CLI: record and execute sales orders")]
struct Cli {
    /// Config file. Defaults to <config dir>/orderdesk/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the order sheets. Overrides the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List parties and items with unit prices.
    Catalog,
    /// Print orders.
    List {
        #[arg(value_enum, default_value_t = Scope::All)]
        scope: Scope,
    },
    /// Record a new pending order.
    Create {
        #[arg(long)]
        party: String,

        #[arg(long)]
        item: String,

        #[arg(long)]
        qty: String,

        /// Unit price. Defaults to the catalog price of the item.
        #[arg(long)]
        price: Option<String>,
    },
    /// Move a pending order to executed.
    Execute {
        /// Order id, e.g. ORD3.
        order_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scope {
    Pending,
    Executed,
    All,
}

impl Scope {
    fn kinds(self) -> &'static [OrderKind] {
        match self {
            Scope::Pending => &[OrderKind::Pending],
            Scope::Executed => &[OrderKind::Executed],
            Scope::All => &[OrderKind::Pending, OrderKind::Executed],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(cli.config, cli.data_dir)?;

    match cli.command {
        Commands::Catalog => run_catalog(&config, out),
        Commands::List { scope } => {
            let store = open_store(&config)?;
            run_list(&store, scope, out)
        }
        Commands::Create {
            party,
            item,
            qty,
            price,
        } => {
            let mut store = open_store(&config)?;
            let mut input = OrderInput::new(party, item, qty);
            input.price = price;
            let order = create_order(&mut store, &config.catalog, &LocalClock, &input)?;
            let cells = order_to_cells(&order);
            writeln!(
                out,
                "Created {}: {} x {} for {} = {}",
                order.order_id, cells[3], order.item, order.party, cells[5]
            )?;
            Ok(())
        }
        Commands::Execute { order_id } => {
            let mut store = open_store(&config)?;
            let order = execute_order(&mut store, Some(&OrderId::new(order_id)))?;
            writeln!(out, "Executed {}", order.order_id)?;
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<DeskConfig> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            DeskConfig::load(&path)?
        }
        None => match DeskConfig::default_path() {
            Some(path) => DeskConfig::load(&path)?,
            None => DeskConfig::default(),
        },
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

fn open_store(config: &DeskConfig) -> Result<OrderStore> {
    let sheets = config.sheet_store();
    OrderStore::open(sheets)
        .with_context(|| format!("opening order sheets in {}", config.data_dir.display()))
}

fn run_catalog(config: &DeskConfig, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Parties:")?;
    for party in config.catalog.parties() {
        writeln!(out, "  {party}")?;
    }
    writeln!(out)?;
    writeln!(out, "{:<16} {:>10}", "Item", "Price")?;
    writeln!(out, "{}", "-".repeat(27))?;
    for item in &config.catalog.items {
        writeln!(out, "{:<16} {:>10}", item.name, item.price.normalize())?;
    }
    Ok(())
}

fn run_list(store: &OrderStore, scope: Scope, out: &mut dyn Write) -> Result<()> {
    for (i, kind) in scope.kinds().iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let orders = store.orders(*kind);
        writeln!(out, "{} orders: {}", capitalize(kind.label()), orders.len())?;
        if orders.is_empty() {
            continue;
        }
        writeln!(
            out,
            "{:<8} {:<20} {:<12} {:>5} {:>9} {:>11} {:<10} {:<8}",
            "Id", "Party", "Item", "Qty", "Price", "Total", "Date", "Time"
        )?;
        writeln!(out, "{}", "-".repeat(90))?;
        for order in orders {
            write_order(out, order)?;
        }
    }
    Ok(())
}

fn write_order(out: &mut dyn Write, order: &Order) -> io::Result<()> {
    let [id, party, item, qty, price, total, date, time] = order_to_cells(order);
    writeln!(
        out,
        "{:<8} {:<20} {:<12} {:>5} {:>9} {:>11} {:<10} {:<8}",
        id, party, item, qty, price, total, date, time
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::DeskError;

    fn cli(dir: &std::path::Path, args: &[&str]) -> Cli {
        let config = dir.join("config.toml");
        std::fs::write(&config, "format = \"csv\"\n").unwrap();
        let mut argv = vec![
            "orderdesk".to_string(),
            "--config".to_string(),
            config.display().to_string(),
            "--data-dir".to_string(),
            dir.display().to_string(),
        ];
        argv.extend(args.iter().map(|s| s.to_string()));
        Cli::try_parse_from(argv).unwrap()
    }

    fn run_capture(dir: &std::path::Path, args: &[&str]) -> Result<String> {
        let mut out = Vec::new();
        run(cli(dir, args), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_create_with_optional_price() {
        let cli = Cli::try_parse_from([
            "orderdesk", "create", "--party", "Aman Traders", "--item", "CORN", "--qty", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Create { price, qty, .. } => {
                assert_eq!(qty, "3");
                assert!(price.is_none());
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn list_scope_defaults_to_all() {
        let cli = Cli::try_parse_from(["orderdesk", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List { scope: Scope::All }));
        assert!(Cli::try_parse_from(["orderdesk", "list", "archived"]).is_err());
    }

    #[test]
    fn create_list_execute() {
        let dir = tempfile::tempdir().unwrap();

        let created = run_capture(
            dir.path(),
            &["create", "--party", "Aman Traders", "--item", "CORN", "--qty", "3"],
        )
        .unwrap();
        assert!(created.starts_with("Created ORD1: 3 x CORN"));
        assert!(dir.path().join("pending_orders.csv").exists());

        let listed = run_capture(dir.path(), &["list", "pending"]).unwrap();
        assert!(listed.contains("Pending orders: 1"));
        assert!(listed.contains("ORD1"));

        let executed = run_capture(dir.path(), &["execute", "ORD1"]).unwrap();
        assert_eq!(executed.trim(), "Executed ORD1");

        let listed = run_capture(dir.path(), &["list"]).unwrap();
        assert!(listed.contains("Pending orders: 0"));
        assert!(listed.contains("Executed orders: 1"));
    }

    #[test]
    fn invalid_create_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_capture(
            dir.path(),
            &["create", "--party", "Nobody", "--item", "CORN", "--qty", "3"],
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeskError>(),
            Some(DeskError::InvalidOrderInput)
        ));
    }

    #[test]
    fn oversized_price_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_capture(
            dir.path(),
            &[
                "create", "--party", "Aman Traders", "--item", "CORN", "--qty", "10", "--price",
                "9999999999999999999999999999",
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeskError>(),
            Some(DeskError::InvalidOrderInput)
        ));
    }

    #[test]
    fn list_shows_partial_rows() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("pending_orders.csv"),
            "Order Id,Party,Item,Qty,Price,Total,Order Date,Order Time\n\
             ORD2,Sai Traders,WHEAT,,45,,2024-03-09,14:06:00\n",
        )
        .unwrap();

        let listed = run_capture(dir.path(), &["list", "pending"]).unwrap();
        assert!(listed.contains("Pending orders: 1"));
        assert!(listed.contains("ORD2"));
    }

    #[test]
    fn execute_unknown_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_capture(dir.path(), &["execute", "ORD42"]).unwrap_err();
        assert!(err.to_string().contains("ORD42"));
    }

    #[test]
    fn catalog_lists_prices() {
        let dir = tempfile::tempdir().unwrap();
        let text = run_capture(dir.path(), &["catalog"]).unwrap();
        assert!(text.contains("MUKESH WHOLSALER"));
        assert!(text.lines().any(|l| l.starts_with("SOFT DRINK") && l.ends_with("25")));
    }

    #[test]
    fn missing_explicit_config_fails() {
        let err = load_config(Some(PathBuf::from("/nonexistent/orderdesk.toml")), None).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
