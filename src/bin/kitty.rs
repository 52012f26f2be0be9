//! Kitty CLI — inspect and trade kitties in a local registry
//!
//! Commands:
//!   kitty info      — registry name, symbol, addresses, supply
//!   kitty account   — print a fresh (or label-derived) address
//!   kitty mint      — admin mint of a gen-0 kitty
//!   kitty show      — print a kitty record
//!   kitty balance   — number of kitties an address holds
//!   kitty owner     — owner of a kitty
//!   kitty tokens    — ids held by an address
//!   kitty transfer  — move a kitty to a new owner
//!   kitty events    — print the event log
//!   kitty verify    — check registry invariants and the event chain

use kitty_core::registry::RegistryEvent;
use kitty_core::{
    Address, KittyId, KittyRegistry, NewKitty, RegistryConfig, RegistryStore, SharedRegistry,
};
use std::env;
use std::process;

const STORE_FILE: &str = "kitty-store.json";
const CONFIG_FILE: &str = "kitty-config.json";

fn print_usage() {
    println!(
        r#"
Kitty Token (CAT) — ownership registry

Usage: kitty <command> [options]

Commands:
  info                                        Show registry details
  account    [label]                          Print a random or label-derived address
  mint       <caller> <owner> <genes>         Mint a gen-0 kitty (admin only)
  show       <id>                             Show a kitty
  balance    <address>                        Count kitties held by an address
  owner      <id>                             Show the owner of a kitty
  tokens     <address>                        List kitties held by an address
  transfer   <caller> <to> <id>               Transfer a kitty
  events     [id]                             Print the event log
  verify                                      Check registry invariants

Environment:
  KITTY_STORE   registry file (default {store})
  KITTY_CONFIG  config file   (default {config})
  RUST_LOG      log filter    (default info)
"#,
        store = STORE_FILE,
        config = CONFIG_FILE,
    );
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "info" => cmd_info(),
        "account" => cmd_account(&args[2..]),
        "mint" => cmd_mint(&args[2..]).await,
        "show" => cmd_show(&args[2..]),
        "balance" => cmd_balance(&args[2..]),
        "owner" => cmd_owner(&args[2..]),
        "tokens" => cmd_tokens(&args[2..]),
        "transfer" => cmd_transfer(&args[2..]).await,
        "events" => cmd_events(&args[2..]),
        "verify" => cmd_verify(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn store_path() -> String {
    env::var("KITTY_STORE").unwrap_or_else(|_| STORE_FILE.to_string())
}

fn config_path() -> String {
    env::var("KITTY_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string())
}

/// Load the registry, or create one from the config file
fn load_registry() -> Result<KittyRegistry, Box<dyn std::error::Error>> {
    let config = RegistryConfig::load_or_default(config_path())?;
    let registry = RegistryStore::load_or_new(store_path(), config)?;
    Ok(registry)
}

fn save_registry(registry: &KittyRegistry) -> CliResult {
    let info = RegistryStore::save(store_path(), registry)?;
    println!("  Saved to {} (checksum {})", store_path(), &info.checksum[..16]);
    Ok(())
}

fn usage_error(usage: &str) -> Box<dyn std::error::Error> {
    format!("usage: {}", usage).into()
}

fn parse_address(s: &str) -> Result<Address, Box<dyn std::error::Error>> {
    s.parse::<Address>()
        .map_err(|e| format!("invalid address '{}': {}", s, e).into())
}

fn parse_u64(s: &str, what: &str) -> Result<u64, Box<dyn std::error::Error>> {
    s.parse::<u64>()
        .map_err(|_| format!("{} must be a non-negative integer, got '{}'", what, s).into())
}

fn cmd_info() -> CliResult {
    let registry = load_registry()?;
    let config = registry.config();
    println!("\n  {} ({})", registry.name(), registry.symbol());
    println!("  {}", "=".repeat(40));
    println!("  Registry:     {}", config.contract_address);
    println!("  Admin:        {}", config.admin);
    println!("  Supply:       {}", registry.total_supply());
    println!("  Gen-0:        {}/{}", registry.gen0_count(), config.gen0_limit);
    println!("  Events:       {}", registry.events().len());
    println!("  Head hash:    {}", registry.events().head_hash());
    Ok(())
}

fn cmd_account(args: &[String]) -> CliResult {
    let address = match args.first() {
        Some(label) => Address::derive(label),
        None => Address::random(),
    };
    println!("{}", address);
    Ok(())
}

async fn cmd_mint(args: &[String]) -> CliResult {
    if args.len() < 3 {
        return Err(usage_error("kitty mint <caller> <owner> <genes>"));
    }
    let caller = parse_address(&args[0])?;
    let owner = parse_address(&args[1])?;
    let genes = parse_u64(&args[2], "genes")?;

    let shared = SharedRegistry::new(load_registry()?);
    let id = shared.mint(caller, owner, NewKitty::gen0(genes)).await?;
    println!("\n  {}", shared.get_kitty(id).await.summary(id));

    let registry = shared.snapshot().await;
    save_registry(&registry)
}

fn cmd_show(args: &[String]) -> CliResult {
    let id = parse_u64(args.first().ok_or_else(|| usage_error("kitty show <id>"))?, "id")?;
    let registry = load_registry()?;
    let kitty = registry.get_kitty(id);
    println!("\n  {}", kitty.summary(id));
    if !kitty.is_owned() {
        println!("  (unowned)");
    }
    Ok(())
}

fn cmd_balance(args: &[String]) -> CliResult {
    let owner = parse_address(args.first().ok_or_else(|| usage_error("kitty balance <address>"))?)?;
    let registry = load_registry()?;
    println!("{}", registry.balance_of(owner));
    Ok(())
}

fn cmd_owner(args: &[String]) -> CliResult {
    let id = parse_u64(args.first().ok_or_else(|| usage_error("kitty owner <id>"))?, "id")?;
    let registry = load_registry()?;
    println!("{}", registry.owner_of(id)?);
    Ok(())
}

fn cmd_tokens(args: &[String]) -> CliResult {
    let owner = parse_address(args.first().ok_or_else(|| usage_error("kitty tokens <address>"))?)?;
    let registry = load_registry()?;
    let ids = registry.tokens_of_owner(owner);
    if ids.is_empty() {
        println!("\n  {} holds no kitties", owner);
        return Ok(());
    }
    println!("\n  Kitties held by {} ({}):", owner, ids.len());
    for id in ids {
        println!("  {}", registry.get_kitty(id).summary(id));
    }
    Ok(())
}

async fn cmd_transfer(args: &[String]) -> CliResult {
    if args.len() < 3 {
        return Err(usage_error("kitty transfer <caller> <to> <id>"));
    }
    let caller = parse_address(&args[0])?;
    let to = parse_address(&args[1])?;
    let id: KittyId = parse_u64(&args[2], "id")?;

    let shared = SharedRegistry::new(load_registry()?);
    let event = shared.transfer(caller, to, id).await?;
    println!(
        "\n  Transfer: kitty {} {} -> {}",
        event.id, event.from, event.to
    );
    println!(
        "  Balances: {} = {}, {} = {}",
        event.from.short(),
        shared.balance_of(event.from).await,
        event.to.short(),
        shared.balance_of(event.to).await
    );

    let registry = shared.snapshot().await;
    save_registry(&registry)
}

fn cmd_events(args: &[String]) -> CliResult {
    let filter = args.first().map(|s| parse_u64(s, "id")).transpose()?;
    let registry = load_registry()?;
    let records: Vec<_> = match filter {
        Some(id) => registry.events().for_kitty(id),
        None => registry.events().records().iter().collect(),
    };
    if records.is_empty() {
        println!("\n  No events.");
        return Ok(());
    }
    println!("\n  Events ({}):", records.len());
    println!("  {}", "-".repeat(80));
    for record in records {
        let line = match &record.event {
            RegistryEvent::Birth { owner, id, mum_id, dad_id, genes } => format!(
                "Birth    kitty {} -> {} (mum={}, dad={}, genes={})",
                id,
                owner.short(),
                mum_id,
                dad_id,
                genes
            ),
            RegistryEvent::Transfer(t) => format!(
                "Transfer kitty {} {} -> {}",
                t.id,
                t.from.short(),
                t.to.short()
            ),
        };
        println!(
            "  #{:<4} {} [{}] {}",
            record.seq,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            &record.hash[..12],
            line
        );
    }
    Ok(())
}

fn cmd_verify() -> CliResult {
    let registry = load_registry()?;
    let violations = registry.check_invariants();
    println!("\n  {}", registry.summary());
    if violations.is_empty() {
        println!("  OK: all invariants hold, event chain verified");
        Ok(())
    } else {
        for v in &violations {
            println!("  VIOLATION: {}", v);
        }
        Err(format!("{} invariant violation(s)", violations.len()).into())
    }
}
