use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tinv::item::{ItemDefinition, ItemPrefix, ItemRegistry};
use tinv::save::{DecodedInventory, PLAYER_INVENTORY_SLOTS};
use tinv::{EditorConfig, Inventory, SaveManager};

// === Clap === //

#[derive(Debug, Clone, Parser)]
#[command(about = "inventory editor for Terraria player saves", long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long = "config", name = "path to config")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum CliCommand {
    /// Print every occupied slot of an inventory file
    Inspect(CliFileCommand),
    /// Print an item definition by id or name
    Lookup(CliLookupCommand),
    /// Put an item into one slot and save the file
    Set(CliSetCommand),
    /// Print an inventory file as JSON
    Export(CliFileCommand),
}

#[derive(Debug, Clone, Args)]
struct CliFileCommand {
    file: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct CliLookupCommand {
    /// NetId or display name
    item: String,
}

#[derive(Debug, Clone, Args)]
struct CliSetCommand {
    file: PathBuf,
    #[arg(long)]
    slot: usize,
    #[arg(long, allow_hyphen_values = true)]
    item: i32,
    #[arg(long, default_value_t = 1)]
    stack: i32,
    #[arg(long, default_value_t = 0)]
    prefix: u8,
    #[arg(long)]
    favourite: bool,
}

// === Driver === //

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("INFO"));

    let cmd = CliArgs::parse();

    let config = EditorConfig::load_or_default(cmd.config.as_deref())
        .context("failed to load editor config")?;
    let registry = config
        .build_registry()
        .context("failed to build the item registry")?;

    match &cmd.command {
        CliCommand::Inspect(sub) => do_inspect(&config, &registry, sub)?,
        CliCommand::Lookup(sub) => do_lookup(&registry, sub)?,
        CliCommand::Set(sub) => do_set(&config, &registry, sub)?,
        CliCommand::Export(sub) => do_export(&config, &registry, sub)?,
    };

    Ok(())
}

fn open_manager(config: &EditorConfig) -> anyhow::Result<SaveManager> {
    SaveManager::new(&config.save_directory, config.backup_keep_count)
        .with_context(|| format!("failed to open save directory {}", config.save_directory.display()))
}

fn do_inspect(config: &EditorConfig, registry: &ItemRegistry, sub: &CliFileCommand) -> anyhow::Result<()> {
    let manager = open_manager(config)?;
    let decoded = manager.load(&sub.file, registry)?;

    println!("{} (release {}, {} slots)", sub.file.display(), decoded.release, decoded.inventory.len());
    for slot in decoded.inventory.iter_items() {
        let name = if slot.name().is_empty() { "<unknown item>" } else { slot.name() };
        let favourite = if slot.is_favourite() { " *" } else { "" };
        let prefix = if slot.prefix().is_none() { String::new() } else { format!("{} ", slot.prefix()) };
        let kind = match (slot.definition().is_weapon(), slot.definition().is_tool()) {
            (true, true) => " [weapon, tool]",
            (true, false) => " [weapon]",
            (false, true) => " [tool]",
            (false, false) => "",
        };

        println!(
            "  [{:>2}] {}{} x{} (id {}){}{}",
            slot.slot_index(),
            prefix,
            name,
            slot.stack_size(),
            slot.net_id(),
            kind,
            favourite
        );
    }

    for warning in &decoded.warnings {
        println!("  warning: {}", warning);
    }

    Ok(())
}

fn do_lookup(registry: &ItemRegistry, sub: &CliLookupCommand) -> anyhow::Result<()> {
    let definition: Option<&ItemDefinition> = match sub.item.parse::<i32>() {
        Ok(net_id) => registry.lookup(net_id),
        Err(_) => registry.find_by_name(&sub.item),
    };

    let Some(definition) = definition else {
        bail!("no item matches '{}'", sub.item);
    };

    println!("{}", serde_json::to_string_pretty(definition)?);
    Ok(())
}

fn do_set(config: &EditorConfig, registry: &ItemRegistry, sub: &CliSetCommand) -> anyhow::Result<()> {
    let manager = open_manager(config)?;

    let DecodedInventory { release, mut inventory, .. } = if manager.exists(&sub.file) {
        manager.load(&sub.file, registry)?
    } else {
        log::info!("{} does not exist, creating a new inventory", sub.file.display());
        DecodedInventory {
            release: config.release,
            inventory: Inventory::new(PLAYER_INVENTORY_SLOTS),
            warnings: Vec::new(),
        }
    };

    let slot = inventory.set_item(sub.slot, registry, sub.item, sub.stack, ItemPrefix(sub.prefix))?;
    if slot.stack_size() != sub.stack {
        log::warn!("stack of {} clamped to {}", slot.name(), slot.stack_size());
    }
    inventory.set_favourite(sub.slot, sub.favourite)?;

    let path = manager.save(&sub.file, &inventory, release)?;
    println!("Saved {}", path.display());

    Ok(())
}

fn do_export(config: &EditorConfig, registry: &ItemRegistry, sub: &CliFileCommand) -> anyhow::Result<()> {
    let manager = open_manager(config)?;
    let decoded = manager.load(&sub.file, registry)?;

    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}
