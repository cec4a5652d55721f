use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bintree::{Order, Tree};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bintree",
    about = "Build a binary tree from a preorder file and run operations on it"
)]
struct Cli {
    /// File holding the tree in preorder, one character per node, with the
    /// sentinel marking each missing child (e.g. `AB$$C$$`).
    input: PathBuf,
    /// Character that marks a missing child.
    #[arg(long, default_value_t = '$')]
    sentinel: char,
    /// Values to insert, in order, after the tree is built.
    #[arg(long = "insert", value_name = "CHAR")]
    inserts: Vec<char>,
    /// Values to delete, in order, after the inserts.
    #[arg(long = "delete", value_name = "CHAR")]
    deletes: Vec<char>,
    /// Values to look up once all edits are done.
    #[arg(long = "search", value_name = "CHAR")]
    searches: Vec<char>,
    /// Traversals to print: pre, in, post or level (full names such as
    /// `preorder` or `level-order` work too). Defaults to all four.
    #[arg(long = "order", value_name = "ORDER")]
    orders: Vec<Order>,
    /// Also print the mirror image and check it against the tree.
    #[arg(long)]
    mirror: bool,
    /// Log more (repeat for even more). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut tree = Tree::from_path(&cli.input, cli.sentinel).with_context(|| {
        format!("no tree produced from {}", cli.input.display())
    })?;
    log::info!("loaded {} nodes from {}", tree.len(), cli.input.display());

    for value in &cli.inserts {
        tree.insert(*value);
    }
    for value in &cli.deletes {
        if tree.delete(value).is_none() {
            log::warn!("{:?} not in tree, nothing deleted", value);
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report(&tree, &cli, &mut out).context("failed to write report")?;

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn report<W: Write>(tree: &Tree<char>, cli: &Cli, out: &mut W) -> io::Result<()> {
    let orders: Vec<Order> = if cli.orders.is_empty() {
        Order::ALL.to_vec()
    } else {
        cli.orders.clone()
    };

    writeln!(out, "encoded: {}", tree.encode(cli.sentinel))?;
    for order in orders {
        write!(out, "{}: ", order)?;
        tree.write_traversal(order, out)?;
    }

    writeln!(out, "height: {}", tree.height())?;
    writeln!(out, "nodes: {}", tree.count_nodes())?;
    writeln!(out, "leaves: {}", tree.count_leaves())?;
    match tree.max_value() {
        Some(max) => writeln!(out, "max: {}", max)?,
        None => writeln!(out, "max: (empty tree)")?,
    }

    for key in &cli.searches {
        let found = if tree.contains(key) { "found" } else { "not found" };
        writeln!(out, "search {}: {}", key, found)?;
    }

    if cli.mirror {
        let image = tree.mirrored();
        write!(out, "mirror: ")?;
        image.write_traversal(Order::Preorder, out)?;
        writeln!(out, "is mirror: {}", tree.is_mirror_of(&image))?;
    }

    Ok(())
}
