//! Tree command - load Panem and show the district tree

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hungergames_core::{load_panem, District, DistrictTree, Parity};

#[derive(Args)]
pub struct TreeArgs {
    /// Panem input file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

/// Insert every district in input order and print the tree
pub fn run(args: TreeArgs) -> Result<()> {
    let districts = load_panem(&args.input)
        .with_context(|| format!("Failed to load Panem from {}", args.input.display()))?;
    let tree: DistrictTree = districts.into_iter().collect();

    println!("Districts: {}  height: {}", tree.len(), tree.height());
    println!("\n{:>8} {:>6} {:>6} {:>8}", "district", "odd", "even", "tessera");
    for district in tree.in_order() {
        println!(
            "{:>8} {:>6} {:>6} {:>8}",
            district.id(),
            district.population(Parity::Odd).len(),
            district.population(Parity::Even).len(),
            tessera_count(district)
        );
    }

    let preorder: Vec<String> = tree.preorder().map(|d| d.id().to_string()).collect();
    println!("\nPreorder: {}", preorder.join(" "));

    Ok(())
}

fn tessera_count(district: &District) -> usize {
    [Parity::Odd, Parity::Even]
        .into_iter()
        .flat_map(|parity| district.population(parity))
        .filter(|p| p.has_tessera())
        .count()
}
