//! Cache statistics report
//!
//! Shows how well the persisted cache covers the catalog without running
//! the resolver.

use crate::cache::{coverage, CacheCoverage, CacheMapping};

/// Computes catalog coverage for a loaded cache
pub fn load_statistics(mapping: &CacheMapping, catalog: &[String]) -> CacheCoverage {
    coverage(mapping, catalog)
}

/// Prints cache statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CacheCoverage, catalog_size: usize) {
    println!("=== Thumbnail Cache Statistics ===\n");

    println!("Overview:");
    println!("  Cache entries: {}", stats.entries);
    println!("  Catalog products: {}", catalog_size);

    let percentage = if catalog_size > 0 {
        (stats.covered as f64 / catalog_size as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  Coverage: {:.1}% ({} / {} products have a thumbnail)",
        percentage, stats.covered, catalog_size
    );
    println!();

    if !stats.missing.is_empty() {
        println!("Missing Thumbnails ({}):", stats.missing.len());
        for url in &stats.missing {
            println!("  - {}", url);
        }
        println!();
    }

    if !stats.orphaned.is_empty() {
        println!("Entries Not In Catalog ({}):", stats.orphaned.len());
        for url in &stats.orphaned {
            println!("  - {}", url);
        }
        println!();
    }
}
