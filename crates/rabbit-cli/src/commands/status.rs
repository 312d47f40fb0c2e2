//! Show the storage root and per-kind day file coverage.

use anyhow::Result;
use chrono::NaiveDate;
use rabbit_core::{
    CommandRecord, FileRecord, LaunchRecord, LogRecord, PerspectiveRecord, TaskFileRecord,
};
use rabbit_store::DataStore;

use crate::config::Config;

/// Prints how much data each kind has accumulated.
pub fn run(config: &Config) -> Result<()> {
    println!("storage root: {}", config.storage_root.display());
    println!("display window: {} days", config.window_days);
    println!();

    print_kind::<FileRecord>(config);
    print_kind::<CommandRecord>(config);
    print_kind::<PerspectiveRecord>(config);
    print_kind::<LaunchRecord>(config);
    print_kind::<TaskFileRecord>(config);
    Ok(())
}

fn print_kind<R: LogRecord>(config: &Config) {
    let store = DataStore::<R>::new(&config.storage_root);
    let dates = store.dates_in_range(NaiveDate::MIN, NaiveDate::MAX);
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => {
            println!(
                "{:<13} {:>4} days  {first} to {last}",
                R::KIND,
                dates.len()
            );
        }
        _ => println!("{:<13}    0 days", R::KIND),
    }
}
