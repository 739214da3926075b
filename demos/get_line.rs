//! Index a file and print a single line of it
//!
//! cargo run --example get_line -- <file> <line>

use std::{env, fs::File, io::BufReader};

use line_getter::{Indexable, LineGetter, ReadByLine};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = env::args().skip(1);
    let path = args.next().ok_or("missing file argument")?;
    let line: u64 = args.next().ok_or("missing line argument")?.parse()?;

    // Open and index file
    let mut file = LineGetter::new(BufReader::new(File::open(&path)?))?;
    info!(lines = file.count(), "indexed {}", path);

    match file.get_line(line) {
        Ok(content) => println!("{}", String::from_utf8_lossy(&content)),
        Err(err) => {
            // Truncated or partially read lines are still worth showing
            if let Some(partial) = err.partial_content() {
                println!("{}", String::from_utf8_lossy(partial));
            }
            return Err(err.into());
        }
    }

    Ok(())
}
