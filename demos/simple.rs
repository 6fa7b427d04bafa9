//! Builds the reference filter and prints three membership checks.
use hashchain_bloom::hash::{Djb2, OneAtATime};
use hashchain_bloom::BloomFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut bf = BloomFilter::<str>::with_size(8)?;
    bf.add_hash(Djb2)?;
    bf.add_hash(OneAtATime)?;

    println!("Should be false: {}", bf.contains("hello world"));
    bf.insert("hello world");
    println!("Should be true: {}", bf.contains("hello world"));
    println!("Should (probably) be false: {}", bf.contains("world hello"));

    Ok(())
}
