use crate::exceptions::CodepatchError;
use crate::fs::read_input;
use crate::tokens::TokenCounter;
use std::path::PathBuf;

pub fn run(paths: Vec<PathBuf>) -> Result<(), CodepatchError> {
    if paths.is_empty() {
        let text = read_input(None)?;
        let mut counter = TokenCounter::new();
        counter.add_str(&text);
        println!("{}", counter.count());
        return Ok(());
    }

    let mut total = TokenCounter::new();
    for path in &paths {
        let text = read_input(Some(path.as_path()))?;
        let mut counter = TokenCounter::new();
        counter.add_str(&text);
        total.add_str(&text);
        println!("{:>8}  {}", counter.count(), path.display());
    }
    if paths.len() > 1 {
        println!("{:>8}  total", total.count());
    }
    Ok(())
}
