use wordgraph_core::model::normalizer::normalize;
use wordgraph_core::store::{FileStore, MemoryStore};
use wordgraph_core::{AutoComplete, Error, TrainOutcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The normalizer lowercases, strips punctuation and digits, then splits on whitespace
    println!("Tokens: {:?}", normalize("I want a cat. I want 2 dogs!"));

    // An in-memory store: nothing survives the process
    let mut app = AutoComplete::new(MemoryStore::new());

    // Each training call folds the corpus into the graph
    app.train("I want a cat. I want a dog.")?;

    // Prediction is the most frequent successor; on a tie, the first one to reach the count
    for word in ["I", "want", "a"] {
        println!("{} -> {}", word, app.complete(word)?);
    }

    // A second corpus accumulates on top of the first one
    app.train("A dog barks. A dog runs.")?;
    println!("a -> {} (after a second corpus)", app.complete("a")?);

    // Corpora with fewer than two words are a no-op, not an error
    if let TrainOutcome::Empty = app.train("Hello!!!")? {
        println!("Nothing to learn from a single word");
    }

    // Unknown words are reported as such, the caller picks a fallback
    match app.complete("unseenword") {
        Err(Error::NotFound { word }) => println!("No prediction for '{}'", word),
        _ => println!("Should not happen"),
    }

    // Dropping clears both collections
    app.drop_all()?;
    println!("After drop: {:?}", app.complete("i").unwrap_or_default());

    // The same logic over a folder: one file per collection in ./data
    let mut persistent = AutoComplete::new(FileStore::open("./data")?);
    persistent.train("the quick brown fox jumps over the lazy dog")?;
    println!("the -> {}", persistent.complete("the")?);

    // Re-derive the prediction index from the adjacency counts
    println!("Rebuilt {} predictions", persistent.rebuild_predictions()?);

    Ok(())
}
