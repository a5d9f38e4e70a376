use sparse_life::*;

fn main() -> anyhow::Result<()> {
    // stepping the same soup with every engine
    let soup = Pattern::random(Rule::STANDARD_LIFE, 512, 512, 0.3, Some(42))?;
    let mut engines: Vec<(&str, Box<dyn LifeEngine>)> = vec![
        ("sparse", Box::new(SparseEngine::new())),
        ("quicklife", Box::new(QuickLifeEngine::new())),
    ];
    for (name, engine) in engines.iter_mut() {
        engine.load_pattern(&soup);
        for generations in [10, 100, 1000] {
            let timer = std::time::Instant::now();
            let done = engine.run(generations);
            println!(
                "{name}\t{done} gens -> {:?}\tpopulation={}",
                timer.elapsed().as_secs_f64(),
                engine.population()
            );
        }
    }
    Ok(())
}
