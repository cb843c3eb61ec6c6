//! Example: forward likelihood and Viterbi decoding for a weather HMM.
//!
//! Run with:
//! `cargo run --example weather`

use hmm_lattice::{HmmEngine, ModelTables};

fn main() {
    // Two hidden weather regimes, observed through a noisy sensor.
    //
    // States: sunny, rainy
    // Observations: observed-sun, observed-rain
    let tables = ModelTables {
        observation_states: vec!["observed-sun", "observed-rain"],
        hidden_states: vec!["sunny", "rainy"],
        prior: vec![0.6, 0.4],
        transition: vec![vec![0.55, 0.45], vec![0.3, 0.7]],
        emission: vec![
            vec![0.65, 0.35], // sunny mostly reads as sun
            vec![0.15, 0.85], // rainy mostly reads as rain
        ],
    };

    let engine = match HmmEngine::new(tables) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("weather: {err}");
            std::process::exit(2);
        }
    };

    let obs = [
        "observed-sun",
        "observed-rain",
        "observed-rain",
        "observed-sun",
    ];

    match engine.forward(&obs) {
        Ok(p) => println!("Sequence likelihood: {p:.6}"),
        Err(err) => eprintln!("forward failed: {err}"),
    }

    match engine.decode(&obs) {
        Ok(best) => {
            println!("Best path probability: {:.6}", best.probability);
            println!("State sequence:");
            for (t, (symbol, state)) in obs.iter().zip(&best.states).enumerate() {
                println!("  t = {t:2}, observed = {symbol:<13}, state = {state}");
            }
        }
        Err(err) => eprintln!("viterbi failed: {err}"),
    }

    if let Err(err) = engine.forward(&["observed-sun", "observed-snow"]) {
        println!("Rejected: {err}");
    }
}
