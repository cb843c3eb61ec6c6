#![cfg(feature = "heavy")]
use hmm_lattice::{HmmEngine, ModelTables};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn demo_engine() -> HmmEngine<u8, u8> {
    HmmEngine::new(ModelTables {
        observation_states: vec![0, 1],
        hidden_states: vec![0, 1],
        prior: vec![0.5, 0.5],
        transition: vec![vec![0.9, 0.1], vec![0.2, 0.8]],
        emission: vec![vec![0.8, 0.2], vec![0.3, 0.7]],
    })
    .unwrap()
}

fn random_obs(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..2)).collect()
}

#[test]
fn heavy_stress_long_sequence() {
    let mut rng = StdRng::seed_from_u64(123);
    let obs = random_obs(&mut rng, 200_000);
    let engine = demo_engine();

    // Plain probabilities underflow; the log modes stay finite.
    assert_eq!(engine.forward(&obs).unwrap(), 0.0);
    let log_p = engine.log_forward(&obs).unwrap();
    assert!(log_p.is_finite() && log_p < 0.0);

    let decoded = engine.log_viterbi(&obs).unwrap();
    assert_eq!(decoded.states.len(), obs.len());
    assert!(decoded.probability.is_finite());
    assert!(decoded.probability <= log_p);
}
